use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::utils::random::random_int_inclusive;

/// Swaps two distinct random siblings. Returns the swapped positions, or
/// `None` when there are fewer than two elements.
pub fn exchange_portfolio_elements<T, R: Rng + ?Sized>(rng: &mut R, elements: &mut [T]) -> Option<(usize, usize)> {
    if elements.len() < 2 {
        warn!("Exchange is not possible!");
        return None;
    }

    let last = elements.len() - 1;
    let first = random_int_inclusive(rng, 0, last);
    // Draw from the other positions so the pair is always distinct.
    let mut second = random_int_inclusive(rng, 0, last - 1);
    if second >= first {
        second += 1;
    }

    elements.swap(first, second);
    debug!("Exchanged portfolio elements {} and {}", first, second);
    Some((first, second))
}

/// Exchanges two grid elements every `period` until the task is aborted.
pub fn spawn_shuffler<T>(grid: Arc<Mutex<Vec<T>>>, period: Duration) -> JoinHandle<()>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            match grid.lock() {
                Ok(mut elements) => {
                    exchange_portfolio_elements(&mut rng, elements.as_mut_slice());
                }
                Err(_) => {
                    warn!("portfolio grid lock poisoned; stopping shuffler");
                    return;
                }
            }
        }
    })
}
