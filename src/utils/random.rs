use rand::Rng;
use std::time::Duration;
use thiserror::Error;

pub const ONE_SEC: Duration = Duration::from_millis(1000);
pub const TWO_SECS: Duration = Duration::from_millis(2000);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("impossible to supply {required} distinct values, only {available} available")]
    OutOfRange { required: usize, available: usize },
}

/// Uniform integer in `[min, max]`, both ends included.
pub fn random_int_inclusive<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    rng.gen_range(min..=max)
}

/// Draws `required` distinct values from `pool`, none of them in `excluded`.
///
/// Every draw joins the exclusion set, so no value comes back twice. Duplicates
/// inside `pool` count as a single candidate. Fails without returning anything
/// when the pool cannot supply enough distinct values.
pub fn distinct_random_values_excluding<T, R>(
    rng: &mut R,
    pool: &[T],
    required: usize,
    excluded: &[T],
) -> Result<Vec<T>, SampleError>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let mut excluded: Vec<T> = excluded.to_vec();
    let mut picked = Vec::with_capacity(required);

    for gathered in 0..required {
        let mut valid: Vec<&T> = Vec::new();
        for value in pool {
            if !excluded.contains(value) && !valid.contains(&value) {
                valid.push(value);
            }
        }

        let missing = required - gathered;
        if valid.len() < missing {
            return Err(SampleError::OutOfRange {
                required,
                available: gathered + valid.len(),
            });
        }

        let value = valid[random_int_inclusive(rng, 0, valid.len() - 1)].clone();
        excluded.push(value.clone());
        picked.push(value);
    }

    Ok(picked)
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    shuffle_tracking(rng, items, 0);
}

/// Fisher-Yates shuffle that follows the element starting at `tracked` and
/// returns where it ends up.
pub fn shuffle_tracking<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T], mut tracked: usize) -> usize {
    let mut current = items.len();
    while current > 1 {
        let random = rng.gen_range(0..current);
        current -= 1;
        items.swap(current, random);
        if tracked == current {
            tracked = random;
        } else if tracked == random {
            tracked = current;
        }
    }
    tracked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_int_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = random_int_inclusive(&mut rng, 3, 6);
            assert!((3..=6).contains(&v));
        }
        assert_eq!(random_int_inclusive(&mut rng, 4, 4), 4);
    }

    #[test]
    fn samples_subset_without_excluded_values() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = distinct_random_values_excluding(&mut rng, &[0, 1, 2, 3, 4], 3, &[2]).unwrap();
            assert_eq!(picked.len(), 3);
            assert!(!picked.contains(&2));
            for (i, a) in picked.iter().enumerate() {
                assert!([0, 1, 3, 4].contains(a));
                assert!(picked[i + 1..].iter().all(|b| b != a), "repeat in {picked:?}");
            }
        }
    }

    #[test]
    fn takes_every_remaining_value_when_pool_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut picked =
            distinct_random_values_excluding(&mut rng, &["a", "b", "c", "d"], 3, &["c"]).unwrap();
        picked.sort_unstable();
        assert_eq!(picked, vec!["a", "b", "d"]);
    }

    #[test]
    fn duplicate_pool_entries_count_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = distinct_random_values_excluding(&mut rng, &[1, 1, 1, 2], 3, &[]).unwrap_err();
        assert_eq!(err, SampleError::OutOfRange { required: 3, available: 2 });
    }

    #[test]
    fn insufficient_candidates_fail() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = distinct_random_values_excluding(&mut rng, &[0, 1, 2], 3, &[1]).unwrap_err();
        assert_eq!(err, SampleError::OutOfRange { required: 3, available: 2 });

        let empty: [u8; 0] = [];
        assert!(distinct_random_values_excluding(&mut rng, &empty, 1, &[]).is_err());
    }

    #[test]
    fn zero_required_is_empty() {
        let mut rng = StdRng::seed_from_u64(9);
        let picked = distinct_random_values_excluding::<u8, _>(&mut rng, &[], 0, &[]).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        for len in 0..12usize {
            let original: Vec<usize> = (0..len).map(|i| i % 4).collect();
            let mut shuffled = original.clone();
            shuffle(&mut rng, &mut shuffled);
            let mut a = original.clone();
            let mut b = shuffled.clone();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn tracked_element_position_follows_the_swaps() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items = ["right", "w1", "w2", "w3"];
            let at = shuffle_tracking(&mut rng, &mut items, 0);
            assert_eq!(items[at], "right");

            let mut one = ["only"];
            assert_eq!(shuffle_tracking(&mut rng, &mut one, 0), 0);
        }
    }

    #[test]
    fn shuffle_reaches_every_ordering_of_three() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut items = [1, 2, 3];
            shuffle(&mut rng, &mut items);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }
}
