use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use tracing::info;

/// Used whenever no position can be obtained: Barcelona.
pub const DEFAULT_POSITION: Coordinates = Coordinates { latitude: 41.3888, longitude: 2.159 };

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
}

/// A source of the visitor's current position, asked once per resolution.
pub trait Geolocation {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// A position source with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(Result<Coordinates, GeolocationError>);

impl FixedPosition {
    pub fn granted(coords: Coordinates) -> Self {
        Self(Ok(coords))
    }

    pub fn failing(err: GeolocationError) -> Self {
        Self(Err(err))
    }
}

impl Geolocation for FixedPosition {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send {
        let answer = self.0;
        async move { answer }
    }
}

/// Resolves the position, falling back to [`DEFAULT_POSITION`] when the
/// capability is missing or the request fails.
pub async fn get_location<G: Geolocation>(geolocation: Option<&G>) -> Coordinates {
    let Some(geolocation) = geolocation else {
        info!("Default position: {} lat, {} lon", DEFAULT_POSITION.latitude, DEFAULT_POSITION.longitude);
        return DEFAULT_POSITION;
    };

    match geolocation.current_position().await {
        Ok(coords) => {
            info!("Localized position: {} lat, {} lon", coords.latitude, coords.longitude);
            coords
        }
        Err(e) => {
            info!(
                "Geolocation failed ({}); default position: {} lat, {} lon",
                e, DEFAULT_POSITION.latitude, DEFAULT_POSITION.longitude
            );
            DEFAULT_POSITION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uses_granted_position() {
        let here = Coordinates { latitude: 40.4168, longitude: -3.7038 };
        assert_eq!(get_location(Some(&FixedPosition::granted(here))).await, here);
    }

    #[tokio::test]
    async fn falls_back_on_denial() {
        let geo = FixedPosition::failing(GeolocationError::PermissionDenied);
        assert_eq!(get_location(Some(&geo)).await, DEFAULT_POSITION);
    }

    #[tokio::test]
    async fn falls_back_without_capability() {
        assert_eq!(get_location::<FixedPosition>(None).await, DEFAULT_POSITION);
    }
}
