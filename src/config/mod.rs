use reqwest::Client;
use std::{env, path::PathBuf, time::Duration};
use tracing::{info, warn};

use crate::services::countries_client::CountriesClient;
use crate::services::geolocation::{Coordinates, FixedPosition};
use crate::services::weather_client::WeatherClient;

pub const DEFAULT_COUNTRIES_URL: &str = "https://countries.trevorblades.com";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Clone)]
pub struct AppState {
    pub site_root: PathBuf,
    /// Shared client for the external APIs, bounded by `EXTERNAL_TIMEOUT_MS`.
    pub http: Client,
}

pub struct AppConfig {
    pub port: u16,
    pub site_root: PathBuf,
    pub countries_url: String,
    pub weather_url: String,
    pub weather_api_key: String,
    pub position: Option<Coordinates>,
    pub external_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "8000".into()).parse()?;
        let site_root = PathBuf::from(env::var("SITE_ROOT").unwrap_or_else(|_| "public".into()));
        let countries_url = env::var("COUNTRIES_API_URL").unwrap_or_else(|_| DEFAULT_COUNTRIES_URL.into());
        let weather_url = env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_WEATHER_URL.into());
        let weather_api_key = env::var("WEATHER_API_KEY").unwrap_or_default();
        let external_timeout_ms: u64 = env::var("EXTERNAL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12_000);

        let latitude = env::var("WEATHER_LATITUDE").ok().and_then(|s| s.parse::<f64>().ok());
        let longitude = env::var("WEATHER_LONGITUDE").ok().and_then(|s| s.parse::<f64>().ok());
        let position = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            (None, None) => None,
            _ => {
                warn!("WEATHER_LATITUDE and WEATHER_LONGITUDE must be set together; ignoring");
                None
            }
        };

        Ok(Self {
            port,
            site_root,
            countries_url,
            weather_url,
            weather_api_key,
            position,
            external_timeout_ms,
        })
    }

    pub fn http_client(&self) -> Result<Client, anyhow::Error> {
        Ok(Client::builder()
            .timeout(Duration::from_millis(self.external_timeout_ms))
            .build()?)
    }

    pub async fn build_state(&self) -> Result<AppState, anyhow::Error> {
        if !self.site_root.join("index.html").exists() {
            warn!("no index.html under {}", self.site_root.display());
        }
        info!("✅ Serving site from {}", self.site_root.display());

        let http = self.http_client()?;
        info!("External API timeout: {}ms", self.external_timeout_ms);

        Ok(AppState { site_root: self.site_root.clone(), http })
    }

    pub fn countries_client(&self, http: Client) -> CountriesClient {
        CountriesClient::new(http, self.countries_url.clone())
    }

    pub fn weather_client(&self, http: Client) -> WeatherClient {
        WeatherClient::new(http, self.weather_url.clone(), self.weather_api_key.clone())
    }

    /// Configured position, standing in for the browser's geolocation capability.
    pub fn geolocation(&self) -> Option<FixedPosition> {
        self.position.map(FixedPosition::granted)
    }
}
