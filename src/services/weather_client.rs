use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::weather::{CurrentWeather, ForecastWeather, TIMESTAMPS_PER_DAY};
use crate::services::geolocation::Coordinates;
use crate::types::external::{OwCurrent, OwForecast};
use crate::utils::error::ApiError;

const UNITS: &str = "metric";

#[derive(Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub async fn get_current_weather_data(&self, at: Coordinates) -> Result<CurrentWeather, ApiError> {
        let url = format!("{}/weather", self.base_url);
        let query = [
            ("lat", at.latitude.to_string()),
            ("lon", at.longitude.to_string()),
            ("units", UNITS.to_string()),
        ];
        let raw: OwCurrent = self.fetch(&url, &query).await?;
        CurrentWeather::try_from(raw)
    }

    /// 5-day/3-hour forecast, truncated to `num_days` worth of timestamps.
    pub async fn get_forecast_weather_data(
        &self,
        at: Coordinates,
        num_days: usize,
    ) -> Result<ForecastWeather, ApiError> {
        let url = format!("{}/forecast", self.base_url);
        let query = [
            ("lat", at.latitude.to_string()),
            ("lon", at.longitude.to_string()),
            ("units", UNITS.to_string()),
            ("cnt", (num_days * TIMESTAMPS_PER_DAY).to_string()),
        ];
        let raw: OwForecast = self.fetch(&url, &query).await?;
        ForecastWeather::try_from(raw)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        debug!(?query, "GET {} (appid redacted)", url);

        self.http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::External(format!("Could not fetch data from weather API: {}", e.without_url())))?
            .error_for_status()
            .map_err(|e| ApiError::External(format!("Weather API answered with an error: {}", e.without_url())))?
            .json()
            .await
            .map_err(|e| ApiError::External(format!("Could not parse weather data: {}", e.without_url())))
    }
}
