use reqwest::Client;
use tracing::{debug, info};

use crate::models::country::Country;
use crate::types::external::{GqlCountries, GqlResponse};
use crate::utils::error::ApiError;

pub const COUNTRIES_QUERY: &str = r#"{
  countries {
    code
    name
    capital
    emoji
    languages {
      code
      name
    }
  }
}"#;

#[derive(Clone)]
pub struct CountriesClient {
    http: Client,
    url: String,
}

impl CountriesClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    /// Fetches every country with its capital, flag emoji and languages.
    pub async fn get_countries_info(&self) -> Result<Vec<Country>, ApiError> {
        let resp: GqlResponse<GqlCountries> = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "query": COUNTRIES_QUERY }))
            .send()
            .await
            .map_err(|e| ApiError::External(format!("Could not fetch data from countries API: {}", e)))?
            .error_for_status()
            .map_err(|e| ApiError::External(format!("Countries API answered with an error: {}", e)))?
            .json()
            .await
            .map_err(|e| ApiError::External(format!("Could not parse countries: {}", e)))?;

        let Some(data) = resp.data else {
            let messages: Vec<String> = resp.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::External(format!("countries query failed: {}", messages.join("; "))));
        };
        if !resp.errors.is_empty() {
            debug!("countries query returned {} partial errors", resp.errors.len());
        }

        let countries: Vec<Country> = data.countries.into_iter().map(Country::from).collect();
        info!("Loaded {} countries", countries.len());
        Ok(countries)
    }
}
