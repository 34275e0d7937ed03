use serde::Deserialize;

// --- countries GraphQL API ---

#[derive(Deserialize)]
pub struct GqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GqlError>,
}

#[derive(Deserialize)]
pub struct GqlError {
    pub message: String,
}

#[derive(Deserialize)]
pub struct GqlCountries {
    pub countries: Vec<GqlCountry>,
}

#[derive(Deserialize)]
pub struct GqlCountry {
    pub code: String,
    pub name: String,
    pub capital: Option<String>,
    pub emoji: String,
    #[serde(default)]
    pub languages: Vec<GqlLanguage>,
}

#[derive(Deserialize)]
pub struct GqlLanguage {
    pub code: String,
    pub name: String,
}

// --- OpenWeatherMap REST API ---

#[derive(Deserialize)]
pub struct OwCondition {
    pub icon: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: f64,
}

#[derive(Deserialize)]
pub struct OwClouds {
    pub all: f64,
}

#[derive(Deserialize)]
pub struct OwWind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Deserialize)]
pub struct OwCurrent {
    pub name: String,
    pub weather: Vec<OwCondition>,
    pub main: OwMain,
    pub clouds: OwClouds,
    pub wind: OwWind,
}

#[derive(Deserialize)]
pub struct OwForecastCity {
    pub name: String,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub weather: Vec<OwCondition>,
    pub main: OwMain,
}

#[derive(Deserialize)]
pub struct OwForecast {
    pub city: OwForecastCity,
    pub list: Vec<OwForecastEntry>,
}
