pub mod countries_client;
pub mod geolocation;
pub mod quiz;
pub mod weather_client;
pub mod weather_ticker;
