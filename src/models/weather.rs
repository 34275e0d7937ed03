use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::types::external::{OwCondition, OwCurrent, OwForecast};
use crate::utils::error::ApiError;

pub const TIMESTAMPS_PER_DAY: usize = 8;

/// Wind arrows follow the meteorological convention: where the wind comes from.
const DIRECTIONS: [&str; 8] = ["↑ N", "↗ NE", "→ E", "↘ SE", "↓ S", "↙ SW", "← W", "↖ NW"];

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BasicWeatherData {
    pub city: Option<String>,
    pub date_time: Option<String>,
    pub icon_id: String,
    pub description: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeatherDatum {
    pub name: &'static str,
    pub value: String,
}

impl WeatherDatum {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        WeatherDatum { name, value: value.into() }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub basic: BasicWeatherData,
    pub data: Vec<WeatherDatum>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimestampData {
    pub basic: BasicWeatherData,
    pub data: Vec<WeatherDatum>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastWeather {
    pub city: String,
    pub timestamps: Vec<TimestampData>,
}

impl ForecastWeather {
    pub fn num_days(&self) -> usize {
        self.timestamps.len() / TIMESTAMPS_PER_DAY
    }
}

pub fn cardinal_direction(angle: f64) -> &'static str {
    let per_direction = 360.0 / DIRECTIONS.len() as f64;
    let slot = (angle / per_direction).round().rem_euclid(DIRECTIONS.len() as f64) as usize;
    DIRECTIONS[slot % DIRECTIONS.len()]
}

/// Short Spanish-style `dd/mm/yy, HH:MM` in the city's own time zone.
pub fn local_date_time(timestamp: i64, utc_offset_secs: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(utc_offset_secs)?;
    let utc = DateTime::from_timestamp(timestamp, 0)?;
    Some(utc.with_timezone(&offset).format("%d/%m/%y, %H:%M").to_string())
}

fn first_condition(conditions: Vec<OwCondition>) -> Result<OwCondition, ApiError> {
    conditions
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::External("weather response has no conditions".into()))
}

fn degrees(v: f64) -> String {
    format!("{v}°C")
}

fn percent(v: f64) -> String {
    format!("{v}%")
}

impl TryFrom<OwCurrent> for CurrentWeather {
    type Error = ApiError;

    fn try_from(raw: OwCurrent) -> Result<Self, Self::Error> {
        let condition = first_condition(raw.weather)?;
        let main = raw.main;

        let basic = BasicWeatherData {
            city: Some(raw.name),
            date_time: None,
            icon_id: condition.icon,
            description: condition.description,
        };

        let mut data = vec![
            WeatherDatum::new("cloudiness", percent(raw.clouds.all)),
            WeatherDatum::new("temp", degrees(main.temp)),
            WeatherDatum::new("humidity", percent(main.humidity)),
        ];
        if let Some(v) = main.feels_like {
            data.push(WeatherDatum::new("feels-like temp", degrees(v)));
        }
        if let Some(v) = main.temp_min {
            data.push(WeatherDatum::new("min temp", degrees(v)));
        }
        if let Some(v) = main.temp_max {
            data.push(WeatherDatum::new("max temp", degrees(v)));
        }
        if let Some(v) = main.pressure {
            data.push(WeatherDatum::new("pressure", format!("{v}hpa")));
        }
        data.push(WeatherDatum::new("wind speed", format!("{}m/s", raw.wind.speed)));
        data.push(WeatherDatum::new("wind direction", cardinal_direction(raw.wind.deg)));

        Ok(CurrentWeather { basic, data })
    }
}

impl TryFrom<OwForecast> for ForecastWeather {
    type Error = ApiError;

    fn try_from(raw: OwForecast) -> Result<Self, Self::Error> {
        let tz = raw.city.timezone;
        let mut timestamps = Vec::with_capacity(raw.list.len());

        for entry in raw.list {
            let condition = first_condition(entry.weather)?;
            let date_time = local_date_time(entry.dt, tz).ok_or_else(|| {
                ApiError::External(format!("invalid forecast timestamp {} (offset {})", entry.dt, tz))
            })?;

            timestamps.push(TimestampData {
                basic: BasicWeatherData {
                    city: None,
                    date_time: Some(date_time),
                    icon_id: condition.icon,
                    description: condition.description,
                },
                data: vec![
                    WeatherDatum::new("temp", degrees(entry.main.temp)),
                    WeatherDatum::new("humidity", percent(entry.main.humidity)),
                ],
            });
        }

        Ok(ForecastWeather { city: raw.city.name, timestamps })
    }
}
