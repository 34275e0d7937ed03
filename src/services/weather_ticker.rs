use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::models::weather::{BasicWeatherData, CurrentWeather, ForecastWeather};
use crate::services::geolocation::{get_location, Geolocation};
use crate::services::weather_client::WeatherClient;
use crate::utils::html::escape;

pub const REFRESH_PERIOD: Duration = Duration::from_secs(5 * 60);
pub const DAYS_FORECAST: usize = 3;
/// Scroll time given to every rendered item.
pub const SECONDS_PER_ITEM: u64 = 5;

const ICON_PLACEHOLDER: &str = "http://openweathermap.org/images/transparent.png";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TickerItem {
    pub classes: Vec<&'static str>,
    pub html: String,
}

impl TickerItem {
    fn plain(html: String) -> Self {
        Self { classes: vec!["ticker__item"], html }
    }

    fn title(html: String) -> Self {
        Self { classes: vec!["ticker__item", "italic", "strong"], html }
    }

    pub fn to_html(&self) -> String {
        format!("<div class=\"{}\">{}</div>", self.classes.join(" "), self.html)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TickerSection {
    pub id: &'static str,
    pub items: Vec<TickerItem>,
}

impl TickerSection {
    fn new(id: &'static str) -> Self {
        Self { id, items: Vec::new() }
    }

    pub fn to_html(&self) -> String {
        let items: String = self.items.iter().map(TickerItem::to_html).collect();
        format!("<span id=\"{}\">{}</span>", self.id, items)
    }
}

/// The weather strip as it stands on the page.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TickerStrip {
    pub current: TickerSection,
    pub forecast: TickerSection,
    pub animation_duration: Duration,
    pub visible: bool,
}

impl Default for TickerStrip {
    fn default() -> Self {
        Self {
            current: TickerSection::new("current-weather"),
            forecast: TickerSection::new("forecast-weather"),
            animation_duration: Duration::ZERO,
            visible: false,
        }
    }
}

impl TickerStrip {
    pub fn item_count(&self) -> usize {
        self.current.items.len() + self.forecast.items.len()
    }

    /// Adjusts the scroll time to the number of rendered items.
    pub fn update_animation_time(&mut self) {
        let items = self.item_count();
        self.animation_duration = Duration::from_secs(SECONDS_PER_ITEM * items as u64);
        info!("Ticker elements rendered: {}", items);
        info!("Ticker animation time: {}s", self.animation_duration.as_secs());
    }

    pub fn to_html(&self) -> String {
        let secs = self.animation_duration.as_secs();
        let display = if self.visible { "inline-block" } else { "none" };
        format!(
            "<div class=\"ticker\" style=\"animation-duration: {secs}s; -webkit-animation-duration: {secs}s; display: {display}\">{}{}</div>",
            self.current.to_html(),
            self.forecast.to_html(),
        )
    }
}

fn icon_img(basic: &BasicWeatherData, position: &str) -> String {
    format!(
        "<img height=\"30\" width=\"50\" alt=\"weather icon\" src=\"{ICON_PLACEHOLDER}\" \
         style=\"background: url('http://openweathermap.org/img/w/{}.png') no-repeat scroll {position} transparent\">",
        escape(&basic.icon_id)
    )
}

fn value_span(value: &str) -> String {
    format!("<span class=\"weather-value\">{}</span>", escape(value))
}

pub fn render_current_weather_data(section: &mut TickerSection, current: &CurrentWeather) {
    section.items.clear();

    let city = current.basic.city.as_deref().unwrap_or_default();
    section.items.push(TickerItem::title(format!(
        "Current weather in <span class=\"weather-city\">{}</span>: ",
        escape(city)
    )));
    section.items.push(TickerItem::plain(format!(
        "{} {}",
        icon_img(&current.basic, "right"),
        value_span(&current.basic.description)
    )));
    for datum in &current.data {
        section.items.push(TickerItem::plain(format!("{}: {}", datum.name, value_span(&datum.value))));
    }
}

pub fn render_forecast_weather_data(section: &mut TickerSection, forecast: &ForecastWeather) {
    section.items.clear();

    section.items.push(TickerItem::title(format!(
        "Forecast weather for next {} days in <span class=\"weather-city\">{}</span>:",
        forecast.num_days(),
        escape(&forecast.city)
    )));

    for ts in &forecast.timestamps {
        let mut html = format!(
            " <span class=\"weather-timestamp\">{}</span>{} {}",
            escape(ts.basic.date_time.as_deref().unwrap_or_default()),
            icon_img(&ts.basic, "center"),
            value_span(&ts.basic.description)
        );
        for datum in &ts.data {
            html.push_str(&format!(" {}: {}", datum.name, value_span(&datum.value)));
        }
        section.items.push(TickerItem::plain(html));
    }
}

/// Replaces the section's content with a single "not available" notice.
pub fn render_error_message(section: &mut TickerSection, service_name: &str) {
    info!("{} data not available", service_name);
    section.items.clear();
    section.items.push(TickerItem::title(format!("{} data not available", escape(service_name))));
}

pub struct WeatherTicker<G> {
    client: WeatherClient,
    geolocation: Option<G>,
    strip: Arc<RwLock<TickerStrip>>,
}

impl<G> WeatherTicker<G>
where
    G: Geolocation + Send + Sync + 'static,
{
    pub fn new(client: WeatherClient, geolocation: Option<G>) -> Self {
        Self { client, geolocation, strip: Arc::new(RwLock::new(TickerStrip::default())) }
    }

    pub fn strip(&self) -> Arc<RwLock<TickerStrip>> {
        Arc::clone(&self.strip)
    }

    /// Fetches current and forecast weather and re-renders both sections.
    /// Each section fails on its own and falls back to a placeholder.
    pub async fn load_weather_ticker_data(&self) {
        let coords = get_location(self.geolocation.as_ref()).await;

        let current = self.client.get_current_weather_data(coords).await;
        let forecast = self.client.get_forecast_weather_data(coords, DAYS_FORECAST).await;

        let mut strip = self.strip.write().await;
        match current {
            Ok(data) => render_current_weather_data(&mut strip.current, &data),
            Err(e) => {
                error!("current weather failed: {}", e);
                render_error_message(&mut strip.current, "Current weather");
            }
        }
        match forecast {
            Ok(data) => render_forecast_weather_data(&mut strip.forecast, &data),
            Err(e) => {
                error!("forecast weather failed: {}", e);
                render_error_message(&mut strip.forecast, "Forecast weather");
            }
        }

        strip.update_animation_time();
        strip.visible = true;
    }

    /// Loads now and then every `period` until the returned handle is dismissed.
    pub fn start(self, period: Duration) -> TickerHandle {
        let strip = self.strip();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                self.load_weather_ticker_data().await;
            }
        });
        TickerHandle { strip, task: Some(task) }
    }
}

pub struct TickerHandle {
    strip: Arc<RwLock<TickerStrip>>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn strip(&self) -> Arc<RwLock<TickerStrip>> {
        Arc::clone(&self.strip)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Hides the ticker and stops refreshing. Returns false if it was already dismissed.
    pub async fn dismiss(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        task.abort();
        // Wait for the cancellation so a load in flight cannot show the strip again.
        if let Err(e) = task.await {
            if !e.is_cancelled() {
                error!("weather refresh task failed: {}", e);
            }
        }
        self.strip.write().await.visible = false;
        info!("Weather data retrieval stopped! Reload the web page.");
        true
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
