use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    error::FetchError,
    model::{DailyForecastEntry, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{endpoint}` for a place in metric units, returning the
    /// status and the raw body.
    ///
    /// Errors carry no URL: the query string holds the API key.
    async fn get(&self, endpoint: &str, place: &str) -> reqwest::Result<(StatusCode, String)> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;

        Ok((status, body))
    }

    #[instrument(skip(self))]
    async fn fetch_current(&self, place: &str) -> Result<WeatherSnapshot, FetchError> {
        let (status, body) = self.get("weather", place).await.map_err(|err| {
            warn!(error = %err, "OpenWeather current request failed");
            FetchError::weather_failed()
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather current request rejected");
            return Err(FetchError::from_current_status(status.as_u16()));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "Failed to parse OpenWeather current JSON");
            FetchError::weather_failed()
        })?;

        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, place: &str) -> Result<Vec<DailyForecastEntry>, FetchError> {
        let (status, body) = self.get("forecast", place).await.map_err(|err| {
            warn!(error = %err, "OpenWeather forecast request failed");
            FetchError::forecast_failed()
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather forecast request rejected");
            return Err(FetchError::forecast_failed());
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "Failed to parse OpenWeather forecast JSON");
            FetchError::forecast_failed()
        })?;

        debug!(samples = parsed.list.len(), "received OpenWeather forecast");

        Ok(parsed.list.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<u32>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    #[serde(default)]
    sys: OwSys,
    visibility: Option<u32>,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(raw: OwCurrentResponse) -> Self {
        let (condition_code, condition) = first_condition(raw.weather);

        WeatherSnapshot {
            place_name: raw.name,
            country: raw.sys.country,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            condition,
            condition_code,
            wind_speed_mps: raw.wind.and_then(|w| w.speed),
            humidity_pct: raw.main.humidity,
            visibility_m: raw.visibility,
            pressure_hpa: raw.main.pressure,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastEntry> for DailyForecastEntry {
    fn from(raw: OwForecastEntry) -> Self {
        let (condition_code, description) = first_condition(raw.weather);

        DailyForecastEntry {
            dt: raw.dt,
            temp_c: raw.main.temp,
            temp_min_c: raw.main.temp_min,
            temp_max_c: raw.main.temp_max,
            condition_code,
            description,
        }
    }
}

/// The first condition entry drives the icon and text; an empty array
/// degrades to no code and an empty description.
fn first_condition(weather: Vec<OwWeather>) -> (Option<u32>, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.id, w.description))
        .unwrap_or_default()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, place: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_current(place).await
    }

    async fn forecast(&self, place: &str) -> Result<Vec<DailyForecastEntry>, FetchError> {
        self.fetch_forecast(place).await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
