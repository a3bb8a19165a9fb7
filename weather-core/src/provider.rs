use crate::{
    Config,
    error::FetchError,
    model::{DailyForecastEntry, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the raw 3-hourly forecast for a place.
///
/// Implementations classify their own failures into [`FetchError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, place: &str) -> Result<WeatherSnapshot, FetchError>;

    /// Raw forecast samples in chronological order, not yet reduced to days.
    async fn forecast(&self, place: &str) -> Result<Vec<DailyForecastEntry>, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key.to_owned(), base_url.to_owned()),
        None => OpenWeatherProvider::new(api_key.to_owned()),
    };

    Ok(provider)
}
