//! The two-call fetch pipeline: current conditions, then the forecast.

use tracing::{debug, instrument};

use crate::{
    error::FetchError, forecast::daily_samples, model::WeatherReport, provider::WeatherProvider,
};

/// Fetch current conditions and the daily forecast for `place`.
///
/// The forecast is only requested once the current-conditions call has
/// succeeded. Either both halves are returned or the first error is; a
/// snapshot fetched before a failing forecast call is dropped.
#[instrument(skip(provider))]
pub async fn fetch_weather<P>(provider: &P, place: &str) -> Result<WeatherReport, FetchError>
where
    P: WeatherProvider + ?Sized,
{
    let snapshot = provider.current(place).await?;
    debug!(place = %snapshot.place_name, "current conditions received");

    let raw = provider
        .forecast(place)
        .await
        .map_err(|_| FetchError::forecast_failed())?;
    let raw_len = raw.len();
    let forecast = daily_samples(raw);
    debug!(raw = raw_len, daily = forecast.len(), "forecast normalized");

    Ok(WeatherReport { snapshot, forecast })
}
