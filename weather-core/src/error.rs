use thiserror::Error;

/// User-facing failure of the fetch pipeline.
///
/// The `Display` output is the message shown to the user. Network, server and
/// parse failures all collapse into [`FetchError::Generic`]; the underlying
/// cause is logged where the error is classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City not found. Please check the spelling.")]
    NotFound,

    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    #[error("{0}")]
    Generic(String),
}

impl FetchError {
    pub const WEATHER_FAILED: &'static str = "Failed to fetch weather data";
    pub const FORECAST_FAILED: &'static str = "Failed to fetch forecast data";

    /// Any failure of the current-conditions call other than 404/401.
    pub fn weather_failed() -> Self {
        Self::Generic(Self::WEATHER_FAILED.to_string())
    }

    /// Any failure of the forecast call.
    pub fn forecast_failed() -> Self {
        Self::Generic(Self::FORECAST_FAILED.to_string())
    }

    /// Classify a non-success status of the current-conditions call.
    pub fn from_current_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            401 => Self::Unauthorized,
            _ => Self::weather_failed(),
        }
    }
}
