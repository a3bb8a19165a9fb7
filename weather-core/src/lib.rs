//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and the two-call fetch pipeline
//! - Shared domain models (snapshot, daily forecast)
//! - The view state machine and the app driver that executes its effects
//! - Presentation helpers (icon categories, day labels)
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod day_label;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod state;

pub use app::WeatherApp;
pub use config::{Config, DEFAULT_PLACE};
pub use day_label::{label_for_day, label_for_day_local};
pub use error::FetchError;
pub use icon::{IconCategory, classify_condition_icon};
pub use model::{DailyForecastEntry, WeatherReport, WeatherSnapshot};
pub use pipeline::fetch_weather;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use state::{Effect, Event, FetchState, ViewState, reduce};
