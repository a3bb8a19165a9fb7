/// Current conditions for a place, normalized from the provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub place_name: String,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    /// Empty when the provider sent no condition entry.
    pub condition: String,
    pub condition_code: Option<u32>,
    pub wind_speed_mps: Option<f64>,
    pub humidity_pct: u8,
    pub visibility_m: Option<u32>,
    pub pressure_hpa: f64,
}

impl WeatherSnapshot {
    /// Visibility converted to kilometers, if the provider reported it.
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m.map(|m| f64::from(m) / 1000.0)
    }
}

/// One forecast sample. The provider returns these at 3-hour spacing; after
/// normalization the sequence holds roughly one per day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    pub temp_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition_code: Option<u32>,
    pub description: String,
}

/// Snapshot and forecast, always fetched and replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<DailyForecastEntry>,
}
