/// Coarse condition classes used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Thunderstorm,
    /// Drizzle and rain share one icon.
    Rain,
    Snow,
    /// Mist, fog, haze, dust and the like.
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

/// Map an OpenWeather condition code to its icon category.
///
/// See <https://openweathermap.org/weather-conditions> for the code groups.
pub fn classify_condition_icon(code: Option<u32>) -> IconCategory {
    match code {
        Some(200..=299) => IconCategory::Thunderstorm,
        Some(300..=599) => IconCategory::Rain,
        Some(600..=699) => IconCategory::Snow,
        Some(700..=799) => IconCategory::Atmosphere,
        Some(800) => IconCategory::Clear,
        Some(801..) => IconCategory::Clouds,
        _ => IconCategory::Unknown,
    }
}
