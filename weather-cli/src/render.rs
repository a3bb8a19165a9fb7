//! Plain-text rendering of the view state.

use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use weather_core::{
    DailyForecastEntry, FetchState, IconCategory, ViewState, WeatherSnapshot,
    classify_condition_icon, label_for_day,
};

pub fn icon_glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::Thunderstorm => "⛈",
        IconCategory::Rain => "🌧",
        IconCategory::Snow => "❄",
        IconCategory::Atmosphere => "🌫",
        IconCategory::Clear => "☀",
        IconCategory::Clouds | IconCategory::Unknown => "☁",
    }
}

/// Round half up, so -2.5 shows as -2 and 2.5 as 3.
fn round_temp(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

/// Upper-case the first letter of every word ("light rain" -> "Light Rain").
fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_state<Tz: TimeZone>(state: &ViewState, now: &DateTime<Tz>) -> String {
    match &state.fetch {
        FetchState::Idle => String::new(),
        // Any previous report stays on screen above this line.
        FetchState::Loading { .. } => format!("Loading weather data for {}...\n", state.place),
        FetchState::Failed(message) => format!(
            "Oops! {message}\nTry again to load {}.\n",
            state.default_place
        ),
        FetchState::Loaded(report) => {
            let mut out = render_snapshot(&report.snapshot);
            if !report.forecast.is_empty() {
                out.push('\n');
                out.push_str(&render_forecast(&report.forecast, now));
            }
            out
        }
    }
}

pub fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let icon = icon_glyph(classify_condition_icon(snapshot.condition_code));

    let _ = match &snapshot.country {
        Some(country) => writeln!(out, "{}, {country}", snapshot.place_name),
        None => writeln!(out, "{}", snapshot.place_name),
    };
    let _ = writeln!(
        out,
        "{icon}  {}°C  {}",
        round_temp(snapshot.temperature_c),
        capitalize_words(&snapshot.condition)
    );
    let _ = writeln!(out, "Feels like {}°C", round_temp(snapshot.feels_like_c));
    out.push('\n');
    if let Some(speed) = snapshot.wind_speed_mps {
        let _ = writeln!(out, "{:<12}{speed} m/s", "Wind");
    }
    let _ = writeln!(out, "{:<12}{}%", "Humidity", snapshot.humidity_pct);
    if let Some(km) = snapshot.visibility_km() {
        let _ = writeln!(out, "{:<12}{km:.1} km", "Visibility");
    }
    let _ = writeln!(out, "{:<12}{:.0} hPa", "Pressure", snapshot.pressure_hpa);

    out
}

pub fn render_forecast<Tz: TimeZone>(forecast: &[DailyForecastEntry], now: &DateTime<Tz>) -> String {
    let mut out = String::from("5-Day Forecast\n");

    for day in forecast {
        let icon = icon_glyph(classify_condition_icon(day.condition_code));
        let _ = writeln!(
            out,
            "{:<10}{icon}  {:>3}°C  H: {}°  L: {}°  {}",
            label_for_day(day.dt, now),
            round_temp(day.temp_c),
            round_temp(day.temp_max_c),
            round_temp(day.temp_min_c),
            capitalize_words(&day.description)
        );
    }

    out
}
