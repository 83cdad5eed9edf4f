//! Data models for the weather proxy.
//!
//! `WeatherReading` mirrors the OpenWeather current-weather response so the
//! proxy can forward provider data without reshaping it. `HistoryEntry` is
//! the condensed form persisted in the search-history log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// OpenWeather omits `visibility` for some stations; treat that as clear air
/// (their documented maximum) so the poor-visibility rule never fires on a
/// missing field.
fn default_visibility() -> u32 {
    10_000
}

/// Current-weather reading as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    // ---
    /// Resolved place name.
    pub name: String,
    pub sys: SysInfo,
    pub main: MainMetrics,
    pub weather: Vec<ConditionSummary>,
    pub wind: Wind,
    /// Visibility in meters.
    #[serde(default = "default_visibility")]
    pub visibility: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMetrics {
    // ---
    /// Temperature in °C (`units=metric`).
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity, 0–100.
    pub humidity: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    // ---
    /// Condition category, e.g. "Rain", "Clear", "Thunderstorm".
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s.
    pub speed: f64,
}

impl WeatherReading {
    /// Primary condition category, or empty when the provider sent none.
    pub fn condition(&self) -> &str {
        self.weather.first().map_or("", |w| w.main.as_str())
    }
}

// ---

/// One recorded lookup in the search-history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    // ---
    pub city: String,
    pub country: String,
    /// Temperature rounded to the nearest whole °C.
    pub temp: i32,
    pub condition: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Condense a reading into a history entry. `city` keeps the caller's
    /// casing, not the provider's resolved name.
    pub fn from_reading(city: &str, reading: &WeatherReading) -> Self {
        // ---
        Self {
            city: city.to_string(),
            country: reading.sys.country.clone(),
            temp: reading.main.temp.round() as i32,
            condition: reading.condition().to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Persisted shape of the history document: `{ "searches": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub searches: Vec<HistoryEntry>,
}

/// Coarse severity classification of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

// ---

#[cfg(test)]
pub(crate) fn make_test_reading(
    temp: f64,
    condition: &str,
    humidity: u8,
    wind_speed: f64,
    visibility: u32,
) -> WeatherReading {
    // ---
    WeatherReading {
        name: "Testville".to_string(),
        sys: SysInfo {
            country: "GB".to_string(),
        },
        main: MainMetrics {
            temp,
            feels_like: temp,
            temp_min: temp - 2.0,
            temp_max: temp + 2.0,
            humidity,
        },
        weather: vec![ConditionSummary {
            main: condition.to_string(),
            description: String::new(),
        }],
        wind: Wind { speed: wind_speed },
        visibility,
    }
}
