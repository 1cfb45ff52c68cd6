//! Core data types for the dashboard

use chrono::{DateTime, Local, NaiveTime};
use serde::{Deserialize, Serialize};

/// One fetched weather record, immutable once constructed.
///
/// All numeric fields are rounded integers in metric units, ready for
/// direct display on the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Current temperature (°C)
    pub temperature: i32,

    /// Apparent ("feels like") temperature (°C)
    pub feels_like: i32,

    /// Forecast daily maximum (°C)
    pub high: i32,

    /// Forecast daily minimum (°C)
    pub low: i32,

    /// Short condition description, e.g. "Partly cloudy"
    pub description: String,

    /// Wind speed (km/h)
    pub wind_speed: i32,

    /// Daily maximum UV index
    pub uv_index: i32,

    /// Sunrise time of day (local)
    pub sunrise: NaiveTime,

    /// Sunset time of day (local)
    pub sunset: NaiveTime,

    /// Location label shown on the panel
    pub location: String,
}

/// Clock and date strings for one display cycle.
///
/// Always derived from the live clock, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRecord {
    /// "07:05 PM"
    pub time: String,

    /// "Sat, Jan 06"
    pub date: String,
}

impl TimeRecord {
    /// Build a record from a specific local timestamp
    pub fn from_local(now: DateTime<Local>) -> Self {
        Self {
            time: now.format("%I:%M %p").to_string(),
            date: now.format("%a, %b %d").to_string(),
        }
    }

    /// Build a record from the current wall clock
    pub fn now() -> Self {
        Self::from_local(Local::now())
    }
}

/// Map a WMO weather code to a short English label.
///
/// Codes outside the table yield "Unknown".
pub fn condition_label(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Heavy drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        80 | 81 => "Rain showers",
        82 => "Heavy showers",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_condition_labels() {
        assert_eq!(condition_label(0), "Clear sky");
        assert_eq!(condition_label(2), "Partly cloudy");
        assert_eq!(condition_label(48), "Rime fog");
        assert_eq!(condition_label(63), "Rain");
        assert_eq!(condition_label(80), "Rain showers");
        assert_eq!(condition_label(81), "Rain showers");
        assert_eq!(condition_label(95), "Thunderstorm");
    }

    #[test]
    fn test_unmapped_code_is_unknown() {
        assert_eq!(condition_label(99), "Unknown");
        assert_eq!(condition_label(-1), "Unknown");
        assert_eq!(condition_label(1000), "Unknown");
    }

    #[test]
    fn test_time_record_formatting() {
        let now = Local.with_ymd_and_hms(2024, 1, 6, 19, 5, 0).unwrap();
        let record = TimeRecord::from_local(now);

        assert_eq!(record.time, "07:05 PM");
        assert_eq!(record.date, "Sat, Jan 06");
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let json = r#"{
            "temperature": 18,
            "feels_like": 16,
            "high": 22,
            "low": 11,
            "description": "Partly cloudy",
            "wind_speed": 14,
            "uv_index": 6,
            "sunrise": "06:05:00",
            "sunset": "20:43:00",
            "location": "Melbourne"
        }"#;
        let snapshot: WeatherSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.temperature, 18);
        assert_eq!(snapshot.description, "Partly cloudy");
        assert_eq!(snapshot.sunrise.to_string(), "06:05:00");

        let back = serde_json::to_string(&snapshot).unwrap();
        let again: WeatherSnapshot = serde_json::from_str(&back).unwrap();
        assert_eq!(snapshot, again);
    }
}
