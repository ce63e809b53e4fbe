use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::ConditionCategory;

/// Point-in-time measurements in canonical units (Celsius, m/s, hPa, metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_ms: f64,
    pub wind_dir_deg: f64,
    pub visibility_m: f64,
    pub cloud_pct: u8,
    pub condition_code: i32,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
}

impl Reading {
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::from_code(self.condition_code)
    }
}

/// One entry of a forecast window (3h spacing for the OpenWeather feed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub epoch: i64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    /// Probability of precipitation in `[0, 1]`.
    pub precip_probability: f64,
    pub condition_code: i32,
    pub pressure_hpa: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// How a location is addressed when talking to providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    Name(String),
    Coords(Coordinates),
}

impl LocationQuery {
    pub fn coords(lat: f64, lon: f64) -> Self {
        LocationQuery::Coords(Coordinates { lat, lon })
    }

    /// Normalized identity used to detect overlapping refreshes.
    pub fn key(&self) -> String {
        match self {
            LocationQuery::Name(name) => name.trim().to_lowercase(),
            LocationQuery::Coords(c) => format!("{:.4},{:.4}", c.lat, c.lon),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Name(name) => f.write_str(name.trim()),
            LocationQuery::Coords(c) => write!(f, "{},{}", c.lat, c.lon),
        }
    }
}

/// Current conditions as returned by a weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub place: String,
    pub coords: Coordinates,
    pub description: String,
    pub observed_at: DateTime<Utc>,
    /// Offset of the location's local time from UTC.
    pub timezone_offset_secs: i32,
    pub reading: Reading,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<HourlyPoint>,
    pub timezone_offset_secs: i32,
}

/// Daily aggregate from the historical provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDay {
    pub date: NaiveDate,
    pub temp_c: f64,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub icon_key: String,
    pub description: String,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_keys_are_normalized() {
        assert_eq!(LocationQuery::Name("  London ".into()).key(), "london");
        assert_eq!(
            LocationQuery::Name("LONDON".into()).key(),
            LocationQuery::Name("london".into()).key()
        );
        assert_eq!(LocationQuery::coords(23.81034, 90.41251).key(), "23.8103,90.4125");
    }
}
