//! Weather alert derivation.
//!
//! Rules are evaluated in a fixed order and alerts are emitted in that order;
//! consumers treat `alerts[0]` as the most important one.

use serde::Serialize;

use crate::{
    condition::ConditionCategory,
    model::Reading,
    units::{ThresholdBasis, UnitPreferences, format_temperature, ms_to_kmh},
};

pub const EXTREME_HEAT_C: f64 = 35.0;
pub const FREEZING_C: f64 = 0.0;
pub const FEELS_LIKE_GAP_C: f64 = 5.0;
pub const HIGH_WIND_KMH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub icon_key: &'static str,
}

impl Alert {
    fn new(
        severity: Severity,
        icon_key: &'static str,
        title: &str,
        message: impl Into<String>,
    ) -> Self {
        Self { severity, title: title.to_string(), message: message.into(), icon_key }
    }
}

/// Derive alerts with the default threshold basis.
pub fn derive_alerts(reading: &Reading, prefs: &UnitPreferences) -> Vec<Alert> {
    derive_alerts_with(reading, prefs, ThresholdBasis::default())
}

pub fn derive_alerts_with(
    reading: &Reading,
    prefs: &UnitPreferences,
    basis: ThresholdBasis,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if basis.evaluates_temperature(prefs.temp_unit) {
        let temp = reading.temperature_c;
        let feels_like = reading.feels_like_c;

        if temp >= EXTREME_HEAT_C {
            alerts.push(Alert::new(
                Severity::Danger,
                "temperature-high",
                "Extreme Heat Warning",
                "Temperature is dangerously high. Stay hydrated and avoid prolonged sun exposure.",
            ));
        } else if temp < FREEZING_C {
            alerts.push(Alert::new(
                Severity::Warning,
                "temperature-low",
                "Freezing Temperature",
                "Temperature is below freezing. Dress warmly and be cautious of ice.",
            ));
        }

        if (feels_like - temp).abs() > FEELS_LIKE_GAP_C {
            let cause = if feels_like > temp { "humidity" } else { "wind chill" };
            alerts.push(Alert::new(
                Severity::Info,
                "temperature-half",
                "Feels Like Alert",
                format!(
                    "Feels like {} due to {cause}.",
                    format_temperature(feels_like, prefs.temp_unit)
                ),
            ));
        }
    }

    match reading.category() {
        ConditionCategory::Thunderstorm => alerts.push(Alert::new(
            Severity::Danger,
            "bolt",
            "Thunderstorm Alert",
            "Thunderstorm conditions detected. Seek shelter and avoid outdoor activities.",
        )),
        ConditionCategory::Rain => alerts.push(Alert::new(
            Severity::Warning,
            "umbrella",
            "Rain Alert",
            "Rain expected. Don't forget your umbrella!",
        )),
        ConditionCategory::Snow => alerts.push(Alert::new(
            Severity::Warning,
            "snowflake",
            "Snow Alert",
            "Snow conditions. Drive carefully and dress warmly.",
        )),
        _ => {}
    }

    if ms_to_kmh(reading.wind_speed_ms) > HIGH_WIND_KMH {
        alerts.push(Alert::new(
            Severity::Warning,
            "wind",
            "High Wind Warning",
            "Strong winds detected. Secure loose objects and be cautious outdoors.",
        ));
    }

    alerts
}
