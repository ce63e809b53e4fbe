//! Unit selectors and conversions from canonical units (Celsius, m/s, hPa)
//! into display values.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const KELVIN_OFFSET: f64 = 273.15;
const MS_TO_KMH: f64 = 3.6;
const MS_TO_MPH: f64 = 2.237;
const HPA_TO_INHG: f64 = 0.02953;
const HPA_TO_MMHG: f64 = 0.75006;

#[derive(Debug, thiserror::Error)]
#[error("Unknown {axis} unit '{value}'. Supported units: {supported}.")]
pub struct UnitParseError {
    axis: &'static str,
    value: String,
    supported: &'static str,
}

/// Temperature display unit. `Metric` means Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Metric,
    Imperial,
    Kelvin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Kmh,
    Mph,
    Ms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Hpa,
    Inhg,
    Mmhg,
}

impl TempUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempUnit::Metric => "metric",
            TempUnit::Imperial => "imperial",
            TempUnit::Kelvin => "kelvin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TempUnit::Metric => "°C",
            TempUnit::Imperial => "°F",
            TempUnit::Kelvin => "K",
        }
    }
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::Kmh => "kmh",
            WindUnit::Mph => "mph",
            WindUnit::Ms => "ms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindUnit::Kmh => "km/h",
            WindUnit::Mph => "mph",
            WindUnit::Ms => "m/s",
        }
    }
}

impl PressureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureUnit::Hpa => "hpa",
            PressureUnit::Inhg => "inhg",
            PressureUnit::Mmhg => "mmhg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PressureUnit::Hpa => "hPa",
            PressureUnit::Inhg => "inHg",
            PressureUnit::Mmhg => "mmHg",
        }
    }
}

macro_rules! unit_str_impls {
    ($ty:ty, $axis:literal, $supported:literal, [$($name:literal => $variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnitParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(UnitParseError {
                        axis: $axis,
                        value: value.to_string(),
                        supported: $supported,
                    }),
                }
            }
        }
    };
}

unit_str_impls!(TempUnit, "temperature", "metric, imperial, kelvin", [
    "metric" => TempUnit::Metric,
    "celsius" => TempUnit::Metric,
    "imperial" => TempUnit::Imperial,
    "fahrenheit" => TempUnit::Imperial,
    "kelvin" => TempUnit::Kelvin,
]);

unit_str_impls!(WindUnit, "wind", "kmh, mph, ms", [
    "kmh" => WindUnit::Kmh,
    "mph" => WindUnit::Mph,
    "ms" => WindUnit::Ms,
]);

unit_str_impls!(PressureUnit, "pressure", "hpa, inhg, mmhg", [
    "hpa" => PressureUnit::Hpa,
    "inhg" => PressureUnit::Inhg,
    "mmhg" => PressureUnit::Mmhg,
]);

/// One display unit per axis. Defaults to metric / km/h / hPa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    pub temp_unit: TempUnit,
    pub wind_unit: WindUnit,
    pub pressure_unit: PressureUnit,
}

/// How temperature thresholds (alerts, comfort, suggestions) relate to the
/// active temperature unit.
///
/// `Converted` evaluates every threshold against the canonical Celsius value,
/// so the thresholds hold for any display unit. `MetricOnly` skips
/// temperature-magnitude rules unless the display unit is metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    #[default]
    Converted,
    MetricOnly,
}

impl ThresholdBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdBasis::Converted => "converted",
            ThresholdBasis::MetricOnly => "metric_only",
        }
    }

    /// Whether temperature-magnitude rules apply under `unit`.
    pub fn evaluates_temperature(&self, unit: TempUnit) -> bool {
        match self {
            ThresholdBasis::Converted => true,
            ThresholdBasis::MetricOnly => unit == TempUnit::Metric,
        }
    }
}

unit_str_impls!(ThresholdBasis, "threshold basis", "converted, metric_only", [
    "converted" => ThresholdBasis::Converted,
    "metric_only" => ThresholdBasis::MetricOnly,
    "metric-only" => ThresholdBasis::MetricOnly,
]);

/// A converted value with its unit label and display precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub label: &'static str,
    pub decimals: usize,
}

impl Quantity {
    /// The value rounded to its display precision, halves rounding up.
    pub fn rounded(&self) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        let rounded = (self.value * factor + 0.5).floor() / factor;
        // avoid rendering "-0"
        if rounded == 0.0 { 0.0 } else { rounded }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.rounded();
        if self.label.starts_with('°') {
            write!(f, "{value:.prec$}{}", self.label, prec = self.decimals)
        } else {
            write!(f, "{value:.prec$} {}", self.label, prec = self.decimals)
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * MS_TO_KMH
}

pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh / MS_TO_KMH
}

pub fn convert_temperature(celsius: f64, unit: TempUnit) -> Quantity {
    let value = match unit {
        TempUnit::Metric => celsius,
        TempUnit::Imperial => celsius_to_fahrenheit(celsius),
        TempUnit::Kelvin => celsius + KELVIN_OFFSET,
    };
    Quantity { value, label: unit.label(), decimals: 0 }
}

/// Express a value given in `unit` back in Celsius.
pub fn to_celsius(value: f64, unit: TempUnit) -> f64 {
    match unit {
        TempUnit::Metric => value,
        TempUnit::Imperial => fahrenheit_to_celsius(value),
        TempUnit::Kelvin => value - KELVIN_OFFSET,
    }
}

pub fn convert_wind(ms: f64, unit: WindUnit) -> Quantity {
    let value = match unit {
        WindUnit::Kmh => ms_to_kmh(ms),
        WindUnit::Mph => ms * MS_TO_MPH,
        WindUnit::Ms => ms,
    };
    Quantity { value, label: unit.label(), decimals: 1 }
}

pub fn convert_pressure(hpa: f64, unit: PressureUnit) -> Quantity {
    let (value, decimals) = match unit {
        PressureUnit::Hpa => (hpa, 0),
        PressureUnit::Inhg => (hpa * HPA_TO_INHG, 2),
        PressureUnit::Mmhg => (hpa * HPA_TO_MMHG, 0),
    };
    Quantity { value, label: unit.label(), decimals }
}

pub fn format_temperature(celsius: f64, unit: TempUnit) -> String {
    convert_temperature(celsius, unit).to_string()
}

pub fn format_wind(ms: f64, unit: WindUnit) -> String {
    convert_wind(ms, unit).to_string()
}

pub fn format_pressure(hpa: f64, unit: PressureUnit) -> String {
    convert_pressure(hpa, unit).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_labels_and_rounding() {
        assert_eq!(format_temperature(23.4, TempUnit::Metric), "23°C");
        assert_eq!(format_temperature(23.4, TempUnit::Imperial), "74°F");
        assert_eq!(format_temperature(23.4, TempUnit::Kelvin), "297 K");
        assert_eq!(format_temperature(-0.3, TempUnit::Metric), "0°C");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(format_temperature(-0.5, TempUnit::Metric), "0°C");
        assert_eq!(format_temperature(-1.5, TempUnit::Metric), "-1°C");
        assert_eq!(format_temperature(2.5, TempUnit::Metric), "3°C");
        assert_eq!(format_wind(-0.25, WindUnit::Ms), "-0.2 m/s");
    }

    #[test]
    fn kelvin_is_plain_offset() {
        let q = convert_temperature(0.0, TempUnit::Kelvin);
        assert!((q.value - 273.15).abs() < 1e-9);
        assert_eq!(q.label, "K");
    }

    #[test]
    fn wind_conversions() {
        assert_eq!(format_wind(10.0, WindUnit::Kmh), "36.0 km/h");
        assert_eq!(format_wind(10.0, WindUnit::Mph), "22.4 mph");
        assert_eq!(format_wind(3.26, WindUnit::Ms), "3.3 m/s");
    }

    #[test]
    fn pressure_conversions() {
        assert_eq!(format_pressure(1013.0, PressureUnit::Hpa), "1013 hPa");
        assert_eq!(format_pressure(1013.0, PressureUnit::Inhg), "29.91 inHg");
        assert_eq!(format_pressure(1013.0, PressureUnit::Mmhg), "760 mmHg");
    }

    #[test]
    fn conversion_has_no_hidden_state() {
        let first = convert_temperature(17.25, TempUnit::Imperial);
        let _ = convert_temperature(-40.0, TempUnit::Kelvin);
        let _ = convert_wind(99.0, WindUnit::Mph);
        let again = convert_temperature(17.25, TempUnit::Imperial);
        assert_eq!(first, again);
    }

    #[test]
    fn fahrenheit_round_trip_within_one_degree() {
        for tenths in -500..=500 {
            let c = tenths as f64 / 10.0;
            let f = convert_temperature(c, TempUnit::Imperial).rounded();
            let back = fahrenheit_to_celsius(f);
            assert!((back - c).abs() <= 1.0, "{c} -> {f} -> {back}");
        }
    }

    #[test]
    fn to_celsius_inverts_each_unit() {
        for unit in [TempUnit::Metric, TempUnit::Imperial, TempUnit::Kelvin] {
            let shown = convert_temperature(21.5, unit).value;
            assert!((to_celsius(shown, unit) - 21.5).abs() < 1e-9);
        }
    }

    #[test]
    fn parse_units() {
        assert_eq!("imperial".parse::<TempUnit>().unwrap(), TempUnit::Imperial);
        assert_eq!("MPH".parse::<WindUnit>().unwrap(), WindUnit::Mph);
        assert_eq!("mmhg".parse::<PressureUnit>().unwrap(), PressureUnit::Mmhg);
        assert_eq!(
            "metric-only".parse::<ThresholdBasis>().unwrap(),
            ThresholdBasis::MetricOnly
        );

        let err = "rankine".parse::<TempUnit>().unwrap_err();
        assert!(err.to_string().contains("Unknown temperature unit 'rankine'"));
    }

    #[test]
    fn preferences_default_to_metric() {
        let prefs = UnitPreferences::default();
        assert_eq!(prefs.temp_unit, TempUnit::Metric);
        assert_eq!(prefs.wind_unit, WindUnit::Kmh);
        assert_eq!(prefs.pressure_unit, PressureUnit::Hpa);
    }

    #[test]
    fn metric_only_basis_gates_non_metric_units() {
        assert!(ThresholdBasis::Converted.evaluates_temperature(TempUnit::Kelvin));
        assert!(ThresholdBasis::MetricOnly.evaluates_temperature(TempUnit::Metric));
        assert!(!ThresholdBasis::MetricOnly.evaluates_temperature(TempUnit::Imperial));
    }
}
