use serde::Serialize;

use crate::units::{TempUnit, ThresholdBasis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    Comfortable,
    Uncomfortable,
    Cold,
    Moderate,
}

impl ComfortLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ComfortLevel::Comfortable => "Comfortable",
            ComfortLevel::Uncomfortable => "Uncomfortable",
            ComfortLevel::Cold => "Cold",
            ComfortLevel::Moderate => "Moderate",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            ComfortLevel::Comfortable => "Ideal conditions!",
            ComfortLevel::Uncomfortable => "Hot and/or humid.",
            ComfortLevel::Cold => "Dress warmly.",
            ComfortLevel::Moderate => "Adjust clothing as needed.",
        }
    }
}

/// Classify comfort from a Celsius temperature and relative humidity.
///
/// Under [`ThresholdBasis::MetricOnly`] a non-metric display unit always
/// yields `Moderate`.
pub fn comfort_level(
    temperature_c: f64,
    humidity_pct: u8,
    unit: TempUnit,
    basis: ThresholdBasis,
) -> ComfortLevel {
    if !basis.evaluates_temperature(unit) {
        return ComfortLevel::Moderate;
    }

    let t = temperature_c;
    let h = humidity_pct;
    if (20.0..=26.0).contains(&t) && (30..=60).contains(&h) {
        ComfortLevel::Comfortable
    } else if t > 30.0 || h > 80 {
        ComfortLevel::Uncomfortable
    } else if t < 10.0 {
        ComfortLevel::Cold
    } else {
        ComfortLevel::Moderate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(t: f64, h: u8) -> ComfortLevel {
        comfort_level(t, h, TempUnit::Metric, ThresholdBasis::Converted)
    }

    #[test]
    fn classification() {
        assert_eq!(metric(23.0, 45), ComfortLevel::Comfortable);
        assert_eq!(metric(32.0, 50), ComfortLevel::Uncomfortable);
        assert_eq!(metric(5.0, 50), ComfortLevel::Cold);
        assert_eq!(metric(15.0, 50), ComfortLevel::Moderate);
    }

    #[test]
    fn humidity_dominates_cold() {
        assert_eq!(metric(5.0, 90), ComfortLevel::Uncomfortable);
        assert_eq!(metric(22.0, 70), ComfortLevel::Moderate);
    }

    #[test]
    fn comfortable_bounds_are_inclusive() {
        assert_eq!(metric(20.0, 30), ComfortLevel::Comfortable);
        assert_eq!(metric(26.0, 60), ComfortLevel::Comfortable);
        assert_eq!(metric(26.1, 60), ComfortLevel::Moderate);
    }

    #[test]
    fn non_metric_units_classify_on_celsius_value() {
        assert_eq!(
            comfort_level(5.0, 50, TempUnit::Imperial, ThresholdBasis::Converted),
            ComfortLevel::Cold
        );
    }

    #[test]
    fn metric_only_basis_is_always_moderate_for_non_metric() {
        for unit in [TempUnit::Imperial, TempUnit::Kelvin] {
            for (t, h) in [(23.0, 45), (32.0, 50), (5.0, 50)] {
                assert_eq!(
                    comfort_level(t, h, unit, ThresholdBasis::MetricOnly),
                    ComfortLevel::Moderate
                );
            }
        }
        assert_eq!(
            comfort_level(5.0, 50, TempUnit::Metric, ThresholdBasis::MetricOnly),
            ComfortLevel::Cold
        );
    }
}
