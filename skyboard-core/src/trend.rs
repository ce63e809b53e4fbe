use serde::Serialize;

use crate::model::HourlyPoint;

/// Forecast points covering the next 24h at 3h spacing.
const TEMPERATURE_WINDOW: usize = 8;
/// Index of the forecast point roughly 6h out.
const PRESSURE_LOOKAHEAD: usize = 2;
const PRESSURE_STEADY_BAND_HPA: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureTrend {
    WarmingUp,
    CoolingDown,
}

impl TemperatureTrend {
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureTrend::WarmingUp => "warming up",
            TemperatureTrend::CoolingDown => "cooling down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressureTrend {
    Rising,
    Falling,
    Steady,
}

impl PressureTrend {
    pub fn label(&self) -> &'static str {
        match self {
            PressureTrend::Rising => "Rising",
            PressureTrend::Falling => "Falling",
            PressureTrend::Steady => "Steady",
        }
    }

    pub fn outlook(&self) -> &'static str {
        match self {
            PressureTrend::Rising => "Improving weather expected",
            PressureTrend::Falling => "Weather may deteriorate",
            PressureTrend::Steady => "Stable weather conditions",
        }
    }
}

/// Compare the current temperature to the mean of the next 24h of forecast.
/// Returns `None` for an empty forecast.
pub fn temperature_trend(current_c: f64, points: &[HourlyPoint]) -> Option<TemperatureTrend> {
    let window = &points[..points.len().min(TEMPERATURE_WINDOW)];
    if window.is_empty() {
        return None;
    }

    let mean = window.iter().map(|p| p.temperature_c).sum::<f64>() / window.len() as f64;
    Some(if mean > current_c { TemperatureTrend::WarmingUp } else { TemperatureTrend::CoolingDown })
}

/// Compare the current pressure to the forecast ~6h ahead.
/// Returns `None` when the forecast is too short.
pub fn pressure_trend(current_hpa: f64, points: &[HourlyPoint]) -> Option<PressureTrend> {
    let ahead = points.get(PRESSURE_LOOKAHEAD)?;
    let delta = ahead.pressure_hpa - current_hpa;

    Some(if delta > PRESSURE_STEADY_BAND_HPA {
        PressureTrend::Rising
    } else if delta < -PRESSURE_STEADY_BAND_HPA {
        PressureTrend::Falling
    } else {
        PressureTrend::Steady
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(temp: f64, pressure: f64) -> HourlyPoint {
        HourlyPoint {
            epoch: 0,
            temperature_c: temp,
            humidity_pct: 50,
            wind_speed_ms: 2.0,
            precip_probability: 0.0,
            condition_code: 800,
            pressure_hpa: pressure,
            description: "clear sky".into(),
        }
    }

    #[test]
    fn warming_when_mean_exceeds_current() {
        let points: Vec<_> = [18.0, 20.0, 22.0, 24.0].iter().map(|&t| point(t, 1013.0)).collect();
        assert_eq!(temperature_trend(20.0, &points), Some(TemperatureTrend::WarmingUp));
        assert_eq!(temperature_trend(21.0, &points), Some(TemperatureTrend::CoolingDown));
    }

    #[test]
    fn only_first_eight_points_count() {
        let mut points: Vec<_> = (0..8).map(|_| point(10.0, 1013.0)).collect();
        points.extend((0..8).map(|_| point(40.0, 1013.0)));
        assert_eq!(temperature_trend(15.0, &points), Some(TemperatureTrend::CoolingDown));
    }

    #[test]
    fn empty_forecast_has_no_trend() {
        assert_eq!(temperature_trend(15.0, &[]), None);
        assert_eq!(pressure_trend(1013.0, &[point(15.0, 1013.0)]), None);
    }

    #[test]
    fn pressure_uses_third_point() {
        let points = vec![point(0.0, 900.0), point(0.0, 900.0), point(0.0, 1016.0)];
        assert_eq!(pressure_trend(1013.0, &points), Some(PressureTrend::Rising));

        let points = vec![point(0.0, 1100.0), point(0.0, 1100.0), point(0.0, 1010.0)];
        assert_eq!(pressure_trend(1013.0, &points), Some(PressureTrend::Falling));
    }

    #[test]
    fn pressure_steady_band_is_inclusive() {
        let points = vec![point(0.0, 0.0), point(0.0, 0.0), point(0.0, 1015.0)];
        let trend = pressure_trend(1013.0, &points);
        assert_eq!(trend, Some(PressureTrend::Steady));
        assert_eq!(trend.map(|t| t.outlook()), Some("Stable weather conditions"));
    }
}
