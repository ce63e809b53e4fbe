use chrono::{DateTime, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::model::{Forecast, HourlyPoint};

pub const MAX_FORECAST_DAYS: usize = 5;

/// Per-day aggregate of forecast points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub mean_c: f64,
    pub max_c: f64,
    pub min_c: f64,
    pub precip_probability: f64,
    /// Condition of the middle point of the day.
    pub condition_code: i32,
    pub description: String,
}

fn local_date(epoch: i64, offset_secs: i32) -> Option<NaiveDate> {
    let utc = DateTime::from_timestamp(epoch, 0)?;
    Some((utc + TimeDelta::seconds(i64::from(offset_secs))).date_naive())
}

fn summarize(date: NaiveDate, points: &[&HourlyPoint]) -> DailySummary {
    let temps = points.iter().map(|p| p.temperature_c);
    let mean_c = temps.clone().sum::<f64>() / points.len() as f64;
    let max_c = temps.clone().fold(f64::NEG_INFINITY, f64::max);
    let min_c = temps.fold(f64::INFINITY, f64::min);
    let precip_probability = points.iter().map(|p| p.precip_probability).fold(0.0, f64::max);
    let middle = points[points.len() / 2];

    DailySummary {
        date,
        mean_c,
        max_c,
        min_c,
        precip_probability,
        condition_code: middle.condition_code,
        description: middle.description.clone(),
    }
}

/// Group points by local calendar date, keeping at most [`MAX_FORECAST_DAYS`].
/// Points are expected in chronological order.
pub fn daily_summaries(forecast: &Forecast) -> Vec<DailySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&HourlyPoint>)> = Vec::new();

    for point in &forecast.points {
        let Some(date) = local_date(point.epoch, forecast.timezone_offset_secs) else {
            continue;
        };
        match groups.last_mut() {
            Some((last, members)) if *last == date => members.push(point),
            _ => {
                if groups.len() == MAX_FORECAST_DAYS {
                    break;
                }
                groups.push((date, vec![point]));
            }
        }
    }

    groups.iter().map(|(date, points)| summarize(*date, points)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    // 2024-01-01T00:00:00Z
    const JAN_1: i64 = 1_704_067_200;

    fn point(epoch: i64, temp: f64, code: i32, pop: f64) -> HourlyPoint {
        HourlyPoint {
            epoch,
            temperature_c: temp,
            humidity_pct: 60,
            wind_speed_ms: 3.0,
            precip_probability: pop,
            condition_code: code,
            pressure_hpa: 1012.0,
            description: format!("code {code}"),
        }
    }

    #[test]
    fn groups_by_date_and_aggregates() {
        let forecast = Forecast {
            points: vec![
                point(JAN_1 + 3 * 3600, 10.0, 800, 0.0),
                point(JAN_1 + 6 * 3600, 14.0, 500, 0.6),
                point(JAN_1 + 9 * 3600, 12.0, 801, 0.2),
                point(JAN_1 + DAY, 4.0, 600, 0.9),
            ],
            timezone_offset_secs: 0,
        };

        let days = daily_summaries(&forecast);
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((first.mean_c - 12.0).abs() < 1e-9);
        assert_eq!(first.max_c, 14.0);
        assert_eq!(first.min_c, 10.0);
        assert_eq!(first.precip_probability, 0.6);
        assert_eq!(first.condition_code, 500);

        assert_eq!(days[1].condition_code, 600);
    }

    #[test]
    fn timezone_offset_shifts_day_boundary() {
        let forecast = Forecast {
            points: vec![point(JAN_1 - 3600, 1.0, 800, 0.0), point(JAN_1 + 3600, 2.0, 800, 0.0)],
            timezone_offset_secs: 6 * 3600,
        };
        let days = daily_summaries(&forecast);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn caps_at_five_days() {
        let points = (0..8).map(|d| point(JAN_1 + d * DAY, 5.0, 800, 0.0)).collect();
        let days = daily_summaries(&Forecast { points, timezone_offset_secs: 0 });
        assert_eq!(days.len(), MAX_FORECAST_DAYS);
    }

    #[test]
    fn empty_forecast() {
        assert!(daily_summaries(&Forecast::default()).is_empty());
    }
}
