//! Outdoor activity suitability scoring.

use serde::Serialize;

use crate::{condition::ConditionCategory, model::Reading, units::ms_to_kmh};

const COLD_PENALTY_PER_DEG: f64 = 3.0;
const HEAT_PENALTY_PER_DEG: f64 = 3.0;
const WIND_PENALTY_PER_KMH: f64 = 2.0;
const HUMIDITY_PENALTY_PER_PCT: f64 = 0.5;
const WEATHER_PENALTY: f64 = 30.0;

/// Sky condition an activity needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherRequirement {
    Any,
    NotRaining,
    Clear,
}

impl WeatherRequirement {
    pub fn is_satisfied(&self, category: ConditionCategory) -> bool {
        match self {
            WeatherRequirement::Any => true,
            WeatherRequirement::NotRaining => !category.is_raining(),
            WeatherRequirement::Clear => category == ConditionCategory::Clear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityProfile {
    pub name: &'static str,
    pub min_ideal_c: f64,
    pub max_ideal_c: f64,
    pub max_wind_kmh: f64,
    pub max_humidity_pct: f64,
    pub requirement: WeatherRequirement,
}

pub const RUNNING: ActivityProfile = ActivityProfile {
    name: "running",
    min_ideal_c: 10.0,
    max_ideal_c: 20.0,
    max_wind_kmh: 25.0,
    max_humidity_pct: 70.0,
    requirement: WeatherRequirement::NotRaining,
};

pub const CYCLING: ActivityProfile = ActivityProfile {
    name: "cycling",
    min_ideal_c: 15.0,
    max_ideal_c: 25.0,
    max_wind_kmh: 20.0,
    max_humidity_pct: 70.0,
    requirement: WeatherRequirement::NotRaining,
};

pub const HIKING: ActivityProfile = ActivityProfile {
    name: "hiking",
    min_ideal_c: 10.0,
    max_ideal_c: 22.0,
    max_wind_kmh: 30.0,
    max_humidity_pct: 80.0,
    requirement: WeatherRequirement::NotRaining,
};

pub const PHOTOGRAPHY: ActivityProfile = ActivityProfile {
    name: "photography",
    min_ideal_c: 5.0,
    max_ideal_c: 30.0,
    max_wind_kmh: 35.0,
    max_humidity_pct: 90.0,
    requirement: WeatherRequirement::Clear,
};

pub static ACTIVITIES: [ActivityProfile; 4] = [RUNNING, CYCLING, HIKING, PHOTOGRAPHY];

pub fn find_activity(name: &str) -> Option<&'static ActivityProfile> {
    let name = name.trim();
    ACTIVITIES.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ActivityStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ActivityStatus::Excellent,
            60..=79 => ActivityStatus::Good,
            40..=59 => ActivityStatus::Fair,
            _ => ActivityStatus::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Excellent => "Excellent",
            ActivityStatus::Good => "Good",
            ActivityStatus::Fair => "Fair",
            ActivityStatus::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityScore {
    pub activity: &'static str,
    pub score: u8,
    pub status: ActivityStatus,
}

impl ActivityProfile {
    /// Score in `[0, 100]`; 100 means every parameter is within the ideal range.
    pub fn suitability(
        &self,
        temperature_c: f64,
        wind_kmh: f64,
        humidity_pct: f64,
        category: ConditionCategory,
    ) -> u8 {
        let mut score: f64 = 100.0;
        score -= COLD_PENALTY_PER_DEG * (self.min_ideal_c - temperature_c).max(0.0);
        score -= HEAT_PENALTY_PER_DEG * (temperature_c - self.max_ideal_c).max(0.0);
        score -= WIND_PENALTY_PER_KMH * (wind_kmh - self.max_wind_kmh).max(0.0);
        score -= HUMIDITY_PENALTY_PER_PCT * (humidity_pct - self.max_humidity_pct).max(0.0);
        if !self.requirement.is_satisfied(category) {
            score -= WEATHER_PENALTY;
        }

        score.clamp(0.0, 100.0).round() as u8
    }

    pub fn score(&self, reading: &Reading) -> ActivityScore {
        let score = self.suitability(
            reading.temperature_c,
            ms_to_kmh(reading.wind_speed_ms),
            f64::from(reading.humidity_pct),
            reading.category(),
        );
        ActivityScore { activity: self.name, score, status: ActivityStatus::from_score(score) }
    }
}

/// Scores for every built-in activity, in declaration order.
pub fn score_activities(reading: &Reading) -> Vec<ActivityScore> {
    ACTIVITIES.iter().map(|a| a.score(reading)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConditionCategory::*;

    #[test]
    fn ideal_conditions_score_full() {
        assert_eq!(RUNNING.suitability(15.0, 10.0, 50.0, Clear), 100);
        assert_eq!(PHOTOGRAPHY.suitability(15.0, 10.0, 50.0, Clear), 100);
    }

    #[test]
    fn penalties_accumulate() {
        // 5 deg too cold (-15), 5 km/h too windy (-10), 10% too humid (-5)
        assert_eq!(RUNNING.suitability(5.0, 30.0, 80.0, Clouds), 70);
        // heat: 5 deg over (-15) plus rain (-30)
        assert_eq!(RUNNING.suitability(25.0, 0.0, 50.0, Rain), 55);
    }

    #[test]
    fn weather_requirement() {
        assert_eq!(PHOTOGRAPHY.suitability(15.0, 0.0, 50.0, Clouds), 70);
        assert_eq!(HIKING.suitability(15.0, 0.0, 50.0, Snow), 100);
        assert_eq!(HIKING.suitability(15.0, 0.0, 50.0, Drizzle), 70);
    }

    #[test]
    fn score_clamps_at_bounds() {
        assert_eq!(RUNNING.suitability(-40.0, 120.0, 100.0, Thunderstorm), 0);
        assert_eq!(CYCLING.suitability(60.0, 0.0, 0.0, Clear), 0);
    }

    #[test]
    fn score_rounds_to_nearest() {
        // humidity 71% costs 0.5
        assert_eq!(RUNNING.suitability(15.0, 0.0, 71.0, Clear), 100);
        assert_eq!(RUNNING.suitability(15.0, 0.0, 73.0, Clear), 99);
    }

    #[test]
    fn status_bands() {
        assert_eq!(ActivityStatus::from_score(100), ActivityStatus::Excellent);
        assert_eq!(ActivityStatus::from_score(80), ActivityStatus::Excellent);
        assert_eq!(ActivityStatus::from_score(79), ActivityStatus::Good);
        assert_eq!(ActivityStatus::from_score(60), ActivityStatus::Good);
        assert_eq!(ActivityStatus::from_score(40), ActivityStatus::Fair);
        assert_eq!(ActivityStatus::from_score(39), ActivityStatus::Poor);
    }

    #[test]
    fn custom_profiles_use_the_same_scoring() {
        let kiting = ActivityProfile {
            name: "kiting",
            min_ideal_c: 0.0,
            max_ideal_c: 40.0,
            max_wind_kmh: 60.0,
            max_humidity_pct: 100.0,
            requirement: WeatherRequirement::Any,
        };
        assert_eq!(kiting.suitability(20.0, 55.0, 90.0, Rain), 100);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_activity(" Hiking").map(|a| a.name), Some("hiking"));
        assert!(find_activity("chess").is_none());
    }
}
