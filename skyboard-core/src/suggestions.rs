//! Plain-language suggestions for the current conditions.

use crate::{
    condition::ConditionCategory,
    model::Reading,
    units::{TempUnit, ThresholdBasis, ms_to_kmh},
};

const HOT_C: f64 = 30.0;
const COLD_C: f64 = 10.0;
const PLEASANT_C: std::ops::RangeInclusive<f64> = 15.0..=25.0;
const MUGGY_PCT: u8 = 80;
const DRY_PCT: u8 = 30;
const WINDY_KMH: f64 = 40.0;
const PEAK_SUN_HOURS: std::ops::RangeInclusive<u32> = 10..=16;

/// Suggestions in display order. `local_hour` is the hour of day at the location.
pub fn suggestions(
    reading: &Reading,
    local_hour: u32,
    unit: TempUnit,
    basis: ThresholdBasis,
) -> Vec<&'static str> {
    let mut out = Vec::new();
    let temp = reading.temperature_c;
    let category = reading.category();

    if basis.evaluates_temperature(unit) {
        if temp > HOT_C {
            out.push("It's hot outside! Stay hydrated and wear light, breathable clothing.");
        } else if temp < COLD_C {
            out.push("Bundle up! Wear warm layers and don't forget your coat.");
        } else if PLEASANT_C.contains(&temp) {
            out.push("Perfect weather for outdoor activities!");
        }
    }

    match category {
        ConditionCategory::Rain => out.push("Bring an umbrella - rain is expected!"),
        ConditionCategory::Snow => {
            out.push("Snow expected - drive carefully and wear appropriate footwear.")
        }
        ConditionCategory::Clear => out.push("Clear skies ahead - great day for outdoor plans!"),
        _ => {}
    }

    if reading.humidity_pct > MUGGY_PCT {
        out.push("High humidity - it might feel muggy outside.");
    } else if reading.humidity_pct < DRY_PCT {
        out.push("Low humidity - stay moisturized and drink plenty of water.");
    }

    if ms_to_kmh(reading.wind_speed_ms) > WINDY_KMH {
        out.push("Windy conditions - secure loose items and be cautious.");
    }

    if category == ConditionCategory::Clear && PEAK_SUN_HOURS.contains(&local_hour) {
        out.push("Peak sun hours - apply sunscreen and wear sunglasses.");
    }

    out
}
