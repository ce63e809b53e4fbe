//! Moon phase and daylight helpers.
//!
//! The moon phase uses a simplified synodic-month approximation. It is good
//! enough for display, not for ephemeris work.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

const SYNODIC_MONTH_DAYS: f64 = 29.53059;
const LUNATIONS_PER_YEAR: f64 = 12.3685;
const PHASE_BIN_WIDTH: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Nominal illuminated share of the disc, in percent.
    pub fn illumination_pct(&self) -> u8 {
        match self {
            MoonPhase::New => 0,
            MoonPhase::WaxingCrescent | MoonPhase::WaningCrescent => 25,
            MoonPhase::FirstQuarter | MoonPhase::LastQuarter => 50,
            MoonPhase::WaxingGibbous | MoonPhase::WaningGibbous => 75,
            MoonPhase::Full => 100,
        }
    }

    /// Bin a cycle fraction into one of eight phases. Bins are centred on
    /// multiples of 1/8, so the New bin wraps around 1.0.
    pub fn from_fraction(fraction: f64) -> Self {
        let fraction = fraction.rem_euclid(1.0);
        let index = ((fraction + PHASE_BIN_WIDTH / 2.0) / PHASE_BIN_WIDTH).floor() as usize % 8;
        Self::ALL[index]
    }
}

/// Position within the synodic month for a calendar date, in `[0, 1)`.
pub fn phase_fraction(date: NaiveDate) -> f64 {
    let years = f64::from(date.year() - 1900);
    let month = f64::from(date.month());
    let day = f64::from(date.day());
    let cycle =
        (years * LUNATIONS_PER_YEAR + month - 0.5 + day / 30.0).rem_euclid(SYNODIC_MONTH_DAYS);
    let fraction = cycle / SYNODIC_MONTH_DAYS;
    // rem_euclid may round up to the divisor itself
    if fraction >= 1.0 { 0.0 } else { fraction }
}

pub fn moon_phase(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_fraction(phase_fraction(date))
}

/// Length of daylight between two unix timestamps; zero if sunset is not after sunrise.
pub fn day_length(sunrise_epoch: i64, sunset_epoch: i64) -> TimeDelta {
    TimeDelta::seconds((sunset_epoch - sunrise_epoch).max(0))
}
