use serde::{Deserialize, Serialize};

/// Broad weather category derived from a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Fog, haze, smog, dust.
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl ConditionCategory {
    /// Classify a condition code using half-open ranges. Total over `i32`.
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Atmosphere,
            800 => Self::Clear,
            801..=899 => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Atmosphere => "Fog / Haze",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Unknown => "Unknown",
        }
    }

    /// Presentation icon key.
    pub fn icon_key(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "bolt",
            Self::Drizzle => "cloud-rain",
            Self::Rain => "umbrella",
            Self::Snow => "snowflake",
            Self::Atmosphere => "smog",
            Self::Clear => "sun",
            Self::Clouds => "cloud",
            Self::Unknown => "question",
        }
    }

    /// Any form of falling liquid water.
    pub fn is_raining(&self) -> bool {
        matches!(self, Self::Thunderstorm | Self::Drizzle | Self::Rain)
    }
}

pub fn classify_condition(code: i32) -> ConditionCategory {
    ConditionCategory::from_code(code)
}

/// Map a historical-provider icon name onto our icon keys.
pub fn historical_icon_key(icon: &str) -> &'static str {
    match icon {
        "snow" => "snowflake",
        "rain" => "cloud-rain",
        "fog" => "smog",
        "wind" => "wind",
        "cloudy" => "cloud",
        "partly-cloudy-day" => "cloud-sun",
        "partly-cloudy-night" => "cloud-moon",
        "clear-day" => "sun",
        "clear-night" => "moon",
        _ => "cloud",
    }
}
