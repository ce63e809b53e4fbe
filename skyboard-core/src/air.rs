use serde::Serialize;

/// Air quality band for the provider's 1..=5 AQI scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AirQuality {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl AirQuality {
    pub fn from_index(aqi: u8) -> Self {
        match aqi {
            1 => AirQuality::Good,
            2 => AirQuality::Fair,
            3 => AirQuality::Moderate,
            4 => AirQuality::Poor,
            5 => AirQuality::VeryPoor,
            _ => AirQuality::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQuality::Good => "Good",
            AirQuality::Fair => "Fair",
            AirQuality::Moderate => "Moderate",
            AirQuality::Poor => "Poor",
            AirQuality::VeryPoor => "Very Poor",
            AirQuality::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(uvi: f64) -> Self {
        if uvi < 3.0 {
            UvLevel::Low
        } else if uvi < 6.0 {
            UvLevel::Moderate
        } else if uvi < 8.0 {
            UvLevel::High
        } else if uvi < 11.0 {
            UvLevel::VeryHigh
        } else {
            UvLevel::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
            UvLevel::VeryHigh => "Very High",
            UvLevel::Extreme => "Extreme",
        }
    }
}
