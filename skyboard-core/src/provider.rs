use crate::{
    Config,
    model::{Coordinates, Forecast, HistoricalDay, LocationQuery, Observation},
    provider::{openweather::OpenWeatherProvider, visualcrossing::VisualCrossingProvider},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;
pub mod visualcrossing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    VisualCrossing,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::VisualCrossing => "visualcrossing",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::VisualCrossing => "VISUALCROSSING_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::VisualCrossing]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "visualcrossing" => Ok(ProviderId::VisualCrossing),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, visualcrossing."
            )),
        }
    }
}

/// Current conditions, forecast and auxiliary metrics for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> anyhow::Result<Observation>;

    async fn forecast(&self, query: &LocationQuery) -> anyhow::Result<Forecast>;

    /// Place name for coordinates, `None` when the provider knows no name.
    async fn reverse_geocode(&self, coords: Coordinates) -> anyhow::Result<Option<String>>;

    /// Air quality index on a 1..=5 scale.
    async fn air_quality(&self, coords: Coordinates) -> anyhow::Result<Option<u8>>;

    async fn uv_index(&self, coords: Coordinates) -> anyhow::Result<Option<f64>>;
}

/// Daily history for a location over an inclusive date range.
#[async_trait]
pub trait HistoryProvider: Send + Sync + Debug {
    async fn history(
        &self,
        query: &LocationQuery,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<HistoricalDay>>;
}

fn require_api_key(id: ProviderId, config: &Config) -> anyhow::Result<&str> {
    config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `skyboard configure {id}` and enter your API key."
        )
    })
}

/// Construct the weather provider from config.
pub fn weather_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = require_api_key(ProviderId::OpenWeather, config)?;
    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}

/// Construct the history provider, if one is configured. History is optional.
pub fn history_provider_from_config(config: &Config) -> Option<Box<dyn HistoryProvider>> {
    let api_key = config.provider_api_key(ProviderId::VisualCrossing)?;
    Some(Box::new(VisualCrossingProvider::new(api_key.to_owned())))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
