//! Refresh pipeline: fetch current conditions, then the forecast, then the
//! auxiliary metrics concurrently, and derive every display value from the
//! results.

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use parking_lot::Mutex;
use std::{collections::HashSet, future::Future};

use crate::{
    Config,
    activity::{ActivityScore, score_activities},
    alerts::{Alert, derive_alerts_with},
    comfort::{ComfortLevel, comfort_level},
    config::Settings,
    forecast::{DailySummary, daily_summaries},
    model::{Forecast, HistoricalDay, LocationQuery, Observation},
    provider::{
        HistoryProvider, WeatherProvider, history_provider_from_config,
        weather_provider_from_config,
    },
    suggestions::suggestions,
    trend::{PressureTrend, TemperatureTrend, pressure_trend, temperature_trend},
};

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("A refresh for '{0}' is already in progress")]
    InFlight(String),
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

/// Everything the dashboard shows for one location, computed once per refresh.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub query: LocationQuery,
    pub place: String,
    pub observation: Observation,
    pub forecast: Forecast,
    pub daily: Vec<DailySummary>,
    pub history: Vec<HistoricalDay>,
    pub air_quality: Option<u8>,
    pub uv_index: Option<f64>,
    pub settings: Settings,
    pub alerts: Vec<Alert>,
    pub comfort: ComfortLevel,
    pub temperature_trend: Option<TemperatureTrend>,
    pub pressure_trend: Option<PressureTrend>,
    pub suggestions: Vec<&'static str>,
    pub activities: Vec<ActivityScore>,
}

/// Raw provider results for one refresh.
#[derive(Debug, Clone)]
pub struct FetchedData {
    pub place: String,
    pub observation: Observation,
    pub forecast: Forecast,
    pub history: Vec<HistoricalDay>,
    pub air_quality: Option<u8>,
    pub uv_index: Option<f64>,
}

impl DashboardSnapshot {
    pub fn compute(
        query: LocationQuery,
        data: FetchedData,
        settings: Settings,
        now: DateTime<Utc>,
    ) -> Self {
        let reading = data.observation.reading;
        let units = settings.units();
        let basis = settings.threshold_basis;
        let local_hour = local_time(now, data.observation.timezone_offset_secs).hour();

        Self {
            alerts: derive_alerts_with(&reading, &units, basis),
            comfort: comfort_level(
                reading.temperature_c,
                reading.humidity_pct,
                units.temp_unit,
                basis,
            ),
            temperature_trend: temperature_trend(reading.temperature_c, &data.forecast.points),
            pressure_trend: pressure_trend(reading.pressure_hpa, &data.forecast.points),
            suggestions: suggestions(&reading, local_hour, units.temp_unit, basis),
            activities: score_activities(&reading),
            daily: daily_summaries(&data.forecast),
            query,
            place: data.place,
            observation: data.observation,
            forecast: data.forecast,
            history: data.history,
            air_quality: data.air_quality,
            uv_index: data.uv_index,
            settings,
        }
    }

    /// The alert to push as a notification, if notifications are enabled.
    pub fn notification(&self) -> Option<&Alert> {
        if self.settings.notifications { self.alerts.first() } else { None }
    }
}

fn local_time(now: DateTime<Utc>, offset_secs: i32) -> chrono::NaiveDateTime {
    (now + TimeDelta::seconds(i64::from(offset_secs))).naive_utc()
}

/// Removes its key from the in-flight set when dropped, including on error
/// and when the refresh future is cancelled.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

#[derive(Debug)]
pub struct Dashboard {
    weather: Box<dyn WeatherProvider>,
    history: Option<Box<dyn HistoryProvider>>,
    in_flight: Mutex<HashSet<String>>,
}

impl Dashboard {
    pub fn new(weather: Box<dyn WeatherProvider>) -> Self {
        Self { weather, history: None, in_flight: Mutex::new(HashSet::new()) }
    }

    pub fn with_history(mut self, history: Box<dyn HistoryProvider>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dashboard = Self::new(weather_provider_from_config(config)?);
        Ok(match history_provider_from_config(config) {
            Some(history) => dashboard.with_history(history),
            None => {
                tracing::debug!("no history provider configured");
                dashboard
            }
        })
    }

    fn begin(&self, query: &LocationQuery) -> Result<InFlightGuard<'_>, RefreshError> {
        let key = query.key();
        if !self.in_flight.lock().insert(key.clone()) {
            tracing::warn!(location = %query, "refresh already in progress");
            return Err(RefreshError::InFlight(query.to_string()));
        }
        Ok(InFlightGuard { in_flight: &self.in_flight, key })
    }

    /// Refresh one location. An overlapping refresh for the same location
    /// fails fast with [`RefreshError::InFlight`].
    pub async fn refresh(
        &self,
        query: &LocationQuery,
        settings: &Settings,
    ) -> Result<DashboardSnapshot, RefreshError> {
        let _guard = self.begin(query)?;
        tracing::info!(location = %query, "refreshing weather");

        let observation = self.weather.current(query).await?;
        let forecast = self.weather.forecast(query).await?;

        let now = Utc::now();
        let today = local_time(now, observation.timezone_offset_secs).date();
        let coords = observation.coords;

        let (place, air_quality, uv_index, history) = tokio::join!(
            self.place_name(query, &observation),
            degrade(self.weather.air_quality(coords), "air quality"),
            degrade(self.weather.uv_index(coords), "UV index"),
            self.recent_history(query, today),
        );

        let data = FetchedData {
            place,
            observation,
            forecast,
            history,
            air_quality: air_quality.flatten(),
            uv_index: uv_index.flatten(),
        };
        tracing::info!(location = %query, place = %data.place, "refresh complete");

        Ok(DashboardSnapshot::compute(query.clone(), data, *settings, now))
    }

    async fn place_name(&self, query: &LocationQuery, observation: &Observation) -> String {
        match query {
            LocationQuery::Name(_) => observation.place.clone(),
            LocationQuery::Coords(coords) => {
                degrade(self.weather.reverse_geocode(*coords), "reverse geocoding")
                    .await
                    .flatten()
                    .unwrap_or_else(|| observation.place.clone())
            }
        }
    }

    /// The two days before `today`. Empty when no history provider is set
    /// or the fetch fails.
    async fn recent_history(&self, query: &LocationQuery, today: NaiveDate) -> Vec<HistoricalDay> {
        let Some(history) = &self.history else {
            return Vec::new();
        };

        let start = today - TimeDelta::days(2);
        let end = today - TimeDelta::days(1);
        degrade(history.history(query, start, end), "history").await.unwrap_or_default()
    }
}

/// Log and swallow a failure from an auxiliary fetch.
async fn degrade<T>(fut: impl Future<Output = anyhow::Result<T>>, what: &str) -> Option<T> {
    match fut.await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "{what} unavailable");
            None
        }
    }
}
