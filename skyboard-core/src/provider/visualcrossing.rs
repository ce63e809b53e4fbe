use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    condition::historical_icon_key,
    model::{HistoricalDay, LocationQuery},
    units::kmh_to_ms,
};

use super::{HistoryProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://weather.visualcrossing.com";
const TIMELINE_PATH: [&str; 4] = ["VisualCrossingWebServices", "rest", "services", "timeline"];

#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self { api_key, base_url: base_url.to_string(), http: Client::new() }
    }

    fn timeline_url(&self, location: &str, start: NaiveDate, end: NaiveDate) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid Visual Crossing base URL: {}", self.base_url))?;

        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Visual Crossing base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(TIMELINE_PATH)
            .extend([location, start.as_str(), end.as_str()]);

        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct VcDay {
    datetime: NaiveDate,
    temp: f64,
    tempmax: f64,
    tempmin: f64,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    conditions: String,
    #[serde(default)]
    humidity: f64,
    /// km/h with `unitGroup=metric`
    #[serde(default)]
    windspeed: f64,
}

#[derive(Debug, Deserialize)]
struct VcTimelineResponse {
    days: Vec<VcDay>,
}

#[async_trait]
impl HistoryProvider for VisualCrossingProvider {
    async fn history(
        &self,
        query: &LocationQuery,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoricalDay>> {
        let location = query.to_string();
        let url = self.timeline_url(&location, start, end)?;
        tracing::debug!(%url, "requesting Visual Crossing history");

        let res = self
            .http
            .get(url)
            .query(&[
                ("unitGroup", "metric"),
                ("contentType", "json"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to Visual Crossing (history)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Visual Crossing history response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Visual Crossing history request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: VcTimelineResponse =
            serde_json::from_str(&body).context("Failed to parse Visual Crossing history JSON")?;

        Ok(parsed
            .days
            .into_iter()
            .map(|day| HistoricalDay {
                date: day.datetime,
                temp_c: day.temp,
                temp_max_c: day.tempmax,
                temp_min_c: day.tempmin,
                icon_key: historical_icon_key(&day.icon).to_string(),
                description: day.conditions,
                humidity_pct: day.humidity,
                wind_speed_ms: kmh_to_ms(day.windspeed),
            })
            .collect())
    }
}
