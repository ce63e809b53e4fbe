use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::model::{Coordinates, Forecast, HourlyPoint, LocationQuery, Observation, Reading};

use super::{WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "requesting OpenWeather {what}");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }
}

fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    let mut params = match query {
        LocationQuery::Name(name) => vec![("q", name.trim().to_string())],
        LocationQuery::Coords(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
    };
    params.push(("units", "metric".to_string()));
    params
}

fn coord_params(coords: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    #[serde(default)]
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<f64>,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: OwAirMain,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirEntry>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallCurrent {
    uvi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    current: Option<OwOneCallCurrent>,
}

fn primary_condition(weather: &[OwWeather]) -> (i32, String) {
    weather
        .first()
        .map(|w| (w.id, w.description.clone()))
        .unwrap_or_else(|| (0, "Unknown".to_string()))
}

fn place_name(name: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if !country.is_empty() => format!("{name}, {country}"),
        _ => name.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<Observation> {
        let parsed: OwCurrentResponse = self
            .get_json("/data/2.5/weather", &location_params(query), "current weather")
            .await?;

        let (condition_code, description) = primary_condition(&parsed.weather);
        let observed_at = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);

        Ok(Observation {
            place: place_name(&parsed.name, parsed.sys.country.as_deref()),
            coords: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
            description,
            observed_at,
            timezone_offset_secs: parsed.timezone,
            reading: Reading {
                temperature_c: parsed.main.temp,
                feels_like_c: parsed.main.feels_like.unwrap_or(parsed.main.temp),
                humidity_pct: parsed.main.humidity,
                pressure_hpa: parsed.main.pressure,
                wind_speed_ms: parsed.wind.speed,
                wind_dir_deg: parsed.wind.deg.rem_euclid(360.0),
                visibility_m: parsed.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
                cloud_pct: parsed.clouds.all,
                condition_code,
                sunrise_epoch: parsed.sys.sunrise,
                sunset_epoch: parsed.sys.sunset,
            },
        })
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast> {
        let parsed: OwForecastResponse = self
            .get_json("/data/2.5/forecast", &location_params(query), "5-day forecast")
            .await?;

        if parsed.list.is_empty() {
            return Err(anyhow!("OpenWeather forecast response contained no data"));
        }

        let points = parsed
            .list
            .into_iter()
            .map(|entry| {
                let (condition_code, description) = primary_condition(&entry.weather);
                HourlyPoint {
                    epoch: entry.dt,
                    temperature_c: entry.main.temp,
                    humidity_pct: entry.main.humidity,
                    wind_speed_ms: entry.wind.speed,
                    precip_probability: entry.pop.clamp(0.0, 1.0),
                    condition_code,
                    pressure_hpa: entry.main.pressure,
                    description,
                }
            })
            .collect();

        Ok(Forecast { points, timezone_offset_secs: parsed.city.timezone })
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let mut params = coord_params(coords);
        params.push(("limit", "1".to_string()));

        let parsed: Vec<OwGeoEntry> =
            self.get_json("/geo/1.0/reverse", &params, "reverse geocoding").await?;

        Ok(parsed.first().map(|g| place_name(&g.name, g.country.as_deref())))
    }

    async fn air_quality(&self, coords: Coordinates) -> Result<Option<u8>> {
        let parsed: OwAirResponse =
            self.get_json("/data/2.5/air_pollution", &coord_params(coords), "air pollution").await?;

        Ok(parsed.list.first().map(|e| e.main.aqi))
    }

    async fn uv_index(&self, coords: Coordinates) -> Result<Option<f64>> {
        let mut params = coord_params(coords);
        params.push(("exclude", "minutely,hourly,daily,alerts".to_string()));
        params.push(("units", "metric".to_string()));

        let parsed: OwOneCallResponse =
            self.get_json("/data/3.0/onecall", &params, "UV index").await?;

        Ok(parsed.current.and_then(|c| c.uvi))
    }
}
