use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;

use crate::{
    config::DEFAULT_BASE_URL,
    error::{Result, WeatherError},
    model::{Coordinates, WeatherReading},
};

use super::WeatherProvider;

const DIRECT: &str = "direct geocoding";
const ZIP: &str = "zip geocoding";
const WEATHER: &str = "current weather";

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
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

    async fn get(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {path} ({endpoint})");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        log::debug!("{endpoint} answered {status}");
        Ok((status, body))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode_by_name(&self, name: &str) -> Result<Option<Coordinates>> {
        let (status, body) = self
            .get(DIRECT, "/geo/1.0/direct", &[("q", name), ("appid", self.api_key.as_str())])
            .await?;
        decode_direct(status, &body)
    }

    async fn geocode_by_zip(&self, zip: &str) -> Result<Option<Coordinates>> {
        let (status, body) = self
            .get(
                ZIP,
                "/geo/1.0/zip",
                &[("zip", zip), ("appid", self.api_key.as_str()), ("limit", "1")],
            )
            .await?;
        decode_zip(status, &body)
    }

    async fn current_weather(&self, coords: Coordinates) -> Result<Option<WeatherReading>> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        let (status, body) = self
            .get(
                WEATHER,
                "/data/2.5/weather",
                &[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str())],
            )
            .await?;
        decode_weather(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
}

impl From<OwGeoEntry> for Coordinates {
    fn from(e: OwGeoEntry) -> Self {
        Coordinates { lat: e.lat, lon: e.lon }
    }
}

/// Returns true when the caller should go on decoding the body.
fn accepted(endpoint: &str, status: StatusCode, body: &str) -> bool {
    if status == StatusCode::OK {
        return true;
    }
    log::error!(
        "{endpoint} request returned status {status} (expected 200): {}",
        truncate_body(body)
    );
    false
}

/// The direct endpoint answers with a list; the best match comes first.
fn decode_direct(status: StatusCode, body: &str) -> Result<Option<Coordinates>> {
    if !accepted(DIRECT, status, body) {
        return Ok(None);
    }

    let entries: Vec<OwGeoEntry> =
        serde_json::from_str(body).map_err(|e| WeatherError::malformed(DIRECT, e.to_string()))?;

    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::malformed(DIRECT, "empty result list"))?;

    Ok(Some(first.into()))
}

/// The zip endpoint answers with a single object.
fn decode_zip(status: StatusCode, body: &str) -> Result<Option<Coordinates>> {
    if !accepted(ZIP, status, body) {
        return Ok(None);
    }

    let entry: OwGeoEntry =
        serde_json::from_str(body).map_err(|e| WeatherError::malformed(ZIP, e.to_string()))?;

    Ok(Some(entry.into()))
}

fn decode_weather(status: StatusCode, body: &str) -> Result<Option<WeatherReading>> {
    if !accepted(WEATHER, status, body) {
        return Ok(None);
    }

    let reading: WeatherReading = serde_json::from_str(body)
        .map_err(|e| WeatherError::malformed(WEATHER, e.to_string()))?;

    if reading.weather.is_empty() {
        return Err(WeatherError::malformed(WEATHER, "no weather condition entries"));
    }

    Ok(Some(reading))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
