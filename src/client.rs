//! HTTP client for the weather and air pollution endpoints.
//!
//! Fetching and parsing are kept separate: this module only moves bytes and
//! maps transport/status failures, then hands the body to `models`.

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::{FireWatchError, Result};
use crate::models::{parse_air_quality, parse_weather, AirQualityReading, WeatherReading};

// ---

/// Thin wrapper around a shared [`reqwest::Client`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    // ---
    client: Client,
    api_key: String,
    weather_url: String,
    aqi_url: String,
}

impl ApiClient {
    pub fn new(
        api_key: impl Into<String>,
        weather_url: impl Into<String>,
        aqi_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        // ---
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            weather_url: weather_url.into(),
            aqi_url: aqi_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.api_key.clone(),
            config.weather_api_url.clone(),
            config.aqi_api_url.clone(),
            config.api_timeout,
        )
    }

    /// Fetch current weather for a location (`units=metric`).
    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherReading> {
        // ---
        tracing::debug!("Fetching weather for '{}' from {}", location, self.weather_url);

        let request = self.client.get(&self.weather_url).query(&[
            ("q", location),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);
        let body = Self::send(request).await?;

        parse_weather(&body)
    }

    /// Fetch air quality at the given coordinates.
    pub async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityReading> {
        // ---
        tracing::debug!("Fetching air quality for ({}, {}) from {}", lat, lon, self.aqi_url);

        let request = self.client.get(&self.aqi_url).query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
        ]);
        let body = Self::send(request).await?;

        parse_air_quality(&body)
    }

    /// Send a request and return its body, failing on any non-2xx status.
    async fn send(request: reqwest::RequestBuilder) -> Result<String> {
        // ---
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Upstream error bodies usually carry a `message`; fall back to the reason phrase
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|b| serde_json::from_str::<serde_json::Value>(&b).ok())
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

            tracing::warn!("Upstream returned {}: {}", status, detail);
            return Err(FireWatchError::ApiRequestFailed {
                status_code: Some(status.as_u16()),
                message: detail,
            });
        }

        let body = response.text().await?;
        tracing::trace!("Upstream body: {}", body);
        Ok(body)
    }
}
