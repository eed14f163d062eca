//! Configuration loader for the `firewatch` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The API key is only ever read from here and is
//! masked whenever the configuration is logged.
//!
use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::thresholds::RiskThresholds;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_AQI_API_URL: &str = "http://api.openweathermap.org/data/2.5/air_pollution";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional finite float environment variable with a default value.
macro_rules! parse_env_f64 {
    ($var_name:expr, $default:expr) => {
        match env::var($var_name).ok() {
            Some(v) => match v.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                Ok(_) => return Err(anyhow!("Invalid {}: not a finite number", $var_name)),
                Err(e) => return Err(anyhow!("Invalid {}: {}", $var_name, e)),
            },
            None => $default,
        }
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading. Thresholds here are only the
/// starting values; live edits go through the application state.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// OpenWeatherMap API key.
    pub api_key: String,

    /// Current weather endpoint.
    pub weather_api_url: String,

    /// Air pollution endpoint.
    pub aqi_api_url: String,

    /// Location polled by the scheduler until a manual poll changes it.
    pub location: Option<String>,

    /// Interval between scheduled poll cycles.
    pub poll_interval: Duration,

    /// Per-request timeout for upstream calls.
    pub api_timeout: Duration,

    /// Port the HTTP surface listens on.
    pub http_port: u16,

    /// Thresholds in effect at startup.
    pub initial_thresholds: RiskThresholds,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `OWM_API_KEY` – OpenWeatherMap API key
///
/// Optional:
/// - `WEATHER_API_URL` / `AQI_API_URL` – upstream endpoints
/// - `FIREWATCH_LOCATION` – location for scheduled polls (default: none)
/// - `POLL_INTERVAL_MS` – scheduler interval (default: 300000)
/// - `API_TIMEOUT_SECS` – upstream request timeout (default: 30)
/// - `HTTP_PORT` – listen port (default: 8080)
/// - `RISK_TEMP_C`, `RISK_HUMIDITY_PCT`, `RISK_WIND_MS`, `RISK_PM25` –
///   starting thresholds (default: 35, 35, 15, 50)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_key = require_env!("OWM_API_KEY");
    if api_key.trim().is_empty() {
        return Err(anyhow!("OWM_API_KEY must not be empty"));
    }

    let weather_api_url =
        env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string());
    let aqi_api_url = env::var("AQI_API_URL").unwrap_or_else(|_| DEFAULT_AQI_API_URL.to_string());
    let location = env::var("FIREWATCH_LOCATION")
        .ok()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let poll_interval_ms = parse_env_u64!("POLL_INTERVAL_MS", 300_000);
    if poll_interval_ms == 0 {
        return Err(anyhow!("Invalid POLL_INTERVAL_MS: must be greater than zero"));
    }
    let api_timeout_secs = parse_env_u64!("API_TIMEOUT_SECS", 30);
    let http_port = u16::try_from(parse_env_u64!("HTTP_PORT", 8080))
        .map_err(|e| anyhow!("Invalid HTTP_PORT: {}", e))?;

    let defaults = RiskThresholds::default();
    let initial_thresholds = RiskThresholds {
        temperature_threshold_c: parse_env_f64!("RISK_TEMP_C", defaults.temperature_threshold_c),
        humidity_threshold_pct: parse_env_f64!("RISK_HUMIDITY_PCT", defaults.humidity_threshold_pct),
        wind_threshold_ms: parse_env_f64!("RISK_WIND_MS", defaults.wind_threshold_ms),
        pm25_threshold: parse_env_f64!("RISK_PM25", defaults.pm25_threshold),
    };

    Ok(Config {
        api_key,
        weather_api_url,
        aqi_api_url,
        location,
        poll_interval: Duration::from_millis(poll_interval_ms),
        api_timeout: Duration::from_secs(api_timeout_secs),
        http_port,
        initial_thresholds,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the API key while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let t = &self.initial_thresholds;

        tracing::info!("Configuration loaded:");
        tracing::info!("  OWM_API_KEY        : {}", mask_secret(&self.api_key));
        tracing::info!("  WEATHER_API_URL    : {}", self.weather_api_url);
        tracing::info!("  AQI_API_URL        : {}", self.aqi_api_url);
        tracing::info!(
            "  FIREWATCH_LOCATION : {}",
            self.location.as_deref().unwrap_or("<unset>")
        );
        tracing::info!("  POLL_INTERVAL_MS   : {}", self.poll_interval.as_millis());
        tracing::info!("  API_TIMEOUT_SECS   : {}", self.api_timeout.as_secs());
        tracing::info!("  HTTP_PORT          : {}", self.http_port);
        tracing::info!(
            "  THRESHOLDS         : temp>{} humidity<{} wind>{} pm25>{}",
            t.temperature_threshold_c,
            t.humidity_threshold_pct,
            t.wind_threshold_ms,
            t.pm25_threshold
        );
    }
}

/// Keep the last four characters of a secret, mask the rest.
fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
