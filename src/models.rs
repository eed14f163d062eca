//! Reading types and the upstream response shapes they are parsed from.
//!
//! The raw structs mirror the OpenWeatherMap JSON layout and never leave this
//! module; callers only see [`WeatherReading`] and [`AirQualityReading`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FireWatchError, Result};

// ---

/// One weather observation for a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherReading {
    // ---
    pub temperature_c: f64,
    pub humidity_pct: i32,
    pub wind_speed_ms: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// One air-quality observation, keyed on a weather reading's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQualityReading {
    // ---
    pub aqi_index: i32,
    pub co_concentration: f64,
    pub pm25: f64,
}

/// Raw weather API body (`/data/2.5/weather`)
#[derive(Debug, Deserialize)]
struct RawWeatherResponse {
    main: RawWeatherMain,
    wind: RawWind,
    coord: RawCoord,
}

#[derive(Debug, Deserialize)]
struct RawWeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

/// Raw air pollution body (`/data/2.5/air_pollution`). Entries stay untyped
/// so a bad trailing entry cannot fail the parse; only the first is read.
#[derive(Debug, Deserialize)]
struct RawAirQualityResponse {
    list: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawAirQualityEntry {
    main: RawAirQualityMain,
    components: RawComponents,
}

#[derive(Debug, Deserialize)]
struct RawAirQualityMain {
    aqi: f64,
}

#[derive(Debug, Deserialize)]
struct RawComponents {
    co: f64,
    pm2_5: f64,
}

// ---

/// Parse a weather API body into a [`WeatherReading`].
///
/// Fails with [`FireWatchError::MalformedResponse`] when any of `main.temp`,
/// `main.humidity`, `wind.speed`, `coord.lat` or `coord.lon` is missing,
/// non-numeric or non-finite.
pub fn parse_weather(raw_json: &str) -> Result<WeatherReading> {
    // ---
    let raw: RawWeatherResponse = serde_json::from_str(raw_json)
        .map_err(|e| FireWatchError::MalformedResponse(format!("weather: {e}")))?;

    Ok(WeatherReading {
        temperature_c: finite("main.temp", raw.main.temp)?,
        humidity_pct: truncate("main.humidity", raw.main.humidity)?,
        wind_speed_ms: finite("wind.speed", raw.wind.speed)?,
        latitude: finite("coord.lat", raw.coord.lat)?,
        longitude: finite("coord.lon", raw.coord.lon)?,
    })
}

/// Parse an air pollution API body into an [`AirQualityReading`].
///
/// An empty `list` is [`FireWatchError::EmptyResult`]; a missing `list` or a
/// first entry without `main.aqi`, `components.co` or `components.pm2_5` is
/// [`FireWatchError::MalformedResponse`].
pub fn parse_air_quality(raw_json: &str) -> Result<AirQualityReading> {
    // ---
    let raw: RawAirQualityResponse = serde_json::from_str(raw_json)
        .map_err(|e| FireWatchError::MalformedResponse(format!("air quality: {e}")))?;

    let Some(first) = raw.list.into_iter().next() else {
        return Err(FireWatchError::EmptyResult(
            "air quality response contained no entries".to_string(),
        ));
    };

    let entry: RawAirQualityEntry = serde_json::from_value(first)
        .map_err(|e| FireWatchError::MalformedResponse(format!("air quality list[0]: {e}")))?;

    Ok(AirQualityReading {
        aqi_index: truncate("list[0].main.aqi", entry.main.aqi)?,
        co_concentration: finite("list[0].components.co", entry.components.co)?,
        pm25: finite("list[0].components.pm2_5", entry.components.pm2_5)?,
    })
}

fn finite(field: &str, value: f64) -> Result<f64> {
    // ---
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FireWatchError::MalformedResponse(format!(
            "{field} is not a finite number"
        )))
    }
}

/// Integer fields accept any JSON number and truncate toward zero.
fn truncate(field: &str, value: f64) -> Result<i32> {
    // ---
    let value = finite(field, value)?.trunc();
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(FireWatchError::MalformedResponse(format!(
            "{field} is out of range"
        )));
    }
    Ok(value as i32)
}
