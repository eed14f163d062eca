//! User-adjustable risk thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{FireWatchError, Result};

// ---

/// Limits the classifier compares readings against.
///
/// No ordering or sign is enforced; any finite value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    // ---
    pub temperature_threshold_c: f64,
    pub humidity_threshold_pct: f64,
    pub wind_threshold_ms: f64,
    pub pm25_threshold: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            temperature_threshold_c: 35.0,
            humidity_threshold_pct: 35.0,
            wind_threshold_ms: 15.0,
            pm25_threshold: 50.0,
        }
    }
}

/// Raw threshold edit as typed by the user, one string per field.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdInput {
    // ---
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub pm25: String,
}

/// Parse a complete threshold edit.
///
/// All four fields must parse as finite numbers; otherwise nothing is applied
/// and [`FireWatchError::InvalidInput`] names the first offending field.
pub fn update_thresholds(input: &ThresholdInput) -> Result<RiskThresholds> {
    // ---
    Ok(RiskThresholds {
        temperature_threshold_c: parse_field("temperature", &input.temperature)?,
        humidity_threshold_pct: parse_field("humidity", &input.humidity)?,
        wind_threshold_ms: parse_field("wind", &input.wind)?,
        pm25_threshold: parse_field("pm25", &input.pm25)?,
    })
}

fn parse_field(name: &str, raw: &str) -> Result<f64> {
    // ---
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| FireWatchError::InvalidInput(format!("{name} '{raw}': {e}")))?;

    if !value.is_finite() {
        return Err(FireWatchError::InvalidInput(format!(
            "{name} '{raw}' is not a finite number"
        )));
    }
    Ok(value)
}
