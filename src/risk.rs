//! Fire-risk classification.
//!
//! Four independent predicates are evaluated against the active thresholds and
//! the number that hold decides the level. Humidity is the odd one out: it
//! triggers when the reading falls *below* its threshold.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::models::{AirQualityReading, WeatherReading};
use crate::thresholds::RiskThresholds;

// ---

/// Categorical fire-risk level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a count of triggered factors onto a level.
    pub fn from_factor_count(count: usize) -> Self {
        // ---
        match count {
            0 => RiskLevel::Normal,
            1 => RiskLevel::Moderate,
            2 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Status line text shown to the user.
    pub fn status_text(self) -> &'static str {
        // ---
        match self {
            RiskLevel::Normal => "Normal Conditions",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Fire Risk",
            RiskLevel::Critical => "CRITICAL FIRE RISK!",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

/// One of the four conditions that can contribute to fire risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Temperature,
    Humidity,
    Wind,
    AirQuality,
}

/// Result of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    // ---
    pub level: RiskLevel,
    pub triggered_factors: BTreeSet<RiskFactor>,
}

impl RiskAssessment {
    pub fn is_critical(&self) -> bool {
        self.level == RiskLevel::Critical
    }
}

/// Classify a pair of readings against the given thresholds.
pub fn classify(
    weather: &WeatherReading,
    aqi: &AirQualityReading,
    thresholds: &RiskThresholds,
) -> RiskAssessment {
    // ---
    let predicates = [
        (
            RiskFactor::Temperature,
            weather.temperature_c > thresholds.temperature_threshold_c,
        ),
        (
            RiskFactor::Humidity,
            f64::from(weather.humidity_pct) < thresholds.humidity_threshold_pct,
        ),
        (
            RiskFactor::Wind,
            weather.wind_speed_ms > thresholds.wind_threshold_ms,
        ),
        (RiskFactor::AirQuality, aqi.pm25 > thresholds.pm25_threshold),
    ];

    let triggered_factors: BTreeSet<RiskFactor> = predicates
        .into_iter()
        .filter_map(|(factor, hit)| hit.then_some(factor))
        .collect();

    RiskAssessment {
        level: RiskLevel::from_factor_count(triggered_factors.len()),
        triggered_factors,
    }
}
