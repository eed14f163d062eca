//! Application state shared by the scheduler and the HTTP surface.
//!
//! Held as an `Arc<AppState>` by the top-level process. Each field sits behind
//! its own short-lived lock; the async `cycle_lock` keeps poll cycles from
//! overlapping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::error::{FireWatchError, Result};
use crate::history::{HistoryEntry, HistoryLog};
use crate::models::{AirQualityReading, WeatherReading};
use crate::risk::{RiskAssessment, RiskLevel};
use crate::thresholds::{update_thresholds, RiskThresholds, ThresholdInput};

pub type SharedState = Arc<AppState>;

// ---

/// Formatted live values from the last successful cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    // ---
    pub location: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub air_quality: String,
    pub assessment: RiskAssessment,
    pub updated_at: DateTime<Utc>,
}

impl DisplaySnapshot {
    pub fn new(
        location: &str,
        weather: &WeatherReading,
        aqi: &AirQualityReading,
        assessment: RiskAssessment,
        updated_at: DateTime<Utc>,
    ) -> Self {
        // ---
        Self {
            location: location.to_string(),
            temperature: format!("Temperature: {:.1}°C", weather.temperature_c),
            humidity: format!("Humidity: {}%", weather.humidity_pct),
            wind_speed: format!("Wind Speed: {:.1} m/s", weather.wind_speed_ms),
            air_quality: format!(
                "Air Quality Index: {} (PM2.5: {:.1} µg/m³)",
                aqi.aqi_index, aqi.pm25
            ),
            assessment,
            updated_at,
        }
    }
}

/// Status line state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusIndicator {
    Initializing,
    Assessed { level: RiskLevel },
    Error { message: String },
}

impl StatusIndicator {
    pub fn text(&self) -> String {
        // ---
        match self {
            StatusIndicator::Initializing => "Status: Initializing...".to_string(),
            StatusIndicator::Assessed { level } => format!("Status: {}", level.status_text()),
            StatusIndicator::Error { .. } => "Status: Error fetching data".to_string(),
        }
    }
}

/// Everything the UI needs to render the status panel.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    // ---
    pub location: Option<String>,
    pub display: Option<DisplaySnapshot>,
    pub status: StatusIndicator,
    pub status_text: String,
    pub alerts_raised: u64,
}

#[derive(Debug)]
pub struct AppState {
    // ---
    thresholds: RwLock<RiskThresholds>,
    history: RwLock<HistoryLog>,
    display: RwLock<Option<DisplaySnapshot>>,
    status: RwLock<StatusIndicator>,
    location: RwLock<Option<String>>,
    alerts_raised: AtomicU64,
    cycle_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    pub fn new(thresholds: RiskThresholds, location: Option<String>) -> Self {
        // ---
        Self {
            thresholds: RwLock::new(thresholds),
            history: RwLock::new(HistoryLog::new()),
            display: RwLock::new(None),
            status: RwLock::new(StatusIndicator::Initializing),
            location: RwLock::new(location),
            alerts_raised: AtomicU64::new(0),
            cycle_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn shared(thresholds: RiskThresholds, location: Option<String>) -> SharedState {
        Arc::new(Self::new(thresholds, location))
    }

    pub fn thresholds(&self) -> RiskThresholds {
        *self.thresholds.read()
    }

    /// Apply a threshold edit atomically; on error the old values stay.
    pub fn update_thresholds(&self, input: &ThresholdInput) -> Result<RiskThresholds> {
        // ---
        let updated = update_thresholds(input).inspect_err(|e| {
            tracing::warn!("Rejected threshold update: {}", e);
        })?;

        *self.thresholds.write() = updated;
        tracing::info!("Thresholds updated: {:?}", updated);
        Ok(updated)
    }

    pub fn location(&self) -> Option<String> {
        self.location.read().clone()
    }

    /// Set the location used by scheduled cycles.
    pub fn set_location(&self, location: &str) -> Result<String> {
        // ---
        let location = location.trim();
        if location.is_empty() {
            return Err(FireWatchError::InvalidInput(
                "Please enter a location".to_string(),
            ));
        }
        *self.location.write() = Some(location.to_string());
        Ok(location.to_string())
    }

    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.read().entries().to_vec()
    }

    pub fn history_text(&self) -> String {
        self.history.read().render()
    }

    pub fn display(&self) -> Option<DisplaySnapshot> {
        self.display.read().clone()
    }

    pub fn status(&self) -> StatusIndicator {
        self.status.read().clone()
    }

    pub fn alerts_raised(&self) -> u64 {
        self.alerts_raised.load(Ordering::SeqCst)
    }

    pub fn status_view(&self) -> StatusView {
        // ---
        let status = self.status();
        StatusView {
            location: self.location(),
            display: self.display(),
            status_text: status.text(),
            status,
            alerts_raised: self.alerts_raised(),
        }
    }

    /// Guard that serializes poll cycles.
    pub(crate) async fn lock_cycle(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.cycle_lock.lock().await
    }

    /// Publish a successful cycle: display, status, then history.
    pub(crate) fn record_success(&self, display: DisplaySnapshot, entry: HistoryEntry) {
        // ---
        let level = display.assessment.level;
        *self.display.write() = Some(display);
        *self.status.write() = StatusIndicator::Assessed { level };
        self.history.write().record(entry);
    }

    /// Mark the status as failed; display and history are left as they were.
    pub(crate) fn record_failure(&self, err: &FireWatchError) {
        *self.status.write() = StatusIndicator::Error {
            message: err.to_string(),
        };
    }

    pub(crate) fn raise_alert(&self, location: &str) {
        // ---
        let count = self.alerts_raised.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::warn!("ALERT: Critical Fire Risk Detected at '{}' (alert #{})", location, count);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::risk::classify;

    fn readings() -> (WeatherReading, AirQualityReading) {
        // ---
        (
            WeatherReading {
                temperature_c: 36.26,
                humidity_pct: 30,
                wind_speed_ms: 7.0,
                latitude: 1.0,
                longitude: 2.0,
            },
            AirQualityReading {
                aqi_index: 3,
                co_concentration: 250.0,
                pm25: 42.04,
            },
        )
    }

    #[test]
    fn test_display_formatting() {
        // ---
        let (w, q) = readings();
        let a = classify(&w, &q, &RiskThresholds::default());
        let d = DisplaySnapshot::new("Hoshiarpur", &w, &q, a, Utc::now());

        assert_eq!(d.temperature, "Temperature: 36.3°C");
        assert_eq!(d.humidity, "Humidity: 30%");
        assert_eq!(d.wind_speed, "Wind Speed: 7.0 m/s");
        assert_eq!(d.air_quality, "Air Quality Index: 3 (PM2.5: 42.0 µg/m³)");
    }

    #[test]
    fn test_failed_threshold_update_keeps_previous() {
        // ---
        let state = AppState::new(RiskThresholds::default(), None);
        let bad = ThresholdInput {
            temperature: "45".into(),
            humidity: "20".into(),
            wind: "ten".into(),
            pm25: "80".into(),
        };

        assert!(state.update_thresholds(&bad).is_err());
        assert_eq!(state.thresholds(), RiskThresholds::default());
    }

    #[test]
    fn test_successful_threshold_update() {
        // ---
        let state = AppState::new(RiskThresholds::default(), None);
        let good = ThresholdInput {
            temperature: "45".into(),
            humidity: "20".into(),
            wind: "10".into(),
            pm25: "80".into(),
        };

        let updated = state.update_thresholds(&good).unwrap();
        assert_eq!(state.thresholds(), updated);
        assert_eq!(updated.temperature_threshold_c, 45.0);
    }

    #[test]
    fn test_set_location_rejects_blank() {
        // ---
        let state = AppState::new(RiskThresholds::default(), Some("Delhi".into()));

        assert!(state.set_location("   ").is_err());
        assert_eq!(state.location().as_deref(), Some("Delhi"));

        assert_eq!(state.set_location(" Shimla ").unwrap(), "Shimla");
        assert_eq!(state.location().as_deref(), Some("Shimla"));
    }

    #[test]
    fn test_failure_keeps_display_and_history() {
        // ---
        let state = AppState::new(RiskThresholds::default(), Some("Delhi".into()));
        assert_eq!(state.status_view().status_text, "Status: Initializing...");

        let (w, q) = readings();
        let a = classify(&w, &q, &state.thresholds());
        let now = Utc::now();
        state.record_success(
            DisplaySnapshot::new("Delhi", &w, &q, a, now),
            HistoryEntry::new(now, &w, &q),
        );
        let before = state.display();

        state.record_failure(&FireWatchError::EmptyResult("none".into()));

        assert_eq!(state.display(), before);
        assert_eq!(state.history_entries().len(), 1);
        assert!(matches!(state.status(), StatusIndicator::Error { .. }));
        assert_eq!(state.status().text(), "Status: Error fetching data");
    }
}
