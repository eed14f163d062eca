//! Append-only observation history.
//!
//! Entries are kept in insertion order for the life of the process and are
//! never edited or evicted.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::{AirQualityReading, WeatherReading};

// ---

/// One logged observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    // ---
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: i32,
    pub aqi_index: i32,
}

impl HistoryEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        weather: &WeatherReading,
        aqi: &AirQualityReading,
    ) -> Self {
        // ---
        Self {
            timestamp,
            temperature_c: weather.temperature_c,
            humidity_pct: weather.humidity_pct,
            aqi_index: aqi.aqi_index,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Temp: {:.1}°C, Humidity: {}%, AQI: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.temperature_c,
            self.humidity_pct,
            self.aqi_index
        )
    }
}

/// Insertion-ordered log of observations.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the log.
    pub fn record(&mut self, entry: HistoryEntry) {
        // ---
        tracing::debug!("History entry #{}: {}", self.entries.len() + 1, entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries as display lines joined by newlines.
    pub fn render(&self) -> String {
        // ---
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn entry(minute: u32, temp: f64) -> HistoryEntry {
        // ---
        let weather = WeatherReading {
            temperature_c: temp,
            humidity_pct: 22,
            wind_speed_ms: 4.0,
            latitude: 0.0,
            longitude: 0.0,
        };
        let aqi = AirQualityReading {
            aqi_index: 2,
            co_concentration: 210.0,
            pm25: 12.0,
        };
        HistoryEntry::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 14, minute, 0).unwrap(),
            &weather,
            &aqi,
        )
    }

    #[test]
    fn test_entry_format() {
        // ---
        assert_eq!(
            entry(5, 38.46).to_string(),
            "[2025-06-01T14:05:00Z] Temp: 38.5°C, Humidity: 22%, AQI: 2"
        );
    }

    #[test]
    fn test_insertion_order() {
        // ---
        let mut log = HistoryLog::new();
        assert!(log.is_empty());

        log.record(entry(0, 30.0));
        log.record(entry(5, 31.0));
        log.record(entry(10, 32.0));

        assert_eq!(log.len(), 3);
        let temps: Vec<f64> = log.entries().iter().map(|e| e.temperature_c).collect();
        assert_eq!(temps, vec![30.0, 31.0, 32.0]);
    }

    #[test]
    fn test_render_joins_lines() {
        // ---
        let mut log = HistoryLog::new();
        assert_eq!(log.render(), "");

        log.record(entry(0, 30.0));
        log.record(entry(5, 31.0));

        let text = log.render();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("[2025-06-01T14:00:00Z] Temp: 30.0°C"));
    }
}
