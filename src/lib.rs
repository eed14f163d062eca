//! Fire-risk monitor: polls weather and air-quality data for a location and
//! classifies the fire risk against user-adjustable thresholds.
//!
//! Module boundaries follow the same gateway layout as the binary: each module
//! owns its internals and the crate root re-exports what the others (and the
//! integration tests) need, so `routes/*.rs` only ever import from `crate`.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod poller;
pub mod risk;
pub mod routes;
pub mod state;
pub mod thresholds;

pub use client::ApiClient;
pub use config::Config;
pub use error::FireWatchError;
pub use history::{HistoryEntry, HistoryLog};
pub use models::{parse_air_quality, parse_weather, AirQualityReading, WeatherReading};
pub use risk::{classify, RiskAssessment, RiskFactor, RiskLevel};
pub use state::{AppState, DisplaySnapshot, SharedState, StatusIndicator, StatusView};
pub use thresholds::{update_thresholds, RiskThresholds, ThresholdInput};
