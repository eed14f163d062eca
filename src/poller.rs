//! Fetch → parse → classify → display → log cycle and its periodic driver.
//!
//! Scheduled ticks and manual polls both go through [`run_cycle`], which holds
//! the state's cycle lock for its whole duration so at most one cycle is in
//! flight at a time.

use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};

use crate::client::ApiClient;
use crate::error::{FireWatchError, Result};
use crate::history::HistoryEntry;
use crate::risk::{classify, RiskAssessment};
use crate::state::{DisplaySnapshot, SharedState};

// ---

/// Run one complete poll cycle for `location`.
///
/// On success the display, status and history are updated and the assessment
/// is returned. On a fetch or parse failure only the status indicator changes.
pub async fn run_cycle(
    state: &SharedState,
    client: &ApiClient,
    location: &str,
) -> Result<RiskAssessment> {
    // ---
    let location = location.trim();
    if location.is_empty() {
        return Err(FireWatchError::InvalidInput(
            "Please enter a location".to_string(),
        ));
    }

    let _guard = state.lock_cycle().await;
    tracing::info!("Poll cycle starting for '{}'", location);

    // Step 1: Fetch weather, then air quality at its coordinates
    let fetched = async {
        let weather = client.fetch_weather(location).await?;
        let aqi = client
            .fetch_air_quality(weather.latitude, weather.longitude)
            .await?;
        Ok::<_, FireWatchError>((weather, aqi))
    }
    .await;

    let (weather, aqi) = match fetched {
        Ok(readings) => readings,
        Err(e) => {
            tracing::error!("Poll cycle for '{}' failed: {}", location, e);
            state.record_failure(&e);
            return Err(e);
        }
    };

    // Step 2: Classify against the thresholds in effect right now
    let assessment = classify(&weather, &aqi, &state.thresholds());
    tracing::info!(
        "'{}': {} ({} factor(s): {:?})",
        location,
        assessment.level,
        assessment.triggered_factors.len(),
        assessment.triggered_factors
    );

    // Step 3: Publish display + history, alert on critical
    let now = Utc::now();
    state.record_success(
        DisplaySnapshot::new(location, &weather, &aqi, assessment.clone(), now),
        HistoryEntry::new(now, &weather, &aqi),
    );
    if assessment.is_critical() {
        state.raise_alert(location);
    }

    Ok(assessment)
}

/// Drive [`run_cycle`] on a fixed interval, forever.
///
/// The first tick fires immediately. Ticks with no location configured are
/// skipped; cycle errors are logged and the loop carries on.
pub async fn run_scheduler(state: SharedState, client: ApiClient, period: Duration) {
    // ---
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!("Scheduler started, polling every {:?}", period);

    loop {
        ticker.tick().await;

        let Some(location) = state.location() else {
            tracing::info!("No location configured, skipping scheduled poll");
            continue;
        };

        if let Err(e) = run_cycle(&state, &client, &location).await {
            tracing::warn!("Scheduled poll failed, retrying next cycle: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::state::{AppState, StatusIndicator};
    use crate::thresholds::RiskThresholds;

    #[tokio::test]
    async fn test_blank_location_rejected_before_fetch() {
        // ---
        let state = AppState::shared(RiskThresholds::default(), None);
        let client = ApiClient::new(
            "test-key",
            "http://127.0.0.1:9/weather",
            "http://127.0.0.1:9/air",
            Duration::from_secs(1),
        )
        .unwrap();

        let err = run_cycle(&state, &client, "  ").await.unwrap_err();

        assert!(matches!(err, FireWatchError::InvalidInput(_)));
        assert_eq!(state.status(), StatusIndicator::Initializing);
        assert!(state.history_entries().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_sets_error_status() {
        // ---
        let state = AppState::shared(RiskThresholds::default(), None);
        let client = ApiClient::new(
            "test-key",
            "http://127.0.0.1:9/weather",
            "http://127.0.0.1:9/air",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = run_cycle(&state, &client, "Delhi").await.unwrap_err();

        assert!(
            matches!(err, FireWatchError::ApiRequestFailed { status_code: None, .. }),
            "{err:?}"
        );
        assert!(matches!(state.status(), StatusIndicator::Error { .. }));
        assert!(state.display().is_none());
        assert!(state.history_entries().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_api_key() {
        // ---
        let state = AppState::shared(RiskThresholds::default(), None);
        let client = ApiClient::new(
            "SECRETKEY123",
            "http://127.0.0.1:9/weather",
            "http://127.0.0.1:9/air",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = run_cycle(&state, &client, "Delhi").await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRETKEY123"), "{err:?}");

        let view = serde_json::to_string(&state.status_view()).unwrap();
        assert!(view.contains("\"state\":\"error\""), "{view}");
        assert!(!view.contains("SECRETKEY123"), "{view}");
    }
}
