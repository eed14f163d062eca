// src/routes/health.rs
//! Liveness check for the firewatch service.
//!
//! Answers as long as the HTTP surface is up, independent of whether the
//! weather provider is reachable or a poll cycle has ever succeeded.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Always `{"status": "ok"}`; upstream health shows up in `/status` instead.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Stateless, so it carries whatever state type the gateway uses.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
