use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, RouteState};
use crate::{poller, StatusView};

// ---

pub fn router() -> Router<RouteState> {
    // ---
    Router::new()
        .route("/status", get(get_status))
        .route("/poll", post(poll_now))
}

/// Optional body for `POST /poll`.
#[derive(Debug, Deserialize)]
struct PollRequest {
    location: Option<String>,
}

async fn get_status(State((state, _)): State<RouteState>) -> Json<StatusView> {
    Json(state.status_view())
}

/// Manual on-demand trigger. A supplied location becomes the location used by
/// later scheduled cycles too.
async fn poll_now(
    State((state, client)): State<RouteState>,
    body: Result<Option<Json<PollRequest>>, JsonRejection>,
) -> Result<Json<StatusView>, ApiError> {
    // ---
    let requested = body?.and_then(|Json(b)| b.location);
    info!("POST /poll - location={:?}", requested);

    let location = match requested {
        Some(loc) => state.set_location(&loc)?,
        None => state.location().unwrap_or_default(),
    };

    poller::run_cycle(&state, &client, &location).await?;
    Ok(Json(state.status_view()))
}
