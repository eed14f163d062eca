//! HTTP surface for the fire-risk monitor.
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared state so `main.rs` never sees individual endpoints.

use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json, Router,
};
use serde::Serialize;

use crate::{ApiClient, FireWatchError, SharedState};

mod health;
mod history;
mod status;
mod thresholds;

/// State handed to every handler.
pub type RouteState = (SharedState, ApiClient);

// ---

pub fn router(state: SharedState, client: ApiClient) -> Router {
    // ---
    Router::new()
        .merge(status::router())
        .merge(thresholds::router())
        .merge(history::router())
        .merge(health::router())
        .with_state((state, client))
}

// ---

/// JSON error body returned by every failing handler.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Maps [`FireWatchError`] onto an HTTP response.
#[derive(Debug)]
pub(crate) struct ApiError(FireWatchError);

impl From<FireWatchError> for ApiError {
    fn from(err: FireWatchError) -> Self {
        ApiError(err)
    }
}

/// Unreadable request bodies are the caller's fault, not a 422 text page.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(FireWatchError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // ---
        let status = match &self.0 {
            FireWatchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FireWatchError::ApiRequestFailed { .. }
            | FireWatchError::MalformedResponse(_)
            | FireWatchError::EmptyResult(_) => StatusCode::BAD_GATEWAY,
        };

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
