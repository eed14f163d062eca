use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::RouteState;
use crate::HistoryEntry;

// ---

pub fn router() -> Router<RouteState> {
    // ---
    Router::new().route("/history", get(get_history))
}

/// History in both structured and display form.
#[derive(Debug, Serialize)]
struct HistoryResponse {
    entries: Vec<HistoryEntry>,
    text: String,
}

async fn get_history(State((state, _)): State<RouteState>) -> Json<HistoryResponse> {
    // ---
    Json(HistoryResponse {
        entries: state.history_entries(),
        text: state.history_text(),
    })
}
