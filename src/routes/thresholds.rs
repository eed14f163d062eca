use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use super::{ApiError, RouteState};
use crate::{RiskThresholds, ThresholdInput};

// ---

pub fn router() -> Router<RouteState> {
    // ---
    Router::new().route("/thresholds", get(get_thresholds).put(put_thresholds))
}

async fn get_thresholds(State((state, _)): State<RouteState>) -> Json<RiskThresholds> {
    Json(state.thresholds())
}

async fn put_thresholds(
    State((state, _)): State<RouteState>,
    payload: Result<Json<ThresholdInput>, JsonRejection>,
) -> Result<Json<RiskThresholds>, ApiError> {
    // ---
    let Json(input) = payload?;
    info!("PUT /thresholds - {:?}", input);
    Ok(Json(state.update_thresholds(&input)?))
}
