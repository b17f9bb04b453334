// src/routes/analytics.rs

use axum::{extract::State, Json};
use axum::http::StatusCode;

use crate::{AppState, models::{DelayDistribution, StatusCount}};
use super::internal_error;

/// GET /api/v1/analytics/delays
pub async fn delays(
    State(state): State<AppState>,
) -> Result<Json<DelayDistribution>, (StatusCode, String)> {
    let snap = state.dashboard.delay_distribution().await.map_err(internal_error)?;
    Ok(Json(DelayDistribution {
        delays: snap.data.delays.clone(),
        bins: snap.data.bins.clone(),
    }))
}

/// GET /api/v1/analytics/status
pub async fn status_counts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCount>>, (StatusCode, String)> {
    let snap = state.dashboard.status_counts().await.map_err(internal_error)?;
    Ok(Json(snap.data.clone()))
}
