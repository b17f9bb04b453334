// src/routes/alerts.rs

use axum::{extract::State, Json};

use crate::{AppState, models::Alert};
use super::internal_error;

/// GET /api/v1/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Alert>>, (axum::http::StatusCode, String)> {
    let snap = state.dashboard.alerts().await.map_err(internal_error)?;
    Ok(Json(snap.data.clone()))
}
