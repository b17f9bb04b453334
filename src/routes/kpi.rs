// src/routes/kpi.rs

use axum::{extract::State, Json};

use crate::{AppState, models::KpiResponse};
use super::internal_error;

/// GET /api/v1/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
) -> Result<Json<KpiResponse>, (axum::http::StatusCode, String)> {
    let snap = state.dashboard.kpis().await.map_err(internal_error)?;
    Ok(Json(KpiResponse { kpis: snap.data.clone(), total_gates: state.config.total_gates }))
}
