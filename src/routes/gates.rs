// src/routes/gates.rs

use axum::{extract::State, http::StatusCode, response::Redirect, Json};

use crate::dashboard::page::{Notice, Tab};
use crate::models::{AutoAssignResult, GateStatusCount};
use crate::AppState;
use super::{back_to, internal_error};

/// GET /api/v1/gates/utilization
pub async fn utilization(
    State(state): State<AppState>,
) -> Result<Json<Vec<GateStatusCount>>, (StatusCode, String)> {
    let snap = state.dashboard.gate_utilization().await.map_err(internal_error)?;
    Ok(Json(snap.data.clone()))
}

/// POST /api/v1/gates/auto-assign
pub async fn auto_assign(State(state): State<AppState>) -> Json<AutoAssignResult> {
    Json(state.dashboard.auto_assign_gates())
}

/// POST /gates/auto-assign
pub async fn auto_assign_form(State(state): State<AppState>) -> Redirect {
    state.dashboard.auto_assign_gates();
    back_to(Tab::Control, Some(Notice::Assign))
}
