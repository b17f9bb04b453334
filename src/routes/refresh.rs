// src/routes/refresh.rs

use axum::{extract::State, http::StatusCode};

use crate::AppState;

/// POST /api/v1/refresh
pub async fn refresh(State(state): State<AppState>) -> StatusCode {
    state.dashboard.invalidate_all().await;
    StatusCode::NO_CONTENT
}
