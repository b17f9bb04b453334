// src/routes/health.rs

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!(error = %e, "health check could not reach the database");
            "unavailable"
        }
    };
    Json(HealthResp { status: "ok", version: env!("CARGO_PKG_VERSION"), database })
}
