// src/lib.rs

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;

use config::Config;
use dashboard::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let config = Arc::new(config);
        let dashboard = Arc::new(Dashboard::new(pool.clone(), Arc::clone(&config)));
        Self { pool, config, dashboard }
    }
}

pub fn router(state: AppState) -> Router {
    // The JSON API is read by wall displays on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // operator page
        .route("/", get(routes::page::index))
        .route("/refresh", post(routes::page::refresh))
        .route("/flights", post(routes::flights::submit_flight_form))
        .route("/gates/auto-assign", post(routes::gates::auto_assign_form))
        // health
        .route("/health", get(routes::health::health))
        // widgets
        .route("/api/v1/kpis", get(routes::kpi::get_kpis))
        .route("/api/v1/flights/live", get(routes::flights::live_flights))
        .route("/api/v1/flights", post(routes::flights::create_flight))
        .route("/api/v1/gates/utilization", get(routes::gates::utilization))
        .route("/api/v1/gates/auto-assign", post(routes::gates::auto_assign))
        .route("/api/v1/alerts", get(routes::alerts::list_alerts))
        .route("/api/v1/analytics/delays", get(routes::analytics::delays))
        .route("/api/v1/analytics/status", get(routes::analytics::status_counts))
        .route("/api/v1/refresh", post(routes::refresh::refresh))
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
