// src/routes/page.rs

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::dashboard::page::{self, or_default, Tab, View};
use crate::AppState;
use super::{back_to, internal_error};

#[derive(Deserialize)]
pub struct RefreshForm {
    #[serde(default, deserialize_with = "or_default")]
    pub tab: Tab,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(view): Query<View>,
) -> Result<Html<String>, (axum::http::StatusCode, String)> {
    let data = state.dashboard.page_data().await.map_err(internal_error)?;
    Ok(Html(page::render(&data, &state.config, &view, Utc::now())))
}

/// POST /refresh
pub async fn refresh(
    State(state): State<AppState>,
    Form(f): Form<RefreshForm>,
) -> Redirect {
    state.dashboard.invalidate_all().await;
    back_to(f.tab, None)
}
