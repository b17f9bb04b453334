// src/routes/flights.rs

use axum::{extract::State, http::StatusCode, response::Redirect, Form, Json};
use tracing::warn;

use crate::dashboard::page::{Notice, Tab};
use crate::error::AddFlightError;
use crate::models::{AddFlightBody, Inserted, LiveFlight};
use crate::AppState;
use super::{back_to, internal_error};

/// GET /api/v1/flights/live
pub async fn live_flights(
    State(state): State<AppState>,
) -> Result<Json<Vec<LiveFlight>>, (StatusCode, String)> {
    let snap = state.dashboard.live_feed().await.map_err(internal_error)?;
    Ok(Json(snap.data.clone()))
}

/// POST /api/v1/flights
pub async fn create_flight(
    State(state): State<AppState>,
    Json(body): Json<AddFlightBody>,
) -> Result<(StatusCode, Json<Inserted>), (StatusCode, String)> {
    match state.dashboard.add_flight(&body).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(Inserted { id }))),
        Err(e) => {
            log_rejection(&body, &e);
            Err((e.status_code(), e.to_string()))
        }
    }
}

/// POST /flights (the add-flight form)
pub async fn submit_flight_form(
    State(state): State<AppState>,
    Form(body): Form<AddFlightBody>,
) -> Redirect {
    let notice = match state.dashboard.add_flight(&body).await {
        Ok(_) => Notice::Added,
        Err(e) => {
            log_rejection(&body, &e);
            match e {
                AddFlightError::Validation { .. } => Notice::Invalid,
                AddFlightError::Constraint(_) => Notice::Conflict,
                AddFlightError::Connectivity(_) => Notice::Unavailable,
                AddFlightError::Query(_) => Notice::Error,
            }
        }
    };
    back_to(Tab::Control, Some(notice))
}

fn log_rejection(body: &AddFlightBody, e: &AddFlightError) {
    warn!(
        flight_id = %body.flight_id,
        origin = %body.origin,
        kind = e.notice(),
        error = %e,
        "flight not added"
    );
}
