// src/error.rs

//! Typed failures of the add-flight path.
//!
//! Read queries keep the plain `internal_error` mapping in `routes`; only the
//! one write path distinguishes why it failed.

use axum::http::StatusCode;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddFlightError {
    /// The input was rejected before any SQL ran.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The database refused the row.
    #[error("rejected by database constraint: {0}")]
    Constraint(String),

    /// The connection is unusable.
    #[error("database unavailable: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),
}

impl AddFlightError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { field, reason: reason.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Constraint(_) => StatusCode::CONFLICT,
            Self::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short tag used in page redirects (`?notice=`).
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "invalid",
            Self::Constraint(_) => "conflict",
            Self::Connectivity(_) => "unavailable",
            Self::Query(_) => "error",
        }
    }
}

impl From<sqlx::Error> for AddFlightError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Self::Constraint(db.message().to_string()),
                _ => Self::Query(sqlx::Error::Database(db)),
            },
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => Self::Connectivity(e),
            other => Self::Query(other),
        }
    }
}
