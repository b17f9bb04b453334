// src/models/mod.rs

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

mod new_flight;

// ───────────────────────────────────────
// Rows read from the operations database
// ───────────────────────────────────────

/// One row of the live operations feed: a flight plus its joined gate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LiveFlight {
    pub id: i64,
    pub flight_id: String,
    pub origin: String,
    pub dest: String,
    pub eta: NaiveDateTime,        // UTC
    pub status: String,
    pub delay_min: Option<i64>,
    pub gate: Option<String>,
    pub created_at: NaiveDateTime, // UTC
    pub gate_number: Option<String>,
    pub gate_status: Option<String>,
    pub minutes_since_eta: i64,    // negative while the ETA is ahead
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GateStatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: i64,
    pub severity: String,          // Low | Medium | High
    pub message: String,
    pub resolved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Kpis {
    pub total_flights: i64,
    pub delayed_flights: i64,
    /// Plain `AVG(delay_min)`: NULL delays are skipped, zeros count.
    pub avg_delay: Option<f64>,
    pub occupied_gates: i64,
}

// ───────────────────────────────────────
// Enumerations
// ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Cancelled,
    Boarding,
    Departed,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 5] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Cancelled,
        FlightStatus::Boarding,
        FlightStatus::Departed,
    ];

    /// Statuses an operator may pick when adding a flight by hand.
    pub const MANUAL: [FlightStatus; 3] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Departed => "Departed",
        }
    }

    /// Case-insensitive lookup of the database text.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "st-ontime",
            FlightStatus::Delayed => "st-delayed",
            FlightStatus::Cancelled => "st-cancelled",
            FlightStatus::Boarding => "st-boarding",
            FlightStatus::Departed => "st-departed",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "green",
            Severity::Medium => "orange",
            Severity::High => "red",
        }
    }
}

// ───────────────────────────────────────
// Write path
// ───────────────────────────────────────

/// A flight that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    pub flight_id: String,
    pub origin: String,
    pub eta: NaiveDateTime, // UTC
    pub status: FlightStatus,
}

/// Raw add-flight input, as submitted by the form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct AddFlightBody {
    pub flight_id: String,
    pub origin: String,
    pub eta: String,
    pub status: String,
}

// ───────────────────────────────────────
// DTOs helpful for endpoints
// ───────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct KpiResponse {
    #[serde(flatten)]
    pub kpis: Kpis,
    pub total_gates: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DelayDistribution {
    pub delays: Vec<i64>,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Serialize)]
pub struct Inserted {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct AutoAssignResult {
    pub assigned: u32,
    pub message: String,
}
