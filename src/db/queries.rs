// src/db/queries.rs

//! Every statement the dashboard runs against the operations database.
//!
//! Timestamps are stored in UTC; windows are expressed as SQLite
//! `datetime('now', '-N hours')` modifiers.

use sqlx::{query, query_as, query_scalar, SqlitePool};

use crate::error::AddFlightError;
use crate::models::{Alert, GateStatusCount, Kpis, LiveFlight, NewFlight, StatusCount};

fn hours_ago(hours: u32) -> String {
    format!("-{hours} hours")
}

/// Flights created within the window, joined to their gate, earliest ETA first.
pub async fn live_flights(pool: &SqlitePool, window_hours: u32) -> sqlx::Result<Vec<LiveFlight>> {
    query_as::<_, LiveFlight>(
        r#"
        SELECT f.id, f.flight_id, f.origin, f.dest, f.eta, f.status, f.delay_min, f.gate,
               f.created_at,
               g.gate_number, g.status AS gate_status,
               (CAST(strftime('%s', 'now') AS INTEGER)
                 - CAST(strftime('%s', f.eta) AS INTEGER)) / 60 AS minutes_since_eta
        FROM flights f
        LEFT JOIN gates g ON f.gate = g.gate_number
        WHERE f.created_at > datetime('now', ?1)
        ORDER BY f.eta ASC
        "#,
    )
    .bind(hours_ago(window_hours))
    .fetch_all(pool)
    .await
}

pub async fn gate_utilization(pool: &SqlitePool) -> sqlx::Result<Vec<GateStatusCount>> {
    query_as::<_, GateStatusCount>(
        r#"SELECT status, COUNT(*) AS count
           FROM gates
           GROUP BY status
           ORDER BY status"#,
    )
    .fetch_all(pool)
    .await
}

/// Unresolved alerts, newest first.
pub async fn active_alerts(pool: &SqlitePool, limit: u32) -> sqlx::Result<Vec<Alert>> {
    query_as::<_, Alert>(
        r#"SELECT id, severity, message, resolved, created_at
           FROM alerts
           WHERE resolved = 0
           ORDER BY created_at DESC, id DESC
           LIMIT ?1"#,
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

pub async fn kpis(pool: &SqlitePool, window_hours: u32) -> sqlx::Result<Kpis> {
    query_as::<_, Kpis>(
        r#"
        SELECT
            COUNT(*) AS total_flights,
            COALESCE(SUM(CASE WHEN delay_min > 0 THEN 1 ELSE 0 END), 0) AS delayed_flights,
            AVG(delay_min) AS avg_delay,
            (SELECT COUNT(*) FROM gates WHERE status = 'Occupied') AS occupied_gates
        FROM flights
        WHERE created_at > datetime('now', ?1)
        "#,
    )
    .bind(hours_ago(window_hours))
    .fetch_one(pool)
    .await
}

/// Every positive delay on record, across all time.
pub async fn positive_delays(pool: &SqlitePool) -> sqlx::Result<Vec<i64>> {
    query_scalar::<_, i64>(r#"SELECT delay_min FROM flights WHERE delay_min > 0"#)
        .fetch_all(pool)
        .await
}

pub async fn status_counts(pool: &SqlitePool, window_hours: u32) -> sqlx::Result<Vec<StatusCount>> {
    query_as::<_, StatusCount>(
        r#"SELECT status, COUNT(*) AS count
           FROM flights
           WHERE created_at > datetime('now', ?1)
           GROUP BY status
           ORDER BY status"#,
    )
    .bind(hours_ago(window_hours))
    .fetch_all(pool)
    .await
}

/// Inserts one flight bound for `home_airport` and returns its row id.
pub async fn insert_flight(
    pool: &SqlitePool,
    flight: &NewFlight,
    home_airport: &str,
) -> Result<i64, AddFlightError> {
    let res = query(
        r#"INSERT INTO flights (flight_id, origin, dest, eta, status)
           VALUES (?1, ?2, ?3, ?4, ?5)"#,
    )
    .bind(&flight.flight_id)
    .bind(&flight.origin)
    .bind(home_airport)
    .bind(flight.eta)
    .bind(flight.status.as_str())
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}
