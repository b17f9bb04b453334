// src/db/fixture.rs

//! In-memory stand-in for the operations database, used by tests only.

use sqlx::SqlitePool;

const SCHEMA: &str = r#"
CREATE TABLE gates (
    gate_number TEXT PRIMARY KEY,
    status      TEXT NOT NULL
);
CREATE TABLE flights (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    flight_id  TEXT NOT NULL,
    origin     TEXT NOT NULL,
    dest       TEXT NOT NULL,
    eta        DATETIME NOT NULL,
    status     TEXT NOT NULL
               CHECK (status IN ('On Time','Delayed','Cancelled','Boarding','Departed')),
    delay_min  INTEGER,
    gate       TEXT,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (flight_id, eta)
);
CREATE TABLE alerts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    severity   TEXT NOT NULL,
    message    TEXT NOT NULL,
    resolved   BOOLEAN NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

pub async fn pool() -> SqlitePool {
    let pool = super::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(stmt).execute(&pool).await.expect("fixture schema");
    }
    pool
}

/// A flight row; offsets are minutes relative to now (negative = past).
pub struct FlightRow<'a> {
    pub flight_id: &'a str,
    pub eta_offset_min: i64,
    pub created_offset_min: i64,
    pub status: &'a str,
    pub delay_min: Option<i64>,
    pub gate: Option<&'a str>,
}

impl<'a> FlightRow<'a> {
    pub fn new(flight_id: &'a str) -> Self {
        Self {
            flight_id,
            eta_offset_min: 30,
            created_offset_min: -10,
            status: "On Time",
            delay_min: None,
            gate: None,
        }
    }
}

pub async fn add_flight(pool: &SqlitePool, row: FlightRow<'_>) {
    sqlx::query(
        r#"INSERT INTO flights (flight_id, origin, dest, eta, status, delay_min, gate, created_at)
           VALUES (?1, 'DEL', 'Salem', datetime('now', ?2), ?3, ?4, ?5, datetime('now', ?6))"#,
    )
    .bind(row.flight_id)
    .bind(format!("{} minutes", row.eta_offset_min))
    .bind(row.status)
    .bind(row.delay_min)
    .bind(row.gate)
    .bind(format!("{} minutes", row.created_offset_min))
    .execute(pool)
    .await
    .expect("fixture flight");
}

pub async fn add_gate(pool: &SqlitePool, gate_number: &str, status: &str) {
    sqlx::query("INSERT INTO gates (gate_number, status) VALUES (?1, ?2)")
        .bind(gate_number)
        .bind(status)
        .execute(pool)
        .await
        .expect("fixture gate");
}

pub async fn add_alert(pool: &SqlitePool, severity: &str, message: &str, resolved: bool, age_min: i64) {
    sqlx::query(
        r#"INSERT INTO alerts (severity, message, resolved, created_at)
           VALUES (?1, ?2, ?3, datetime('now', ?4))"#,
    )
    .bind(severity)
    .bind(message)
    .bind(resolved)
    .bind(format!("-{age_min} minutes"))
    .execute(pool)
    .await
    .expect("fixture alert");
}

pub async fn flight_count(pool: &SqlitePool) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flights")
        .fetch_one(pool)
        .await
        .expect("count flights");
    n
}
