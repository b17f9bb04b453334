// src/db/mod.rs

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

pub mod queries;

#[cfg(test)]
pub mod fixture;

/// Opens the one long-lived connection the dashboard shares for its lifetime.
///
/// The pool is capped at a single connection that is never reaped, so every
/// query in the process runs over the same handle; sqlx serialises access to it.
/// Tables are owned by the operations database and are never created here.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!(database_url = %redact(database_url), "connected to operations database");
    Ok(pool)
}

/// Closes the shared connection; called once after the server has drained.
pub async fn close(pool: &SqlitePool) {
    pool.close().await;
    info!("database connection closed");
}

// Hide anything that looks like credentials before the URL reaches the log.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_redacted() {
        assert_eq!(redact("mysql://ops:secret@db:3306/aocc"), "mysql://***@db:3306/aocc");
        assert_eq!(redact("sqlite://aocc.db"), "sqlite://aocc.db");
    }

    #[tokio::test]
    async fn single_connection_pool_answers_queries() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let one: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one.0, 1);
        assert_eq!(pool.size(), 1);
        close(&pool).await;
        assert!(pool.is_closed());
    }
}
