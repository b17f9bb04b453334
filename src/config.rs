// src/config.rs

//! Startup configuration.
//!
//! Every value the dashboard used to hard-code (home airport, gate count,
//! query windows) is resolved once here from the environment, after `.env`
//! has been loaded by `main`.

use std::time::Duration;

use chrono::FixedOffset;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOME_AIRPORT: &str = "Salem";
pub const DEFAULT_TOTAL_GATES: u32 = 10;
pub const DEFAULT_LIVE_WINDOW_HOURS: u32 = 6;
pub const DEFAULT_KPI_WINDOW_HOURS: u32 = 24;
pub const DEFAULT_ALERT_LIMIT: u32 = 20;
pub const DEFAULT_ORIGINS: &[&str] = &["DEL", "BOM", "HYD", "BLR", "MAA"];
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
pub const DEFAULT_TZ_LABEL: &str = "IST";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub home_airport: String,
    /// Denominator of the gate utilization tile. Not derived from the gates table.
    pub total_gates: u32,
    pub live_window_hours: u32,
    pub kpi_window_hours: u32,
    pub alert_limit: u32,
    pub origins: Vec<String>,
    pub display_offset: FixedOffset,
    pub tz_label: String,
    /// `None` keeps widget snapshots until they are invalidated.
    pub cache_ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match get("PORT") {
            Some(v) => parse_num::<u16>("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        let home_airport = get("AOCC_HOME_AIRPORT").unwrap_or_else(|| DEFAULT_HOME_AIRPORT.into());

        let total_gates = positive(&get, "AOCC_TOTAL_GATES", DEFAULT_TOTAL_GATES)?;
        let live_window_hours = positive(&get, "AOCC_LIVE_WINDOW_HOURS", DEFAULT_LIVE_WINDOW_HOURS)?;
        let kpi_window_hours = positive(&get, "AOCC_KPI_WINDOW_HOURS", DEFAULT_KPI_WINDOW_HOURS)?;
        let alert_limit = positive(&get, "AOCC_ALERT_LIMIT", DEFAULT_ALERT_LIMIT)?;

        let origins = match get("AOCC_ORIGINS") {
            Some(v) => {
                let list: Vec<String> = v
                    .split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect();
                if list.is_empty() {
                    return Err(ConfigError::Invalid {
                        key: "AOCC_ORIGINS",
                        value: v,
                        reason: "at least one origin is required".into(),
                    });
                }
                list
            }
            None => DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let offset_minutes = match get("AOCC_UTC_OFFSET_MINUTES") {
            Some(v) => parse_num::<i32>("AOCC_UTC_OFFSET_MINUTES", &v)?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let display_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                key: "AOCC_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
                reason: "offset must be within ±24h".into(),
            })?;

        let tz_label = get("AOCC_TZ_LABEL").unwrap_or_else(|| DEFAULT_TZ_LABEL.into());

        let cache_ttl = match get("AOCC_CACHE_TTL_SECS") {
            Some(v) => match parse_num::<u64>("AOCC_CACHE_TTL_SECS", &v)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        Ok(Self {
            database_url,
            port,
            home_airport,
            total_gates,
            live_window_hours,
            kpi_window_hours,
            alert_limit,
            origins,
            display_offset,
            tz_label,
            cache_ttl,
        })
    }
}

fn parse_num<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn positive<G>(get: &G, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => {
            let n = parse_num::<u32>(key, &v)?;
            if n == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: v,
                    reason: "must be greater than zero".into(),
                });
            }
            Ok(n)
        }
        None => Ok(default),
    }
}
