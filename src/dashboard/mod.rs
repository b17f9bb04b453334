// src/dashboard/mod.rs

//! Widget state for the operator page.
//!
//! Each widget keeps the result of its last query until something
//! invalidates it: the refresh action clears everything, a new flight
//! clears the flight-derived widgets, and an optional TTL ages snapshots out.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::queries;
use crate::error::AddFlightError;
use crate::models::{
    AddFlightBody, Alert, AutoAssignResult, DelayDistribution, GateStatusCount, Kpis, LiveFlight,
    StatusCount,
};

pub mod cache;
pub mod charts;
pub mod page;

use cache::{Slot, Snapshot};

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    LiveFeed,
    GateUtilization,
    Alerts,
    Kpis,
    DelayDistribution,
    StatusCounts,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::LiveFeed,
        Widget::GateUtilization,
        Widget::Alerts,
        Widget::Kpis,
        Widget::DelayDistribution,
        Widget::StatusCounts,
    ];

    /// Widgets whose query reads the flights table.
    pub const FLIGHT_DERIVED: [Widget; 4] = [
        Widget::LiveFeed,
        Widget::Kpis,
        Widget::DelayDistribution,
        Widget::StatusCounts,
    ];
}

pub struct Dashboard {
    pool: SqlitePool,
    config: Arc<Config>,
    live_feed: Slot<Vec<LiveFlight>>,
    gate_utilization: Slot<Vec<GateStatusCount>>,
    alerts: Slot<Vec<Alert>>,
    kpis: Slot<Kpis>,
    delays: Slot<DelayDistribution>,
    status_counts: Slot<Vec<StatusCount>>,
}

/// Everything the page needs, fetched (or reused) in one go.
pub struct PageData {
    pub kpis: Arc<Snapshot<Kpis>>,
    pub live_feed: Arc<Snapshot<Vec<LiveFlight>>>,
    pub alerts: Arc<Snapshot<Vec<Alert>>>,
    pub gate_utilization: Arc<Snapshot<Vec<GateStatusCount>>>,
    pub delays: Arc<Snapshot<DelayDistribution>>,
    pub status_counts: Arc<Snapshot<Vec<StatusCount>>>,
}

impl Dashboard {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self {
            pool,
            config,
            live_feed: Slot::new("live_feed"),
            gate_utilization: Slot::new("gate_utilization"),
            alerts: Slot::new("alerts"),
            kpis: Slot::new("kpis"),
            delays: Slot::new("delay_distribution"),
            status_counts: Slot::new("status_counts"),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn live_feed(&self) -> sqlx::Result<Arc<Snapshot<Vec<LiveFlight>>>> {
        let hours = self.config.live_window_hours;
        self.live_feed
            .get_or_load(self.config.cache_ttl, || queries::live_flights(&self.pool, hours))
            .await
    }

    pub async fn gate_utilization(&self) -> sqlx::Result<Arc<Snapshot<Vec<GateStatusCount>>>> {
        let total_gates = self.config.total_gates;
        self.gate_utilization
            .get_or_load(self.config.cache_ttl, || async {
                let rows = queries::gate_utilization(&self.pool).await?;
                let counted: i64 = rows.iter().map(|r| r.count).sum();
                if counted != i64::from(total_gates) {
                    warn!(
                        counted,
                        configured = total_gates,
                        "gate table size differs from configured total; utilization tile uses the configured total"
                    );
                }
                Ok::<_, sqlx::Error>(rows)
            })
            .await
    }

    pub async fn alerts(&self) -> sqlx::Result<Arc<Snapshot<Vec<Alert>>>> {
        let limit = self.config.alert_limit;
        self.alerts
            .get_or_load(self.config.cache_ttl, || queries::active_alerts(&self.pool, limit))
            .await
    }

    pub async fn kpis(&self) -> sqlx::Result<Arc<Snapshot<Kpis>>> {
        let hours = self.config.kpi_window_hours;
        self.kpis
            .get_or_load(self.config.cache_ttl, || queries::kpis(&self.pool, hours))
            .await
    }

    pub async fn delay_distribution(&self) -> sqlx::Result<Arc<Snapshot<DelayDistribution>>> {
        self.delays
            .get_or_load(self.config.cache_ttl, || async {
                let delays = queries::positive_delays(&self.pool).await?;
                let bins = charts::histogram(&delays, HISTOGRAM_BINS);
                Ok::<_, sqlx::Error>(DelayDistribution { delays, bins })
            })
            .await
    }

    pub async fn status_counts(&self) -> sqlx::Result<Arc<Snapshot<Vec<StatusCount>>>> {
        let hours = self.config.kpi_window_hours;
        self.status_counts
            .get_or_load(self.config.cache_ttl, || queries::status_counts(&self.pool, hours))
            .await
    }

    pub async fn page_data(&self) -> sqlx::Result<PageData> {
        Ok(PageData {
            kpis: self.kpis().await?,
            live_feed: self.live_feed().await?,
            alerts: self.alerts().await?,
            gate_utilization: self.gate_utilization().await?,
            delays: self.delay_distribution().await?,
            status_counts: self.status_counts().await?,
        })
    }

    pub async fn invalidate(&self, widgets: &[Widget]) {
        for w in widgets {
            match w {
                Widget::LiveFeed => self.live_feed.invalidate().await,
                Widget::GateUtilization => self.gate_utilization.invalidate().await,
                Widget::Alerts => self.alerts.invalidate().await,
                Widget::Kpis => self.kpis.invalidate().await,
                Widget::DelayDistribution => self.delays.invalidate().await,
                Widget::StatusCounts => self.status_counts.invalidate().await,
            }
        }
    }

    pub async fn invalidate_all(&self) {
        self.invalidate(&Widget::ALL).await;
        info!("dashboard refreshed; all widgets invalidated");
    }

    pub async fn is_cached(&self, widget: Widget) -> bool {
        match widget {
            Widget::LiveFeed => self.live_feed.is_cached().await,
            Widget::GateUtilization => self.gate_utilization.is_cached().await,
            Widget::Alerts => self.alerts.is_cached().await,
            Widget::Kpis => self.kpis.is_cached().await,
            Widget::DelayDistribution => self.delays.is_cached().await,
            Widget::StatusCounts => self.status_counts.is_cached().await,
        }
    }

    /// Validates and inserts a flight, then drops the widgets it affects.
    pub async fn add_flight(&self, body: &AddFlightBody) -> Result<i64, AddFlightError> {
        let flight = body.validate(&self.config.origins, self.config.display_offset)?;
        let id = queries::insert_flight(&self.pool, &flight, &self.config.home_airport).await?;
        info!(
            id,
            flight_id = %flight.flight_id,
            origin = %flight.origin,
            dest = %self.config.home_airport,
            status = %flight.status,
            "flight added"
        );
        self.invalidate(&Widget::FLIGHT_DERIVED).await;
        Ok(id)
    }

    /// Gate assignment is not implemented; nothing is changed.
    pub fn auto_assign_gates(&self) -> AutoAssignResult {
        info!("auto-assign requested; no assignment logic configured");
        AutoAssignResult {
            assigned: 0,
            message: "Gate assignment logic would run here".into(),
        }
    }
}
