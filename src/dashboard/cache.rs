// src/dashboard/cache.rs

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

/// Last fetched value of one widget.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
    loaded: Instant,
}

/// A single widget's cache slot.
///
/// The lock is held across the load, so callers racing on an empty slot
/// run the query once and the rest reuse its result.
pub struct Slot<T> {
    name: &'static str,
    inner: Mutex<Option<Arc<Snapshot<T>>>>,
}

impl<T> Slot<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, inner: Mutex::new(None) }
    }

    /// Returns the cached snapshot, or runs `load` and caches its result.
    /// A failed load leaves the slot empty.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        ttl: Option<Duration>,
        load: F,
    ) -> Result<Arc<Snapshot<T>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut guard = self.inner.lock().await;

        if let Some(snap) = guard.as_ref() {
            let fresh = ttl.map_or(true, |ttl| snap.loaded.elapsed() < ttl);
            if fresh {
                return Ok(Arc::clone(snap));
            }
            debug!(widget = self.name, "snapshot expired");
        }

        let data = load().await?;
        let snap = Arc::new(Snapshot { data, fetched_at: Utc::now(), loaded: Instant::now() });
        *guard = Some(Arc::clone(&snap));
        debug!(widget = self.name, "snapshot loaded");
        Ok(snap)
    }

    pub async fn invalidate(&self) {
        if self.inner.lock().await.take().is_some() {
            debug!(widget = self.name, "snapshot invalidated");
        }
    }

    pub async fn is_cached(&self) -> bool {
        self.inner.lock().await.is_some()
    }
}
