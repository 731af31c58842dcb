//! Counters for lookup outcomes and clears.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Shared outcome counters for the lookup orchestrator.
#[derive(Debug, Clone, Default)]
pub struct LookupMetrics {
    inner: Arc<LookupMetricsInner>,
}

#[derive(Debug, Default)]
struct LookupMetricsInner {
    found: AtomicU64,
    no_result: AtomicU64,
    failed: AtomicU64,
    manual_clears: AtomicU64,
    last_found: parking_lot::Mutex<Option<Instant>>,
}

impl LookupMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that returned an observation.
    pub fn record_found(&self) {
        self.inner.found.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_found.lock() = Some(Instant::now());
    }

    /// Records a lookup that exhausted the matching pool.
    pub fn record_no_result(&self) {
        self.inner.no_result.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup whose catalog call broke.
    pub fn record_failure(&self) {
        self.inner.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a manual cache clear.
    pub fn record_manual_clear(&self) {
        self.inner.manual_clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets a snapshot of the counters.
    pub fn snapshot(&self) -> LookupMetricsSnapshot {
        let last_found = *self.inner.last_found.lock();
        LookupMetricsSnapshot {
            found: self.inner.found.load(Ordering::Relaxed),
            no_result: self.inner.no_result.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
            manual_clears: self.inner.manual_clears.load(Ordering::Relaxed),
            secs_since_last_found: last_found.map(|at| at.elapsed().as_secs()),
        }
    }
}

/// Point-in-time copy of [`LookupMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookupMetricsSnapshot {
    /// Lookups that returned an observation
    pub found: u64,
    /// Lookups that found nothing new
    pub no_result: u64,
    /// Lookups that failed
    pub failed: u64,
    /// Manual clears
    pub manual_clears: u64,
    /// Seconds since the last successful lookup
    pub secs_since_last_found: Option<u64>,
}
