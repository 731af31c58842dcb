//! Eviction deadline state machine.

use crate::{ClearReport, ExclusionStore};
use std::time::Duration;
use tokio::time::Instant;

/// Time between two scheduled clears of the exclusion store.
pub const EVICTION_INTERVAL: Duration = Duration::from_secs(86_400);

/// The single armed deadline of the eviction scheduler.
///
/// The schedule is always armed; there is no idle or terminal state. Both a
/// due deadline and a manual trigger perform the same transition: clear the
/// store and re-arm at `now + EVICTION_INTERVAL`. A manual trigger replaces
/// the pending deadline instead of adding a second one.
///
/// Callers pass `now` in, so the transitions can be exercised without
/// waiting on a clock.
///
/// # Example
///
/// ```
/// use naturalist_cache::{EVICTION_INTERVAL, EvictionSchedule, ExclusionStore};
/// use tokio::time::Instant;
///
/// let store = ExclusionStore::new();
/// let start = Instant::now();
/// let mut schedule = EvictionSchedule::armed_at(start);
///
/// assert!(schedule.poll(start, &store).is_none());
/// assert!(schedule.poll(start + EVICTION_INTERVAL, &store).is_some());
/// assert_eq!(schedule.deadline(), start + EVICTION_INTERVAL * 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionSchedule {
    deadline: Instant,
}

impl EvictionSchedule {
    /// Arm a schedule whose first clear is one interval after `now`.
    pub fn armed_at(now: Instant) -> Self {
        Self {
            deadline: now + EVICTION_INTERVAL,
        }
    }

    /// When the next scheduled clear fires.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left until the deadline, zero once due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Clear the store if the deadline has passed, re-arming from `now`.
    pub fn poll(&mut self, now: Instant, store: &ExclusionStore) -> Option<ClearReport> {
        if !self.is_due(now) {
            return None;
        }
        tracing::info!("Eviction deadline reached");
        Some(self.fire(now, store))
    }

    /// Clear the store immediately and re-arm from `now`, replacing the
    /// pending deadline.
    pub fn trigger(&mut self, now: Instant, store: &ExclusionStore) -> ClearReport {
        tracing::info!(
            remaining_secs = self.remaining(now).as_secs(),
            "Manual eviction, cancelling pending deadline"
        );
        self.fire(now, store)
    }

    fn fire(&mut self, now: Instant, store: &ExclusionStore) -> ClearReport {
        let report = store.clear();
        self.deadline = now + EVICTION_INTERVAL;
        tracing::debug!(next_in_secs = EVICTION_INTERVAL.as_secs(), "Eviction re-armed");
        report
    }
}
