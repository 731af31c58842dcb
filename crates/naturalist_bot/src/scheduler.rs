//! Background eviction actor.

use derive_getters::Getters;
use naturalist_cache::{ClearReport, EvictionSchedule, ExclusionStore};
use naturalist_error::{NaturalistResult, SchedulerError, SchedulerErrorKind};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, instrument};

const CHANNEL_CAPACITY: usize = 8;

/// Message types for the eviction scheduler.
#[derive(Debug)]
pub enum EvictionMessage {
    /// Clear the exclusion store now and restart the countdown
    ClearNow {
        /// Receives the acknowledgement once the store is empty
        reply: oneshot::Sender<ClearAck>,
    },
}

/// Acknowledgement of a manual clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct ClearAck {
    /// Epoch that started with this clear
    epoch: u64,
    /// Observation ids dropped
    cleared_observations: usize,
    /// Species ids dropped
    cleared_taxa: usize,
    /// Time until the next scheduled clear
    next_deadline_in: Duration,
}

impl ClearAck {
    fn new(report: ClearReport, next_deadline_in: Duration) -> Self {
        Self {
            epoch: *report.epoch(),
            cleared_observations: *report.cleared_observations(),
            cleared_taxa: *report.cleared_taxa(),
            next_deadline_in,
        }
    }
}

/// Actor that owns the eviction deadline.
///
/// Sleeps until the deadline, clears the store and re-arms. A
/// [`EvictionMessage::ClearNow`] does the same transition early and replaces
/// the pending deadline. The actor stops once every [`EvictionHandle`] is
/// dropped.
pub struct EvictionScheduler {
    store: Arc<ExclusionStore>,
    schedule: EvictionSchedule,
    rx: mpsc::Receiver<EvictionMessage>,
}

impl EvictionScheduler {
    /// Creates a scheduler armed one interval from now.
    pub fn new(store: Arc<ExclusionStore>, rx: mpsc::Receiver<EvictionMessage>) -> Self {
        Self {
            store,
            schedule: EvictionSchedule::armed_at(Instant::now()),
            rx,
        }
    }

    /// Spawns a scheduler for `store` on the current runtime.
    pub fn spawn(store: Arc<ExclusionStore>) -> (EvictionHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let scheduler = Self::new(store, rx);
        let task = tokio::spawn(async move {
            scheduler.run().await;
        });
        (EvictionHandle { tx }, task)
    }

    /// Runs the scheduler loop.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!(
            next_in_secs = self.schedule.remaining(Instant::now()).as_secs(),
            "Eviction scheduler started"
        );

        loop {
            tokio::select! {
                _ = sleep_until(self.schedule.deadline()) => {
                    if let Some(report) = self.schedule.poll(Instant::now(), &self.store) {
                        info!(
                            epoch = report.epoch(),
                            cleared_observations = report.cleared_observations(),
                            cleared_taxa = report.cleared_taxa(),
                            "Scheduled eviction cleared exclusion store"
                        );
                    }
                }
                msg = self.rx.recv() => match msg {
                    Some(EvictionMessage::ClearNow { reply }) => {
                        let now = Instant::now();
                        let report = self.schedule.trigger(now, &self.store);
                        info!(
                            epoch = report.epoch(),
                            cleared_observations = report.cleared_observations(),
                            cleared_taxa = report.cleared_taxa(),
                            "Manual eviction cleared exclusion store"
                        );
                        let ack = ClearAck::new(report, self.schedule.remaining(now));
                        if reply.send(ack).is_err() {
                            debug!("Clear requester went away before the acknowledgement");
                        }
                    }
                    None => {
                        info!("Eviction scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// Sender side of the eviction scheduler.
#[derive(Debug, Clone)]
pub struct EvictionHandle {
    tx: mpsc::Sender<EvictionMessage>,
}

impl EvictionHandle {
    /// Clear the exclusion store now and restart the 24-hour countdown.
    ///
    /// # Errors
    ///
    /// Returns a scheduler error if the actor has stopped.
    #[instrument(skip(self))]
    pub async fn clear_now(&self) -> NaturalistResult<ClearAck> {
        let (reply, ack) = oneshot::channel();
        if self.tx.send(EvictionMessage::ClearNow { reply }).await.is_err() {
            error!("Eviction scheduler channel closed");
            return Err(SchedulerError::new(SchedulerErrorKind::NotRunning).into());
        }
        ack.await
            .map_err(|_| SchedulerError::new(SchedulerErrorKind::AckDropped).into())
    }

    /// Whether the actor is still receiving.
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}
