//! Eviction scheduler errors.

use derive_getters::Getters;

/// Scheduler failure conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchedulerErrorKind {
    /// The scheduler task is gone, so the trigger could not be delivered.
    #[display("Eviction scheduler is not running")]
    NotRunning,

    /// The trigger was delivered but the task dropped the acknowledgement.
    #[display("Eviction scheduler dropped the acknowledgement")]
    AckDropped,
}

/// Scheduler error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Scheduler Error: {} at line {} in {}", kind, line, file)]
pub struct SchedulerError {
    kind: SchedulerErrorKind,
    line: u32,
    file: &'static str,
}

impl SchedulerError {
    /// Create a new scheduler error at the caller's location.
    #[track_caller]
    pub fn new(kind: SchedulerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
