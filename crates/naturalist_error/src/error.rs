//! Top-level error wrapper types.

use crate::{CatalogError, ConfigError, SchedulerError};

/// Every error the naturalist crates can raise.
///
/// # Examples
///
/// ```
/// use naturalist_error::{NaturalistError, SchedulerError, SchedulerErrorKind};
///
/// let err: NaturalistError = SchedulerError::new(SchedulerErrorKind::NotRunning).into();
/// assert!(format!("{}", err).contains("not running"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NaturalistErrorKind {
    /// External catalog error
    #[from(CatalogError)]
    Catalog(CatalogError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Eviction scheduler error
    #[from(SchedulerError)]
    Scheduler(SchedulerError),
}

/// Naturalist error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Naturalist Error: {}", _0)]
pub struct NaturalistError(Box<NaturalistErrorKind>);

impl NaturalistError {
    /// Create a new error from a kind.
    pub fn new(kind: NaturalistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NaturalistErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NaturalistErrorKind
impl<T> From<T> for NaturalistError
where
    T: Into<NaturalistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for naturalist operations.
pub type NaturalistResult<T> = std::result::Result<T, NaturalistError>;
