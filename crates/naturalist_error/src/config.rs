//! Configuration error types.

use derive_getters::Getters;

/// Configuration failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be assembled.
    #[display("Failed to build configuration: {_0}")]
    Load(String),

    /// The merged sources did not deserialize.
    #[display("Failed to parse configuration: {_0}")]
    Parse(String),

    /// A value parsed but is out of range.
    #[display("Invalid value for '{}': {}", field, reason)]
    Invalid {
        /// The offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use naturalist_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::Parse("missing field `catalog`".into()));
    /// assert!(err.to_string().contains("catalog"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an out-of-range field.
    #[track_caller]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid {
            field: field.into(),
            reason: reason.into(),
        })
    }
}
