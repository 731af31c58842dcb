//! Errors raised while talking to the external observation catalog.

use derive_getters::Getters;

/// Catalog failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CatalogErrorKind {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[display("Transport failure: {_0}")]
    Transport(String),

    /// The catalog answered with a non-success status.
    #[display("Catalog returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[display("Failed to decode catalog response: {_0}")]
    Decode(String),

    /// A record decoded but lacked a field the lookup needs.
    #[display("Catalog record missing field '{_0}'")]
    MissingField(String),
}

/// Catalog error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Catalog Error: {} at line {} in {}", kind, line, file)]
pub struct CatalogError {
    kind: CatalogErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl CatalogError {
    /// Get field `file` from instance of `CatalogError`.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Create a new catalog error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use naturalist_error::{CatalogError, CatalogErrorKind};
    ///
    /// let err = CatalogError::new(CatalogErrorKind::MissingField("photos".into()));
    /// assert!(err.to_string().contains("photos"));
    /// ```
    #[track_caller]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a missing-field error.
    #[track_caller]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::MissingField(field.into()))
    }
}
