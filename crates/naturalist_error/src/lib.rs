//! Error types for the naturalist workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! None of these errors are fatal to the process. The lookup orchestrator
//! folds every catalog failure into an outcome value before it reaches the
//! command surface.
//!
//! # Examples
//!
//! ```
//! use naturalist_error::{CatalogError, CatalogErrorKind, NaturalistResult};
//!
//! fn fetch() -> NaturalistResult<u64> {
//!     Err(CatalogError::new(CatalogErrorKind::Transport("connection refused".into())))?
//! }
//!
//! assert!(fetch().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod scheduler;

pub use catalog::{CatalogError, CatalogErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{NaturalistError, NaturalistErrorKind, NaturalistResult};
pub use scheduler::{SchedulerError, SchedulerErrorKind};
