//! Observation lookup orchestration for the naturalist picker.
//!
//! This crate wires the cache crate to a catalog:
//! - **ObservationLookup**: turns a (group, query) request into one catalog
//!   search that skips everything shown this epoch
//! - **EvictionScheduler**: background actor that wipes the exclusion store
//!   once a day, or immediately on a manual trigger
//! - **NaturalistBot**: owns both and is what a command surface talks to

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bot;
mod config;
mod lookup;
mod metrics;
mod scheduler;

pub use bot::NaturalistBot;
pub use config::NaturalistConfig;
pub use lookup::{LookupFailure, LookupOutcome, LookupStage, ObservationLookup};
pub use metrics::{LookupMetrics, LookupMetricsSnapshot};
pub use scheduler::{ClearAck, EvictionHandle, EvictionMessage, EvictionScheduler};
