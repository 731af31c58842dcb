//! Anti-repetition caching for the observation picker.
//!
//! This crate holds the only long-lived state of the picker:
//! - [`ResolverMemo`] remembers which taxon id a label resolved to
//! - [`ExclusionStore`] remembers which observations and species were shown
//! - [`EvictionSchedule`] decides when the exclusion store is wiped
//!
//! All of it is memory-resident and rebuilt from scratch on process start.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod exclusion;
mod memo;
mod schedule;

pub use exclusion::{ClearReport, ExclusionSnapshot, ExclusionStore};
pub use memo::{Resolution, ResolverMemo};
pub use schedule::{EVICTION_INTERVAL, EvictionSchedule};
