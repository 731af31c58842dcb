//! Naturalist - random not-recently-seen iNaturalist observations
//!
//! Picks one photographed, species-level observation per request from a
//! taxon group (birds, fungi, ...) or a free-text search, and remembers what
//! it has shown so the same observation or species does not come back until
//! the cache is cleared. The cache clears itself every 24 hours and can be
//! cleared on demand.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use naturalist::{NaturalistBot, NaturalistConfig, LookupOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NaturalistConfig::load()?;
//!     let bot = NaturalistBot::from_config(&config)?;
//!
//!     if let LookupOutcome::Found(detail) = bot.lookup(Some("Aves"), None).await {
//!         println!("{} {}", detail.title(), detail.photo_url());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `api` - enable tests that call the live iNaturalist API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod render;
mod session;

pub use render::{OutputFormat, render_clear, render_groups, render_outcome};
pub use session::{SessionCommand, run_session};

pub use naturalist_bot::{
    ClearAck, EvictionHandle, EvictionScheduler, LookupFailure, LookupMetrics,
    LookupMetricsSnapshot, LookupOutcome, LookupStage, NaturalistBot, NaturalistConfig,
    ObservationLookup,
};
pub use naturalist_cache::{
    ClearReport, EVICTION_INTERVAL, EvictionSchedule, ExclusionSnapshot, ExclusionStore,
    Resolution, ResolverMemo,
};
pub use naturalist_core::{
    LookupRequest, ObservationDetail, ObservationId, TaxonGroup, TaxonId, upgrade_photo_url,
};
pub use naturalist_error::{
    CatalogError, CatalogErrorKind, ConfigError, ConfigErrorKind, NaturalistError,
    NaturalistErrorKind, NaturalistResult, SchedulerError, SchedulerErrorKind,
};
pub use naturalist_inat::{CatalogConfig, CatalogConfigBuilder, INaturalistClient};
pub use naturalist_interface::{
    Catalog, ObservationQuery, ObservationRecord, PhotoRecord, TaxonMatch, TaxonRecord,
};
