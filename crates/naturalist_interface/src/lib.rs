//! Trait definitions for the external observation catalog.
//!
//! The cache and lookup crates only ever talk to the catalog through
//! [`Catalog`], so tests can substitute an in-memory stub and the HTTP client
//! stays a leaf dependency.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::Catalog;
pub use types::{
    ObservationQuery, ObservationQueryBuilder, ObservationRecord, PhotoRecord, SPECIES_RANK,
    TaxonMatch, TaxonRecord,
};
