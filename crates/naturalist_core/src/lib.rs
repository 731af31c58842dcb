//! Core data types for the naturalist observation picker.
//!
//! This crate provides the identifiers, request shape and result record shared
//! by the cache, catalog client and lookup crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod detail;
mod group;
mod ids;
mod photo;
mod request;

pub use detail::{ObservationDetail, ObservationDetailBuilder};
pub use group::TaxonGroup;
pub use ids::{ObservationId, TaxonId};
pub use photo::upgrade_photo_url;
pub use request::LookupRequest;
