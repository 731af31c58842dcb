//! iNaturalist catalog client.
//!
//! Implements [`naturalist_interface::Catalog`] against the public
//! `api.inaturalist.org/v1` JSON API:
//! - `GET /taxa` for label resolution
//! - `GET /observations` for the single-result exclusion search
//!
//! Outbound calls are throttled with `governor` so a busy chat channel stays
//! within the API's published request budget.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod params;

pub use client::INaturalistClient;
pub use config::{CatalogConfig, CatalogConfigBuilder};
