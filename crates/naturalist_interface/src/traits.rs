//! Catalog trait.

use crate::{ObservationQuery, ObservationRecord, TaxonMatch};
use async_trait::async_trait;
use naturalist_error::NaturalistResult;

/// A biodiversity catalog that can resolve taxon names and search observations.
///
/// Both calls request a single best match. `Ok(None)` means the catalog
/// answered with an empty result set; `Err` means the call itself failed.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve a free-text taxon label to its best match.
    async fn resolve_taxon(&self, label: &str) -> NaturalistResult<Option<TaxonMatch>>;

    /// Return the best observation matching `query`, if any.
    async fn search_observations(
        &self,
        query: &ObservationQuery,
    ) -> NaturalistResult<Option<ObservationRecord>>;

    /// Catalog name for logging (e.g., "inaturalist").
    fn catalog_name(&self) -> &'static str;
}
