//! Taxon label memoization.

use naturalist_core::TaxonId;
use naturalist_error::NaturalistResult;
use naturalist_interface::Catalog;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Outcome of resolving a taxon label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The label names this taxon
    Resolved(TaxonId),
    /// The catalog has no match for the label
    NotFound,
}

impl Resolution {
    /// The resolved id, if any.
    pub fn taxon_id(self) -> Option<TaxonId> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::NotFound => None,
        }
    }
}

/// Memo of taxon label resolutions.
///
/// Keys are labels exactly as callers typed them (case-sensitive). Entries are
/// written only after a successful resolution and are never evicted: a label
/// maps to the same taxon for the life of the process, so clearing the
/// exclusion store leaves the memo alone.
///
/// The lock is never held across the catalog call. Two tasks resolving the
/// same unseen label may both call out; the last writer wins and both get a
/// valid id.
///
/// # Example
///
/// ```
/// use naturalist_cache::ResolverMemo;
///
/// let memo = ResolverMemo::new();
/// assert!(memo.get("Aves").is_none());
/// assert!(memo.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ResolverMemo {
    entries: RwLock<HashMap<String, TaxonId>>,
}

impl ResolverMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        tracing::debug!("Creating new ResolverMemo");
        Self::default()
    }

    /// Memoized id for `label`, without calling out.
    pub fn get(&self, label: &str) -> Option<TaxonId> {
        self.entries.read().get(label).copied()
    }

    /// Resolve `label`, calling the catalog only on a memo miss.
    ///
    /// An empty result set yields [`Resolution::NotFound`] and writes nothing,
    /// so the next call for the same label asks the catalog again.
    ///
    /// # Errors
    ///
    /// Propagates catalog call failures. Failures are not memoized either.
    #[tracing::instrument(
        skip(self, catalog),
        fields(catalog = catalog.catalog_name(), memo_size = self.len())
    )]
    pub async fn resolve<C>(&self, label: &str, catalog: &C) -> NaturalistResult<Resolution>
    where
        C: Catalog + ?Sized,
    {
        if let Some(id) = self.get(label) {
            tracing::debug!(taxon_id = %id, "Taxon memo hit");
            return Ok(Resolution::Resolved(id));
        }

        tracing::debug!("Taxon memo miss, asking catalog");
        match catalog.resolve_taxon(label).await? {
            Some(found) => {
                let id = *found.id();
                self.entries.write().insert(label.to_string(), id);
                tracing::info!(taxon_id = %id, "Resolved taxon label");
                Ok(Resolution::Resolved(id))
            }
            None => {
                tracing::info!("Catalog has no taxon for label");
                Ok(Resolution::NotFound)
            }
        }
    }

    /// Number of memoized labels.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every memoized label. The eviction schedule never calls this.
    pub fn forget_all(&self) {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        tracing::info!(forgotten = count, "Cleared taxon memo");
    }
}
