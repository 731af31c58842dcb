//! Shared test fixtures for the naturalist_bot integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use naturalist_core::TaxonId;
use naturalist_error::{CatalogError, CatalogErrorKind, NaturalistResult};
use naturalist_interface::{
    Catalog, ObservationQuery, ObservationRecord, PhotoRecord, TaxonMatch, TaxonRecord,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// One observation in the stub catalog, filed under a group taxon.
pub struct PoolEntry {
    pub group: TaxonId,
    pub record: ObservationRecord,
}

/// In-memory catalog that applies exclusion filters the way the real API does.
#[derive(Default)]
pub struct PoolCatalog {
    labels: HashMap<String, TaxonId>,
    pool: Vec<PoolEntry>,
    resolve_calls: Arc<AtomicUsize>,
    search_calls: AtomicUsize,
    fail_resolve: AtomicBool,
    fail_search: AtomicBool,
    last_query: Mutex<Option<ObservationQuery>>,
}

impl PoolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: &str, id: u64) -> Self {
        self.labels.insert(label.to_string(), TaxonId::from(id));
        self
    }

    pub fn with_record(mut self, group: u64, record: ObservationRecord) -> Self {
        self.pool.push(PoolEntry {
            group: TaxonId::from(group),
            record,
        });
        self
    }

    /// Adds a well-formed observation of species `taxon` named `name`.
    pub fn with_observation(self, group: u64, id: u64, taxon: u64, name: &str) -> Self {
        let record = observation(id, taxon, name, None);
        self.with_record(group, record)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Shared resolver call counter, readable after the catalog is moved.
    pub fn resolve_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.resolve_calls)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }

    pub fn fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn last_query(&self) -> Option<ObservationQuery> {
        self.last_query.lock().unwrap().clone()
    }

    fn matches(entry: &PoolEntry, query: &ObservationQuery) -> bool {
        if let Some(group) = query.taxon_id() {
            if entry.group != *group {
                return false;
            }
        }
        if query.not_id().contains(entry.record.id()) {
            return false;
        }
        let Some(taxon) = entry.record.taxon() else {
            return true;
        };
        if query.without_taxon_id().contains(taxon.id()) {
            return false;
        }
        match query.taxon_name() {
            Some(text) => {
                let text = text.to_lowercase();
                let scientific = taxon.name().clone().unwrap_or_default().to_lowercase();
                let common = taxon
                    .preferred_common_name()
                    .clone()
                    .unwrap_or_default()
                    .to_lowercase();
                scientific.contains(&text) || common.contains(&text)
            }
            None => true,
        }
    }
}

#[async_trait]
impl Catalog for PoolCatalog {
    async fn resolve_taxon(&self, label: &str) -> NaturalistResult<Option<TaxonMatch>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(CatalogError::new(CatalogErrorKind::Transport("resolver down".into())).into());
        }
        Ok(self
            .labels
            .get(label)
            .map(|id| TaxonMatch::new(*id, Some(label.to_string()))))
    }

    async fn search_observations(
        &self,
        query: &ObservationQuery,
    ) -> NaturalistResult<Option<ObservationRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(CatalogError::new(CatalogErrorKind::Status {
                status: 503,
                body: "unavailable".into(),
            })
            .into());
        }
        Ok(self
            .pool
            .iter()
            .find(|entry| Self::matches(entry, query))
            .map(|entry| entry.record.clone()))
    }

    fn catalog_name(&self) -> &'static str {
        "pool"
    }
}

/// A well-formed observation with a square thumbnail.
pub fn observation(id: u64, taxon: u64, name: &str, common: Option<&str>) -> ObservationRecord {
    ObservationRecord::new(
        id,
        TaxonRecord::new(
            taxon,
            name,
            Some(format!("https://en.wikipedia.org/wiki/{}", name.replace(' ', "_"))),
            common.map(str::to_string),
        ),
        vec![PhotoRecord::new(format!(
            "https://static.inaturalist.org/photos/{}/square.jpg",
            id
        ))],
        format!("https://www.inaturalist.org/observations/{}", id),
    )
}
