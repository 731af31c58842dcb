//! Observation lookup orchestrator.

use crate::LookupMetrics;
use derive_getters::Getters;
use naturalist_cache::{ExclusionStore, Resolution, ResolverMemo};
use naturalist_core::{LookupRequest, ObservationDetail, TaxonId};
use naturalist_error::NaturalistError;
use naturalist_interface::{Catalog, ObservationQuery};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Step of a lookup that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum LookupStage {
    /// Resolving the taxon group label
    #[display("resolve")]
    Resolve,
    /// Building or running the observation search
    #[display("search")]
    Search,
    /// Turning the catalog record into a detail
    #[display("normalize")]
    Normalize,
}

/// Why a lookup failed. Callers show one generic message for all of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, derive_more::Display)]
#[display("Lookup failed during {stage}: {message}")]
pub struct LookupFailure {
    stage: LookupStage,
    message: String,
}

impl LookupFailure {
    fn new(stage: LookupStage, error: &NaturalistError) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

/// Result of one lookup.
///
/// `NoResult` is an expected outcome (the exclusion filters exhausted the
/// matching pool, or the group label is unknown) and is not retried.
/// `Failed` means the lookup itself broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// A not-recently-seen observation
    Found(ObservationDetail),
    /// Nothing new matches
    NoResult,
    /// The catalog call or its payload was unusable
    Failed(LookupFailure),
}

impl LookupOutcome {
    /// The detail, when found.
    pub fn detail(&self) -> Option<&ObservationDetail> {
        match self {
            Self::Found(detail) => Some(detail),
            _ => None,
        }
    }

    /// Whether an observation was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Turns (group, query) requests into single catalog searches that skip
/// everything already shown this epoch.
///
/// Cheap to clone; clones share the catalog, memo, store and metrics.
pub struct ObservationLookup<C: Catalog> {
    catalog: Arc<C>,
    memo: Arc<ResolverMemo>,
    store: Arc<ExclusionStore>,
    metrics: LookupMetrics,
}

impl<C: Catalog> Clone for ObservationLookup<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            memo: Arc::clone(&self.memo),
            store: Arc::clone(&self.store),
            metrics: self.metrics.clone(),
        }
    }
}

impl<C: Catalog> ObservationLookup<C> {
    /// Creates a lookup over fresh cache state.
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_state(
            catalog,
            Arc::new(ResolverMemo::new()),
            Arc::new(ExclusionStore::new()),
        )
    }

    /// Creates a lookup over existing cache state.
    pub fn with_state(
        catalog: Arc<C>,
        memo: Arc<ResolverMemo>,
        store: Arc<ExclusionStore>,
    ) -> Self {
        Self {
            catalog,
            memo,
            store,
            metrics: LookupMetrics::new(),
        }
    }

    /// The exclusion store this lookup reads and writes.
    pub fn store(&self) -> &Arc<ExclusionStore> {
        &self.store
    }

    /// The taxon memo this lookup resolves through.
    pub fn memo(&self) -> &Arc<ResolverMemo> {
        &self.memo
    }

    /// Outcome counters.
    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    /// Pick one observation for `group` (a taxon label such as `Aves`),
    /// optionally narrowed by free-text `query`.
    pub async fn lookup(&self, group: Option<&str>, query: Option<&str>) -> LookupOutcome {
        self.lookup_request(&LookupRequest::new(group, query)).await
    }

    /// Pick one observation for a prepared request.
    #[instrument(
        skip(self, request),
        fields(
            catalog = self.catalog.catalog_name(),
            group = ?request.group(),
            query = ?request.query()
        )
    )]
    pub async fn lookup_request(&self, request: &LookupRequest) -> LookupOutcome {
        let outcome = self.run(request).await;
        match &outcome {
            LookupOutcome::Found(detail) => {
                self.metrics.record_found();
                info!(
                    observation_id = %detail.observation_id(),
                    taxon_id = %detail.taxon_id(),
                    name = detail.scientific_name().as_str(),
                    "Lookup found observation"
                );
            }
            LookupOutcome::NoResult => {
                self.metrics.record_no_result();
                info!("Lookup found nothing new");
            }
            LookupOutcome::Failed(failure) => {
                self.metrics.record_failure();
                warn!(stage = %failure.stage(), error = failure.message().as_str(), "Lookup failed");
            }
        }
        outcome
    }

    async fn run(&self, request: &LookupRequest) -> LookupOutcome {
        let taxon_id = match self.resolve_group(request).await {
            Ok(Some(resolution)) => match resolution {
                Resolution::Resolved(id) => Some(id),
                Resolution::NotFound => return LookupOutcome::NoResult,
            },
            Ok(None) => None,
            Err(e) => return LookupOutcome::Failed(LookupFailure::new(LookupStage::Resolve, &e)),
        };

        let snapshot = self.store.snapshot();
        let query = match ObservationQuery::builder()
            .taxon_id(taxon_id)
            .taxon_name(request.query().clone())
            .not_id(snapshot.observations().clone())
            .without_taxon_id(snapshot.taxa().clone())
            .build()
        {
            Ok(query) => query,
            Err(e) => {
                return LookupOutcome::Failed(LookupFailure {
                    stage: LookupStage::Search,
                    message: e.to_string(),
                });
            }
        };
        debug!(epoch = snapshot.epoch(), "Built exclusion search");

        let record = match self.catalog.search_observations(&query).await {
            Ok(Some(record)) => record,
            Ok(None) => return LookupOutcome::NoResult,
            Err(e) => return LookupOutcome::Failed(LookupFailure::new(LookupStage::Search, &e)),
        };

        // Exclude what the catalog handed back even if it fails to normalize,
        // so a broken record is not served again this epoch.
        let narrowed = request.is_narrowed();
        match record.taxon() {
            Some(taxon) => self.store.record_lookup(*record.id(), *taxon.id(), narrowed),
            None => {
                self.store.record_observation(*record.id());
            }
        }

        match record.into_detail() {
            Ok(detail) => LookupOutcome::Found(detail),
            Err(e) => LookupOutcome::Failed(LookupFailure::new(LookupStage::Normalize, &e)),
        }
    }

    async fn resolve_group(
        &self,
        request: &LookupRequest,
    ) -> Result<Option<Resolution>, NaturalistError> {
        match request.group() {
            Some(label) => self
                .memo
                .resolve(label, self.catalog.as_ref())
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a label through the memo without searching.
    ///
    /// # Errors
    ///
    /// Propagates catalog failures.
    pub async fn resolve(&self, label: &str) -> Result<Option<TaxonId>, NaturalistError> {
        let resolution = self.memo.resolve(label, self.catalog.as_ref()).await?;
        Ok(resolution.taxon_id())
    }
}
