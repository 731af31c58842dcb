use crate::{
    ClearAck, EvictionHandle, EvictionScheduler, LookupMetrics, LookupOutcome, NaturalistConfig,
    ObservationLookup,
};
use naturalist_error::NaturalistResult;
use naturalist_inat::INaturalistClient;
use naturalist_interface::Catalog;
use naturalist_core::TaxonId;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

/// Lookup orchestrator plus its eviction scheduler.
///
/// One instance per process. Command handlers share it behind an `Arc` and
/// call [`lookup`](Self::lookup) and
/// [`trigger_manual_clear`](Self::trigger_manual_clear) concurrently.
pub struct NaturalistBot<C: Catalog + 'static> {
    lookup: ObservationLookup<C>,
    eviction: EvictionHandle,
    scheduler: JoinHandle<()>,
}

impl NaturalistBot<INaturalistClient> {
    /// Starts a bot talking to iNaturalist with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn from_config(config: &NaturalistConfig) -> NaturalistResult<Self> {
        let client = INaturalistClient::new(config.catalog())?;
        Ok(Self::start(client))
    }
}

impl<C: Catalog + 'static> NaturalistBot<C> {
    /// Starts the eviction scheduler and returns a ready bot.
    ///
    /// Must be called inside a Tokio runtime.
    #[instrument(skip(catalog), fields(catalog = catalog.catalog_name()))]
    pub fn start(catalog: C) -> Self {
        let lookup = ObservationLookup::new(Arc::new(catalog));
        let (eviction, scheduler) = EvictionScheduler::spawn(Arc::clone(lookup.store()));
        info!("Naturalist bot started");
        Self {
            lookup,
            eviction,
            scheduler,
        }
    }

    /// Pick one not-recently-seen observation.
    pub async fn lookup(&self, group: Option<&str>, query: Option<&str>) -> LookupOutcome {
        self.lookup.lookup(group, query).await
    }

    /// Resolve a taxon label through the memo.
    ///
    /// # Errors
    ///
    /// Propagates catalog failures.
    pub async fn resolve(&self, label: &str) -> NaturalistResult<Option<TaxonId>> {
        self.lookup.resolve(label).await
    }

    /// Wipe the exclusion store now and restart the 24-hour countdown.
    ///
    /// # Errors
    ///
    /// Returns a scheduler error if the eviction task has stopped.
    pub async fn trigger_manual_clear(&self) -> NaturalistResult<ClearAck> {
        let ack = self.eviction.clear_now().await?;
        self.lookup.metrics().record_manual_clear();
        Ok(ack)
    }

    /// The orchestrator, for callers that want to share it further.
    pub fn lookup_handle(&self) -> &ObservationLookup<C> {
        &self.lookup
    }

    /// Outcome counters.
    pub fn metrics(&self) -> &LookupMetrics {
        self.lookup.metrics()
    }

    /// Stops the eviction scheduler and waits for it to exit.
    pub async fn shutdown(self) {
        let Self {
            eviction, scheduler, ..
        } = self;
        drop(eviction);
        if let Err(e) = scheduler.await {
            tracing::error!(error = ?e, "Eviction scheduler task panicked");
        }
        info!("Naturalist bot stopped");
    }
}
