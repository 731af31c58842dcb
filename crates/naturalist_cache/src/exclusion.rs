//! Repetition exclusion store.

use derive_getters::Getters;
use naturalist_core::{ObservationId, TaxonId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Point-in-time copy of the exclusion sets.
///
/// Owned, sorted and detached from the store, so a clear or record that lands
/// after the snapshot cannot change the query built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ExclusionSnapshot {
    /// Observation ids already shown this epoch
    observations: Vec<ObservationId>,
    /// Species ids already shown by unnarrowed browsing this epoch
    taxa: Vec<TaxonId>,
    /// Epoch the snapshot was taken in
    epoch: u64,
}

/// Result of wiping the exclusion sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClearReport {
    /// Epoch that starts with this clear
    epoch: u64,
    /// Observation ids dropped
    cleared_observations: usize,
    /// Species ids dropped
    cleared_taxa: usize,
}

#[derive(Debug, Default)]
struct ExclusionSets {
    observations: HashSet<ObservationId>,
    taxa: HashSet<TaxonId>,
    epoch: u64,
}

/// Observations and species already surfaced in the current epoch.
///
/// Both sets sit behind one mutex that is held only for a single snapshot,
/// record or clear, so a clear can never interleave with half of a record.
/// A record that lands after a concurrent clear simply belongs to the new
/// epoch. There is no size cap; the sets are bounded by the eviction period.
///
/// # Example
///
/// ```
/// use naturalist_cache::ExclusionStore;
/// use naturalist_core::{ObservationId, TaxonId};
///
/// let store = ExclusionStore::new();
/// store.record_observation(ObservationId::from(42));
/// store.record_taxon(TaxonId::from(3), false);
///
/// let snapshot = store.snapshot();
/// assert_eq!(snapshot.observations(), &vec![ObservationId::from(42)]);
///
/// let report = store.clear();
/// assert_eq!(*report.cleared_observations(), 1);
/// assert!(store.snapshot().observations().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ExclusionStore {
    sets: Mutex<ExclusionSets>,
}

impl ExclusionStore {
    /// Create an empty store at epoch zero.
    pub fn new() -> Self {
        tracing::debug!("Creating new ExclusionStore");
        Self::default()
    }

    /// Copy both sets for building one catalog query.
    pub fn snapshot(&self) -> ExclusionSnapshot {
        let sets = self.sets.lock();
        let mut observations: Vec<_> = sets.observations.iter().copied().collect();
        let mut taxa: Vec<_> = sets.taxa.iter().copied().collect();
        let epoch = sets.epoch;
        drop(sets);

        observations.sort_unstable();
        taxa.sort_unstable();
        tracing::debug!(
            observations = observations.len(),
            taxa = taxa.len(),
            epoch,
            "Took exclusion snapshot"
        );
        ExclusionSnapshot {
            observations,
            taxa,
            epoch,
        }
    }

    /// Exclude an observation from later lookups. Returns false if it was
    /// already excluded.
    pub fn record_observation(&self, id: ObservationId) -> bool {
        let inserted = self.sets.lock().observations.insert(id);
        tracing::debug!(observation_id = %id, inserted, "Recorded observation");
        inserted
    }

    /// Exclude a species from later browsing, unless the triggering request
    /// was narrowed by free text. Returns whether the set changed.
    pub fn record_taxon(&self, id: TaxonId, narrowed: bool) -> bool {
        if narrowed {
            tracing::debug!(taxon_id = %id, "Narrowed request, species not recorded");
            return false;
        }
        let inserted = self.sets.lock().taxa.insert(id);
        tracing::debug!(taxon_id = %id, inserted, "Recorded species");
        inserted
    }

    /// Record both halves of a successful lookup under one lock acquisition.
    pub fn record_lookup(&self, observation: ObservationId, taxon: TaxonId, narrowed: bool) {
        let mut sets = self.sets.lock();
        sets.observations.insert(observation);
        if !narrowed {
            sets.taxa.insert(taxon);
        }
        tracing::debug!(
            observation_id = %observation,
            taxon_id = %taxon,
            narrowed,
            epoch = sets.epoch,
            "Recorded lookup"
        );
    }

    /// Empty both sets and start a new epoch.
    pub fn clear(&self) -> ClearReport {
        let mut sets = self.sets.lock();
        let fresh = ExclusionSets {
            epoch: sets.epoch + 1,
            ..ExclusionSets::default()
        };
        let old = std::mem::replace(&mut *sets, fresh);
        let report = ClearReport {
            epoch: sets.epoch,
            cleared_observations: old.observations.len(),
            cleared_taxa: old.taxa.len(),
        };
        drop(sets);

        tracing::info!(
            epoch = report.epoch,
            cleared_observations = report.cleared_observations,
            cleared_taxa = report.cleared_taxa,
            "Cleared exclusion store"
        );
        report
    }

    /// Check whether an observation is excluded.
    pub fn contains_observation(&self, id: ObservationId) -> bool {
        self.sets.lock().observations.contains(&id)
    }

    /// Check whether a species is excluded.
    pub fn contains_taxon(&self, id: TaxonId) -> bool {
        self.sets.lock().taxa.contains(&id)
    }

    /// Current epoch number; zero until the first clear.
    pub fn epoch(&self) -> u64 {
        self.sets.lock().epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowed_requests_do_not_record_species() {
        let store = ExclusionStore::new();
        assert!(!store.record_taxon(TaxonId::from(3), true));
        assert!(!store.contains_taxon(TaxonId::from(3)));

        assert!(store.record_taxon(TaxonId::from(3), false));
        assert!(store.contains_taxon(TaxonId::from(3)));
    }

    #[test]
    fn duplicate_records_are_idempotent() {
        let store = ExclusionStore::new();
        assert!(store.record_observation(ObservationId::from(1)));
        assert!(!store.record_observation(ObservationId::from(1)));
        assert_eq!(store.snapshot().observations().len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let store = ExclusionStore::new();
        store.record_lookup(ObservationId::from(7), TaxonId::from(70), false);
        let snapshot = store.snapshot();

        store.clear();
        store.record_observation(ObservationId::from(8));

        assert_eq!(snapshot.observations(), &vec![ObservationId::from(7)]);
        assert_eq!(snapshot.taxa(), &vec![TaxonId::from(70)]);
        assert_eq!(*snapshot.epoch(), 0);
    }

    #[test]
    fn snapshot_is_sorted() {
        let store = ExclusionStore::new();
        for id in [30u64, 10, 20] {
            store.record_observation(ObservationId::from(id));
        }
        let ids: Vec<u64> = store
            .snapshot()
            .observations()
            .iter()
            .map(|id| id.get())
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn clear_reports_counts_and_bumps_epoch() {
        let store = ExclusionStore::new();
        store.record_lookup(ObservationId::from(1), TaxonId::from(100), false);
        store.record_lookup(ObservationId::from(2), TaxonId::from(200), true);

        let report = store.clear();

        assert_eq!(*report.epoch(), 1);
        assert_eq!(*report.cleared_observations(), 2);
        assert_eq!(*report.cleared_taxa(), 1);
        assert_eq!(store.epoch(), 1);
        assert!(!store.contains_observation(ObservationId::from(1)));
    }

    #[test]
    fn concurrent_records_and_clears_keep_sets_consistent() {
        let store = std::sync::Arc::new(ExclusionStore::new());
        let writers: Vec<_> = (0..4u64)
            .map(|w| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..500u64 {
                        store.record_lookup(
                            ObservationId::from(w * 1000 + i),
                            TaxonId::from(i),
                            false,
                        );
                        if i % 100 == 0 {
                            store.clear();
                        }
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        // 4 writers x 5 clears each
        assert_eq!(store.epoch(), 20);
        let snapshot = store.snapshot();
        assert!(snapshot.observations().len() <= 4 * 99 + 4);
    }
}
