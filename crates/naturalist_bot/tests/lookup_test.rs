//! Tests for the observation lookup orchestrator.

mod common;

use common::{PoolCatalog, observation};
use naturalist_bot::{LookupOutcome, LookupStage, ObservationLookup};
use naturalist_core::{ObservationId, TaxonId};
use naturalist_interface::ObservationRecord;
use std::collections::HashSet;
use std::sync::Arc;

const AVES: u64 = 3;
const FUNGI: u64 = 47170;

fn robin_catalog() -> PoolCatalog {
    let robin: ObservationRecord = serde_json::from_value(serde_json::json!({
        "id": 42,
        "taxon": {
            "id": 3,
            "name": "Turdus migratorius",
            "preferred_common_name": "American Robin"
        },
        "photos": [{"url": "https://static.inaturalist.org/photos/1/square.jpg"}],
        "uri": "https://x/42"
    }))
    .unwrap();
    PoolCatalog::new().with_label("Aves", AVES).with_record(AVES, robin)
}

fn bird_pool() -> PoolCatalog {
    PoolCatalog::new()
        .with_label("Aves", AVES)
        .with_label("Fungi", FUNGI)
        .with_observation(AVES, 1, 101, "Turdus migratorius")
        .with_observation(AVES, 2, 101, "Turdus migratorius")
        .with_observation(AVES, 3, 102, "Branta canadensis")
        .with_observation(AVES, 4, 103, "Cyanocitta cristata")
        .with_observation(AVES, 5, 102, "Branta canadensis")
        .with_observation(FUNGI, 6, 201, "Morchella esculenta")
}

fn found(outcome: LookupOutcome) -> (ObservationId, TaxonId) {
    match outcome {
        LookupOutcome::Found(detail) => (*detail.observation_id(), *detail.taxon_id()),
        other => panic!("expected an observation, got {:?}", other),
    }
}

#[tokio::test]
async fn robin_is_normalized_and_excluded() {
    let lookup = ObservationLookup::new(Arc::new(robin_catalog()));

    let outcome = lookup.lookup(Some("Aves"), None).await;
    let detail = outcome.detail().expect("robin should be found").clone();

    assert_eq!(detail.observation_id().get(), 42);
    assert_eq!(detail.scientific_name(), "Turdus migratorius");
    assert_eq!(detail.preferred_common_name().as_deref(), Some("American Robin"));
    assert_eq!(
        detail.photo_url(),
        "https://static.inaturalist.org/photos/1/original.jpg"
    );
    assert_eq!(detail.uri(), "https://x/42");

    assert!(lookup.store().contains_observation(ObservationId::from(42)));
    assert!(lookup.store().contains_taxon(TaxonId::from(3)));
    assert_eq!(lookup.lookup(Some("Aves"), None).await, LookupOutcome::NoResult);
}

#[tokio::test]
async fn browsing_never_repeats_observation_or_species() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    let mut observations = HashSet::new();
    let mut species = HashSet::new();
    for _ in 0..3 {
        let (obs, taxon) = found(lookup.lookup(Some("Aves"), None).await);
        assert!(observations.insert(obs));
        assert!(species.insert(taxon));
    }

    // Three bird species in the pool; the fourth browse has nothing new.
    assert_eq!(lookup.lookup(Some("Aves"), None).await, LookupOutcome::NoResult);
    assert_eq!(catalog.resolve_calls(), 1);
}

#[tokio::test]
async fn narrowed_lookups_repeat_species_but_not_observations() {
    let lookup = ObservationLookup::new(Arc::new(bird_pool()));

    let (first, first_taxon) = found(lookup.lookup(Some("Aves"), Some("branta")).await);
    let (second, second_taxon) = found(lookup.lookup(Some("Aves"), Some("branta")).await);

    assert_ne!(first, second);
    assert_eq!(first_taxon, second_taxon);
    assert!(!lookup.store().contains_taxon(first_taxon));
    assert_eq!(
        lookup.lookup(Some("Aves"), Some("branta")).await,
        LookupOutcome::NoResult
    );
}

#[tokio::test]
async fn free_search_works_without_a_group() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    let (obs, _) = found(lookup.lookup(None, Some("morchella")).await);
    assert_eq!(obs, ObservationId::from(6));
    assert_eq!(catalog.resolve_calls(), 0);

    let query = catalog.last_query().unwrap();
    assert!(query.taxon_id().is_none());
    assert_eq!(query.taxon_name().as_deref(), Some("morchella"));
}

#[tokio::test]
async fn blank_query_is_an_unnarrowed_browse() {
    let lookup = ObservationLookup::new(Arc::new(bird_pool()));

    let (_, taxon) = found(lookup.lookup(Some("Aves"), Some("  ")).await);
    assert!(lookup.store().contains_taxon(taxon));
}

#[tokio::test]
async fn search_carries_current_exclusions() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    let (obs, taxon) = found(lookup.lookup(Some("Aves"), None).await);
    lookup.lookup(Some("Aves"), None).await;

    let query = catalog.last_query().unwrap();
    assert_eq!(query.taxon_id(), &Some(TaxonId::from(AVES)));
    assert_eq!(query.not_id(), &vec![obs]);
    assert_eq!(query.without_taxon_id(), &vec![taxon]);
    assert!(*query.photos());
    assert!(*query.identified());
    assert_eq!(*query.per_page(), 1);
}

#[tokio::test]
async fn clear_makes_excluded_ids_eligible_again() {
    let lookup = ObservationLookup::new(Arc::new(robin_catalog()));

    found(lookup.lookup(Some("Aves"), None).await);
    assert_eq!(lookup.lookup(Some("Aves"), None).await, LookupOutcome::NoResult);

    lookup.store().clear();
    let (obs, _) = found(lookup.lookup(Some("Aves"), None).await);
    assert_eq!(obs.get(), 42);
}

#[tokio::test]
async fn unknown_label_is_no_result() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    assert_eq!(lookup.lookup(Some("Dragons"), None).await, LookupOutcome::NoResult);
    assert_eq!(catalog.search_calls(), 0);
    assert!(lookup.memo().is_empty());

    lookup.lookup(Some("Dragons"), None).await;
    assert_eq!(catalog.resolve_calls(), 2);
}

#[tokio::test]
async fn resolver_failure_is_reported_and_retried() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    catalog.fail_resolve(true);
    match lookup.lookup(Some("Aves"), None).await {
        LookupOutcome::Failed(failure) => assert_eq!(*failure.stage(), LookupStage::Resolve),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(lookup.memo().is_empty());

    catalog.fail_resolve(false);
    assert!(lookup.lookup(Some("Aves"), None).await.is_found());
    assert_eq!(catalog.resolve_calls(), 2);
}

#[tokio::test]
async fn search_failure_leaves_store_untouched() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    catalog.fail_search(true);
    match lookup.lookup(Some("Aves"), None).await {
        LookupOutcome::Failed(failure) => {
            assert_eq!(*failure.stage(), LookupStage::Search);
            assert!(failure.message().contains("503"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(lookup.store().snapshot().observations().is_empty());
    assert_eq!(lookup.metrics().snapshot().failed, 1);
}

#[tokio::test]
async fn malformed_record_fails_and_is_not_served_again() {
    let sparse: ObservationRecord = serde_json::from_value(serde_json::json!({
        "id": 7,
        "taxon": {"id": 104, "name": "Sitta carolinensis"},
        "photos": [],
        "uri": "https://x/7"
    }))
    .unwrap();
    let catalog = PoolCatalog::new()
        .with_label("Aves", AVES)
        .with_record(AVES, sparse)
        .with_record(AVES, observation(8, 105, "Poecile atricapillus", None));
    let lookup = ObservationLookup::new(Arc::new(catalog));

    match lookup.lookup(Some("Aves"), None).await {
        LookupOutcome::Failed(failure) => assert_eq!(*failure.stage(), LookupStage::Normalize),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(lookup.store().contains_observation(ObservationId::from(7)));

    let (obs, _) = found(lookup.lookup(Some("Aves"), None).await);
    assert_eq!(obs.get(), 8);
}

#[tokio::test]
async fn concurrent_lookups_share_one_store() {
    let catalog = Arc::new(bird_pool());
    let lookup = ObservationLookup::new(Arc::clone(&catalog));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let lookup = lookup.clone();
            tokio::spawn(async move { lookup.lookup(Some("Aves"), Some("turdus")).await })
        })
        .collect();

    let mut seen = HashSet::new();
    for task in tasks {
        if let LookupOutcome::Found(detail) = task.await.unwrap() {
            seen.insert(*detail.observation_id());
        }
    }

    assert!(!seen.is_empty());
    for id in &seen {
        assert!(lookup.store().contains_observation(*id));
    }
    let metrics = lookup.metrics().snapshot();
    assert_eq!(metrics.found + metrics.no_result, 4);
}

#[test]
fn outcome_serializes_with_tag() {
    let json = serde_json::to_value(LookupOutcome::NoResult).unwrap();
    assert_eq!(json["outcome"], "no_result");
}
