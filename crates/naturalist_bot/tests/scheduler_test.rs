//! Tests for the eviction scheduler actor, run on paused Tokio time.

mod common;

use common::PoolCatalog;
use naturalist_bot::{EvictionScheduler, NaturalistBot};
use naturalist_cache::{EVICTION_INTERVAL, ExclusionStore};
use naturalist_core::{ObservationId, TaxonId};
use naturalist_error::{NaturalistErrorKind, SchedulerErrorKind};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::sleep;

const HOUR: Duration = Duration::from_secs(3600);

fn seeded_store() -> Arc<ExclusionStore> {
    let store = Arc::new(ExclusionStore::new());
    store.record_observation(ObservationId::from(42));
    store
}

#[tokio::test(start_paused = true)]
async fn store_survives_until_deadline() {
    let store = seeded_store();
    let (_handle, _task) = EvictionScheduler::spawn(Arc::clone(&store));

    sleep(EVICTION_INTERVAL - Duration::from_secs(1)).await;
    assert!(store.contains_observation(ObservationId::from(42)));
}

#[tokio::test(start_paused = true)]
async fn scheduled_clear_fires_daily() {
    let store = seeded_store();
    let (_handle, _task) = EvictionScheduler::spawn(Arc::clone(&store));

    sleep(EVICTION_INTERVAL + Duration::from_secs(1)).await;
    assert!(!store.contains_observation(ObservationId::from(42)));
    assert_eq!(store.epoch(), 1);

    store.record_observation(ObservationId::from(43));
    sleep(EVICTION_INTERVAL).await;
    assert!(!store.contains_observation(ObservationId::from(43)));
    assert_eq!(store.epoch(), 2);
}

#[tokio::test(start_paused = true)]
async fn manual_clear_restarts_countdown() {
    let store = seeded_store();
    let (handle, _task) = EvictionScheduler::spawn(Arc::clone(&store));

    sleep(23 * HOUR).await;
    let ack = handle.clear_now().await.unwrap();
    assert_eq!(*ack.epoch(), 1);
    assert_eq!(*ack.cleared_observations(), 1);
    assert_eq!(*ack.next_deadline_in(), EVICTION_INTERVAL);
    assert!(!store.contains_observation(ObservationId::from(42)));

    // The original deadline at 24h no longer fires.
    store.record_observation(ObservationId::from(43));
    sleep(2 * HOUR).await;
    assert!(store.contains_observation(ObservationId::from(43)));
    assert_eq!(store.epoch(), 1);

    // The re-armed one does, 24h after the manual clear.
    sleep(22 * HOUR + Duration::from_secs(1)).await;
    assert!(!store.contains_observation(ObservationId::from(43)));
    assert_eq!(store.epoch(), 2);
}

#[tokio::test(start_paused = true)]
async fn back_to_back_manual_clears_each_ack() {
    let store = seeded_store();
    let (handle, _task) = EvictionScheduler::spawn(Arc::clone(&store));

    let first = handle.clone().clear_now().await.unwrap();
    let second = handle.clear_now().await.unwrap();
    assert_eq!(*first.epoch() + 1, *second.epoch());
    assert_eq!(*second.cleared_observations(), 0);
}

#[tokio::test(start_paused = true)]
async fn scheduler_stops_when_handles_drop() {
    let (handle, task) = EvictionScheduler::spawn(Arc::new(ExclusionStore::new()));
    let other = handle.clone();
    drop(handle);
    assert!(other.is_running());
    drop(other);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stopped_scheduler_reports_not_running() {
    let (handle, task) = EvictionScheduler::spawn(Arc::new(ExclusionStore::new()));
    task.abort();
    let _ = task.await;

    let err = handle.clear_now().await.unwrap_err();
    match err.kind() {
        NaturalistErrorKind::Scheduler(e) => assert_eq!(*e.kind(), SchedulerErrorKind::NotRunning),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn bot_manual_clear_reopens_pool() {
    let catalog = PoolCatalog::new()
        .with_label("Aves", 3)
        .with_observation(3, 42, 101, "Turdus migratorius");
    let bot = NaturalistBot::start(catalog);

    assert!(bot.lookup(Some("Aves"), None).await.is_found());
    assert!(!bot.lookup(Some("Aves"), None).await.is_found());

    let ack = bot.trigger_manual_clear().await.unwrap();
    assert_eq!(*ack.cleared_observations(), 1);
    assert_eq!(*ack.cleared_taxa(), 1);
    assert!(bot.lookup(Some("Aves"), None).await.is_found());

    let metrics = bot.metrics().snapshot();
    assert_eq!(metrics.found, 2);
    assert_eq!(metrics.no_result, 1);
    assert_eq!(metrics.manual_clears, 1);

    bot.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn bot_scheduled_clear_reopens_pool() {
    let catalog = PoolCatalog::new()
        .with_label("Aves", 3)
        .with_observation(3, 42, 101, "Turdus migratorius");
    let bot = NaturalistBot::start(catalog);

    assert!(bot.lookup(Some("Aves"), None).await.is_found());
    sleep(EVICTION_INTERVAL + Duration::from_secs(1)).await;
    assert!(bot.lookup(Some("Aves"), None).await.is_found());
    assert_eq!(bot.metrics().snapshot().manual_clears, 0);
}

#[tokio::test(start_paused = true)]
async fn bot_resolve_hits_the_memo() {
    let catalog = PoolCatalog::new().with_label("Aves", 3);
    let calls = catalog.resolve_counter();
    let bot = NaturalistBot::start(catalog);

    assert_eq!(bot.resolve("Aves").await.unwrap(), Some(TaxonId::from(3)));
    assert_eq!(bot.resolve("Aves").await.unwrap(), Some(TaxonId::from(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(bot.resolve("Dragons").await.unwrap(), None);
    assert_eq!(bot.resolve("Dragons").await.unwrap(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    bot.shutdown().await;
}
