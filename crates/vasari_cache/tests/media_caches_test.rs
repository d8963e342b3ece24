//! Tests for the shared cache aggregate.

use chrono::{TimeZone, Utc};
use vasari_cache::{CacheConfig, MediaCaches};
use vasari_core::{Birthprint, ValidationResult};

fn birthprint(name: &str) -> Birthprint {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    Birthprint::new(created, 2048, name)
}

#[tokio::test]
async fn test_record_and_fetch() {
    let caches = MediaCaches::new(CacheConfig::default());

    let result = ValidationResult::valid("/media/a.jpg");
    caches.record("/media/a.jpg", &result).await;

    let cached = caches.cached_result("/media/a.jpg").await.unwrap();
    assert_eq!(cached, result);
    assert_eq!(caches.validation_len().await, 1);
}

#[tokio::test]
async fn test_purge_stale_removes_queued_entries() {
    let caches = MediaCaches::new(CacheConfig::default());

    caches
        .record(
            "/media/a.jpg",
            &ValidationResult::invalid("/media/a.jpg", "File not found: /media/a.jpg"),
        )
        .await;
    caches.store_birthprint("/media/a.jpg", birthprint("a.jpg")).await;

    assert!(caches.queue_stale("/media/a.jpg").await);
    assert!(!caches.queue_stale("/media/a.jpg").await);

    assert_eq!(caches.purge_stale().await, 1);
    assert!(caches.cached_result("/media/a.jpg").await.is_none());
    assert!(caches.birthprint("/media/a.jpg").await.is_none());
    assert_eq!(caches.stale_len().await, 0);
}

#[tokio::test]
async fn test_clear_all_empties_everything() {
    let caches = MediaCaches::new(CacheConfig::default());

    caches
        .record("/media/a.jpg", &ValidationResult::valid("/media/a.jpg"))
        .await;
    caches.store_birthprint("/media/a.jpg", birthprint("a.jpg")).await;
    caches.queue_stale("/media/b.jpg").await;

    caches.clear_all().await;

    assert_eq!(caches.validation_len().await, 0);
    assert_eq!(caches.birthprint_len().await, 0);
    assert_eq!(caches.stale_len().await, 0);
}
