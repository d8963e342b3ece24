//! Tests for the validation and birthprint caches.

use chrono::{TimeZone, Utc};
use std::time::Duration;
use vasari_cache::{BirthprintCache, CacheConfig, StaleReferenceSet, ValidationCache};
use vasari_core::{Birthprint, ValidationResult};

fn birthprint(name: &str, size: u64) -> Birthprint {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    Birthprint::new(created, size, name)
}

#[test]
fn test_put_get_round_trip() {
    let mut cache = ValidationCache::new(CacheConfig::default());

    let result = ValidationResult::valid("/media/img_0001.jpg");
    cache.put("/media/img_0001.jpg", result.clone());

    let cached = cache.get("/media/img_0001.jpg").unwrap();
    assert_eq!(cached, result);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_entry_expires_after_ttl() {
    let config = CacheConfig::default().with_ttl_seconds(0);
    let mut cache = ValidationCache::new(config);

    cache.put("/media/a.jpg", ValidationResult::valid("/media/a.jpg"));
    std::thread::sleep(Duration::from_millis(20));

    // Past the TTL the entry is treated as absent and dropped.
    assert!(cache.get("/media/a.jpg").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cleanup_expired_reports_removals() {
    let config = CacheConfig::default().with_ttl_seconds(0);
    let mut cache = ValidationCache::new(config);

    cache.put("/media/a.jpg", ValidationResult::valid("/media/a.jpg"));
    cache.put("/media/b.jpg", ValidationResult::valid("/media/b.jpg"));
    std::thread::sleep(Duration::from_millis(20));

    assert_eq!(cache.cleanup_expired(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_disabled_cache_stores_nothing() {
    let config = CacheConfig::default().with_enabled(false);
    let mut cache = ValidationCache::new(config);

    cache.put("/media/a.jpg", ValidationResult::valid("/media/a.jpg"));
    assert!(cache.get("/media/a.jpg").is_none());
}

#[test]
fn test_last_write_wins() {
    let mut cache = ValidationCache::new(CacheConfig::default());

    cache.put("/media/a.jpg", ValidationResult::valid("/media/a.jpg"));
    cache.put(
        "/media/a.jpg",
        ValidationResult::invalid("/media/a.jpg", "File not found: /media/a.jpg"),
    );

    let cached = cache.get("/media/a.jpg").unwrap();
    assert!(!cached.is_valid);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_single_entry() {
    let mut cache = ValidationCache::new(CacheConfig::default());

    cache.put("/media/a.jpg", ValidationResult::valid("/media/a.jpg"));
    assert!(cache.invalidate("/media/a.jpg"));
    assert!(!cache.invalidate("/media/a.jpg"));
    assert!(cache.get("/media/a.jpg").is_none());
}

#[test]
fn test_birthprint_round_trip() {
    let mut cache = BirthprintCache::new(10);

    cache.put("/media/a.jpg", birthprint("a.jpg", 1024));
    let cached = cache.get("/media/a.jpg").unwrap();
    assert_eq!(cached.original_filename, "a.jpg");
    assert_eq!(cached.file_size, 1024);
}

#[test]
fn test_birthprint_overflow_clears_whole_cache() {
    let mut cache = BirthprintCache::new(3);

    cache.put("/media/a.jpg", birthprint("a.jpg", 1));
    cache.put("/media/b.jpg", birthprint("b.jpg", 2));
    cache.put("/media/c.jpg", birthprint("c.jpg", 3));
    assert_eq!(cache.len(), 3);

    // A fourth distinct path trips the bound and clears everything.
    cache.put("/media/d.jpg", birthprint("d.jpg", 4));
    assert_eq!(cache.len(), 1);
    assert!(cache.get("/media/a.jpg").is_none());
    assert!(cache.get("/media/d.jpg").is_some());
}

#[test]
fn test_birthprint_overwrite_does_not_trip_bound() {
    let mut cache = BirthprintCache::new(2);

    cache.put("/media/a.jpg", birthprint("a.jpg", 1));
    cache.put("/media/b.jpg", birthprint("b.jpg", 2));
    cache.put("/media/b.jpg", birthprint("b.jpg", 3));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("/media/b.jpg").unwrap().file_size, 3);
}

#[test]
fn test_stale_set_dedupes_and_drains_in_order() {
    let mut stale = StaleReferenceSet::new();

    assert!(stale.insert("/media/b.jpg"));
    assert!(stale.insert("/media/a.jpg"));
    assert!(!stale.insert("/media/b.jpg"));
    assert_eq!(stale.len(), 2);

    let drained = stale.drain();
    assert_eq!(drained, vec!["/media/b.jpg", "/media/a.jpg"]);
    assert!(stale.is_empty());

    // Draining resets dedup state too.
    assert!(stale.insert("/media/b.jpg"));
}
