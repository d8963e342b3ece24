//! Tests for basic validation through the media validator.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use vasari_core::{DeviceMetadata, MediaReference, RecoveryMethod, ValidationConfig};
use vasari_engine::{EngineConfig, GovernorConfig, MediaValidator};
use vasari_index::{FsMediaIndex, MediaIndex};
use vasari_registry::{DirectoryRegistry, InMemoryStore};

fn fast_engine_config() -> EngineConfig {
    EngineConfig {
        governor: GovernorConfig::default()
            .with_smart_settle_ms(10)
            .with_comprehensive_settle_ms(10),
        ..EngineConfig::default()
    }
}

fn setup(temp: &TempDir) -> (Arc<DirectoryRegistry>, MediaValidator) {
    let pictures = temp.path().join("Pictures");
    std::fs::create_dir_all(&pictures).unwrap();
    let defaults = vec![vasari_core::MediaDirectoryDescriptor::platform_default(
        "Pictures", pictures,
    )];
    let registry =
        Arc::new(DirectoryRegistry::new(Box::new(InMemoryStore::new()), defaults).unwrap());
    let index: Arc<dyn MediaIndex> = Arc::new(FsMediaIndex::new(Arc::clone(&registry)));
    let validator =
        MediaValidator::new(index, Arc::clone(&registry), fast_engine_config()).unwrap();
    (registry, validator)
}

fn reference_for(path: &Path) -> MediaReference {
    let metadata = std::fs::metadata(path).ok();
    let creation_time: DateTime<Utc> = metadata
        .as_ref()
        .and_then(|m| m.modified().ok())
        .map(DateTime::from)
        .unwrap_or_else(Utc::now);
    let mut device = DeviceMetadata::new(creation_time);
    device.file_size_bytes = metadata.map(|m| m.len()).unwrap_or(0);
    MediaReference::new(path.display().to_string(), "image/jpeg", device)
}

fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[tokio::test]
async fn test_valid_reference_passes_unchanged() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let photo = temp.path().join("Pictures").join("img_0001.jpg");
    write_file(&photo, b"jpeg bytes");

    let result = validator
        .validate_and_recover(&reference_for(&photo), &ValidationConfig::production())
        .await;

    assert!(result.is_valid);
    assert_eq!(result.recovery_method, RecoveryMethod::None);
    assert_eq!(result.recovered_uri.as_deref(), Some(result.original_uri.as_str()));
    assert!(result.error_message.is_none());
}

#[tokio::test]
async fn test_second_validation_is_served_from_cache() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let photo = temp.path().join("Pictures").join("img_0001.jpg");
    write_file(&photo, b"jpeg bytes");
    let reference = reference_for(&photo);
    let config = ValidationConfig::production();

    let first = validator.validate_and_recover(&reference, &config).await;
    assert!(first.is_valid);

    // Deleting the file proves the second call never touches the store:
    // a fresh check would fail, the cached result stays valid.
    std::fs::remove_file(&photo).unwrap();
    let second = validator.validate_and_recover(&reference, &config).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_malformed_uri_is_never_retried() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);

    let device = DeviceMetadata::new(Utc::now());
    let reference = MediaReference::new("not a uri", "image/jpeg", device);
    let result = validator
        .validate_and_recover(&reference, &ValidationConfig::debug())
        .await;

    assert!(!result.is_valid);
    assert_eq!(result.recovery_method, RecoveryMethod::Failed);
    assert!(result.error_message.unwrap().contains("Invalid URI format"));
}

#[tokio::test]
async fn test_empty_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let photo = temp.path().join("Pictures").join("img_0001.jpg");
    write_file(&photo, b"");

    let config = ValidationConfig::production().with_enable_recovery(false);
    let result = validator
        .validate_and_recover(&reference_for(&photo), &config)
        .await;

    assert!(!result.is_valid);
    assert!(result.error_message.unwrap().contains("File is empty"));
}

#[tokio::test]
async fn test_unsupported_type_is_reported() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let notes = temp.path().join("Pictures").join("notes.txt");
    write_file(&notes, b"plain text");

    let device = DeviceMetadata::new(Utc::now());
    let reference = MediaReference::new(notes.display().to_string(), "text/plain", device);
    let config = ValidationConfig::production().with_enable_recovery(false);
    let result = validator.validate_and_recover(&reference, &config).await;

    assert!(!result.is_valid);
    assert!(result.error_message.unwrap().contains("Unsupported media type"));
}

#[tokio::test]
async fn test_missing_file_without_recovery() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let gone = temp.path().join("Pictures").join("gone.jpg");

    let config = ValidationConfig::production().with_enable_recovery(false);
    let result = validator
        .validate_and_recover(&reference_for(&gone), &config)
        .await;

    assert!(!result.is_valid);
    assert!(result.error_message.unwrap().contains("File not found"));
}

#[tokio::test]
async fn test_disabled_custom_directory_fails_validation_even_though_file_exists() {
    let temp = TempDir::new().unwrap();
    let (registry, validator) = setup(&temp);

    let exports = temp.path().join("Exports");
    std::fs::create_dir_all(&exports).unwrap();
    let render = exports.join("render.jpg");
    write_file(&render, b"jpeg bytes");
    registry.add("Exports", &exports).unwrap();
    registry.set_custom_directories_enabled(false).unwrap();

    assert!(!registry.is_path_allowed(&render));
    assert!(render.exists());

    // Recovery cannot resurrect it either: the index only lists allowed
    // directories.
    let config = ValidationConfig::production().with_enable_cache_refresh(false);
    let batch = validator
        .validate_and_recover_list(&[reference_for(&render)], &config)
        .await;

    assert!(!batch.all_items_valid());
    assert!(!batch.results()[0].is_valid);
}

#[tokio::test]
async fn test_failed_references_are_queued_for_purge() {
    let temp = TempDir::new().unwrap();
    let (_registry, validator) = setup(&temp);
    let gone = temp.path().join("Pictures").join("gone.jpg");

    let config = ValidationConfig::production()
        .with_enable_recovery(false)
        .with_enable_stale_purging(true);
    validator
        .validate_and_recover(&reference_for(&gone), &config)
        .await;

    assert_eq!(validator.caches().stale_len().await, 1);
    assert_eq!(validator.purge_stale_references().await, 1);
    assert_eq!(validator.caches().stale_len().await, 0);

    // The purge dropped the cached failure, so the next call re-validates.
    assert!(validator.caches().cached_result(&gone.display().to_string()).await.is_none());
}
