//! Tests for batch validation.

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

fn setup(temp: &TempDir) -> MediaValidator {
    let pictures = temp.path().join("Pictures");
    std::fs::create_dir_all(&pictures).unwrap();
    let defaults = vec![vasari_core::MediaDirectoryDescriptor::platform_default(
        "Pictures", pictures,
    )];
    let registry =
        Arc::new(DirectoryRegistry::new(Box::new(InMemoryStore::new()), defaults).unwrap());
    let index: Arc<dyn MediaIndex> = Arc::new(FsMediaIndex::new(Arc::clone(&registry)));
    MediaValidator::new(index, registry, fast_engine_config()).unwrap()
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
async fn test_batch_preserves_input_order_and_tolerates_failures() {
    let temp = TempDir::new().unwrap();
    let validator = setup(&temp);
    let pictures = temp.path().join("Pictures");

    // A: valid as stored.
    let a = pictures.join("a.jpg");
    write_file(&a, b"jpeg bytes");
    let a_ref = reference_for(&a);

    // B: broken but recoverable through the pattern strategy.
    let b = pictures.join("img_0001.jpg");
    write_file(&b, b"jpeg bytes");
    let b_ref = reference_for(&b);
    std::fs::rename(&b, pictures.join("img_0001_copy.jpg")).unwrap();

    // C: broken and unrecoverable.
    let c_ref = reference_for(&pictures.join("ghost.jpg"));

    let config = ValidationConfig::production()
        .with_enable_metadata_matching(false)
        .with_enable_cache_refresh(false);
    let batch = validator
        .validate_and_recover_list(&[a_ref.clone(), b_ref.clone(), c_ref.clone()], &config)
        .await;

    assert_eq!(batch.len(), 3);
    assert!(!batch.all_items_valid());
    assert_eq!(batch.valid_count(), 2);
    assert_eq!(batch.invalid_count(), 1);

    let results = batch.results();
    assert_eq!(results[0].original_uri, a_ref.uri);
    assert!(results[0].is_valid);
    assert_eq!(results[0].recovery_method, RecoveryMethod::None);

    assert_eq!(results[1].original_uri, b_ref.uri);
    assert!(results[1].is_valid);
    assert_eq!(results[1].recovery_method, RecoveryMethod::FilenamePattern);

    assert_eq!(results[2].original_uri, c_ref.uri);
    assert!(!results[2].is_valid);
}

#[tokio::test]
async fn test_empty_batch_is_vacuously_valid() {
    let temp = TempDir::new().unwrap();
    let validator = setup(&temp);

    let batch = validator
        .validate_and_recover_list(&[], &ValidationConfig::production())
        .await;

    assert!(batch.is_empty());
    assert!(batch.all_items_valid());
}

#[tokio::test]
async fn test_batch_larger_than_concurrency_ceiling_completes_in_order() {
    let temp = TempDir::new().unwrap();
    let validator = setup(&temp);
    let pictures = temp.path().join("Pictures");

    let references: Vec<MediaReference> = (0..7)
        .map(|i| {
            let path = pictures.join(format!("img_{:04}.jpg", i));
            write_file(&path, b"jpeg bytes");
            reference_for(&path)
        })
        .collect();

    let batch = validator
        .validate_and_recover_list(&references, &ValidationConfig::production())
        .await;

    assert!(batch.all_items_valid());
    assert_eq!(batch.len(), 7);
    for (result, reference) in batch.results().iter().zip(&references) {
        assert_eq!(result.original_uri, reference.uri);
    }
}
