//! Tests for the filesystem-backed media index.

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use vasari_core::{MediaDirectoryDescriptor, MediaKind};
use vasari_index::{FsMediaIndex, MediaIndex, SearchParams, to_reference_maps};
use vasari_registry::{DirectoryRegistry, InMemoryStore};

fn registry_with_pictures(temp: &TempDir) -> Arc<DirectoryRegistry> {
    let pictures = temp.path().join("Pictures");
    std::fs::create_dir_all(&pictures).unwrap();
    let defaults = vec![MediaDirectoryDescriptor::platform_default(
        "Pictures", pictures,
    )];
    Arc::new(DirectoryRegistry::new(Box::new(InMemoryStore::new()), defaults).unwrap())
}

fn write_file(path: &std::path::Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[tokio::test]
async fn test_lists_supported_media_only() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let pictures = temp.path().join("Pictures");

    write_file(&pictures.join("img_0001.jpg"), b"jpeg");
    write_file(&pictures.join("clip.mp4"), b"mp4");
    write_file(&pictures.join("notes.txt"), b"text");
    write_file(&pictures.join("vacation/img_0002.heic"), b"heic");

    let index = FsMediaIndex::new(registry);
    let assets = index.list_candidates(&SearchParams::all()).await.unwrap();

    let mut names: Vec<_> = assets.iter().map(|a| a.file_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["clip.mp4", "img_0001.jpg", "img_0002.heic"]);
}

#[tokio::test]
async fn test_kind_and_name_filters() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let pictures = temp.path().join("Pictures");

    write_file(&pictures.join("img_0001.jpg"), b"jpeg");
    write_file(&pictures.join("img_0002.jpg"), b"jpeg");
    write_file(&pictures.join("clip.mp4"), b"mp4");

    let index = FsMediaIndex::new(registry);

    let videos = index
        .list_candidates(&SearchParams::for_kind(MediaKind::Video))
        .await
        .unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].file_name, "clip.mp4");

    let params = SearchParams {
        name_contains: Some("IMG_0002".to_string()),
        ..SearchParams::all()
    };
    let named = index.list_candidates(&params).await.unwrap();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].file_name, "img_0002.jpg");

    let params = SearchParams {
        limit: Some(2),
        ..SearchParams::all()
    };
    assert_eq!(index.list_candidates(&params).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_registry_mutations_apply_to_fresh_snapshots() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let exports = temp.path().join("Exports");
    std::fs::create_dir_all(&exports).unwrap();
    write_file(&exports.join("render.mp4"), b"mp4");

    registry.add("Exports", &exports).unwrap();
    let index = FsMediaIndex::new(Arc::clone(&registry));

    let assets = index.list_candidates(&SearchParams::all()).await.unwrap();
    assert!(assets.iter().any(|a| a.file_name == "render.mp4"));

    // Disabling custom directories must exclude the asset immediately,
    // even though the snapshot is still fresh.
    registry.set_custom_directories_enabled(false).unwrap();
    let assets = index.list_candidates(&SearchParams::all()).await.unwrap();
    assert!(!assets.iter().any(|a| a.file_name == "render.mp4"));
}

#[tokio::test]
async fn test_snapshot_serves_until_rescan() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let pictures = temp.path().join("Pictures");
    write_file(&pictures.join("img_0001.jpg"), b"jpeg");

    let index = FsMediaIndex::new(registry).with_snapshot_ttl(Duration::from_secs(600));
    assert_eq!(index.list_candidates(&SearchParams::all()).await.unwrap().len(), 1);

    // New file lands after the snapshot was taken: invisible until rescan.
    write_file(&pictures.join("img_0002.jpg"), b"jpeg");
    assert_eq!(index.list_candidates(&SearchParams::all()).await.unwrap().len(), 1);

    assert_eq!(index.rescan().await.unwrap(), 2);
    assert_eq!(index.list_candidates(&SearchParams::all()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_clear_file_cache_forces_rebuild() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let pictures = temp.path().join("Pictures");
    write_file(&pictures.join("img_0001.jpg"), b"jpeg");

    let index = FsMediaIndex::new(registry).with_snapshot_ttl(Duration::from_secs(600));
    assert_eq!(index.list_candidates(&SearchParams::all()).await.unwrap().len(), 1);

    write_file(&pictures.join("img_0002.jpg"), b"jpeg");
    index.clear_file_cache().await.unwrap();
    assert_eq!(index.list_candidates(&SearchParams::all()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_change_notification_toggle() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let index = FsMediaIndex::new(registry);

    assert!(index.change_notifications_enabled());
    index.set_change_notifications(false).await.unwrap();
    assert!(!index.change_notifications_enabled());
    index.set_change_notifications(true).await.unwrap();
    assert!(index.change_notifications_enabled());
}

#[tokio::test]
async fn test_reference_maps_render_plain_records() {
    let temp = TempDir::new().unwrap();
    let registry = registry_with_pictures(&temp);
    let pictures = temp.path().join("Pictures");
    write_file(&pictures.join("img_0001.jpg"), b"jpeg");

    let index = FsMediaIndex::new(registry);
    let assets = index.list_candidates(&SearchParams::all()).await.unwrap();
    let maps = to_reference_maps(&assets);

    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0]["file_name"], "img_0001.jpg");
    assert_eq!(maps[0]["kind"], "image");
    assert_eq!(maps[0]["file_size"], 4);
    assert!(maps[0]["uri"].as_str().unwrap().ends_with("img_0001.jpg"));
}
