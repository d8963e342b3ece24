//! Filesystem-backed media index.

use crate::{AssetDescriptor, MediaIndex, SearchParams};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use vasari_core::MediaKind;
use vasari_error::{IndexError, IndexErrorKind, VasariResult};
use vasari_registry::DirectoryRegistry;

/// How long a directory snapshot serves listings before a lazy re-scan.
const SNAPSHOT_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct DirectorySnapshot {
    taken_at: Instant,
    assets: Vec<AssetDescriptor>,
}

impl DirectorySnapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.taken_at.elapsed() <= ttl
    }
}

/// Media index that walks the registry's enabled directories.
///
/// Listings are served from a time-stamped snapshot; the snapshot is
/// rebuilt lazily once it ages out, or eagerly through
/// [`MediaIndex::rescan`]. Snapshot contents are re-filtered through
/// [`DirectoryRegistry::is_path_allowed`] on every listing, so a registry
/// mutation is reflected immediately even while the snapshot is fresh.
pub struct FsMediaIndex {
    registry: Arc<DirectoryRegistry>,
    snapshot: RwLock<Option<DirectorySnapshot>>,
    snapshot_ttl: Duration,
    change_notifications: AtomicBool,
}

impl FsMediaIndex {
    /// Create an index over the registry's enabled directories.
    pub fn new(registry: Arc<DirectoryRegistry>) -> Self {
        Self {
            registry,
            snapshot: RwLock::new(None),
            snapshot_ttl: SNAPSHOT_TTL,
            change_notifications: AtomicBool::new(true),
        }
    }

    /// Override the snapshot freshness window.
    pub fn with_snapshot_ttl(mut self, ttl: Duration) -> Self {
        self.snapshot_ttl = ttl;
        self
    }

    /// Whether change notifications are currently on.
    pub fn change_notifications_enabled(&self) -> bool {
        self.change_notifications.load(Ordering::SeqCst)
    }

    /// Walk every enabled directory, collecting supported media files.
    #[tracing::instrument(skip(self))]
    async fn scan(&self) -> VasariResult<Vec<AssetDescriptor>> {
        let mut assets = Vec::new();
        let mut pending: Vec<PathBuf> = self
            .registry
            .enabled_directories()
            .into_iter()
            .map(|d| d.path)
            .collect();

        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                    continue;
                }
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(e) => {
                        return Err(IndexError::new(IndexErrorKind::Scan(format!(
                            "{}: {}",
                            dir.display(),
                            e
                        )))
                        .into());
                    }
                };

                let path = entry.path();
                let metadata = match entry.metadata().await {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                        continue;
                    }
                };

                if metadata.is_dir() {
                    pending.push(path);
                    continue;
                }

                let Some(kind) = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(MediaKind::from_extension)
                else {
                    continue;
                };

                let file_name = match path.file_name().and_then(|n| n.to_str()) {
                    Some(name) => name.to_string(),
                    None => continue,
                };

                let modified: DateTime<Utc> = metadata
                    .modified()
                    .map(DateTime::from)
                    .unwrap_or_else(|_| Utc::now());
                let created: DateTime<Utc> = metadata
                    .created()
                    .map(DateTime::from)
                    .unwrap_or(modified);

                assets.push(AssetDescriptor {
                    id: path.display().to_string(),
                    file_name,
                    kind,
                    file_size: metadata.len(),
                    creation_time: created,
                    modified_time: modified,
                    path,
                });
            }
        }

        tracing::debug!(assets = assets.len(), "Scanned media directories");
        Ok(assets)
    }

    /// Return snapshot assets, rebuilding the snapshot if it aged out.
    async fn snapshot_assets(&self) -> VasariResult<Vec<AssetDescriptor>> {
        {
            let snapshot = self.snapshot.read().await;
            if let Some(snapshot) = snapshot.as_ref()
                && snapshot.is_fresh(self.snapshot_ttl)
            {
                return Ok(snapshot.assets.clone());
            }
        }

        let assets = self.scan().await?;
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(DirectorySnapshot {
            taken_at: Instant::now(),
            assets: assets.clone(),
        });
        Ok(assets)
    }
}

#[async_trait::async_trait]
impl MediaIndex for FsMediaIndex {
    async fn list_candidates(&self, params: &SearchParams) -> VasariResult<Vec<AssetDescriptor>> {
        let assets = self.snapshot_assets().await?;

        let mut matched: Vec<AssetDescriptor> = assets
            .into_iter()
            .filter(|asset| self.registry.is_path_allowed(&asset.path))
            .filter(|asset| params.matches(asset))
            .collect();

        if let Some(limit) = params.limit {
            matched.truncate(limit);
        }

        tracing::debug!(matched = matched.len(), "Listed index candidates");
        Ok(matched)
    }

    #[tracing::instrument(skip(self))]
    async fn rescan(&self) -> VasariResult<usize> {
        let assets = self.scan().await?;
        let count = assets.len();
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(DirectorySnapshot {
            taken_at: Instant::now(),
            assets,
        });
        tracing::info!(assets = count, "Rebuilt directory snapshot");
        Ok(count)
    }

    async fn clear_file_cache(&self) -> VasariResult<()> {
        let mut snapshot = self.snapshot.write().await;
        let had = snapshot.take().is_some();
        tracing::debug!(had_snapshot = had, "Cleared index file cache");
        Ok(())
    }

    async fn set_change_notifications(&self, enabled: bool) -> VasariResult<()> {
        self.change_notifications.store(enabled, Ordering::SeqCst);
        tracing::debug!(enabled, "Toggled change notifications");
        Ok(())
    }
}
