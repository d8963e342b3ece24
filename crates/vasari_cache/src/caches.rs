//! Shared cache aggregate.

use crate::{BirthprintCache, CacheConfig, StaleReferenceSet, ValidationCache};
use tokio::sync::Mutex;
use vasari_core::{Birthprint, ValidationResult};

/// The engine's shared mutable cache state.
///
/// Aggregates the validation cache, birthprint cache, and stale-reference
/// set behind one handle. Mutation is confined to this type (and the
/// invalidation governor, which calls [`MediaCaches::clear_all`]); no other
/// component writes the caches directly. Each member sits behind its own
/// `tokio::sync::Mutex`, and no lock is held across a suspension point —
/// two locks are only ever taken one after the other.
pub struct MediaCaches {
    config: CacheConfig,
    validation: Mutex<ValidationCache>,
    birthprints: Mutex<BirthprintCache>,
    stale: Mutex<StaleReferenceSet>,
}

impl MediaCaches {
    /// Create the cache aggregate from configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            validation: Mutex::new(ValidationCache::new(config.clone())),
            birthprints: Mutex::new(BirthprintCache::new(*config.max_birthprint_entries())),
            stale: Mutex::new(StaleReferenceSet::new()),
            config,
        }
    }

    /// Get a cached validation result, if present and fresh.
    pub async fn cached_result(&self, uri: &str) -> Option<ValidationResult> {
        self.validation.lock().await.get(uri)
    }

    /// Record a validation outcome.
    ///
    /// Stores the result, opportunistically evicts expired validation
    /// entries, and clears the birthprint cache if it has outgrown its
    /// hard bound.
    pub async fn record(&self, uri: &str, result: &ValidationResult) {
        {
            let mut validation = self.validation.lock().await;
            validation.put(uri, result.clone());
            validation.cleanup_expired();
        }

        let mut birthprints = self.birthprints.lock().await;
        if birthprints.len() > *self.config.max_birthprint_entries() {
            tracing::info!(
                entries = birthprints.len(),
                "Birthprint cache over bound during record, clearing"
            );
            birthprints.clear();
        }
    }

    /// Get the cached birthprint for a source path.
    pub async fn birthprint(&self, path: &str) -> Option<Birthprint> {
        self.birthprints.lock().await.get(path)
    }

    /// Store the birthprint for a source path.
    pub async fn store_birthprint(&self, path: &str, birthprint: Birthprint) {
        self.birthprints.lock().await.put(path, birthprint);
    }

    /// Drop the validation entry for a single URI.
    pub async fn invalidate(&self, uri: &str) -> bool {
        self.validation.lock().await.invalidate(uri)
    }

    /// Queue a failed reference for best-effort purge.
    ///
    /// Returns false if it was already queued.
    pub async fn queue_stale(&self, uri: &str) -> bool {
        self.stale.lock().await.insert(uri)
    }

    /// Purge everything queued as stale from the caches.
    ///
    /// Returns the number of purged references.
    pub async fn purge_stale(&self) -> usize {
        let stale = self.stale.lock().await.drain();
        if stale.is_empty() {
            return 0;
        }

        let purged = stale.len();
        {
            let mut validation = self.validation.lock().await;
            for uri in &stale {
                validation.invalidate(uri);
            }
        }
        {
            let mut birthprints = self.birthprints.lock().await;
            for uri in &stale {
                birthprints.invalidate(uri);
            }
        }

        tracing::info!(purged, "Purged stale references from caches");
        purged
    }

    /// Clear every cache and drop all queued stale references.
    pub async fn clear_all(&self) {
        self.validation.lock().await.clear();
        self.birthprints.lock().await.clear();
        self.stale.lock().await.drain();
        tracing::info!("Cleared all media caches");
    }

    /// Number of cached validation results.
    pub async fn validation_len(&self) -> usize {
        self.validation.lock().await.len()
    }

    /// Number of cached birthprints.
    pub async fn birthprint_len(&self) -> usize {
        self.birthprints.lock().await.len()
    }

    /// Number of references queued for purge.
    pub async fn stale_len(&self) -> usize {
        self.stale.lock().await.len()
    }
}

impl Default for MediaCaches {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
