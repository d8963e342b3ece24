//! Birthprint cache implementation.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use vasari_core::Birthprint;

/// Cache of file birthprints, keyed by a digest of the source path.
///
/// The cache carries a hard entry bound. There is no side channel to
/// partially invalidate a single entry: exceeding the bound clears the
/// whole cache, and explicit purges go through
/// [`MediaCaches`](crate::MediaCaches).
pub struct BirthprintCache {
    entries: HashMap<String, Birthprint>,
    max_entries: usize,
}

impl BirthprintCache {
    /// Create a birthprint cache with the given hard entry bound.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    /// Digest of a source path, used as the cache key.
    fn key_for(path: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get the cached birthprint for a source path.
    pub fn get(&self, path: &str) -> Option<Birthprint> {
        self.entries.get(&Self::key_for(path)).cloned()
    }

    /// Store the birthprint for a source path.
    ///
    /// Inserting past the hard bound clears the whole cache first.
    pub fn put(&mut self, path: &str, birthprint: Birthprint) {
        let key = Self::key_for(path);
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            tracing::info!(
                cleared = self.entries.len(),
                max_entries = self.max_entries,
                "Birthprint cache exceeded its bound, clearing"
            );
            self.entries.clear();
        }
        self.entries.insert(key, birthprint);
    }

    /// Drop the entry for a single source path.
    pub fn invalidate(&mut self, path: &str) -> bool {
        self.entries.remove(&Self::key_for(path)).is_some()
    }

    /// Clear all cached birthprints.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached birthprints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
