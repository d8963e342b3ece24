//! Validation result cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use vasari_core::ValidationResult;

/// Cache entry with the validation result and its storage time.
#[derive(Debug, Clone, Getters)]
pub struct ValidationCacheEntry {
    result: ValidationResult,
    cached_at: Instant,
}

impl ValidationCacheEntry {
    /// Check if this entry has outlived the given TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Configuration for the media caches.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// TTL for cached validation results (seconds)
    #[serde(default = "default_ttl")]
    ttl_seconds: u64,

    /// Hard bound on birthprint entries; exceeding it clears that cache
    #[serde(default = "default_max_birthprints")]
    max_birthprint_entries: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_ttl() -> u64 {
    86_400 // 24 hours
}

fn default_max_birthprints() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl CacheConfig {
    /// The validation-result TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_birthprint_entries: default_max_birthprints(),
            enabled: default_enabled(),
        }
    }
}

/// Time-boxed memoization of validation outcomes per reference URI.
///
/// An entry older than the TTL is treated as absent and removed on access.
/// Writes are last-write-wins on identical keys.
pub struct ValidationCache {
    config: CacheConfig,
    entries: HashMap<String, ValidationCacheEntry>,
}

impl ValidationCache {
    /// Create a new validation cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            ttl_seconds = config.ttl_seconds,
            enabled = config.enabled,
            "Creating validation cache"
        );
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Get a cached result, if present and younger than the TTL.
    pub fn get(&mut self, uri: &str) -> Option<ValidationResult> {
        if !self.config.enabled {
            return None;
        }

        let entry = self.entries.get(uri)?;
        if entry.is_expired(self.config.ttl()) {
            tracing::debug!(uri, "Validation cache entry expired, removing");
            self.entries.remove(uri);
            return None;
        }

        tracing::debug!(uri, "Validation cache hit");
        self.entries.get(uri).map(|e| e.result.clone())
    }

    /// Store or overwrite the result for a URI.
    pub fn put(&mut self, uri: impl Into<String>, result: ValidationResult) {
        if !self.config.enabled {
            return;
        }

        let uri = uri.into();
        tracing::debug!(uri = %uri, is_valid = result.is_valid, "Caching validation result");
        self.entries.insert(
            uri,
            ValidationCacheEntry {
                result,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for a single URI.
    pub fn invalidate(&mut self, uri: &str) -> bool {
        self.entries.remove(uri).is_some()
    }

    /// Remove expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.config.ttl();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired validation cache entries"
            );
        }
        removed
    }

    /// Clear all cached results.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::info!(cleared = count, "Cleared validation cache");
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ValidationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
