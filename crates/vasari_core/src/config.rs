//! Validation configuration and presets.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for validation and recovery behavior.
///
/// Two canonical presets exist: [`ValidationConfig::debug`]
/// (permissive/verbose) and [`ValidationConfig::production`]
/// (conservative/silent, also the `Default`).
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
pub struct ValidationConfig {
    /// Whether broken references enter the recovery pipeline at all
    #[serde(default = "default_true")]
    enable_recovery: bool,

    /// Whether the birthprint-similarity strategy may run
    #[serde(default = "default_true")]
    enable_metadata_matching: bool,

    /// Whether the forced-cache-refresh strategy may run
    #[serde(default = "default_true")]
    enable_cache_refresh: bool,

    /// Whether failed references are queued for asynchronous cache purge
    #[serde(default = "default_true")]
    enable_stale_purging: bool,

    /// Minimum similarity score for a birthprint candidate, in [0, 1]
    #[serde(default = "default_metadata_match_threshold")]
    metadata_match_threshold: f64,

    /// Total recovery time budget per reference, in milliseconds
    #[serde(default = "default_max_recovery_time_ms")]
    max_recovery_time_ms: u64,

    /// Whether per-strategy progress is logged at info level
    #[serde(default)]
    verbose_logging: bool,
}

fn default_true() -> bool {
    true
}

fn default_metadata_match_threshold() -> f64 {
    0.75
}

fn default_max_recovery_time_ms() -> u64 {
    10_000
}

impl ValidationConfig {
    /// Permissive preset for development: everything enabled, a loose
    /// similarity threshold, a generous time budget, verbose logging.
    pub fn debug() -> Self {
        Self {
            enable_recovery: true,
            enable_metadata_matching: true,
            enable_cache_refresh: true,
            enable_stale_purging: true,
            metadata_match_threshold: 0.6,
            max_recovery_time_ms: 30_000,
            verbose_logging: true,
        }
    }

    /// Conservative preset for production: recovery enabled with a strict
    /// similarity threshold, a tight time budget, quiet logging.
    pub fn production() -> Self {
        Self {
            enable_recovery: true,
            enable_metadata_matching: true,
            enable_cache_refresh: true,
            enable_stale_purging: true,
            metadata_match_threshold: 0.75,
            max_recovery_time_ms: 10_000,
            verbose_logging: false,
        }
    }

    /// The recovery time budget as a [`Duration`].
    pub fn max_recovery_time(&self) -> Duration {
        Duration::from_millis(self.max_recovery_time_ms)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::production()
    }
}
