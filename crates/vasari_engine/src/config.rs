//! Engine configuration loading.
//!
//! Configuration merges bundled TOML defaults (`include_str!` of
//! `vasari.toml`) with optional user overrides in
//! `~/.config/vasari/vasari.toml` and `./vasari.toml`, later sources
//! taking precedence.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use vasari_cache::CacheConfig;
use vasari_core::ValidationConfig;
use vasari_error::{ConfigError, VasariError, VasariResult};

/// Configuration for the cache invalidation governor.
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
pub struct GovernorConfig {
    /// Minimum wall-clock seconds between smart invalidations
    #[serde(default = "default_smart_interval")]
    smart_invalidation_interval_secs: u64,

    /// Minimum wall-clock seconds between directory rescans
    #[serde(default = "default_rescan_interval")]
    directory_rescan_interval_secs: u64,

    /// Settle delay after toggling change notifications (smart path, ms)
    #[serde(default = "default_smart_settle")]
    smart_settle_ms: u64,

    /// Settle delay around notification reset (comprehensive path, ms)
    #[serde(default = "default_comprehensive_settle")]
    comprehensive_settle_ms: u64,
}

fn default_smart_interval() -> u64 {
    30
}

fn default_rescan_interval() -> u64 {
    10
}

fn default_smart_settle() -> u64 {
    250
}

fn default_comprehensive_settle() -> u64 {
    750
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            smart_invalidation_interval_secs: default_smart_interval(),
            directory_rescan_interval_secs: default_rescan_interval(),
            smart_settle_ms: default_smart_settle(),
            comprehensive_settle_ms: default_comprehensive_settle(),
        }
    }
}

/// Configuration for batch validation.
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
pub struct BatchConfig {
    /// Concurrency ceiling for validations within one batch call
    #[serde(default = "default_max_concurrent")]
    max_concurrent_validations: usize,
}

fn default_max_concurrent() -> usize {
    3
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_validations: default_max_concurrent(),
        }
    }
}

/// Top-level engine configuration.
///
/// # Example
///
/// ```no_run
/// use vasari_engine::EngineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Bundled defaults merged with user overrides
/// let config = EngineConfig::load()?;
/// println!("ttl: {}s", config.cache.ttl_seconds());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Validation and recovery behavior
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Cache TTL and bounds
    #[serde(default)]
    pub cache: CacheConfig,

    /// Governor rate-limit windows and settle delays
    #[serde(default)]
    pub governor: GovernorConfig,

    /// Batch concurrency ceiling
    #[serde(default)]
    pub batch: BatchConfig,
}

impl EngineConfig {
    /// Engine defaults with the permissive debug validation preset.
    pub fn debug() -> Self {
        Self {
            validation: ValidationConfig::debug(),
            ..Self::default()
        }
    }

    /// Engine defaults with the conservative production validation preset.
    pub fn production() -> Self {
        Self {
            validation: ValidationConfig::production(),
            ..Self::default()
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed values are out of range.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> VasariResult<Self> {
        debug!("Loading engine configuration from file");

        let parsed: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources
    /// override earlier):
    /// 1. Bundled defaults (vasari.toml shipped with the library)
    /// 2. User config in home directory (~/.config/vasari/vasari.toml)
    /// 3. User config in current directory (./vasari.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> VasariResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../vasari.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vasari/vasari.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("vasari").required(false));

        let parsed: Self = builder
            .build()
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VasariError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Check cross-field and range constraints.
    ///
    /// # Errors
    ///
    /// Returns error when the similarity threshold leaves [0, 1], an
    /// interval is zero, or the batch ceiling is zero.
    pub fn validate(&self) -> VasariResult<()> {
        let threshold = *self.validation.metadata_match_threshold();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::new(format!(
                "metadata_match_threshold must be within [0, 1], got {}",
                threshold
            ))
            .into());
        }
        if *self.governor.smart_invalidation_interval_secs() == 0 {
            return Err(ConfigError::new("smart_invalidation_interval_secs must be nonzero").into());
        }
        if *self.governor.directory_rescan_interval_secs() == 0 {
            return Err(ConfigError::new("directory_rescan_interval_secs must be nonzero").into());
        }
        if *self.batch.max_concurrent_validations() == 0 {
            return Err(ConfigError::new("max_concurrent_validations must be nonzero").into());
        }
        Ok(())
    }
}
