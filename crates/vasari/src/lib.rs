//! Vasari — media reference validation, recovery, and caching.
//!
//! Vasari keeps previously-referenced on-device media files addressable
//! over time for a voice-driven content-creation app. Files get renamed,
//! moved, deleted, or re-indexed underneath the app; Vasari validates that
//! a stored reference still resolves to a real, readable file of a
//! supported type, repairs broken references through ordered recovery
//! strategies, and keeps repeated validation from thrashing the media
//! store with short-lived caches and rate-limited refreshes.
//!
//! # Features
//!
//! - **Validation**: existence, emptiness, supported-kind, and
//!   readability checks, gated by the directory registry
//! - **Recovery**: exact filename, filename pattern, birthprint
//!   similarity, and forced-refresh strategies under one time budget
//! - **Caching**: TTL-boxed validation results, bounded birthprint cache,
//!   stale-reference purge queue
//! - **Discipline**: single-flight guards and wall-clock rate limits on
//!   store-wide refresh operations
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vasari::{
//!     DirectoryRegistry, EngineConfig, FsMediaIndex, JsonFileStore, MediaValidator,
//!     ValidationConfig, platform_default_descriptors,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     vasari::init_telemetry()?;
//!
//!     let registry = Arc::new(DirectoryRegistry::new(
//!         Box::new(JsonFileStore::new("directories.json")),
//!         platform_default_descriptors(),
//!     )?);
//!     let index = Arc::new(FsMediaIndex::new(Arc::clone(&registry)));
//!     let validator = MediaValidator::new(index, registry, EngineConfig::load()?)?;
//!
//!     let batch = validator
//!         .validate_and_recover_list(&draft_media, &ValidationConfig::production())
//!         .await;
//!     for result in batch.results() {
//!         println!("{} -> {:?}", result.original_uri, result.recovered_uri);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use vasari_cache::{
    BirthprintCache, CacheConfig, CacheConfigBuilder, MediaCaches, StaleReferenceSet,
    ValidationCache, ValidationCacheEntry,
};
pub use vasari_core::{
    BatchValidationResult, Birthprint, DeviceMetadata, MediaDirectoryDescriptor, MediaKind,
    MediaReference, RecoveryMethod, ValidationConfig, ValidationConfigBuilder, ValidationResult,
    init_telemetry,
};
pub use vasari_engine::{
    BatchConfig, BatchConfigBuilder, BirthprintExtractor, BirthprintStrategy, CacheRefreshStrategy,
    EngineConfig, ExactFilenameStrategy, ExistenceValidator, FilenamePatternStrategy,
    GovernorConfig, GovernorConfigBuilder, GovernorOutcome, InvalidationGovernor, MediaValidator,
    RecoveryCandidate, RecoveryEngine, RecoveryStrategy, RecoveryTarget, SimilarityValidator,
    Validator, similarity_score,
};
pub use vasari_error::{
    ConfigError, IndexError, IndexErrorKind, RegistryError, RegistryErrorKind, ValidationError,
    ValidationErrorKind, VasariError, VasariErrorKind, VasariResult,
};
pub use vasari_index::{
    AssetDescriptor, FsMediaIndex, MediaIndex, SearchParams, to_reference_maps,
};
pub use vasari_registry::{
    DirectoryRegistry, DirectoryStore, InMemoryStore, JsonFileStore, RegistryState,
    platform_default_descriptors,
};
