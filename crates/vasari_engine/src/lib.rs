//! Validation, recovery, and cache-invalidation engine.
//!
//! This crate drives the core flow of the Vasari media engine: callers
//! submit one reference or a list of references, the validation cache is
//! consulted, basic existence checks run on a miss, and broken references
//! pass through an ordered pipeline of recovery strategies. Failed
//! references are queued for best-effort purge, and the expensive
//! store-wide refresh operations are gated behind the
//! [`InvalidationGovernor`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vasari_core::ValidationConfig;
//! use vasari_engine::{EngineConfig, MediaValidator};
//! use vasari_index::FsMediaIndex;
//! use vasari_registry::{DirectoryRegistry, JsonFileStore, platform_default_descriptors};
//!
//! # async fn example(reference: vasari_core::MediaReference) -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(DirectoryRegistry::new(
//!     Box::new(JsonFileStore::new("directories.json")),
//!     platform_default_descriptors(),
//! )?);
//! let index = Arc::new(FsMediaIndex::new(Arc::clone(&registry)));
//! let validator = MediaValidator::new(index, registry, EngineConfig::load()?)?;
//!
//! let result = validator
//!     .validate_and_recover(&reference, &ValidationConfig::production())
//!     .await;
//! if let Some(uri) = result.recovered_uri {
//!     println!("use {uri}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod fingerprint;
mod governor;
mod recovery;
mod service;
mod strategies;
mod strategy;
mod validator;

pub use config::{
    BatchConfig, BatchConfigBuilder, EngineConfig, GovernorConfig, GovernorConfigBuilder,
};
pub use fingerprint::{BirthprintExtractor, SimilarityValidator, similarity_score};
pub use governor::{GovernorOutcome, InvalidationGovernor};
pub use recovery::RecoveryEngine;
pub use service::MediaValidator;
pub use strategies::{
    BirthprintStrategy, CacheRefreshStrategy, ExactFilenameStrategy, FilenamePatternStrategy,
};
pub use strategy::{RecoveryCandidate, RecoveryStrategy, RecoveryTarget};
pub use validator::{ExistenceValidator, Validator};
