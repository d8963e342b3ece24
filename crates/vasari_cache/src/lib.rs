//! Validation result and birthprint caching for the Vasari media engine.
//!
//! This crate provides the short-lived caches that keep repeated validation
//! from thrashing the underlying media store: a TTL-boxed cache of
//! [`ValidationResult`](vasari_core::ValidationResult) records, a bounded
//! cache of [`Birthprint`](vasari_core::Birthprint)s keyed by source path,
//! and an insertion-ordered set of stale references awaiting purge.
//!
//! [`MediaCaches`] aggregates all three behind `tokio::sync::Mutex`es and is
//! the only type that mutates them (alongside the engine's invalidation
//! governor). Locks are never held across suspension points.

#![warn(missing_docs)]

mod birthprint;
mod caches;
mod stale;
mod validation;

pub use birthprint::BirthprintCache;
pub use caches::MediaCaches;
pub use stale::StaleReferenceSet;
pub use validation::{CacheConfig, CacheConfigBuilder, ValidationCache, ValidationCacheEntry};
