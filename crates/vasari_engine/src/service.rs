//! The media validation service.

use crate::config::{BatchConfig, EngineConfig};
use crate::fingerprint::{BirthprintExtractor, SimilarityValidator};
use crate::governor::InvalidationGovernor;
use crate::recovery::RecoveryEngine;
use crate::strategies::{
    BirthprintStrategy, CacheRefreshStrategy, ExactFilenameStrategy, FilenamePatternStrategy,
};
use crate::strategy::{RecoveryStrategy, RecoveryTarget};
use crate::validator::ExistenceValidator;
use std::sync::Arc;
use tokio::sync::Semaphore;
use vasari_cache::MediaCaches;
use vasari_core::{BatchValidationResult, MediaReference, ValidationConfig, ValidationResult};
use vasari_error::VasariResult;
use vasari_index::MediaIndex;
use vasari_registry::DirectoryRegistry;

/// Validates media references and recovers broken ones.
///
/// The service owns the caches, the recovery pipeline, and the
/// invalidation governor; callers submit references and persist any
/// `recovered_uri` substitution back into their own documents. Validation
/// failures are encoded in the returned
/// [`ValidationResult`](vasari_core::ValidationResult), never raised as
/// errors.
pub struct MediaValidator {
    registry: Arc<DirectoryRegistry>,
    caches: Arc<MediaCaches>,
    existence: ExistenceValidator,
    recovery: RecoveryEngine,
    governor: Arc<InvalidationGovernor>,
    batch: BatchConfig,
}

impl MediaValidator {
    /// Create a validator with the standard strategy order: exact
    /// filename, filename pattern, birthprint similarity, cache refresh.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(
        index: Arc<dyn MediaIndex>,
        registry: Arc<DirectoryRegistry>,
        config: EngineConfig,
    ) -> VasariResult<Self> {
        config.validate()?;

        let caches = Arc::new(MediaCaches::new(config.cache.clone()));
        let governor = Arc::new(InvalidationGovernor::new(
            Arc::clone(&index),
            Arc::clone(&caches),
            config.governor.clone(),
        )?);
        let extractor = BirthprintExtractor::new(Arc::clone(&caches));
        let similarity = SimilarityValidator::new(extractor);

        let strategies: Vec<Box<dyn RecoveryStrategy>> = vec![
            Box::new(ExactFilenameStrategy::new(Arc::clone(&index))),
            Box::new(FilenamePatternStrategy::new(Arc::clone(&index))),
            Box::new(BirthprintStrategy::new(Arc::clone(&index), similarity)),
            Box::new(CacheRefreshStrategy::new(Arc::clone(&governor))),
        ];

        Ok(Self {
            existence: ExistenceValidator::new(Arc::clone(&registry)),
            recovery: RecoveryEngine::new(strategies),
            registry,
            caches,
            governor,
            batch: config.batch,
        })
    }

    /// The shared caches, for diagnostics and explicit invalidation.
    pub fn caches(&self) -> &Arc<MediaCaches> {
        &self.caches
    }

    /// The invalidation governor, for opportunistic store refreshes.
    pub fn governor(&self) -> &Arc<InvalidationGovernor> {
        &self.governor
    }

    /// The directory registry this validator gates paths through.
    pub fn registry(&self) -> &Arc<DirectoryRegistry> {
        &self.registry
    }

    /// Validate one reference, recovering it if broken.
    ///
    /// Consults the validation cache first; on a miss, runs the basic
    /// existence checks and, for recoverable failures, the ordered
    /// recovery pipeline. The outcome is cached and failed references are
    /// queued for best-effort purge.
    #[tracing::instrument(skip(self, reference, config), fields(uri = %reference.uri))]
    pub async fn validate_and_recover(
        &self,
        reference: &MediaReference,
        config: &ValidationConfig,
    ) -> ValidationResult {
        if let Some(cached) = self.caches.cached_result(&reference.uri).await {
            tracing::debug!("Serving validation result from cache");
            return cached;
        }

        let result = match self.existence.check_reference(reference).await {
            Ok(_) => ValidationResult::valid(reference.uri.clone()),
            Err(e) if e.kind.is_recoverable() && *config.enable_recovery() => {
                if *config.verbose_logging() {
                    tracing::info!(error = %e, "Basic validation failed, entering recovery");
                } else {
                    tracing::debug!(error = %e, "Basic validation failed, entering recovery");
                }
                match RecoveryTarget::from_reference(reference) {
                    Some(target) => self.recovery.recover(&target, config).await,
                    None => ValidationResult::invalid(reference.uri.clone(), e.kind.to_string()),
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Basic validation failed, recovery not applicable");
                ValidationResult::invalid(reference.uri.clone(), e.kind.to_string())
            }
        };

        self.caches.record(&reference.uri, &result).await;

        if !result.is_valid && *config.enable_stale_purging() {
            self.caches.queue_stale(&reference.uri).await;
        }

        result
    }

    /// Validate a list of references with a concurrency ceiling.
    ///
    /// Results preserve input order regardless of completion order, and a
    /// failing item never aborts the rest of the batch.
    #[tracing::instrument(skip(self, references, config), fields(items = references.len()))]
    pub async fn validate_and_recover_list(
        &self,
        references: &[MediaReference],
        config: &ValidationConfig,
    ) -> BatchValidationResult {
        let semaphore = Arc::new(Semaphore::new(*self.batch.max_concurrent_validations()));

        let futures = references.iter().map(|reference| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("Semaphore should not be closed");
                self.validate_and_recover(reference, config).await
            }
        });

        let batch = BatchValidationResult::new(futures_util::future::join_all(futures).await);
        tracing::debug!(
            total = batch.len(),
            valid = batch.valid_count(),
            all_valid = batch.all_items_valid(),
            "Batch validation complete"
        );
        batch
    }

    /// Purge everything queued as stale from the caches.
    ///
    /// Best-effort and non-blocking with respect to validation: callers
    /// run this opportunistically (the comprehensive refresh also runs it).
    pub async fn purge_stale_references(&self) -> usize {
        self.caches.purge_stale().await
    }
}
