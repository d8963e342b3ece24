//! Birthprint extraction and similarity scoring.

use crate::validator::{Validator, uri_to_path};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use vasari_cache::MediaCaches;
use vasari_core::{Birthprint, MediaReference, ValidationConfig};
use vasari_error::{ValidationError, ValidationErrorKind};

/// Weight of creation-time closeness in the similarity score.
const TIME_WEIGHT: f64 = 0.5;
/// Weight of file-size match in the similarity score.
const SIZE_WEIGHT: f64 = 0.3;
/// Weight of filename overlap in the similarity score.
const NAME_WEIGHT: f64 = 0.2;

/// Similarity between two birthprints, in [0, 1].
///
/// Identical birthprints score exactly 1.0. The score strictly decreases
/// as the creation-time delta grows and as the size delta grows; the
/// weights are tunable constants, not a contract.
pub fn similarity_score(target: &Birthprint, candidate: &Birthprint) -> f64 {
    let delta_seconds = (target.creation_time - candidate.creation_time)
        .num_seconds()
        .unsigned_abs() as f64;
    let time_score = 1.0 / (1.0 + delta_seconds / 3600.0);

    let size_score = if target.file_size == candidate.file_size {
        1.0
    } else {
        let min = target.file_size.min(candidate.file_size) as f64;
        let max = target.file_size.max(candidate.file_size) as f64;
        if max == 0.0 { 0.0 } else { 0.9 * (min / max) }
    };

    let target_stem = stem_of(&target.original_filename);
    let candidate_stem = stem_of(&candidate.original_filename);
    let name_score = if target_stem.is_empty() || candidate_stem.is_empty() {
        0.0
    } else if target_stem == candidate_stem {
        1.0
    } else if target_stem.contains(&candidate_stem) || candidate_stem.contains(&target_stem) {
        0.5
    } else {
        0.0
    };

    TIME_WEIGHT * time_score + SIZE_WEIGHT * size_score + NAME_WEIGHT * name_score
}

fn stem_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Derives birthprints from the filesystem, memoizing through the caches.
#[derive(Clone)]
pub struct BirthprintExtractor {
    caches: Arc<MediaCaches>,
}

impl BirthprintExtractor {
    /// Create an extractor writing through the given caches.
    pub fn new(caches: Arc<MediaCaches>) -> Self {
        Self { caches }
    }

    /// Birthprint of a file, from a stat or the cache.
    ///
    /// A successful stat refreshes the cache; when the path no longer
    /// resolves the previously cached value is returned instead.
    pub async fn extract(&self, path: &Path) -> Option<Birthprint> {
        let key = path.display().to_string();

        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {
                let modified: DateTime<Utc> = metadata
                    .modified()
                    .map(DateTime::from)
                    .unwrap_or_else(|_| Utc::now());
                let created: DateTime<Utc> =
                    metadata.created().map(DateTime::from).unwrap_or(modified);
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();

                let birthprint = Birthprint::new(created, metadata.len(), name);
                self.caches.store_birthprint(&key, birthprint.clone()).await;
                Some(birthprint)
            }
            _ => {
                let cached = self.caches.birthprint(&key).await;
                if cached.is_some() {
                    tracing::debug!(path = %key, "Using cached birthprint for missing file");
                }
                cached
            }
        }
    }

    /// Best available birthprint for a reference.
    ///
    /// Prefers a live stat of the referenced path, then the cached value,
    /// and finally the device metadata recorded when the reference was
    /// created.
    pub async fn for_reference(&self, reference: &MediaReference) -> Birthprint {
        if let Some(path) = uri_to_path(&reference.uri)
            && let Some(birthprint) = self.extract(&path).await
        {
            return birthprint;
        }

        let base_name = uri_to_path(&reference.uri)
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or(&reference.uri)
            .to_string();

        Birthprint::new(
            reference.metadata.creation_time,
            reference.metadata.file_size_bytes,
            base_name,
        )
    }
}

/// Judges a substitute file by birthprint similarity.
///
/// The capability twin of
/// [`ExistenceValidator`](crate::ExistenceValidator): instead of trusting
/// a path that still resolves, it compares the candidate's birthprint
/// against the reference's and accepts only scores at or above the
/// configured threshold.
pub struct SimilarityValidator {
    extractor: BirthprintExtractor,
}

impl SimilarityValidator {
    /// Create a similarity validator over the given extractor.
    pub fn new(extractor: BirthprintExtractor) -> Self {
        Self { extractor }
    }

    /// Best available birthprint for the reference being recovered.
    pub async fn target_birthprint(&self, reference: &MediaReference) -> Birthprint {
        self.extractor.for_reference(reference).await
    }
}

#[async_trait::async_trait]
impl Validator for SimilarityValidator {
    async fn validate(
        &self,
        reference: &MediaReference,
        candidate: &Path,
        config: &ValidationConfig,
    ) -> Result<(), ValidationError> {
        let Some(candidate_print) = self.extractor.extract(candidate).await else {
            return Err(ValidationError::new(ValidationErrorKind::FileNotFound(
                candidate.display().to_string(),
            )));
        };

        let target_print = self.target_birthprint(reference).await;
        let score = similarity_score(&target_print, &candidate_print);
        let threshold = *config.metadata_match_threshold();

        if score < threshold {
            return Err(ValidationError::new(ValidationErrorKind::RecoveryExhausted(
                format!(
                    "similarity {:.3} below threshold {:.3} for {}",
                    score,
                    threshold,
                    candidate.display()
                ),
            )));
        }

        tracing::debug!(
            candidate = %candidate.display(),
            score,
            threshold,
            "Accepted candidate by birthprint similarity"
        );
        Ok(())
    }
}
