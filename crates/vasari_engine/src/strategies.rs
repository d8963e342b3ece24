//! The ordered recovery strategies.

use crate::fingerprint::{SimilarityValidator, similarity_score};
use crate::governor::InvalidationGovernor;
use crate::strategy::{RecoveryCandidate, RecoveryStrategy, RecoveryTarget, normalize_stem};
use crate::validator::Validator;
use std::collections::HashMap;
use std::sync::Arc;
use vasari_core::{Birthprint, RecoveryMethod, ValidationConfig};
use vasari_error::VasariResult;
use vasari_index::{AssetDescriptor, MediaIndex, SearchParams};

/// Shortest normalized stem the pattern strategy will search for.
const MIN_PATTERN_STEM: usize = 3;

fn candidate_pool(target: &RecoveryTarget, assets: Vec<AssetDescriptor>) -> Vec<AssetDescriptor> {
    // Never propose the path that just failed validation.
    assets
        .into_iter()
        .filter(|asset| asset.path != target.original_path)
        .collect()
}

/// Strategy 1: exact base-name equality, directory-agnostic.
pub struct ExactFilenameStrategy {
    index: Arc<dyn MediaIndex>,
}

impl ExactFilenameStrategy {
    /// Create the strategy over the given index.
    pub fn new(index: Arc<dyn MediaIndex>) -> Self {
        Self { index }
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for ExactFilenameStrategy {
    fn method(&self) -> RecoveryMethod {
        RecoveryMethod::ExactFilename
    }

    #[tracing::instrument(skip(self, target, _config), fields(base_name = %target.base_name))]
    async fn attempt(
        &self,
        target: &RecoveryTarget,
        _config: &ValidationConfig,
    ) -> VasariResult<Option<RecoveryCandidate>> {
        let assets = self.index.list_candidates(&SearchParams::all()).await?;
        let wanted = target.base_name.to_lowercase();

        let matched = candidate_pool(target, assets)
            .into_iter()
            .find(|asset| asset.file_name.to_lowercase() == wanted);

        Ok(matched.map(|asset| {
            tracing::debug!(path = %asset.path.display(), "Exact filename match");
            RecoveryCandidate::new(
                asset.path.display().to_string(),
                HashMap::from([("matched_file_name".to_string(), asset.file_name)]),
            )
        }))
    }
}

/// Strategy 2: normalized filename pattern match.
///
/// Strips common rename suffixes from both sides, then accepts a candidate
/// when either normalized stem contains the other and the extension
/// matches exactly.
pub struct FilenamePatternStrategy {
    index: Arc<dyn MediaIndex>,
}

impl FilenamePatternStrategy {
    /// Create the strategy over the given index.
    pub fn new(index: Arc<dyn MediaIndex>) -> Self {
        Self { index }
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for FilenamePatternStrategy {
    fn method(&self) -> RecoveryMethod {
        RecoveryMethod::FilenamePattern
    }

    #[tracing::instrument(skip(self, target, _config), fields(stem = %target.stem))]
    async fn attempt(
        &self,
        target: &RecoveryTarget,
        _config: &ValidationConfig,
    ) -> VasariResult<Option<RecoveryCandidate>> {
        let normalized_target = normalize_stem(&target.stem);
        if normalized_target.len() < MIN_PATTERN_STEM {
            tracing::debug!(
                normalized = %normalized_target,
                "Base too short for pattern matching, skipping"
            );
            return Ok(None);
        }

        let assets = self.index.list_candidates(&SearchParams::all()).await?;
        let matched = candidate_pool(target, assets).into_iter().find(|asset| {
            let extension = asset
                .path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            if extension != target.extension {
                return false;
            }

            let candidate_stem = asset
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(normalize_stem)
                .unwrap_or_default();
            if candidate_stem.len() < MIN_PATTERN_STEM {
                return false;
            }

            candidate_stem.contains(&normalized_target) || normalized_target.contains(&candidate_stem)
        });

        Ok(matched.map(|asset| {
            tracing::debug!(path = %asset.path.display(), "Filename pattern match");
            RecoveryCandidate::new(
                asset.path.display().to_string(),
                HashMap::from([
                    ("matched_file_name".to_string(), asset.file_name),
                    ("normalized_base".to_string(), normalized_target),
                ]),
            )
        }))
    }
}

/// Strategy 3: birthprint similarity, gated by `enable_metadata_matching`.
///
/// Scores every indexed candidate against the target's birthprint and
/// hands the best one to the [`SimilarityValidator`] for final acceptance
/// against the configured threshold.
pub struct BirthprintStrategy {
    index: Arc<dyn MediaIndex>,
    similarity: SimilarityValidator,
}

impl BirthprintStrategy {
    /// Create the strategy over the given index and similarity validator.
    pub fn new(index: Arc<dyn MediaIndex>, similarity: SimilarityValidator) -> Self {
        Self { index, similarity }
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for BirthprintStrategy {
    fn method(&self) -> RecoveryMethod {
        RecoveryMethod::Metadata
    }

    fn is_enabled(&self, config: &ValidationConfig) -> bool {
        *config.enable_metadata_matching()
    }

    #[tracing::instrument(skip(self, target, config), fields(uri = %target.original_uri))]
    async fn attempt(
        &self,
        target: &RecoveryTarget,
        config: &ValidationConfig,
    ) -> VasariResult<Option<RecoveryCandidate>> {
        let target_print = self.similarity.target_birthprint(&target.reference).await;
        let assets = self.index.list_candidates(&SearchParams::all()).await?;

        let mut best: Option<(f64, AssetDescriptor)> = None;
        for asset in candidate_pool(target, assets) {
            let candidate_print = Birthprint::new(
                asset.creation_time,
                asset.file_size,
                asset.file_name.clone(),
            );
            let score = similarity_score(&target_print, &candidate_print);
            if best.as_ref().is_none_or(|(top, _)| score > *top) {
                best = Some((score, asset));
            }
        }

        let Some((score, asset)) = best else {
            return Ok(None);
        };

        let threshold = *config.metadata_match_threshold();
        if score < threshold {
            tracing::debug!(score, threshold, "Best birthprint candidate below threshold");
            return Ok(None);
        }

        // Final acceptance goes through the similarity validator so the
        // candidate is re-scored from a live stat, not the snapshot.
        if self
            .similarity
            .validate(&target.reference, &asset.path, config)
            .await
            .is_err()
        {
            return Ok(None);
        }

        tracing::debug!(
            path = %asset.path.display(),
            score,
            "Birthprint similarity match"
        );
        Ok(Some(RecoveryCandidate::new(
            asset.path.display().to_string(),
            HashMap::from([
                ("matched_file_name".to_string(), asset.file_name),
                ("similarity".to_string(), format!("{:.3}", score)),
                ("threshold".to_string(), format!("{:.3}", threshold)),
            ]),
        )))
    }
}

/// Strategy 4: forced store refresh, gated by `enable_cache_refresh`.
///
/// Runs the governor's comprehensive refresh and re-checks the original
/// path; succeeds only when the refresh surfaces the path again (transient
/// index staleness).
pub struct CacheRefreshStrategy {
    governor: Arc<InvalidationGovernor>,
}

impl CacheRefreshStrategy {
    /// Create the strategy over the given governor.
    pub fn new(governor: Arc<InvalidationGovernor>) -> Self {
        Self { governor }
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for CacheRefreshStrategy {
    fn method(&self) -> RecoveryMethod {
        RecoveryMethod::CacheRefresh
    }

    fn is_enabled(&self, config: &ValidationConfig) -> bool {
        *config.enable_cache_refresh()
    }

    #[tracing::instrument(skip(self, target, _config), fields(uri = %target.original_uri))]
    async fn attempt(
        &self,
        target: &RecoveryTarget,
        _config: &ValidationConfig,
    ) -> VasariResult<Option<RecoveryCandidate>> {
        let outcome = self.governor.comprehensive_refresh().await?;

        match tokio::fs::metadata(&target.original_path).await {
            Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {
                tracing::debug!(
                    path = %target.original_path.display(),
                    "Original path resurfaced after refresh"
                );
                Ok(Some(RecoveryCandidate::new(
                    target.original_uri.clone(),
                    HashMap::from([("refresh".to_string(), outcome.to_string())]),
                )))
            }
            _ => Ok(None),
        }
    }
}
