//! Validation result types.

use std::collections::HashMap;

/// How a broken reference was repaired, if at all.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMethod {
    /// The original URI was valid; no recovery was needed
    #[display("none")]
    None,
    /// Recovered by exact base-name match
    #[display("exact_filename")]
    ExactFilename,
    /// Recovered by normalized filename pattern match
    #[display("filename_pattern")]
    FilenamePattern,
    /// Recovered by birthprint similarity
    #[display("metadata")]
    Metadata,
    /// Recovered by a forced store cache refresh
    #[display("cache_refresh")]
    CacheRefresh,
    /// All strategies were attempted without success
    #[display("failed")]
    Failed,
}

/// Outcome of validating (and possibly recovering) one media reference.
///
/// Produced once per validation attempt; immutable. The constructors
/// enforce the result invariants: a valid result always carries a
/// `recovered_uri`, equal to `original_uri` when no recovery ran.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    /// Whether the reference resolves to usable media
    pub is_valid: bool,
    /// The URI as stored by the caller
    pub original_uri: String,
    /// The URI to use going forward (present whenever `is_valid`)
    pub recovered_uri: Option<String>,
    /// Which strategy produced `recovered_uri`
    pub recovery_method: RecoveryMethod,
    /// Strategy-specific details (similarity score, matched name, ...)
    pub recovery_metadata: Option<HashMap<String, String>>,
    /// Why validation failed (present whenever `!is_valid`)
    pub error_message: Option<String>,
}

impl ValidationResult {
    /// A reference that passed basic validation unchanged.
    pub fn valid(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            is_valid: true,
            recovered_uri: Some(uri.clone()),
            original_uri: uri,
            recovery_method: RecoveryMethod::None,
            recovery_metadata: None,
            error_message: None,
        }
    }

    /// A broken reference repaired by a recovery strategy.
    pub fn recovered(
        original_uri: impl Into<String>,
        recovered_uri: impl Into<String>,
        method: RecoveryMethod,
        metadata: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            is_valid: true,
            original_uri: original_uri.into(),
            recovered_uri: Some(recovered_uri.into()),
            recovery_method: method,
            recovery_metadata: metadata,
            error_message: None,
        }
    }

    /// A reference that failed validation and could not be recovered.
    pub fn invalid(original_uri: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            original_uri: original_uri.into(),
            recovered_uri: None,
            recovery_method: RecoveryMethod::Failed,
            recovery_metadata: None,
            error_message: Some(error_message.into()),
        }
    }

    /// Whether recovery substituted a different URI than the original.
    pub fn was_recovered(&self) -> bool {
        self.is_valid && self.recovery_method != RecoveryMethod::None
    }
}

/// Ordered results of validating a list of references.
///
/// Created per batch call; not persisted. Output order always matches the
/// input order of the batch.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchValidationResult {
    results: Vec<ValidationResult>,
}

impl BatchValidationResult {
    /// Wrap per-item results, preserving their order.
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    /// Per-item results in input order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// True iff every item in the batch is valid.
    pub fn all_items_valid(&self) -> bool {
        self.results.iter().all(|r| r.is_valid)
    }

    /// Number of valid items.
    pub fn valid_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_valid).count()
    }

    /// Number of invalid items.
    pub fn invalid_count(&self) -> usize {
        self.results.len() - self.valid_count()
    }

    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consume the batch, yielding the per-item results.
    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }
}
