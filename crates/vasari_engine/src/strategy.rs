//! Recovery strategy seam.

use crate::validator::uri_to_path;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;
use vasari_core::{MediaReference, RecoveryMethod, ValidationConfig};
use vasari_error::VasariResult;

/// Common rename suffixes: `_copy`, ` copy`, `-copy`, `(1)`, `_1`.
/// One or two trailing digits cover copy renames without eating camera
/// counters like `img_0001`.
static RENAME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[_\s-]copy|\s*\(\d+\)|_\d{1,2})+$").expect("rename suffix pattern")
});

/// Strip common rename suffixes from a lowercased file stem.
pub(crate) fn normalize_stem(stem: &str) -> String {
    let lowered = stem.trim().to_lowercase();
    RENAME_SUFFIX.replace(&lowered, "").trim().to_string()
}

/// The broken reference a strategy is trying to repair.
#[derive(Debug, Clone)]
pub struct RecoveryTarget {
    /// URI as stored by the caller
    pub original_uri: String,
    /// Path the URI resolved to
    pub original_path: PathBuf,
    /// Base name including extension
    pub base_name: String,
    /// Base name without extension
    pub stem: String,
    /// Lowercased extension without the dot; empty if absent
    pub extension: String,
    /// The full reference, for metadata-based strategies
    pub reference: MediaReference,
}

impl RecoveryTarget {
    /// Build a target from a reference whose URI parses to a path.
    ///
    /// Returns `None` for malformed URIs, which never enter recovery.
    pub fn from_reference(reference: &MediaReference) -> Option<Self> {
        let original_path = uri_to_path(&reference.uri)?;
        let base_name = original_path.file_name()?.to_str()?.to_string();
        let stem = original_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&base_name)
            .to_string();
        let extension = original_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Some(Self {
            original_uri: reference.uri.clone(),
            original_path,
            base_name,
            stem,
            extension,
            reference: reference.clone(),
        })
    }
}

/// A substitute URI proposed by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryCandidate {
    /// URI of the substitute file
    pub uri: String,
    /// Strategy-specific details for the validation result
    pub metadata: HashMap<String, String>,
}

impl RecoveryCandidate {
    /// Create a candidate with the given details.
    pub fn new(uri: impl Into<String>, metadata: HashMap<String, String>) -> Self {
        Self {
            uri: uri.into(),
            metadata,
        }
    }
}

/// One step of the ordered recovery pipeline.
///
/// Each strategy either proposes a substitute URI or yields `None`; the
/// engine iterates the ordered list and short-circuits on the first
/// proposal. Strategy errors are logged and treated as `None` so one
/// failing step never aborts the pipeline.
#[async_trait::async_trait]
pub trait RecoveryStrategy: Send + Sync {
    /// Which result method a success is reported as.
    fn method(&self) -> RecoveryMethod;

    /// Whether configuration allows this strategy to run.
    fn is_enabled(&self, _config: &ValidationConfig) -> bool {
        true
    }

    /// Try to find a substitute for the target.
    async fn attempt(
        &self,
        target: &RecoveryTarget,
        config: &ValidationConfig,
    ) -> VasariResult<Option<RecoveryCandidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_copy_suffixes() {
        assert_eq!(normalize_stem("img_0001_copy"), "img_0001");
        assert_eq!(normalize_stem("IMG_0001 Copy"), "img_0001");
        assert_eq!(normalize_stem("holiday (1)"), "holiday");
        assert_eq!(normalize_stem("photo_2"), "photo");
        assert_eq!(normalize_stem("clip_1_copy"), "clip");
    }

    #[test]
    fn keeps_camera_counters() {
        assert_eq!(normalize_stem("img_0001"), "img_0001");
        assert_eq!(normalize_stem("dsc_12345"), "dsc_12345");
    }
}
