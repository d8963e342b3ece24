//! Indexed asset types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vasari_core::MediaKind;

/// Descriptor of one currently indexed media asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Stable identifier within the index (the path string here)
    pub id: String,
    /// Absolute path of the file
    pub path: PathBuf,
    /// Base name including extension
    pub file_name: String,
    /// Detected media kind
    pub kind: MediaKind,
    /// File size in bytes
    pub file_size: u64,
    /// Creation time reported by the filesystem
    pub creation_time: DateTime<Utc>,
    /// Last modification time reported by the filesystem
    pub modified_time: DateTime<Utc>,
}

/// Parameters for listing index candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Restrict to these kinds; empty means all kinds
    #[serde(default)]
    pub kinds: Vec<MediaKind>,
    /// Case-insensitive substring the base name must contain
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Cap on the number of returned descriptors
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Match every indexed asset.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict the listing to one media kind.
    pub fn for_kind(kind: MediaKind) -> Self {
        Self {
            kinds: vec![kind],
            ..Self::default()
        }
    }

    /// Whether an asset satisfies these parameters.
    pub fn matches(&self, asset: &AssetDescriptor) -> bool {
        if !self.kinds.is_empty() && !self.kinds.contains(&asset.kind) {
            return false;
        }
        if let Some(fragment) = &self.name_contains {
            let name = asset.file_name.to_lowercase();
            if !name.contains(&fragment.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Render asset descriptors as plain data records.
///
/// The surrounding application consumes these maps directly (drafts,
/// pickers, AI context); they carry no index-internal state.
pub fn to_reference_maps(assets: &[AssetDescriptor]) -> Vec<serde_json::Value> {
    assets
        .iter()
        .map(|asset| {
            serde_json::json!({
                "id": asset.id,
                "uri": asset.path.display().to_string(),
                "file_name": asset.file_name,
                "kind": asset.kind.as_str(),
                "file_size": asset.file_size,
                "creation_time": asset.creation_time.to_rfc3339(),
                "modified_time": asset.modified_time.to_rfc3339(),
            })
        })
        .collect()
}
