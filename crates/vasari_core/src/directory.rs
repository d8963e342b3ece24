//! Media directory descriptor types.

use std::path::PathBuf;
use uuid::Uuid;

/// An on-device folder eligible as a media source.
///
/// Created at first run from platform defaults, persisted, and mutated by
/// enable/disable/add/remove. Default entries cannot be removed, only
/// disabled.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaDirectoryDescriptor {
    /// Stable identifier for registry mutations
    pub id: Uuid,
    /// Human-readable name shown in the app
    pub display_name: String,
    /// Absolute path of the directory
    pub path: PathBuf,
    /// Whether this entry came from platform defaults
    pub is_default: bool,
    /// Whether this entry currently contributes media
    pub is_enabled: bool,
}

impl MediaDirectoryDescriptor {
    /// A platform-default descriptor, enabled from the start.
    pub fn platform_default(display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            path: path.into(),
            is_default: true,
            is_enabled: true,
        }
    }

    /// A user-added descriptor, enabled from the start.
    pub fn custom(display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            path: path.into(),
            is_default: false,
            is_enabled: true,
        }
    }
}
