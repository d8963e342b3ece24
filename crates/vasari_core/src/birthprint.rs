//! Birthprint types for similarity-based recovery.

use chrono::{DateTime, Utc};

/// Lightweight, non-cryptographic fingerprint of a media file.
///
/// A birthprint captures the properties a file keeps through renames and
/// moves: creation time, byte size, and the name it carried when first
/// referenced. It is used only for similarity comparison during recovery,
/// never as an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Birthprint {
    /// When the file was created on the device
    pub creation_time: DateTime<Utc>,
    /// File size in bytes
    pub file_size: u64,
    /// Base name the file carried when first referenced
    pub original_filename: String,
}

impl Birthprint {
    /// Create a birthprint from its parts.
    pub fn new(
        creation_time: DateTime<Utc>,
        file_size: u64,
        original_filename: impl Into<String>,
    ) -> Self {
        Self {
            creation_time,
            file_size,
            original_filename: original_filename.into(),
        }
    }
}
