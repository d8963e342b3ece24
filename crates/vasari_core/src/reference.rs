//! Media reference types.

use chrono::{DateTime, Utc};

/// Device-side metadata captured when media was first referenced.
///
/// Note: Does not derive `Eq` or `Hash` due to floating-point fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceMetadata {
    /// When the media was created on the device
    pub creation_time: DateTime<Utc>,
    /// Latitude of the capture location (if recorded)
    pub latitude: Option<f64>,
    /// Longitude of the capture location (if recorded)
    pub longitude: Option<f64>,
    /// EXIF-style orientation value
    pub orientation: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Duration in seconds (video only)
    pub duration_seconds: Option<f64>,
    /// Bitrate in bits per second (video only)
    pub bitrate: Option<u64>,
    /// Audio sampling rate in Hz (video only)
    pub sampling_rate: Option<u32>,
    /// Frame rate (video only)
    pub frame_rate: Option<f32>,
}

impl DeviceMetadata {
    /// Create metadata with only the creation time set.
    ///
    /// Remaining fields default to zero/absent; callers fill in what the
    /// device reported.
    pub fn new(creation_time: DateTime<Utc>) -> Self {
        Self {
            creation_time,
            latitude: None,
            longitude: None,
            orientation: 0,
            width: 0,
            height: 0,
            file_size_bytes: 0,
            duration_seconds: None,
            bitrate: None,
            sampling_rate: None,
            frame_rate: None,
        }
    }
}

/// Reference to on-device media, as stored in a draft or post.
///
/// Immutable value owned by whatever document holds it. The URI string is
/// the only identity; when the underlying file moves, the engine produces a
/// substitute URI rather than mutating the reference in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaReference {
    /// URI of the referenced file (`file://` or absolute path)
    pub uri: String,
    /// MIME type recorded at reference time (e.g. "image/jpeg")
    pub mime_type: String,
    /// Device metadata captured at reference time
    pub metadata: DeviceMetadata,
}

impl MediaReference {
    /// Create a reference from its parts.
    pub fn new(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        metadata: DeviceMetadata,
    ) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            metadata,
        }
    }
}
