//! Media kind enumeration.

/// Kind of media content the engine validates.
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
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Photo content (JPEG, PNG, HEIC, etc.)
    #[display("image")]
    Image,
    /// Video content (MP4, MOV, WebM, etc.)
    #[display("video")]
    Video,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "heic", "heif", "bmp", "tif", "tiff",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "avi", "mkv", "3gp"];

impl MediaKind {
    /// Convert to string representation for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Detect the media kind from a file extension (without the dot).
    ///
    /// Returns `None` for extensions the engine does not support.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let lower = extension.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&lower.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&lower.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Detect the media kind from a MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let lower = mime.to_ascii_lowercase();
        if lower.starts_with("image/") {
            Some(MediaKind::Image)
        } else if lower.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}
