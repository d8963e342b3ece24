//! Platform default media directories.

use vasari_core::MediaDirectoryDescriptor;

/// Discover the platform's default media directories.
///
/// Returns a descriptor for each standard media folder the platform
/// reports (pictures, videos). On headless systems this can be empty;
/// embedding applications may seed the registry with their own defaults
/// instead.
pub fn platform_default_descriptors() -> Vec<MediaDirectoryDescriptor> {
    let mut descriptors = Vec::new();

    if let Some(pictures) = dirs::picture_dir() {
        descriptors.push(MediaDirectoryDescriptor::platform_default(
            "Pictures", pictures,
        ));
    }
    if let Some(videos) = dirs::video_dir() {
        descriptors.push(MediaDirectoryDescriptor::platform_default("Videos", videos));
    }

    tracing::debug!(
        discovered = descriptors.len(),
        "Discovered platform default media directories"
    );
    descriptors
}
