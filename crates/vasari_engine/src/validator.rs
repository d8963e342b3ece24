//! Basic reference validation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use vasari_core::{MediaKind, MediaReference, ValidationConfig};
use vasari_error::{ValidationError, ValidationErrorKind};
use vasari_registry::DirectoryRegistry;

/// Convert a stored URI into a filesystem path.
///
/// `file://` URIs and bare absolute paths are accepted; anything else is
/// malformed and never retried.
pub(crate) fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let raw = uri.strip_prefix("file://").unwrap_or(uri);
    if raw.is_empty() {
        return None;
    }
    let path = Path::new(raw);
    if !path.is_absolute() {
        return None;
    }
    Some(path.to_path_buf())
}

/// Capability seam for judging whether a file can stand in for a reference.
///
/// Two variants exist: [`ExistenceValidator`] trusts a file that still
/// resolves and reads, and
/// [`SimilarityValidator`](crate::SimilarityValidator) judges a substitute
/// by birthprint similarity. The engine composes both rather than
/// hard-coding either.
#[async_trait::async_trait]
pub trait Validator: Send + Sync {
    /// Judge `candidate` as a stand-in for the referenced media.
    async fn validate(
        &self,
        reference: &MediaReference,
        candidate: &Path,
        config: &ValidationConfig,
    ) -> Result<(), ValidationError>;
}

/// Validates that a path resolves to a real, readable, supported file.
///
/// Checks run cheapest-first: registry gating, a filesystem stat,
/// emptiness, kind detection by extension (falling back to the recorded
/// MIME type), and finally a short header read to catch files that stat
/// but cannot be opened.
pub struct ExistenceValidator {
    registry: Arc<DirectoryRegistry>,
}

impl ExistenceValidator {
    /// Create an existence validator gated by the given registry.
    pub fn new(registry: Arc<DirectoryRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve and fully check the reference's own URI.
    ///
    /// Returns the resolved path so the recovery pipeline can reuse it.
    pub(crate) async fn check_reference(
        &self,
        reference: &MediaReference,
    ) -> Result<PathBuf, ValidationError> {
        let path = uri_to_path(&reference.uri).ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::InvalidUriFormat(reference.uri.clone()))
        })?;
        self.check_path(&path, &reference.mime_type).await?;
        Ok(path)
    }

    async fn check_path(&self, path: &Path, mime_type: &str) -> Result<(), ValidationError> {
        let display = path.display().to_string();

        if !self.registry.is_path_allowed(path) {
            return Err(ValidationError::new(ValidationErrorKind::PathNotAllowed(
                display,
            )));
        }

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ValidationError::new(ValidationErrorKind::FileNotFound(
                    display,
                )));
            }
            Err(e) => {
                return Err(ValidationError::new(ValidationErrorKind::CorruptedFile(
                    format!("{}: {}", display, e),
                )));
            }
        };

        if !metadata.is_file() {
            return Err(ValidationError::new(ValidationErrorKind::FileNotFound(
                display,
            )));
        }
        if metadata.len() == 0 {
            return Err(ValidationError::new(ValidationErrorKind::FileEmpty(display)));
        }

        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(MediaKind::from_extension);
        if by_extension.or_else(|| MediaKind::from_mime(mime_type)).is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::UnsupportedMediaType(display),
            ));
        }

        // A stat can succeed on a file the store can no longer hand out;
        // reading the first bytes catches those.
        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            ValidationError::new(ValidationErrorKind::CorruptedFile(format!(
                "{}: {}",
                display, e
            )))
        })?;
        let mut header = [0u8; 16];
        file.read(&mut header).await.map_err(|e| {
            ValidationError::new(ValidationErrorKind::CorruptedFile(format!(
                "{}: {}",
                display, e
            )))
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Validator for ExistenceValidator {
    async fn validate(
        &self,
        reference: &MediaReference,
        candidate: &Path,
        _config: &ValidationConfig,
    ) -> Result<(), ValidationError> {
        self.check_path(candidate, &reference.mime_type).await
    }
}
