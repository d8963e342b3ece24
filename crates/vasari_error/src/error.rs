//! Top-level error wrapper types.

use crate::{ConfigError, IndexError, RegistryError, ValidationError};

/// Foundation error enum aggregating the per-domain error types.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariError};
///
/// let config_err = ConfigError::new("missing profile");
/// let err: VasariError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VasariErrorKind {
    /// Media reference validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Directory registry error
    #[from(RegistryError)]
    Registry(RegistryError),
    /// Media index error
    #[from(IndexError)]
    Index(IndexError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Vasari error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vasari_error::{RegistryError, RegistryErrorKind, VasariResult};
///
/// fn mutate() -> VasariResult<()> {
///     Err(RegistryError::new(RegistryErrorKind::DirectoryNotFound(
///         "/nowhere".to_string(),
///     )))?
/// }
///
/// match mutate() {
///     Ok(_) => println!("ok"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vasari Error: {}", _0)]
pub struct VasariError(Box<VasariErrorKind>);

impl VasariError {
    /// Create a new error from a kind.
    pub fn new(kind: VasariErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VasariErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VasariErrorKind
impl<T> From<T> for VasariError
where
    T: Into<VasariErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vasari operations.
pub type VasariResult<T> = std::result::Result<T, VasariError>;
