//! Validation error types.

/// Kinds of media reference validation failures.
///
/// The first six kinds describe basic-validation failures and are eligible
/// for recovery; the last two describe how a recovery pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// The stored URI is malformed and can never resolve
    #[display("Invalid URI format: {}", _0)]
    InvalidUriFormat(String),
    /// No file exists at the referenced path
    #[display("File not found: {}", _0)]
    FileNotFound(String),
    /// The referenced file exists but is zero bytes
    #[display("File is empty: {}", _0)]
    FileEmpty(String),
    /// The referenced file is not a supported media type
    #[display("Unsupported media type: {}", _0)]
    UnsupportedMediaType(String),
    /// The referenced file exists but cannot be read
    #[display("Corrupted file: {}", _0)]
    CorruptedFile(String),
    /// The referenced path is outside every enabled media directory
    #[display("Path not allowed: {}", _0)]
    PathNotAllowed(String),
    /// Recovery exceeded its configured time budget
    #[display("Recovery timed out: {}", _0)]
    RecoveryTimeout(String),
    /// Every recovery strategy was attempted without success
    #[display("Recovery exhausted: {}", _0)]
    RecoveryExhausted(String),
}

impl ValidationErrorKind {
    /// Whether a failure of this kind may be repaired by the recovery pipeline.
    ///
    /// Malformed URIs are never retried, and the recovery-terminal kinds
    /// describe an already-finished pipeline.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ValidationErrorKind::FileNotFound(_)
                | ValidationErrorKind::FileEmpty(_)
                | ValidationErrorKind::UnsupportedMediaType(_)
                | ValidationErrorKind::CorruptedFile(_)
                | ValidationErrorKind::PathNotAllowed(_)
        )
    }
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::FileNotFound(
///     "/media/img_0001.jpg".to_string(),
/// ));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
