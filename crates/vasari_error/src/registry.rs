//! Directory registry error types.

/// Kinds of directory registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RegistryErrorKind {
    /// The directory does not exist on disk, or no descriptor has that id
    #[display("Directory not found: {}", _0)]
    DirectoryNotFound(String),
    /// A descriptor with the same path is already registered
    #[display("Duplicate directory: {}", _0)]
    DuplicateDirectory(String),
    /// Platform-default descriptors can be disabled but never removed
    #[display("Cannot remove default directory: {}", _0)]
    CannotRemoveDefault(String),
    /// The backing store failed to load or save registry state
    #[display("Registry persistence failed: {}", _0)]
    Persistence(String),
}

/// Registry error with location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{RegistryError, RegistryErrorKind};
///
/// let err = RegistryError::new(RegistryErrorKind::DuplicateDirectory(
///     "/sdcard/DCIM".to_string(),
/// ));
/// assert!(format!("{}", err).contains("Duplicate"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    /// The kind of error that occurred
    pub kind: RegistryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RegistryError {
    /// Create a new registry error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
