//! Media index error types.

/// Kinds of media index errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IndexErrorKind {
    /// A directory scan failed partway through
    #[display("Index scan failed: {}", _0)]
    Scan(String),
    /// The underlying media store is unavailable
    #[display("Index unavailable: {}", _0)]
    Unavailable(String),
}

/// Media index error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Index Error: {} at line {} in {}", kind, line, file)]
pub struct IndexError {
    /// The kind of error that occurred
    pub kind: IndexErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IndexError {
    /// Create a new index error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IndexErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
