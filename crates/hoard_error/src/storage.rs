//! Storage backend error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write payload
    #[display("Failed to write payload: {}", _0)]
    Write(String),
    /// Failed to read payload
    #[display("Failed to read payload: {}", _0)]
    Read(String),
    /// Payload expected on disk but missing.
    ///
    /// This is the storage-inconsistency signal: a repository row
    /// exists but its payload does not. It is surfaced distinctly and
    /// never silently repaired.
    #[display("Payload missing from storage: {}", _0)]
    PayloadMissing(String),
    /// Exactly one of source bytes or source path required
    #[display("Exactly one of source bytes or source path required")]
    SourceArgs,
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use hoard_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::PayloadMissing("AB2K.png".into()));
/// assert!(format!("{}", err).contains("missing"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
