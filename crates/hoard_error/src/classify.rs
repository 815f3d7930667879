//! Classification error types.

/// Kinds of classification errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ClassifyErrorKind {
    /// No classification strategy matched the content
    #[display("Unable to classify content: {}", _0)]
    Unclassifiable(String),
}

/// Classification error with location tracking.
///
/// Raised when neither hints, magic bytes, filename, nor the link
/// detector can place content into the closed format set. Usually
/// caller-fixable by supplying a format hint.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Classify Error: {} at line {} in {}", kind, line, file)]
pub struct ClassifyError {
    /// The kind of error that occurred
    pub kind: ClassifyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ClassifyError {
    /// Create a new classification error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ClassifyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
