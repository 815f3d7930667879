//! Validation error types for the ingest pipeline.

/// Kinds of validation errors.
///
/// All of these are caller-fixable: the payload itself is malformed,
/// empty, or over a configured limit. Nothing here warrants a retry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Neither or both payload sources were supplied
    #[display("Expected exactly one of payload bytes or payload path")]
    PayloadSource,
    /// Payload is empty
    #[display("Payload is empty")]
    EmptyPayload,
    /// Payload exceeds the configured size limit
    #[display("Payload size {} bytes exceeds limit {}", actual, limit)]
    PayloadTooLarge {
        /// Actual payload size in bytes
        actual: u64,
        /// Configured maximum in bytes
        limit: u64,
    },
    /// Link payload exceeds the configured URL length limit
    #[display("URL length {} exceeds limit {}", actual, limit)]
    UrlTooLong {
        /// Actual URL length in bytes
        actual: u64,
        /// Configured maximum in bytes
        limit: u64,
    },
    /// Short code is empty after canonicalization
    #[display("Code cannot be empty")]
    EmptyCode,
    /// Short code contains a character outside the code alphabet
    #[display("Invalid character in code: {}", _0)]
    InvalidCodeChar(char),
    /// Configuration could not be read or parsed
    #[display("Invalid configuration: {}", _0)]
    Config(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use hoard_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::EmptyPayload);
/// assert!(format!("{}", err).contains("empty"));
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
