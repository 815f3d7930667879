//! Top-level error wrapper types.

use crate::{ClassifyError, MediaError, RepoError, StorageError, ValidationError};

/// Union of the subsystem error types.
///
/// Lower-component errors propagate through the ingest service and
/// orchestrator unchanged; this enum is the single seam where a caller
/// discriminates them.
///
/// # Examples
///
/// ```
/// use hoard_error::{HoardError, ValidationError, ValidationErrorKind};
///
/// let err: HoardError = ValidationError::new(ValidationErrorKind::EmptyPayload).into();
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HoardErrorKind {
    /// Payload validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Content classification error
    #[from(ClassifyError)]
    Classify(ClassifyError),
    /// Media inspection error
    #[from(MediaError)]
    Media(MediaError),
    /// Repository error
    #[from(RepoError)]
    Repo(RepoError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Hoard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use hoard_error::{HoardResult, ClassifyError, ClassifyErrorKind};
///
/// fn might_fail() -> HoardResult<()> {
///     Err(ClassifyError::new(ClassifyErrorKind::Unclassifiable("no hints".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Hoard Error: {}", _0)]
pub struct HoardError(Box<HoardErrorKind>);

impl HoardError {
    /// Create a new error from a kind.
    pub fn new(kind: HoardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HoardErrorKind {
        &self.0
    }

    /// Consume the error and return its kind.
    pub fn into_kind(self) -> HoardErrorKind {
        *self.0
    }
}

// Generic From implementation for any type that converts to HoardErrorKind
impl<T> From<T> for HoardError
where
    T: Into<HoardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for hoard operations.
pub type HoardResult<T> = std::result::Result<T, HoardError>;
