//! Repository error types.

/// Kinds of repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RepoErrorKind {
    /// Connection or pool checkout failed
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// Query execution failed
    #[display("Database query error: {}", _0)]
    Query(String),
    /// Schema migration failed
    #[display("Migration error: {}", _0)]
    Migration(String),
    /// Insert lost a race on the code unique constraint
    #[display("Code collision: {}", _0)]
    CodeCollision(String),
    /// Insert lost a race on the hash_full unique constraint
    #[display("Item already exists for hash: {}", _0)]
    DuplicateHash(String),
    /// A stored row carries a kind tag outside the closed set
    #[display("Unrecognized item kind '{}' stored for hash {}", kind, hash_full)]
    CorruptKind {
        /// The unrecognized kind discriminator
        kind: String,
        /// Hash of the corrupt base row
        hash_full: String,
    },
    /// A stored subtype row carries a format outside the closed set
    #[display("Unrecognized content format '{}' stored for hash {}", format, hash_full)]
    CorruptFormat {
        /// The unrecognized format discriminator
        format: String,
        /// Hash of the corrupt subtype row
        hash_full: String,
    },
    /// Base row exists but its subtype row is missing
    #[display("Missing {} subtype row for hash {}", kind, hash_full)]
    MissingSubtype {
        /// Kind recorded on the base row
        kind: String,
        /// Hash of the orphaned base row
        hash_full: String,
    },
    /// Item not found where one was required
    #[display("No item found for code: {}", _0)]
    NotFound(String),
}

/// Repository error with location tracking.
///
/// # Examples
///
/// ```
/// use hoard_error::{RepoError, RepoErrorKind};
///
/// let err = RepoError::new(RepoErrorKind::CodeCollision("D7GS0E63".into()));
/// assert!(format!("{}", err).contains("D7GS0E63"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repo Error: {} at line {} in {}", kind, line, file)]
pub struct RepoError {
    /// The kind of error that occurred
    pub kind: RepoErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepoError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for RepoError {
    fn from(err: diesel::result::Error) -> Self {
        RepoError::new(RepoErrorKind::Query(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for RepoError {
    fn from(err: diesel::ConnectionError) -> Self {
        RepoError::new(RepoErrorKind::Connection(err.to_string()))
    }
}
