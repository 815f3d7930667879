//! Media inspection error types.

/// Kinds of media errors.
///
/// The three-way split lets callers tell bad input (corrupt or
/// unsupported content) apart from server misconfiguration (a decoder
/// that was not compiled in).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Bytes could not be decoded as any known image
    #[display("Invalid or corrupted image data: {}", _0)]
    CorruptData(String),
    /// Image decoded but its format is outside the supported set
    #[display("Image format {} is not supported", _0)]
    UnsupportedFormat(String),
    /// A decoder for an in-set format is unavailable in this build
    #[display("Image decoder unavailable: {}", _0)]
    DecoderUnavailable(String),
}

/// Media error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
