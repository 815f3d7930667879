//! Content classification from bytes and hints.
//!
//! Strategies run in strict priority order and short-circuit on the
//! first success: requested format, declared MIME, magic bytes,
//! filename extension, the link detector, and finally a plain-text
//! fallback for decodable UTF-8. Adding a strategy is a new function
//! plus a line in the cascade.

use hoard_core::{ContentFormat, ItemKind};
use hoard_error::{ClassifyError, ClassifyErrorKind};
use regex::Regex;
use std::sync::LazyLock;

/// Result of content classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Stored payload with a format from the closed set
    Payload(ContentFormat),
    /// URL-shaped content to store as a link item
    Link(String),
}

impl Classification {
    /// The item kind this classification maps to. Total over the
    /// closed format set.
    pub fn kind(&self) -> ItemKind {
        match self {
            Classification::Payload(format) => format.kind(),
            Classification::Link(_) => ItemKind::Link,
        }
    }

    /// Content format; `None` for links.
    pub fn format(&self) -> Option<ContentFormat> {
        match self {
            Classification::Payload(format) => Some(*format),
            Classification::Link(_) => None,
        }
    }
}

/// Classify content using bytes and optional hints.
///
/// # Errors
///
/// Fails when no strategy matches; usually fixable by the caller
/// supplying a filename, MIME type, or explicit format.
pub fn classify(
    data: &[u8],
    filename: Option<&str>,
    declared_mime: Option<&str>,
    requested_format: Option<ContentFormat>,
) -> Result<Classification, ClassifyError> {
    // Priority cascade; first hit wins.
    from_requested_format(requested_format)
        .or_else(|| from_declared_mime(declared_mime))
        .or_else(|| from_magic_bytes(data))
        .or_else(|| from_filename(filename))
        .or_else(|| from_link_shape(data))
        .or_else(|| from_utf8_text(data))
        .ok_or_else(|| {
            ClassifyError::new(ClassifyErrorKind::Unclassifiable(
                "no hint, signature, extension, URL shape, or text encoding matched".to_string(),
            ))
        })
}

/// Strategy 1: an explicitly requested format is trusted outright.
fn from_requested_format(requested: Option<ContentFormat>) -> Option<Classification> {
    requested.map(Classification::Payload)
}

/// Strategy 2: declared MIME type, exact or alias.
fn from_declared_mime(mime: Option<&str>) -> Option<Classification> {
    ContentFormat::from_mime(mime?).map(Classification::Payload)
}

/// Strategy 3: fixed magic byte signatures, in order.
fn from_magic_bytes(data: &[u8]) -> Option<Classification> {
    detect_png_magic(data)
        .or_else(|| detect_jpeg_magic(data))
        .or_else(|| detect_webp_magic(data))
        .map(Classification::Payload)
}

/// The 8-byte PNG signature.
fn detect_png_magic(data: &[u8]) -> Option<ContentFormat> {
    data.starts_with(b"\x89PNG\r\n\x1a\n")
        .then_some(ContentFormat::Png)
}

/// JPEG SOI + marker: JFIF (E0), EXIF (E1), or raw quantization (DB).
fn detect_jpeg_magic(data: &[u8]) -> Option<ContentFormat> {
    const MARKERS: [&[u8; 4]; 3] = [b"\xff\xd8\xff\xe0", b"\xff\xd8\xff\xe1", b"\xff\xd8\xff\xdb"];
    MARKERS
        .iter()
        .any(|magic| data.starts_with(*magic))
        .then_some(ContentFormat::Jpeg)
}

/// 12-byte RIFF container header with WEBP tag; the 4-byte size field
/// in between is ignored.
fn detect_webp_magic(data: &[u8]) -> Option<ContentFormat> {
    (data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP")
        .then_some(ContentFormat::Webp)
}

/// Strategy 4: last filename extension, case-insensitive.
///
/// Extensionless names and bare dotfiles (".bashrc", ".md") don't
/// classify.
fn from_filename(filename: Option<&str>) -> Option<Classification> {
    let filename = filename?;
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    ContentFormat::from_extension(ext).map(Classification::Payload)
}

/// URL shape after the scheme: no whitespace, no unsafe bracket or
/// quote characters.
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^https?://[^\s<>\[\]{}|\\^"'`]+$"#).expect("URL shape pattern is valid")
});

/// Strategy 5: link detection over the raw payload.
///
/// Accepts content that is one single http(s) URL: UTF-8 decodable,
/// exactly one `://`, no embedded whitespace, and a TLD-like dot in
/// the authority. Multiple URLs disqualify.
fn from_link_shape(data: &[u8]) -> Option<Classification> {
    let url = std::str::from_utf8(data).ok()?.trim();
    if url.matches("://").count() != 1 || !URL_SHAPE.is_match(url) {
        return None;
    }
    let (_, rest) = url.split_once("://")?;
    let host = rest.split(['/', '?', '#']).next()?;
    let authority = host.rsplit('@').next()?.split(':').next()?;
    let tld_like = authority.split('.').count() >= 2
        && authority.split('.').all(|segment| !segment.is_empty());
    tld_like.then(|| Classification::Link(url.to_string()))
}

/// Strategy 6: any remaining UTF-8 decodable content is plain text.
///
/// Last resort, so a hintless text paste still ingests; only binary
/// data with no recognizable signature ends up unclassifiable.
fn from_utf8_text(data: &[u8]) -> Option<Classification> {
    std::str::from_utf8(data)
        .is_ok()
        .then_some(Classification::Payload(ContentFormat::Plaintext))
}
