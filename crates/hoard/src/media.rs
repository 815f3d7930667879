//! Image metadata inspection.
//!
//! Decodes only the image header, never the full pixel data, so
//! inspection stays cheap even for large payloads.

use hoard_core::ContentFormat;
use hoard_error::{MediaError, MediaErrorKind};
use image::{ImageError, ImageFormat, ImageReader};
use std::io::Cursor;

/// Metadata extracted from an image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected image format
    pub format: ContentFormat,
    /// Pixel width
    pub width: i64,
    /// Pixel height
    pub height: i64,
}

/// Inspect image bytes and return format plus pixel dimensions.
///
/// # Errors
///
/// [`MediaErrorKind::CorruptData`] when no format is recognized or the
/// header fails to decode, [`MediaErrorKind::UnsupportedFormat`] for a
/// recognized format outside the supported set, and
/// [`MediaErrorKind::DecoderUnavailable`] when the decoder for an
/// in-set format is missing from this build.
#[tracing::instrument(skip(data), fields(size_b = data.len()))]
pub fn image_info(data: &[u8]) -> Result<ImageInfo, MediaError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| MediaError::new(MediaErrorKind::CorruptData(e.to_string())))?;

    let format = match reader.format() {
        Some(ImageFormat::Png) => ContentFormat::Png,
        Some(ImageFormat::Jpeg) => ContentFormat::Jpeg,
        Some(ImageFormat::WebP) => ContentFormat::Webp,
        Some(other) => {
            return Err(MediaError::new(MediaErrorKind::UnsupportedFormat(format!(
                "{other:?}"
            ))))
        }
        None => {
            return Err(MediaError::new(MediaErrorKind::CorruptData(
                "no image signature recognized".to_string(),
            )))
        }
    };

    let (width, height) = reader.into_dimensions().map_err(|e| match e {
        ImageError::Unsupported(inner) => {
            MediaError::new(MediaErrorKind::DecoderUnavailable(inner.to_string()))
        }
        other => MediaError::new(MediaErrorKind::CorruptData(other.to_string())),
    })?;

    Ok(ImageInfo {
        format,
        width: i64::from(width),
        height: i64::from(height),
    })
}
