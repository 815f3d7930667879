//! Content formats and their fixed lookup tables.
//!
//! Formats are the closed set of supported encodings. The kind, MIME,
//! and extension mappings are total over the set; lookups from loose
//! strings (declared MIME types, filename extensions) are partial and
//! return `Option`.

use crate::ItemKind;
use serde::{Deserialize, Serialize};

/// Canonical content formats for supported payload types.
///
/// The string form doubles as the storage-path extension for most
/// formats; [`ContentFormat::extension`] covers the exceptions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ContentFormat {
    /// Plain text
    #[display("txt")]
    #[serde(rename = "txt")]
    Plaintext,
    /// Markdown
    #[display("md")]
    #[serde(rename = "md")]
    Markdown,
    /// JSON
    #[display("json")]
    #[serde(rename = "json")]
    Json,
    /// YAML
    #[display("yaml")]
    #[serde(rename = "yaml")]
    Yaml,
    /// PNG raster image
    #[display("png")]
    #[serde(rename = "png")]
    Png,
    /// JPEG raster image
    #[display("jpg")]
    #[serde(rename = "jpg")]
    Jpeg,
    /// WebP raster image
    #[display("webp")]
    #[serde(rename = "webp")]
    Webp,
    /// TIFF raster image (no magic detector; inspector rejects it)
    #[display("tiff")]
    #[serde(rename = "tiff")]
    Tiff,
}

impl ContentFormat {
    /// String form used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Plaintext => "txt",
            ContentFormat::Markdown => "md",
            ContentFormat::Json => "json",
            ContentFormat::Yaml => "yaml",
            ContentFormat::Png => "png",
            ContentFormat::Jpeg => "jpg",
            ContentFormat::Webp => "webp",
            ContentFormat::Tiff => "tiff",
        }
    }

    /// Item kind this format belongs to. Total over the closed set.
    pub fn kind(&self) -> ItemKind {
        match self {
            ContentFormat::Plaintext
            | ContentFormat::Markdown
            | ContentFormat::Json
            | ContentFormat::Yaml => ItemKind::Text,
            ContentFormat::Png
            | ContentFormat::Jpeg
            | ContentFormat::Webp
            | ContentFormat::Tiff => ItemKind::Picture,
        }
    }

    /// MIME type for serving the payload.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentFormat::Plaintext => "text/plain",
            ContentFormat::Markdown => "text/markdown",
            ContentFormat::Json => "application/json",
            ContentFormat::Yaml => "application/yaml",
            ContentFormat::Png => "image/png",
            ContentFormat::Jpeg => "image/jpeg",
            ContentFormat::Webp => "image/webp",
            ContentFormat::Tiff => "image/tiff",
        }
    }

    /// File extension for storage paths, without the dot.
    ///
    /// Most formats use their canonical name; TIFF keeps the DOS 8.3
    /// legacy "tif".
    pub fn extension(&self) -> &'static str {
        match self {
            ContentFormat::Tiff => "tif",
            other => other.as_str(),
        }
    }

    /// Look up a format from a declared MIME type, including aliases.
    pub fn from_mime(mime: &str) -> Option<ContentFormat> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "text/plain" => Some(ContentFormat::Plaintext),
            "text/markdown" | "text/x-markdown" => Some(ContentFormat::Markdown),
            "application/json" => Some(ContentFormat::Json),
            "application/yaml" | "application/x-yaml" | "text/yaml" | "text/x-yaml" => {
                Some(ContentFormat::Yaml)
            }
            "image/png" => Some(ContentFormat::Png),
            "image/jpeg" => Some(ContentFormat::Jpeg),
            "image/webp" => Some(ContentFormat::Webp),
            "image/tiff" => Some(ContentFormat::Tiff),
            _ => None,
        }
    }

    /// Look up a format from a filename extension (no dot), including
    /// aliases. Case-insensitive.
    pub fn from_extension(ext: &str) -> Option<ContentFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(ContentFormat::Plaintext),
            "md" | "markdown" => Some(ContentFormat::Markdown),
            "json" => Some(ContentFormat::Json),
            "yaml" | "yml" => Some(ContentFormat::Yaml),
            "png" => Some(ContentFormat::Png),
            "jpg" | "jpeg" => Some(ContentFormat::Jpeg),
            "webp" => Some(ContentFormat::Webp),
            "tif" | "tiff" => Some(ContentFormat::Tiff),
            _ => None,
        }
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ContentFormat::Plaintext),
            "md" => Ok(ContentFormat::Markdown),
            "json" => Ok(ContentFormat::Json),
            "yaml" => Ok(ContentFormat::Yaml),
            "png" => Ok(ContentFormat::Png),
            "jpg" => Ok(ContentFormat::Jpeg),
            "webp" => Ok(ContentFormat::Webp),
            "tiff" => Ok(ContentFormat::Tiff),
            _ => Err(format!("Unknown content format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kind_mapping_is_total() {
        for fmt in ContentFormat::iter() {
            // Total switch; this is just exercising every arm.
            let _ = fmt.kind();
            let _ = fmt.mime();
            assert!(!fmt.extension().is_empty());
        }
    }

    #[test]
    fn extension_override_for_tiff() {
        assert_eq!(ContentFormat::Tiff.extension(), "tif");
        assert_eq!(ContentFormat::Jpeg.extension(), "jpg");
        assert_eq!(ContentFormat::Png.extension(), "png");
    }

    #[test]
    fn mime_round_trip() {
        for fmt in ContentFormat::iter() {
            assert_eq!(ContentFormat::from_mime(fmt.mime()), Some(fmt));
        }
    }

    #[test]
    fn from_mime_aliases() {
        assert_eq!(
            ContentFormat::from_mime("text/x-yaml"),
            Some(ContentFormat::Yaml)
        );
        assert_eq!(
            ContentFormat::from_mime("TEXT/MARKDOWN"),
            Some(ContentFormat::Markdown)
        );
        assert_eq!(ContentFormat::from_mime("fake/MIME"), None);
    }

    #[test]
    fn from_extension_aliases() {
        assert_eq!(
            ContentFormat::from_extension("JPEG"),
            Some(ContentFormat::Jpeg)
        );
        assert_eq!(
            ContentFormat::from_extension("yml"),
            Some(ContentFormat::Yaml)
        );
        assert_eq!(ContentFormat::from_extension("xyz"), None);
    }

    #[test]
    fn storage_string_round_trip() {
        for fmt in ContentFormat::iter() {
            assert_eq!(fmt.as_str().parse::<ContentFormat>(), Ok(fmt));
        }
    }
}
