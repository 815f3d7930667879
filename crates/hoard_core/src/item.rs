//! Domain items: the closed tagged union of stored content.
//!
//! One variant per [`ItemKind`]. Items are assembled by the repository
//! from base + subtype rows and never mutated after creation.

use crate::{ContentFormat, ItemKind, Visibility};

/// Text content item.
///
/// Covers plain text, markdown, and data formats (JSON, YAML). The
/// format field determines rendering behavior downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// Shortest unique prefix of `hash_full`
    pub code: String,
    /// Full 24-symbol content hash
    pub hash_full: String,
    /// Payload size in bytes
    pub size_b: i64,
    /// Owning user id (0 for anonymous)
    pub uid: i64,
    /// Access level
    pub perm: Visibility,
    /// Ingest time, unix seconds
    pub upload_at: i64,
    /// Original creation time if known, unix seconds
    pub origin_at: Option<i64>,
    /// Text format
    pub format: ContentFormat,
}

/// Image content item. Raster formats only; dimensions required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicItem {
    /// Shortest unique prefix of `hash_full`
    pub code: String,
    /// Full 24-symbol content hash
    pub hash_full: String,
    /// Payload size in bytes
    pub size_b: i64,
    /// Owning user id (0 for anonymous)
    pub uid: i64,
    /// Access level
    pub perm: Visibility,
    /// Ingest time, unix seconds
    pub upload_at: i64,
    /// Original creation time if known, unix seconds
    pub origin_at: Option<i64>,
    /// Image format
    pub format: ContentFormat,
    /// Pixel width
    pub width: i64,
    /// Pixel height
    pub height: i64,
}

/// URL shortener/bookmarking item. Redirects to the target on access;
/// no payload is written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    /// Shortest unique prefix of `hash_full`
    pub code: String,
    /// Full 24-symbol content hash
    pub hash_full: String,
    /// URL size in bytes
    pub size_b: i64,
    /// Owning user id (0 for anonymous)
    pub uid: i64,
    /// Access level
    pub perm: Visibility,
    /// Ingest time, unix seconds
    pub upload_at: i64,
    /// Original creation time if known, unix seconds
    pub origin_at: Option<i64>,
    /// Target URL
    pub url: String,
}

/// A stored content item.
///
/// Closed tagged union keyed by kind; row-to-domain mapping is a total
/// switch over this set, and an unrecognized stored tag is a
/// data-corruption error, never silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Item {
    /// Text content
    Text(TextItem),
    /// Image content
    Pic(PicItem),
    /// Bookmarked URL
    Link(LinkItem),
}

impl Item {
    /// The assigned short code.
    pub fn code(&self) -> &str {
        match self {
            Item::Text(item) => &item.code,
            Item::Pic(item) => &item.code,
            Item::Link(item) => &item.code,
        }
    }

    /// The full content hash.
    pub fn hash_full(&self) -> &str {
        match self {
            Item::Text(item) => &item.hash_full,
            Item::Pic(item) => &item.hash_full,
            Item::Link(item) => &item.hash_full,
        }
    }

    /// The kind discriminator for this variant.
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Text(_) => ItemKind::Text,
            Item::Pic(_) => ItemKind::Picture,
            Item::Link(_) => ItemKind::Link,
        }
    }

    /// Payload size in bytes.
    pub fn size_b(&self) -> i64 {
        match self {
            Item::Text(item) => item.size_b,
            Item::Pic(item) => item.size_b,
            Item::Link(item) => item.size_b,
        }
    }

    /// Owning user id.
    pub fn uid(&self) -> i64 {
        match self {
            Item::Text(item) => item.uid,
            Item::Pic(item) => item.uid,
            Item::Link(item) => item.uid,
        }
    }

    /// Access level.
    pub fn perm(&self) -> Visibility {
        match self {
            Item::Text(item) => item.perm,
            Item::Pic(item) => item.perm,
            Item::Link(item) => item.perm,
        }
    }

    /// Ingest time, unix seconds.
    pub fn upload_at(&self) -> i64 {
        match self {
            Item::Text(item) => item.upload_at,
            Item::Pic(item) => item.upload_at,
            Item::Link(item) => item.upload_at,
        }
    }

    /// Content format; `None` for links, which carry a URL instead.
    pub fn format(&self) -> Option<ContentFormat> {
        match self {
            Item::Text(item) => Some(item.format),
            Item::Pic(item) => Some(item.format),
            Item::Link(_) => None,
        }
    }
}
