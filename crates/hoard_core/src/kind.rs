//! Closed discriminator enums for items and write plans.

use serde::{Deserialize, Serialize};

/// Content category discriminator for item subtypes.
///
/// Stored in the database as the short string form.
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
pub enum ItemKind {
    /// Text content (plain text, markdown, data formats)
    #[display("txt")]
    #[serde(rename = "txt")]
    Text,
    /// Shortened/bookmarked URL
    #[display("url")]
    #[serde(rename = "url")]
    Link,
    /// Raster image content
    #[display("pic")]
    #[serde(rename = "pic")]
    Picture,
}

impl ItemKind {
    /// String form used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "txt",
            ItemKind::Link => "url",
            ItemKind::Picture => "pic",
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ItemKind::Text),
            "url" => Ok(ItemKind::Link),
            "pic" => Ok(ItemKind::Picture),
            _ => Err(format!("Unknown item kind: {}", s)),
        }
    }
}

/// Access level for items.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum Visibility {
    /// Reachable by anyone with the code, not listed
    #[display("unl")]
    #[serde(rename = "unl")]
    Unlisted,
    /// Owner only
    #[display("prv")]
    #[serde(rename = "prv")]
    Private,
    /// Public
    #[default]
    #[display("pub")]
    #[serde(rename = "pub")]
    Public,
}

impl Visibility {
    /// String form used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Unlisted => "unl",
            Visibility::Private => "prv",
            Visibility::Public => "pub",
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unl" => Ok(Visibility::Unlisted),
            "prv" => Ok(Visibility::Private),
            "pub" => Ok(Visibility::Public),
            _ => Err(format!("Unknown visibility: {}", s)),
        }
    }
}

/// Payload source indicator for a [`crate::WritePlan`].
///
/// Tells downstream code whether to read from bytes in memory or from
/// a file path on disk. Transient; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PayloadKind {
    /// Payload carried as in-memory bytes
    #[display("byte")]
    Bytes,
    /// Payload staged at a filesystem path
    #[display("file")]
    File,
}
