//! Row structs mapping between the schema and the domain model.

use diesel::prelude::*;

/// Base row shared by every item kind.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::items)]
pub struct ItemRow {
    /// Full 24-symbol content hash, primary key
    pub hash_full: String,
    /// Assigned short code, unique
    pub code: String,
    /// Kind discriminator selecting the subtype table
    pub kind: String,
    /// Payload size in bytes
    pub size_b: i64,
    /// Owning user id
    pub uid: i64,
    /// Visibility discriminator
    pub perm: String,
    /// Ingest time, unix seconds
    pub upload_at: i64,
    /// Original creation time if known
    pub origin_at: Option<i64>,
}

/// Subtype row for text items.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::text_items)]
pub struct TextItemRow {
    /// FK to the base row
    pub hash_full: String,
    /// Text format discriminator
    pub format: String,
}

/// Subtype row for picture items.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::pic_items)]
pub struct PicItemRow {
    /// FK to the base row
    pub hash_full: String,
    /// Image format discriminator
    pub format: String,
    /// Pixel width
    pub width: i64,
    /// Pixel height
    pub height: i64,
}

/// Subtype row for link items.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::link_items)]
pub struct LinkItemRow {
    /// FK to the base row
    pub hash_full: String,
    /// Target URL
    pub url: String,
}
