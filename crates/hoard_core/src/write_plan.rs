//! WritePlan: the handoff DTO between ingest and repository.

use crate::{ContentFormat, ItemKind, PayloadKind};
use std::path::PathBuf;

/// Validated, immutable description of what to persist.
///
/// Built once by the ingest service and consumed by the repository and
/// storage backend. Carries everything needed to persist an item with
/// no further framework dependencies. Fields are fixed at construction;
/// nothing mutates a plan after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePlan {
    /// Full 24-symbol content hash
    pub hash_full: String,
    /// Minimum length for the assigned short code
    pub code_min_len: usize,
    /// Whether payload travels as bytes or a staged file
    pub payload_kind: PayloadKind,
    /// Kind of the item to create
    pub kind: ItemKind,
    /// Payload size in bytes
    pub size_b: i64,
    /// Ingest time, unix seconds
    pub upload_at: i64,
    /// Content format; `None` for links
    pub format: Option<ContentFormat>,
    /// Original creation time if known, unix seconds
    pub origin_at: Option<i64>,
    /// In-memory payload bytes
    pub payload_bytes: Option<Vec<u8>>,
    /// Staged payload path
    pub payload_path: Option<PathBuf>,
    /// Pixel width, pictures only
    pub width: Option<i64>,
    /// Pixel height, pictures only
    pub height: Option<i64>,
    /// Target URL, links only
    pub link_url: Option<String>,
}
