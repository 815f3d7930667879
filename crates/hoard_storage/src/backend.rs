//! Storage backend trait definition.

use hoard_core::ContentFormat;
use hoard_error::HoardResult;
use std::path::Path;
use tokio::io::AsyncRead;

/// Readable payload handle returned by [`StorageBackend::open`].
pub type PayloadReader = Box<dyn AsyncRead + Send + Unpin>;

/// Trait for pluggable payload storage backends.
///
/// Payloads are keyed by `(code, format)`; the format determines the
/// stored file extension. Alternative backends (object storage, the
/// in-memory test double) substitute here without touching the ingest
/// service or repository.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write a payload.
    ///
    /// Exactly one of `source_bytes` or `source_path` must be given;
    /// both or neither is an error.
    async fn put(
        &self,
        code: &str,
        format: ContentFormat,
        source_bytes: Option<&[u8]>,
        source_path: Option<&Path>,
    ) -> HoardResult<()>;

    /// Open a payload for reading.
    ///
    /// # Errors
    ///
    /// Fails with a distinct `PayloadMissing` error when no payload
    /// exists for the key; the caller decides whether that is a plain
    /// miss or a repository/storage inconsistency.
    async fn open(&self, code: &str, format: ContentFormat) -> HoardResult<PayloadReader>;

    /// Remove a payload. Idempotent; deleting an absent payload is not
    /// an error.
    async fn delete(&self, code: &str, format: ContentFormat) -> HoardResult<()>;
}
