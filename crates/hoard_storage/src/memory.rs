//! In-memory storage backend.
//!
//! Test double for [`StorageBackend`]; also handy for ephemeral
//! deployments. Holds payloads in a mutex-guarded map.

use crate::{PayloadReader, StorageBackend};
use hoard_core::ContentFormat;
use hoard_error::{HoardResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

/// Storage backend keeping payloads in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payloads: Mutex<HashMap<(String, ContentFormat), Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.payloads.lock().expect("storage mutex poisoned").len()
    }

    /// Whether the backend holds no payloads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryStorage {
    async fn put(
        &self,
        code: &str,
        format: ContentFormat,
        source_bytes: Option<&[u8]>,
        source_path: Option<&Path>,
    ) -> HoardResult<()> {
        let bytes = match (source_bytes, source_path) {
            (Some(bytes), None) => bytes.to_vec(),
            (None, Some(source)) => tokio::fs::read(source).await.map_err(|e| {
                StorageError::new(StorageErrorKind::Read(format!(
                    "{}: {}",
                    source.display(),
                    e
                )))
            })?,
            _ => return Err(StorageError::new(StorageErrorKind::SourceArgs).into()),
        };

        self.payloads
            .lock()
            .expect("storage mutex poisoned")
            .insert((code.to_string(), format), bytes);
        Ok(())
    }

    async fn open(&self, code: &str, format: ContentFormat) -> HoardResult<PayloadReader> {
        let payloads = self.payloads.lock().expect("storage mutex poisoned");
        let bytes = payloads
            .get(&(code.to_string(), format))
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::PayloadMissing(format!(
                    "{}.{}",
                    code,
                    format.extension()
                )))
            })?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    async fn delete(&self, code: &str, format: ContentFormat) -> HoardResult<()> {
        self.payloads
            .lock()
            .expect("storage mutex poisoned")
            .remove(&(code.to_string(), format));
        Ok(())
    }
}
