//! Filesystem-based storage backend.
//!
//! Stores each payload as a flat file under one root directory,
//! named `{code}.{extension}`. Codes are unique and human-typable, so
//! the flat layout keeps paths inspectable with plain shell tools.

use crate::{PayloadReader, StorageBackend};
use hoard_core::ContentFormat;
use hoard_error::{HoardResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Writes go to a temp file first and are renamed into place so a
/// crashed writer never leaves a half-written payload under a live
/// code.
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    /// Create a new filesystem backend rooted at `root`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> HoardResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Opened filesystem storage");
        Ok(Self { root })
    }

    /// Storage path for a key: `{root}/{code}.{ext}`.
    fn path_for(&self, code: &str, format: ContentFormat) -> PathBuf {
        self.root.join(format!("{}.{}", code, format.extension()))
    }
}

#[async_trait::async_trait]
impl StorageBackend for FilesystemStorage {
    #[tracing::instrument(
        skip(self, source_bytes, source_path),
        fields(code = %code, format = %format)
    )]
    async fn put(
        &self,
        code: &str,
        format: ContentFormat,
        source_bytes: Option<&[u8]>,
        source_path: Option<&Path>,
    ) -> HoardResult<()> {
        let path = self.path_for(code, format);
        let temp_path = path.with_extension("tmp");

        match (source_bytes, source_path) {
            (Some(bytes), None) => {
                tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
                    StorageError::new(StorageErrorKind::Write(format!(
                        "{}: {}",
                        temp_path.display(),
                        e
                    )))
                })?;
            }
            (None, Some(source)) => {
                tokio::fs::copy(source, &temp_path).await.map_err(|e| {
                    StorageError::new(StorageErrorKind::Write(format!(
                        "copy {} to {}: {}",
                        source.display(),
                        temp_path.display(),
                        e
                    )))
                })?;
            }
            _ => {
                return Err(StorageError::new(StorageErrorKind::SourceArgs).into());
            }
        }

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), "Stored payload");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(code = %code, format = %format))]
    async fn open(&self, code: &str, format: ContentFormat) -> HoardResult<PayloadReader> {
        let path = self.path_for(code, format);

        let file = tokio::fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::PayloadMissing(
                    path.display().to_string(),
                ))
            } else {
                StorageError::new(StorageErrorKind::Read(format!("{}: {}", path.display(), e)))
            }
        })?;

        tracing::debug!(path = %path.display(), "Opened payload");
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self), fields(code = %code, format = %format))]
    async fn delete(&self, code: &str, format: ContentFormat) -> HoardResult<()> {
        let path = self.path_for(code, format);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted payload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Write(format!(
                "delete {}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
