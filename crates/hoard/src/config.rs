//! Runtime configuration.

use crate::ingest::IngestConfig;
use hoard_error::{HoardResult, ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for a hoard instance.
///
/// Every field has a default, so an empty JSON object is a valid
/// config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoardConfig {
    /// SQLite database path
    pub database_url: String,
    /// Root directory for the filesystem storage backend
    pub storage_root: PathBuf,
    /// Ingest pipeline limits
    pub ingest: IngestConfig,
}

impl Default for HoardConfig {
    fn default() -> Self {
        Self {
            database_url: "hoard.db".to_string(),
            storage_root: PathBuf::from("hoard_data"),
            ingest: IngestConfig::default(),
        }
    }
}

impl HoardConfig {
    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the malformed input.
    pub fn from_json_str(raw: &str) -> HoardResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ValidationError::new(ValidationErrorKind::Config(e.to_string())).into())
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// I/O and parse failures, both as validation errors.
    pub async fn from_file(path: impl AsRef<Path>) -> HoardResult<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| ValidationError::new(ValidationErrorKind::Config(e.to_string())))?;
        Self::from_json_str(&raw)
    }

    /// Build a configuration from process environment variables.
    ///
    /// `HOARD_DATABASE_URL` and `HOARD_STORAGE_ROOT` override the path
    /// fields; with neither set, `XDG_DATA_HOME` (when present) roots
    /// both under `$XDG_DATA_HOME/hoard`.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    fn from_env_with(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(xdg) = get("XDG_DATA_HOME") {
            let base = Path::new(&xdg).join("hoard");
            config.database_url = base.join("hoard.db").display().to_string();
            config.storage_root = base.join("store");
        }
        if let Some(url) = get("HOARD_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(root) = get("HOARD_STORAGE_ROOT") {
            config.storage_root = PathBuf::from(root);
        }
        config
    }
}
