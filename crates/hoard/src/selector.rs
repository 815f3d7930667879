//! Read path: resolve user-facing codes to items and payloads.
//!
//! Codes arrive in whatever shape a human typed or pasted, so every
//! lookup canonicalizes first. Absence on this path is an error, not
//! an empty option: callers asked for a specific item.

use hoard_core::{canonicalize_code, Item};
use hoard_database::ItemRepository;
use hoard_error::{HoardResult, RepoError, RepoErrorKind};
use hoard_storage::{PayloadReader, StorageBackend};

/// Resolve a code to its item.
///
/// # Errors
///
/// Validation errors for a code that does not canonicalize, and
/// [`RepoErrorKind::NotFound`] when no item carries it.
#[tracing::instrument(skip(repo))]
pub async fn get_item(repo: &ItemRepository, code: &str) -> HoardResult<Item> {
    let canonical = canonicalize_code(code)?;
    repo.get_by_code(&canonical)
        .await?
        .ok_or_else(|| RepoError::new(RepoErrorKind::NotFound(canonical)).into())
}

/// Resolve a full content hash to its item.
///
/// # Errors
///
/// [`RepoErrorKind::NotFound`] when the hash is not stored.
#[tracing::instrument(skip(repo))]
pub async fn get_item_by_hash(repo: &ItemRepository, hash_full: &str) -> HoardResult<Item> {
    repo.get_by_full_hash(hash_full)
        .await?
        .ok_or_else(|| RepoError::new(RepoErrorKind::NotFound(hash_full.to_string())).into())
}

/// Resolve a code to its item and open its payload for reading.
///
/// Link items carry no stored payload, so the reader side is `None`
/// for them.
///
/// # Errors
///
/// Everything [`get_item`] raises, plus storage errors; in particular
/// [`hoard_error::StorageErrorKind::PayloadMissing`] when the row
/// exists but its payload does not.
#[tracing::instrument(skip(repo, storage))]
pub async fn open_payload(
    repo: &ItemRepository,
    storage: &dyn StorageBackend,
    code: &str,
) -> HoardResult<(Item, Option<PayloadReader>)> {
    let item = get_item(repo, code).await?;
    match item.format() {
        Some(format) => {
            let reader = storage.open(item.code(), format).await?;
            Ok((item, Some(reader)))
        }
        None => Ok((item, None)),
    }
}
