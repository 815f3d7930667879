//! Dedup orchestrator: the one writer that touches both the database
//! and the storage backend.
//!
//! Ingest runs plan -> hash lookup -> insert -> payload write. A hash
//! hit at any point resolves to the existing item, so re-submitting
//! the same content is always idempotent, including under a write race
//! where two submissions plan the same hash concurrently.

use crate::ingest::{IngestRequest, IngestService};
use hoard_core::{Item, ItemKind, PayloadKind, Visibility};
use hoard_database::ItemRepository;
use hoard_error::{HoardErrorKind, HoardResult, RepoError, RepoErrorKind};
use hoard_storage::StorageBackend;
use std::sync::Arc;

/// Outcome of an ingest: the resolved item, and whether this call
/// created it.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistResult {
    /// The stored item, newly created or pre-existing
    pub item: Item,
    /// False when the content hash was already present
    pub created: bool,
}

/// Coordinates the ingest service, repository, and storage backend.
#[derive(Clone)]
pub struct IngestOrchestrator {
    service: IngestService,
    repo: ItemRepository,
    storage: Arc<dyn StorageBackend>,
}

impl IngestOrchestrator {
    /// Wire an orchestrator over its three collaborators.
    pub fn new(
        service: IngestService,
        repo: ItemRepository,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            service,
            repo,
            storage,
        }
    }

    /// Ingest one submission for the given owner and visibility.
    ///
    /// Returns the existing item with `created: false` when the
    /// content hash is already stored. Link items are persisted in the
    /// database only; payload items also get their bytes written to
    /// the storage backend under the assigned code.
    ///
    /// # Errors
    ///
    /// Planning errors from the ingest service, repository errors
    /// (including [`RepoErrorKind::CodeCollision`], which is not
    /// recoverable here), and storage write errors.
    #[tracing::instrument(skip(self, request))]
    pub async fn ingest(
        &self,
        request: &IngestRequest,
        uid: i64,
        perm: Visibility,
    ) -> HoardResult<PersistResult> {
        let mut plan = self.service.build_plan(request).await?;
        let hash_full = plan.hash_full.clone();

        if let Some(existing) = self.repo.get_by_full_hash(&hash_full).await? {
            tracing::debug!(hash_full, code = existing.code(), "dedup hit before insert");
            return Ok(PersistResult {
                item: existing,
                created: false,
            });
        }

        // The repository never reads the payload; keep it out of the
        // insert and hand it to storage afterwards.
        let payload_kind = plan.payload_kind;
        let payload_bytes = plan.payload_bytes.take();
        let payload_path = plan.payload_path.take();

        let item = match self.repo.insert(plan, uid, perm).await {
            Ok(item) => item,
            Err(err) if is_duplicate_hash(&err) => {
                // Lost an insert race; the winner's row serves.
                tracing::debug!(hash_full, "dedup hit on insert race");
                match self.repo.get_by_full_hash(&hash_full).await? {
                    Some(existing) => {
                        return Ok(PersistResult {
                            item: existing,
                            created: false,
                        })
                    }
                    None => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };

        if item.kind() != ItemKind::Link {
            if let Some(format) = item.format() {
                match payload_kind {
                    PayloadKind::Bytes => {
                        self.storage
                            .put(item.code(), format, payload_bytes.as_deref(), None)
                            .await?
                    }
                    PayloadKind::File => {
                        self.storage
                            .put(item.code(), format, None, payload_path.as_deref())
                            .await?
                    }
                }
            }
        }

        tracing::info!(
            code = item.code(),
            hash_full,
            kind = %item.kind(),
            "item created"
        );
        Ok(PersistResult {
            item,
            created: true,
        })
    }

    /// Remove an item and its stored payload by full hash.
    ///
    /// Removing an absent hash is a no-op; the payload delete is
    /// likewise idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, hash_full: &str) -> HoardResult<()> {
        let Some(item) = self.repo.get_by_full_hash(hash_full).await? else {
            return Ok(());
        };
        self.repo.delete(hash_full).await?;
        if let Some(format) = item.format() {
            self.storage.delete(item.code(), format).await?;
        }
        Ok(())
    }

    /// The repository this orchestrator writes through.
    pub fn repository(&self) -> &ItemRepository {
        &self.repo
    }

    /// The storage backend this orchestrator writes through.
    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }
}

fn is_duplicate_hash(err: &hoard_error::HoardError) -> bool {
    matches!(
        err.kind(),
        HoardErrorKind::Repo(RepoError {
            kind: RepoErrorKind::DuplicateHash(_),
            ..
        })
    )
}
