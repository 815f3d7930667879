//! Pooled async wrapper over the synchronous repository functions.

use crate::connection::DbPool;
use crate::repository;
use hoard_core::{Item, Visibility, WritePlan};
use hoard_error::{HoardResult, RepoError, RepoErrorKind};

/// Database-backed item repository.
///
/// Diesel work runs on the blocking thread pool; the handle is cheap to
/// clone and share across tasks.
#[derive(Clone)]
pub struct ItemRepository {
    pool: DbPool,
}

impl ItemRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert the item described by `plan`, assigning its short code.
    #[tracing::instrument(skip(self, plan), fields(hash = %plan.hash_full, kind = %plan.kind))]
    pub async fn insert(
        &self,
        plan: WritePlan,
        uid: i64,
        perm: Visibility,
    ) -> HoardResult<Item> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool)?;
            repository::insert(&mut conn, &plan, uid, perm)
        })
        .await
    }

    /// Fetch an item by its exact (already canonicalized) code.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> HoardResult<Option<Item>> {
        let pool = self.pool.clone();
        let code = code.to_string();
        run_blocking(move || {
            let mut conn = checkout(&pool)?;
            repository::get_by_code(&mut conn, &code)
        })
        .await
    }

    /// Fetch an item by its full content hash.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_full_hash(&self, hash_full: &str) -> HoardResult<Option<Item>> {
        let pool = self.pool.clone();
        let hash_full = hash_full.to_string();
        run_blocking(move || {
            let mut conn = checkout(&pool)?;
            repository::get_by_full_hash(&mut conn, &hash_full)
        })
        .await
    }

    /// Delete an item by hash; subtype rows cascade. No-op when absent.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, hash_full: &str) -> HoardResult<()> {
        let pool = self.pool.clone();
        let hash_full = hash_full.to_string();
        run_blocking(move || {
            let mut conn = checkout(&pool)?;
            repository::delete(&mut conn, &hash_full)
        })
        .await
    }
}

fn checkout(
    pool: &DbPool,
) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<diesel::SqliteConnection>>, RepoError>
{
    pool.get()
        .map_err(|e| RepoError::new(RepoErrorKind::Connection(e.to_string())))
}

async fn run_blocking<T, F>(f: F) -> HoardResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RepoError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RepoError::new(RepoErrorKind::Query(e.to_string())))?
        .map_err(Into::into)
}
