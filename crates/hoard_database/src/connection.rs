//! Connection pool setup and embedded migrations.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use hoard_error::{RepoError, RepoErrorKind};

/// Pooled SQLite connections used by the repository.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pragmas applied to every checked-out connection.
///
/// SQLite leaves foreign key enforcement off unless asked, and cascade
/// deletes depend on it. The busy timeout makes concurrent writers
/// queue on the database lock instead of failing immediately.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON; \
             PRAGMA busy_timeout = 5000; \
             PRAGMA journal_mode = WAL;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build a connection pool for `database_url` and run pending
/// migrations.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or a migration fails.
#[tracing::instrument]
pub fn establish_pool(database_url: &str) -> Result<DbPool, RepoError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(|e| RepoError::new(RepoErrorKind::Connection(e.to_string())))?;

    let mut conn = pool
        .get()
        .map_err(|e| RepoError::new(RepoErrorKind::Connection(e.to_string())))?;
    run_migrations(&mut conn)?;

    tracing::info!(url = %database_url, "Database pool ready");
    Ok(pool)
}

/// Apply any pending embedded migrations. Idempotent.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), RepoError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| RepoError::new(RepoErrorKind::Migration(e.to_string())))
}
