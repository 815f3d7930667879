//! SQLite persistence for the hoard content-addressable store.
//!
//! Provides the diesel schema, embedded migrations, row models, and
//! the repository in two layers: synchronous functions over a borrowed
//! connection, and the pooled async [`ItemRepository`] built on them.
//!
//! # Example
//!
//! ```rust,ignore
//! use hoard_database::{establish_pool, ItemRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = establish_pool("hoard.db")?;
//! let repo = ItemRepository::new(pool);
//! let found = repo.get_by_code("D7GS0E63").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod connection;
mod item_repository;
mod models;

pub mod repository;
pub mod schema;

pub use connection::{establish_pool, run_migrations, DbPool, MIGRATIONS};
pub use item_repository::ItemRepository;
pub use models::{ItemRow, LinkItemRow, PicItemRow, TextItemRow};
