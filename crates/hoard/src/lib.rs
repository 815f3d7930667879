//! Content-addressable ingest and resolution engine.
//!
//! Submissions are hashed with BLAKE2b-120, classified by a priority
//! cascade of hints and detectors, deduplicated by full hash, and
//! stored under the shortest Crockford base-32 code that uniquely
//! prefixes the hash. Lookups canonicalize user-typed codes, so `o`,
//! `0`, and a stray hyphen all resolve the same.
//!
//! # Example
//!
//! ```rust,ignore
//! use hoard::{
//!     FilesystemStorage, HoardConfig, IngestOrchestrator, IngestRequest, IngestService,
//!     ItemRepository, Visibility,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HoardConfig::default();
//! let pool = hoard::establish_pool(&config.database_url)?;
//! let orchestrator = IngestOrchestrator::new(
//!     IngestService::new(config.ingest),
//!     ItemRepository::new(pool),
//!     Arc::new(FilesystemStorage::new(&config.storage_root)?),
//! );
//!
//! let request = IngestRequest::from_bytes(b"Hello, World!".to_vec());
//! let result = orchestrator.ingest(&request, 0, Visibility::Public).await?;
//! println!("{} ({}B)", result.item.code(), result.item.size_b());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod ingest;
pub mod media;
pub mod orchestrator;
pub mod selector;
pub mod telemetry;

pub use classify::{classify, Classification};
pub use config::HoardConfig;
pub use ingest::{IngestConfig, IngestRequest, IngestService};
pub use media::{image_info, ImageInfo};
pub use orchestrator::{IngestOrchestrator, PersistResult};
pub use telemetry::init_tracing;

pub use hoard_core::{
    canonicalize_code, encode_crockford_b32, hash_full_b32, ContentFormat, Item, ItemKind,
    LinkItem, PayloadKind, PicItem, TextItem, Visibility, WritePlan,
};
pub use hoard_database::{establish_pool, DbPool, ItemRepository};
pub use hoard_error::{HoardError, HoardErrorKind, HoardResult};
pub use hoard_storage::{FilesystemStorage, MemoryStorage, PayloadReader, StorageBackend};
