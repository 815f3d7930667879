//! Payload storage backends for the hoard content-addressable store.
//!
//! Payload bytes live outside the database, keyed by `(code, format)`.
//! [`StorageBackend`] is the narrow capability set the rest of the
//! system depends on; [`FilesystemStorage`] is the reference
//! implementation and [`MemoryStorage`] the test double.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod filesystem;
mod memory;

pub use backend::{PayloadReader, StorageBackend};
pub use filesystem::FilesystemStorage;
pub use memory::MemoryStorage;
