//! Error types for the hoard content-addressable store.
//!
//! Each subsystem gets its own kind enum plus a located error struct;
//! [`HoardError`] wraps them all for fallible APIs that cross subsystem
//! boundaries. Construction goes through `new()` so every error records
//! the file and line where it was raised.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod error;
mod media;
mod repo;
mod storage;
mod validation;

pub use classify::{ClassifyError, ClassifyErrorKind};
pub use error::{HoardError, HoardErrorKind, HoardResult};
pub use media::{MediaError, MediaErrorKind};
pub use repo::{RepoError, RepoErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
