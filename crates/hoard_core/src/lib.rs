//! Domain model and hash/codec for the hoard content-addressable store.
//!
//! This crate holds the pure foundation: the closed kind/format enums
//! and their fixed lookup tables, the item tagged union, the WritePlan
//! DTO, and the BLAKE2b/Crockford hash and code functions. No I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod format;
mod item;
mod kind;
mod shortcode;
mod write_plan;

pub use format::ContentFormat;
pub use item::{Item, LinkItem, PicItem, TextItem};
pub use kind::{ItemKind, PayloadKind, Visibility};
pub use shortcode::{
    canonicalize_code, encode_crockford_b32, hash_full_b32, CROCKFORD32, HASH_FULL_LEN,
};
pub use write_plan::WritePlan;
