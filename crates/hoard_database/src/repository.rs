//! Synchronous repository operations.
//!
//! These run against a borrowed connection; [`crate::ItemRepository`]
//! wraps them for pooled async use. Shortcode uniqueness and dedup both
//! ride on the database's unique constraints rather than any in-process
//! state, so multiple processes can share one backing store.

use crate::models::{ItemRow, LinkItemRow, PicItemRow, TextItemRow};
use crate::schema::{items, link_items, pic_items, text_items};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use hoard_core::{
    ContentFormat, Item, ItemKind, LinkItem, PicItem, TextItem, Visibility, WritePlan,
    HASH_FULL_LEN,
};
use hoard_error::{RepoError, RepoErrorKind};
use std::collections::HashSet;
use std::str::FromStr;

/// Resolve the shortest free code for `hash_full`.
///
/// Fetches every existing code sharing the minimum-length prefix in one
/// query, then walks candidate lengths upward in memory. The returned
/// code is the shortest prefix of `hash_full` with length at least
/// `min_len` that no stored item holds. Uniqueness is ultimately
/// guaranteed by the code column's unique constraint, not by this scan.
pub fn resolve_code(
    conn: &mut SqliteConnection,
    hash_full: &str,
    min_len: usize,
) -> Result<String, RepoError> {
    let min_len = min_len.clamp(1, HASH_FULL_LEN.min(hash_full.len()));
    let prefix = &hash_full[..min_len];

    // Codes are Crockford symbols only, so the prefix is LIKE-safe.
    let taken: Vec<String> = items::table
        .select(items::code)
        .filter(items::code.like(format!("{prefix}%")))
        .load(conn)
        .map_err(RepoError::from)?;
    let taken: HashSet<String> = taken.into_iter().collect();

    for len in min_len..=hash_full.len() {
        let candidate = &hash_full[..len];
        if !taken.contains(candidate) {
            return Ok(candidate.to_string());
        }
    }

    // Every prefix including the full hash is taken; hand the full hash
    // to the insert and let the constraint report the duplicate.
    Ok(hash_full.to_string())
}

/// Insert the item described by `plan`, assigning its code.
///
/// Base and subtype rows go in a single transaction. A unique-constraint
/// race on `code` surfaces as [`RepoErrorKind::CodeCollision`], one on
/// `hash_full` as [`RepoErrorKind::DuplicateHash`]; the orchestrator
/// treats the latter as a concurrent dedup, the former as retryable.
pub fn insert(
    conn: &mut SqliteConnection,
    plan: &WritePlan,
    uid: i64,
    perm: Visibility,
) -> Result<Item, RepoError> {
    let code = resolve_code(conn, &plan.hash_full, plan.code_min_len)?;
    let item = item_from_plan(plan, &code, uid, perm)?;

    let base = ItemRow {
        hash_full: plan.hash_full.clone(),
        code: code.clone(),
        kind: plan.kind.as_str().to_string(),
        size_b: plan.size_b,
        uid,
        perm: perm.as_str().to_string(),
        upload_at: plan.upload_at,
        origin_at: plan.origin_at,
    };

    conn.transaction::<_, DieselError, _>(|conn| {
        diesel::insert_into(items::table).values(&base).execute(conn)?;

        match &item {
            Item::Text(text) => {
                let row = TextItemRow {
                    hash_full: text.hash_full.clone(),
                    format: text.format.as_str().to_string(),
                };
                diesel::insert_into(text_items::table)
                    .values(&row)
                    .execute(conn)?;
            }
            Item::Pic(pic) => {
                let row = PicItemRow {
                    hash_full: pic.hash_full.clone(),
                    format: pic.format.as_str().to_string(),
                    width: pic.width,
                    height: pic.height,
                };
                diesel::insert_into(pic_items::table)
                    .values(&row)
                    .execute(conn)?;
            }
            Item::Link(link) => {
                let row = LinkItemRow {
                    hash_full: link.hash_full.clone(),
                    url: link.url.clone(),
                };
                diesel::insert_into(link_items::table)
                    .values(&row)
                    .execute(conn)?;
            }
        }
        Ok(())
    })
    .map_err(|e| map_insert_error(e, &code, &plan.hash_full))?;

    tracing::debug!(code = %code, hash = %plan.hash_full, kind = %plan.kind, "Inserted item");
    Ok(item)
}

/// Fetch an item by its exact (already canonicalized) code.
pub fn get_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Item>, RepoError> {
    let row: Option<ItemRow> = items::table
        .filter(items::code.eq(code))
        .select(ItemRow::as_select())
        .first(conn)
        .optional()
        .map_err(RepoError::from)?;

    match row {
        Some(row) => attach_subtype(conn, row).map(Some),
        None => Ok(None),
    }
}

/// Fetch an item by its full content hash.
pub fn get_by_full_hash(
    conn: &mut SqliteConnection,
    hash_full: &str,
) -> Result<Option<Item>, RepoError> {
    let row: Option<ItemRow> = items::table
        .find(hash_full)
        .select(ItemRow::as_select())
        .first(conn)
        .optional()
        .map_err(RepoError::from)?;

    match row {
        Some(row) => attach_subtype(conn, row).map(Some),
        None => Ok(None),
    }
}

/// Delete an item by hash. Subtype rows cascade; deleting an absent
/// hash is a no-op.
pub fn delete(conn: &mut SqliteConnection, hash_full: &str) -> Result<(), RepoError> {
    diesel::delete(items::table.find(hash_full))
        .execute(conn)
        .map_err(RepoError::from)?;
    Ok(())
}

/// Map a transaction failure, distinguishing the two unique-constraint
/// races from generic query errors.
fn map_insert_error(err: DieselError, code: &str, hash_full: &str) -> RepoError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) = err {
        let message = info.message();
        if message.contains("items.code") {
            return RepoError::new(RepoErrorKind::CodeCollision(code.to_string()));
        }
        if message.contains("items.hash_full") {
            return RepoError::new(RepoErrorKind::DuplicateHash(hash_full.to_string()));
        }
    }
    RepoError::from(err)
}

/// Build the domain item a plan will persist as.
fn item_from_plan(
    plan: &WritePlan,
    code: &str,
    uid: i64,
    perm: Visibility,
) -> Result<Item, RepoError> {
    let plan_error = |field: &str| {
        RepoError::new(RepoErrorKind::Query(format!(
            "write plan for {} kind missing {}",
            plan.kind, field
        )))
    };

    let item = match plan.kind {
        ItemKind::Text => Item::Text(TextItem {
            code: code.to_string(),
            hash_full: plan.hash_full.clone(),
            size_b: plan.size_b,
            uid,
            perm,
            upload_at: plan.upload_at,
            origin_at: plan.origin_at,
            format: plan.format.ok_or_else(|| plan_error("format"))?,
        }),
        ItemKind::Picture => Item::Pic(PicItem {
            code: code.to_string(),
            hash_full: plan.hash_full.clone(),
            size_b: plan.size_b,
            uid,
            perm,
            upload_at: plan.upload_at,
            origin_at: plan.origin_at,
            format: plan.format.ok_or_else(|| plan_error("format"))?,
            width: plan.width.ok_or_else(|| plan_error("width"))?,
            height: plan.height.ok_or_else(|| plan_error("height"))?,
        }),
        ItemKind::Link => Item::Link(LinkItem {
            code: code.to_string(),
            hash_full: plan.hash_full.clone(),
            size_b: plan.size_b,
            uid,
            perm,
            upload_at: plan.upload_at,
            origin_at: plan.origin_at,
            url: plan.link_url.clone().ok_or_else(|| plan_error("link_url"))?,
        }),
    };
    Ok(item)
}

/// Join a base row to its subtype row and map into the domain union.
///
/// An unrecognized stored kind or format is data corruption and is
/// raised, never coerced.
fn attach_subtype(conn: &mut SqliteConnection, row: ItemRow) -> Result<Item, RepoError> {
    let kind = ItemKind::from_str(&row.kind).map_err(|_| {
        RepoError::new(RepoErrorKind::CorruptKind {
            kind: row.kind.clone(),
            hash_full: row.hash_full.clone(),
        })
    })?;
    let perm = Visibility::from_str(&row.perm).map_err(|_| {
        RepoError::new(RepoErrorKind::Query(format!(
            "unrecognized visibility '{}' stored for hash {}",
            row.perm, row.hash_full
        )))
    })?;
    let missing = |kind: ItemKind, hash_full: &str| {
        RepoError::new(RepoErrorKind::MissingSubtype {
            kind: kind.as_str().to_string(),
            hash_full: hash_full.to_string(),
        })
    };

    match kind {
        ItemKind::Text => {
            let sub: Option<TextItemRow> = text_items::table
                .find(&row.hash_full)
                .select(TextItemRow::as_select())
                .first(conn)
                .optional()
                .map_err(RepoError::from)?;
            let sub = sub.ok_or_else(|| missing(kind, &row.hash_full))?;
            Ok(Item::Text(TextItem {
                code: row.code,
                hash_full: row.hash_full,
                size_b: row.size_b,
                uid: row.uid,
                perm,
                upload_at: row.upload_at,
                origin_at: row.origin_at,
                format: parse_format(&sub.format, &sub.hash_full)?,
            }))
        }
        ItemKind::Picture => {
            let sub: Option<PicItemRow> = pic_items::table
                .find(&row.hash_full)
                .select(PicItemRow::as_select())
                .first(conn)
                .optional()
                .map_err(RepoError::from)?;
            let sub = sub.ok_or_else(|| missing(kind, &row.hash_full))?;
            Ok(Item::Pic(PicItem {
                code: row.code,
                hash_full: row.hash_full,
                size_b: row.size_b,
                uid: row.uid,
                perm,
                upload_at: row.upload_at,
                origin_at: row.origin_at,
                format: parse_format(&sub.format, &sub.hash_full)?,
                width: sub.width,
                height: sub.height,
            }))
        }
        ItemKind::Link => {
            let sub: Option<LinkItemRow> = link_items::table
                .find(&row.hash_full)
                .select(LinkItemRow::as_select())
                .first(conn)
                .optional()
                .map_err(RepoError::from)?;
            let sub = sub.ok_or_else(|| missing(kind, &row.hash_full))?;
            Ok(Item::Link(LinkItem {
                code: row.code,
                hash_full: row.hash_full,
                size_b: row.size_b,
                uid: row.uid,
                perm,
                upload_at: row.upload_at,
                origin_at: row.origin_at,
                url: sub.url,
            }))
        }
    }
}

fn parse_format(stored: &str, hash_full: &str) -> Result<ContentFormat, RepoError> {
    ContentFormat::from_str(stored).map_err(|_| {
        RepoError::new(RepoErrorKind::CorruptFormat {
            format: stored.to_string(),
            hash_full: hash_full.to_string(),
        })
    })
}
