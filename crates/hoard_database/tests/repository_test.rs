//! Tests for the SQLite repository: code resolution, subtype joins,
//! constraint-race mapping, and cascade deletes.

use diesel::prelude::*;
use hoard_core::{
    hash_full_b32, ContentFormat, Item, ItemKind, PayloadKind, Visibility, WritePlan,
};
use hoard_database::{establish_pool, repository, schema, DbPool, ItemRepository, ItemRow};
use hoard_error::{HoardErrorKind, RepoErrorKind};
use tempfile::TempDir;

const UPLOAD_AT: i64 = 1_760_000_000;

fn test_pool(dir: &TempDir) -> DbPool {
    let db_path = dir.path().join("hoard.db");
    establish_pool(db_path.to_str().unwrap()).unwrap()
}

fn base_plan(hash: &str, kind: ItemKind) -> WritePlan {
    WritePlan {
        hash_full: hash.to_string(),
        code_min_len: 8,
        payload_kind: PayloadKind::Bytes,
        kind,
        size_b: 5,
        upload_at: UPLOAD_AT,
        format: None,
        origin_at: None,
        payload_bytes: Some(b"hello".to_vec()),
        payload_path: None,
        width: None,
        height: None,
        link_url: None,
    }
}

fn text_plan(hash: &str) -> WritePlan {
    WritePlan {
        format: Some(ContentFormat::Plaintext),
        ..base_plan(hash, ItemKind::Text)
    }
}

fn pic_plan(hash: &str) -> WritePlan {
    WritePlan {
        format: Some(ContentFormat::Png),
        width: Some(64),
        height: Some(48),
        ..base_plan(hash, ItemKind::Picture)
    }
}

fn link_plan(hash: &str, url: &str) -> WritePlan {
    WritePlan {
        link_url: Some(url.to_string()),
        ..base_plan(hash, ItemKind::Link)
    }
}

#[test]
fn insert_and_get_round_trips_every_kind() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let hashes = [
        hash_full_b32(b"text payload"),
        hash_full_b32(b"picture payload"),
        hash_full_b32(b"https://example.com/"),
    ];
    let plans = [
        text_plan(&hashes[0]),
        pic_plan(&hashes[1]),
        link_plan(&hashes[2], "https://example.com/"),
    ];

    for plan in &plans {
        let inserted = repository::insert(&mut conn, plan, 7, Visibility::Public).unwrap();
        assert_eq!(inserted.hash_full(), plan.hash_full);
        assert_eq!(inserted.kind(), plan.kind);
        assert_eq!(inserted.uid(), 7);
        assert_eq!(inserted.code().len(), 8);
        assert!(plan.hash_full.starts_with(inserted.code()));

        let by_hash = repository::get_by_full_hash(&mut conn, &plan.hash_full)
            .unwrap()
            .unwrap();
        assert_eq!(by_hash, inserted);

        let by_code = repository::get_by_code(&mut conn, inserted.code())
            .unwrap()
            .unwrap();
        assert_eq!(by_code, inserted);
    }

    match repository::get_by_full_hash(&mut conn, &hashes[1])
        .unwrap()
        .unwrap()
    {
        Item::Pic(pic) => {
            assert_eq!(pic.format, ContentFormat::Png);
            assert_eq!((pic.width, pic.height), (64, 48));
        }
        other => panic!("expected picture, got {other:?}"),
    }
}

#[test]
fn absent_lookups_are_empty_not_errors() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    assert!(repository::get_by_code(&mut conn, "ZZZZZZZZ").unwrap().is_none());
    assert!(repository::get_by_full_hash(&mut conn, &hash_full_b32(b"missing"))
        .unwrap()
        .is_none());
}

#[test]
fn resolve_code_extends_past_taken_prefixes() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    // Two fabricated hashes sharing a 10-symbol prefix.
    let hash_a = "AAAABBBBCC0000000000E111";
    let hash_b = "AAAABBBBCC1111111111F222";

    let item_a = repository::insert(&mut conn, &text_plan(hash_a), 0, Visibility::Public).unwrap();
    assert_eq!(item_a.code(), "AAAABBBB");

    // The 8-symbol candidate is taken by item_a, so the code extends
    // one symbol past it.
    let item_b = repository::insert(&mut conn, &text_plan(hash_b), 0, Visibility::Public).unwrap();
    assert_eq!(item_b.code(), "AAAABBBBC");
    assert!(hash_b.starts_with(item_b.code()));
}

#[test]
fn assigned_codes_are_shortest_free_prefixes() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let payloads: Vec<Vec<u8>> = (0..12u8).map(|i| vec![b'p', i]).collect();
    let mut stored = Vec::new();
    for payload in &payloads {
        let plan = text_plan(&hash_full_b32(payload));
        stored.push(repository::insert(&mut conn, &plan, 0, Visibility::Public).unwrap());
    }

    let codes: Vec<String> = stored.iter().map(|i| i.code().to_string()).collect();
    for item in &stored {
        let code = item.code();
        // Prefix of its own hash, at least min length.
        assert!(item.hash_full().starts_with(code));
        assert!(code.len() >= 8);
        // Minimal: every shorter candidate is taken by another code.
        for len in 8..code.len() {
            let shorter = &item.hash_full()[..len];
            assert!(
                codes.iter().any(|c| c == shorter),
                "code {code} is not minimal: {shorter} was free"
            );
        }
    }

    // Globally unique.
    let mut deduped = codes.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), codes.len());
}

#[test]
fn duplicate_hash_insert_maps_to_duplicate_hash_error() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let hash = hash_full_b32(b"twice-over");
    repository::insert(&mut conn, &text_plan(&hash), 0, Visibility::Public).unwrap();

    let err = repository::insert(&mut conn, &text_plan(&hash), 0, Visibility::Public).unwrap_err();
    assert!(
        matches!(err.kind, RepoErrorKind::DuplicateHash(ref h) if *h == hash),
        "got {err}"
    );

    // Exactly one base/subtype row pair exists.
    let items: i64 = schema::items::table.count().get_result(&mut conn).unwrap();
    let texts: i64 = schema::text_items::table.count().get_result(&mut conn).unwrap();
    assert_eq!((items, texts), (1, 1));
}

#[test]
fn code_exhaustion_maps_to_code_collision_error() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    // Occupy every candidate prefix of the target hash, each under a
    // different hash, so resolve_code falls through to the full hash
    // and the code unique constraint fires.
    let target = "CCCCCCCCCCCCCCCCCCCCCCCC";
    for len in 8..=24 {
        let filler = ItemRow {
            hash_full: format!("FILLER{:018}", len),
            code: target[..len].to_string(),
            kind: "txt".to_string(),
            size_b: 1,
            uid: 0,
            perm: "pub".to_string(),
            upload_at: UPLOAD_AT,
            origin_at: None,
        };
        diesel::insert_into(schema::items::table)
            .values(&filler)
            .execute(&mut *conn)
            .unwrap();
    }

    let err =
        repository::insert(&mut conn, &text_plan(target), 0, Visibility::Public).unwrap_err();
    assert!(
        matches!(err.kind, RepoErrorKind::CodeCollision(ref c) if *c == target),
        "got {err}"
    );
}

#[test]
fn delete_cascades_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let hash = hash_full_b32(b"ephemeral");
    let item = repository::insert(&mut conn, &pic_plan(&hash), 0, Visibility::Public).unwrap();
    let code = item.code().to_string();

    repository::delete(&mut conn, &hash).unwrap();

    assert!(repository::get_by_code(&mut conn, &code).unwrap().is_none());
    let pics: i64 = schema::pic_items::table.count().get_result(&mut conn).unwrap();
    assert_eq!(pics, 0);

    // Deleting an absent hash is a no-op.
    repository::delete(&mut conn, &hash).unwrap();
}

#[test]
fn unrecognized_stored_kind_is_raised_as_corruption() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let row = ItemRow {
        hash_full: "BADKIND0000000000000000X".to_string(),
        code: "BADKIND0".to_string(),
        kind: "blob".to_string(),
        size_b: 1,
        uid: 0,
        perm: "pub".to_string(),
        upload_at: UPLOAD_AT,
        origin_at: None,
    };
    diesel::insert_into(schema::items::table)
        .values(&row)
        .execute(&mut *conn)
        .unwrap();

    let err = repository::get_by_code(&mut conn, "BADKIND0").unwrap_err();
    assert!(
        matches!(err.kind, RepoErrorKind::CorruptKind { ref kind, .. } if kind == "blob"),
        "got {err}"
    );
}

#[test]
fn missing_subtype_row_is_raised() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let mut conn = pool.get().unwrap();

    let row = ItemRow {
        hash_full: "ORPHAN00000000000000000X".to_string(),
        code: "ORPHAN00".to_string(),
        kind: "txt".to_string(),
        size_b: 1,
        uid: 0,
        perm: "pub".to_string(),
        upload_at: UPLOAD_AT,
        origin_at: None,
    };
    diesel::insert_into(schema::items::table)
        .values(&row)
        .execute(&mut *conn)
        .unwrap();

    let err = repository::get_by_code(&mut conn, "ORPHAN00").unwrap_err();
    assert!(
        matches!(err.kind, RepoErrorKind::MissingSubtype { .. }),
        "got {err}"
    );
}

#[tokio::test]
async fn async_repository_round_trip() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let repo = ItemRepository::new(pool);

    let hash = hash_full_b32(b"async payload");
    let inserted = repo
        .insert(text_plan(&hash), 3, Visibility::Unlisted)
        .await
        .unwrap();
    assert_eq!(inserted.perm(), Visibility::Unlisted);

    let found = repo.get_by_code(inserted.code()).await.unwrap().unwrap();
    assert_eq!(found, inserted);

    repo.delete(&hash).await.unwrap();
    assert!(repo.get_by_full_hash(&hash).await.unwrap().is_none());
}

#[tokio::test]
async fn async_duplicate_surfaces_repo_error() {
    let dir = TempDir::new().unwrap();
    let pool = test_pool(&dir);
    let repo = ItemRepository::new(pool);

    let hash = hash_full_b32(b"async duplicate");
    repo.insert(text_plan(&hash), 0, Visibility::Public)
        .await
        .unwrap();
    let err = repo
        .insert(text_plan(&hash), 0, Visibility::Public)
        .await
        .unwrap_err();
    match err.kind() {
        HoardErrorKind::Repo(e) => {
            assert!(matches!(e.kind, RepoErrorKind::DuplicateHash(_)))
        }
        other => panic!("expected repo error, got {other}"),
    }
}
