//! Tests for the filesystem and in-memory storage backends.

use hoard_core::ContentFormat;
use hoard_error::{HoardErrorKind, StorageErrorKind};
use hoard_storage::{FilesystemStorage, MemoryStorage, StorageBackend};
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

async fn read_all(mut reader: hoard_storage::PayloadReader) -> Vec<u8> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await.unwrap();
    buf
}

#[tokio::test]
async fn put_bytes_and_open_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    let data = b"Hello, World!";
    storage
        .put("D7GS0E63", ContentFormat::Plaintext, Some(data), None)
        .await
        .unwrap();

    let reader = storage
        .open("D7GS0E63", ContentFormat::Plaintext)
        .await
        .unwrap();
    assert_eq!(read_all(reader).await, data);

    // Stored under {code}.{ext}
    assert!(temp_dir.path().join("D7GS0E63.txt").exists());
}

#[tokio::test]
async fn put_from_source_path() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path().join("store")).unwrap();

    let staged = temp_dir.path().join("staged.bin");
    std::fs::write(&staged, b"staged payload").unwrap();

    storage
        .put("AB2KQJ0X", ContentFormat::Png, None, Some(&staged))
        .await
        .unwrap();

    let reader = storage.open("AB2KQJ0X", ContentFormat::Png).await.unwrap();
    assert_eq!(read_all(reader).await, b"staged payload");
}

#[tokio::test]
async fn put_rejects_both_and_neither_source() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    let staged = temp_dir.path().join("staged.bin");
    std::fs::write(&staged, b"x").unwrap();

    for (bytes, path) in [
        (None, None),
        (Some(b"x".as_slice()), Some(staged.as_path())),
    ] {
        let err = storage
            .put("AB2KQJ0X", ContentFormat::Plaintext, bytes, path)
            .await
            .unwrap_err();
        match err.kind() {
            HoardErrorKind::Storage(e) => assert_eq!(e.kind, StorageErrorKind::SourceArgs),
            other => panic!("expected storage error, got {other}"),
        }
    }
}

#[tokio::test]
async fn extension_follows_format_table() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    storage
        .put("AAAA0000", ContentFormat::Tiff, Some(b"not a real tiff"), None)
        .await
        .unwrap();

    // Override table: tiff stores as .tif
    assert!(temp_dir.path().join("AAAA0000.tif").exists());
}

#[tokio::test]
async fn open_missing_payload_is_distinct() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    let Err(err) = storage.open("ZZZZZZZZ", ContentFormat::Markdown).await else {
        panic!("expected the missing payload to error");
    };
    match err.kind() {
        HoardErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::PayloadMissing(_)))
        }
        other => panic!("expected storage error, got {other}"),
    }
}

#[tokio::test]
async fn delete_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    storage
        .put("AB2KQJ0X", ContentFormat::Json, Some(b"{}"), None)
        .await
        .unwrap();

    storage.delete("AB2KQJ0X", ContentFormat::Json).await.unwrap();
    assert!(!temp_dir.path().join("AB2KQJ0X.json").exists());

    // Second delete of the same key is a no-op
    storage.delete("AB2KQJ0X", ContentFormat::Json).await.unwrap();
}

#[tokio::test]
async fn put_overwrites_existing_payload() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStorage::new(temp_dir.path()).unwrap();

    storage
        .put("AB2KQJ0X", ContentFormat::Plaintext, Some(b"first"), None)
        .await
        .unwrap();
    storage
        .put("AB2KQJ0X", ContentFormat::Plaintext, Some(b"second"), None)
        .await
        .unwrap();

    let reader = storage
        .open("AB2KQJ0X", ContentFormat::Plaintext)
        .await
        .unwrap();
    assert_eq!(read_all(reader).await, b"second");
}

#[tokio::test]
async fn memory_backend_honors_the_same_contract() {
    let storage = MemoryStorage::new();

    storage
        .put("D7GS0E63", ContentFormat::Markdown, Some(b"# hi"), None)
        .await
        .unwrap();
    assert_eq!(storage.len(), 1);

    let reader = storage
        .open("D7GS0E63", ContentFormat::Markdown)
        .await
        .unwrap();
    assert_eq!(read_all(reader).await, b"# hi");

    let Err(err) = storage.open("D7GS0E63", ContentFormat::Plaintext).await else {
        panic!("expected the format mismatch to error");
    };
    match err.kind() {
        HoardErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::PayloadMissing(_)))
        }
        other => panic!("expected storage error, got {other}"),
    }

    storage
        .delete("D7GS0E63", ContentFormat::Markdown)
        .await
        .unwrap();
    storage
        .delete("D7GS0E63", ContentFormat::Markdown)
        .await
        .unwrap();
    assert!(storage.is_empty());
}
