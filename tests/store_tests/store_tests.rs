//! Tests for the store lifecycle
//!
//! Tests verify:
//! - Opening creates the data directory
//! - Snapshots are written per flush policy and restored on reopen
//! - Corrupted snapshots are rejected
//! - Config validation

use std::fs;
use std::path::Path;

use nodestore::{Config, Decode, FlushPolicy, NodeError, Store, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> TempDir {
    TempDir::new().unwrap()
}

fn config_at(path: &Path) -> Config {
    Config::builder().data_dir(path).build()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_data_dir() {
    let tmp = setup();
    let dir = tmp.path().join("nested").join("data");

    let store = Store::open(config_at(&dir)).unwrap();

    assert!(dir.is_dir());
    assert_eq!(store.snapshot_path(), Some(dir.join("nodes.snapshot").as_path()));
}

#[test]
fn test_open_empty_dir_starts_empty() {
    let tmp = setup();
    let store = Store::open_path(tmp.path()).unwrap();

    assert!(store.nodes().range().is_err());
    assert!(!tmp.path().join("nodes.snapshot").exists());
}

#[test]
fn test_in_memory_has_no_snapshot() {
    let store = Store::in_memory(Config::default()).unwrap();
    store.nodes().create("volatile").unwrap();

    assert_eq!(store.snapshot_path(), None);
    store.flush().unwrap();
    store.close().unwrap();
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_close_writes_and_reopen_restores() {
    let tmp = setup();

    {
        let store = Store::open(config_at(tmp.path())).unwrap();
        let id = store.nodes().create("persisted").unwrap();
        store.value().set(id, "root").unwrap();
        store.alt().set(id, 1, 2).unwrap();
        store.sup().set(id, 3, b"sup").unwrap();
        store.chars().set(id, 4, b'c').unwrap();
        store.hash().set(id, "k", 5u64).unwrap();
        store.blob().set(id, b'B', vec![9u8; 3000], 0).unwrap();
        store.close().unwrap();
    }

    assert!(tmp.path().join("nodes.snapshot").exists());

    let store = Store::open(config_at(tmp.path())).unwrap();
    let id = store.nodes().resolve("persisted").unwrap();
    assert_eq!(
        store.value().get(id, Decode::Text).unwrap(),
        Some(Value::Text("root".to_string()))
    );
    assert_eq!(store.alt().get(id, 1), Some(2));
    assert_eq!(store.chars().get(id, 4), Some(b'c'));
    assert_eq!(
        store.hash().get(id, "k", Decode::Integer).unwrap(),
        Some(Value::Integer(5))
    );
    assert_eq!(store.blob().size(id, b'B', 0), 3000);
}

#[test]
fn test_allocation_continues_after_reopen() {
    let tmp = setup();

    let first = {
        let store = Store::open(config_at(tmp.path())).unwrap();
        let id = store.nodes().create("one").unwrap();
        store.close().unwrap();
        id
    };

    let store = Store::open(config_at(tmp.path())).unwrap();
    let second = store.nodes().create("two").unwrap();
    assert!(second > first);
}

#[test]
fn test_manual_policy_skips_close() {
    let tmp = setup();
    let config = Config::builder()
        .data_dir(tmp.path())
        .flush_policy(FlushPolicy::Manual)
        .build();

    let store = Store::open(config).unwrap();
    store.nodes().create("unsaved").unwrap();
    store.close().unwrap();

    assert!(!tmp.path().join("nodes.snapshot").exists());
}

#[test]
fn test_manual_flush() {
    let tmp = setup();
    let config = Config::builder()
        .data_dir(tmp.path())
        .flush_policy(FlushPolicy::Manual)
        .build();

    let store = Store::open(config.clone()).unwrap();
    store.nodes().create("saved").unwrap();
    store.flush().unwrap();
    assert!(!store.host().is_dirty());
    drop(store);

    let store = Store::open(config).unwrap();
    assert!(store.nodes().exists("saved"));
}

#[test]
fn test_clean_flush_leaves_file_alone() {
    let tmp = setup();
    let store = Store::open(config_at(tmp.path())).unwrap();
    store.nodes().create("n").unwrap();
    store.flush().unwrap();

    let path = tmp.path().join("nodes.snapshot");
    let before = fs::read(&path).unwrap();
    fs::write(&path, b"sentinel").unwrap();

    // Nothing changed since the last flush
    store.flush().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"sentinel");

    fs::write(&path, &before).unwrap();
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_corrupted_snapshot_rejected() {
    let tmp = setup();
    {
        let store = Store::open(config_at(tmp.path())).unwrap();
        store.nodes().create("n").unwrap();
        store.close().unwrap();
    }

    let path = tmp.path().join("nodes.snapshot");
    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xff;
    fs::write(&path, bytes).unwrap();

    let result = Store::open(config_at(tmp.path()));
    assert!(matches!(result, Err(NodeError::Corruption(_))));
}

#[test]
fn test_garbage_snapshot_rejected() {
    let tmp = setup();
    fs::write(tmp.path().join("nodes.snapshot"), b"not a snapshot").unwrap();

    let result = Store::open(config_at(tmp.path()));
    assert!(matches!(result, Err(NodeError::Corruption(_))));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_zero_chunk_size_rejected() {
    let config = Config::builder().blob_chunk_size(0).build();
    assert!(matches!(Store::in_memory(config), Err(NodeError::Config(_))));
}

#[test]
fn test_zero_name_size_rejected() {
    let tmp = setup();
    let config = Config::builder()
        .data_dir(tmp.path())
        .max_name_size(0)
        .build();
    assert!(matches!(Store::open(config), Err(NodeError::Config(_))));
}
