//! Tests for the hash namespace
//!
//! Tests verify:
//! - Typed round trips (buffer, text, integer)
//! - One stored value read through every decode
//! - Remove and absent keys
//! - Key length limit

use bytes::Bytes;
use nodestore::{Config, Decode, NodeError, NodeId, Store, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_node() -> (Store, NodeId) {
    let store = Store::in_memory(Config::default()).unwrap();
    let id = store.nodes().create("alpha").unwrap();
    (store, id)
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_integer_round_trip() {
    let (store, id) = setup_node();
    store.hash().set(id, "k1", 42u64).unwrap();

    assert_eq!(
        store.hash().get(id, "k1", Decode::Integer).unwrap(),
        Some(Value::Integer(42))
    );
}

#[test]
fn test_integer_read_as_text_uses_same_bytes() {
    let (store, id) = setup_node();
    store.hash().set(id, "k1", 42u64).unwrap();

    // 42 is '*', followed by NUL padding
    assert_eq!(
        store.hash().get(id, "k1", Decode::Text).unwrap(),
        Some(Value::Text("*".to_string()))
    );

    let raw = store.hash().get(id, "k1", Decode::Buffer).unwrap().unwrap();
    assert_eq!(raw.as_bytes().unwrap(), &[42, 0, 0, 0, 0, 0, 0, 0][..]);
}

#[test]
fn test_text_round_trip() {
    let (store, id) = setup_node();
    store.hash().set(id, "name", "value").unwrap();

    assert_eq!(
        store.hash().get(id, "name", Decode::Text).unwrap(),
        Some(Value::Text("value".to_string()))
    );
}

#[test]
fn test_buffer_round_trip() {
    let (store, id) = setup_node();
    store.hash().set(id, "blob", &[1u8, 0, 2][..]).unwrap();

    assert_eq!(
        store.hash().get(id, "blob", Decode::Buffer).unwrap(),
        Some(Value::Buffer(Bytes::from_static(&[1, 0, 2])))
    );
}

#[test]
fn test_empty_key() {
    let (store, id) = setup_node();
    store.hash().set(id, "", "empty").unwrap();

    assert_eq!(
        store.hash().get(id, "", Decode::Text).unwrap(),
        Some(Value::Text("empty".to_string()))
    );
}

// =============================================================================
// Absent / Remove Tests
// =============================================================================

#[test]
fn test_absent_key_every_decode() {
    let (store, id) = setup_node();

    for decode in [Decode::Native, Decode::Buffer, Decode::Text, Decode::Integer] {
        assert_eq!(store.hash().get(id, "missing", decode).unwrap(), None);
    }
}

#[test]
fn test_remove() {
    let (store, id) = setup_node();
    store.hash().set(id, "k", 1u64).unwrap();
    store.hash().set(id, "other", 2u64).unwrap();

    store.hash().remove(id, "k");

    assert_eq!(store.hash().get(id, "k", Decode::Integer).unwrap(), None);
    let keys: Vec<String> = store.hash().iter_forward(id).keys().collect();
    assert_eq!(keys, vec!["other"]);
}

// =============================================================================
// Limit Tests
// =============================================================================

#[test]
fn test_key_too_long() {
    let (store, id) = setup_node();
    let key = "k".repeat(513);

    let result = store.hash().set(id, &key, 1u64);
    assert!(matches!(result, Err(NodeError::KeyTooLong { len: 513, .. })));
}

#[test]
fn test_key_at_limit() {
    let (store, id) = setup_node();
    let key = "k".repeat(512);

    store.hash().set(id, &key, 1u64).unwrap();
    assert_eq!(
        store.hash().get(id, &key, Decode::Integer).unwrap(),
        Some(Value::Integer(1))
    );
}
