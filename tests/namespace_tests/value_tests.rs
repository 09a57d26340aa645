//! Tests for the scalar value namespace
//!
//! Tests verify:
//! - Absent vs. present-but-empty
//! - Round trips per decode type
//! - Encoding follows the written value, decoding follows the request
//! - Remove clears existence
//! - Host size limit

use bytes::Bytes;
use nodestore::{Config, Decode, NodeError, NodeId, Store, Value, WordWidth};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_node() -> (Store, NodeId) {
    let store = Store::in_memory(Config::default()).unwrap();
    let id = store.nodes().create("scalar").unwrap();
    (store, id)
}

// =============================================================================
// Existence Tests
// =============================================================================

#[test]
fn test_get_absent_is_none_for_every_decode() {
    let (store, id) = setup_node();

    assert!(!store.value().exists(id));
    for decode in [Decode::Native, Decode::Buffer, Decode::Text, Decode::Integer] {
        assert_eq!(store.value().get(id, decode).unwrap(), None);
    }
}

#[test]
fn test_empty_value_is_present() {
    let (store, id) = setup_node();
    store.value().set(id, Vec::<u8>::new()).unwrap();

    assert!(store.value().exists(id));
    assert_eq!(
        store.value().get(id, Decode::Buffer).unwrap(),
        Some(Value::Buffer(Bytes::new()))
    );
}

#[test]
fn test_remove_clears_value() {
    let (store, id) = setup_node();
    store.value().set(id, "hello").unwrap();

    store.value().remove(id);

    assert!(!store.value().exists(id));
    assert_eq!(store.value().get(id, Decode::Text).unwrap(), None);
}

#[test]
fn test_remove_absent_is_fine() {
    let (store, id) = setup_node();
    store.value().remove(id);
    assert!(!store.value().exists(id));
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_buffer_round_trip() {
    let (store, id) = setup_node();
    store.value().set(id, &[0u8, 1, 2, 0xff][..]).unwrap();

    let value = store.value().get(id, Decode::Buffer).unwrap();
    assert_eq!(value, Some(Value::Buffer(Bytes::from_static(&[0, 1, 2, 0xff]))));
}

#[test]
fn test_text_round_trip() {
    let (store, id) = setup_node();
    store.value().set(id, "héllo wörld").unwrap();

    let value = store.value().get(id, Decode::Text).unwrap();
    assert_eq!(value, Some(Value::Text("héllo wörld".to_string())));
}

#[test]
fn test_integer_round_trip() {
    let (store, id) = setup_node();
    store.value().set(id, 0xdead_beef_cafe_u64).unwrap();

    let value = store.value().get(id, Decode::Integer).unwrap();
    assert_eq!(value, Some(Value::Integer(0xdead_beef_cafe)));
}

#[test]
fn test_native_is_raw_buffer() {
    let (store, id) = setup_node();
    store.value().set(id, "abc").unwrap();

    let value = store.value().get(id, Decode::Native).unwrap();
    assert_eq!(value, Some(Value::Buffer(Bytes::from_static(b"abc"))));
}

// =============================================================================
// Cross-Decode Tests
// =============================================================================

#[test]
fn test_integer_written_is_fixed_width() {
    let (store, id) = setup_node();
    store.value().set(id, 1u64).unwrap();

    let raw = store.value().get(id, Decode::Buffer).unwrap().unwrap();
    assert_eq!(raw.as_bytes().unwrap().len(), 8);
}

#[test]
fn test_integer_read_of_text() {
    let (store, id) = setup_node();
    store.value().set(id, "AB").unwrap();

    let value = store.value().get(id, Decode::Integer).unwrap();
    assert_eq!(value, Some(Value::Integer(0x4241)));
}

#[test]
fn test_text_read_of_integer() {
    let (store, id) = setup_node();
    store.value().set(id, 0x6968u64).unwrap();

    let value = store.value().get(id, Decode::Text).unwrap();
    assert_eq!(value, Some(Value::Text("hi".to_string())));
}

#[test]
fn test_narrow_word_width_truncates() {
    let store = Store::in_memory(Config::builder().word_width(WordWidth::W32).build()).unwrap();
    let id = store.nodes().create("narrow").unwrap();
    store.value().set(id, 0x1_0000_0001u64).unwrap();

    let raw = store.value().get(id, Decode::Buffer).unwrap().unwrap();
    assert_eq!(raw.as_bytes().unwrap().len(), 4);
    assert_eq!(store.value().get(id, Decode::Integer).unwrap(), Some(Value::Integer(1)));
}

// =============================================================================
// Limit Tests
// =============================================================================

#[test]
fn test_value_too_large() {
    let (store, id) = setup_node();

    let result = store.value().set(id, vec![0u8; 1025]);
    assert!(matches!(result, Err(NodeError::ValueTooLarge { size: 1025, limit: 1024 })));
    assert!(!store.value().exists(id));
}
