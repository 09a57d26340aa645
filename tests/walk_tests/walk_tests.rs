//! Tests for namespace walks
//!
//! Tests verify:
//! - Forward and backward walks visit the same keys in reverse order
//! - Walks over empty namespaces yield nothing
//! - Single-entry walks yield the entry once
//! - Walks are lazy and stop where the consumer stops
//! - Hash walks are value-checked

use nodestore::walk::{Cursor, Presence, Walk};
use nodestore::{Config, MemoryHost, NodeId, NodePrimitive, Store};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_node() -> (Store, NodeId) {
    let store = Store::in_memory(Config::default()).unwrap();
    let id = store.nodes().create("walked").unwrap();
    (store, id)
}

fn reversed<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

// =============================================================================
// Direction Tests
// =============================================================================

#[test]
fn test_alt_forward_backward_reverse() {
    let (store, id) = setup_node();
    for idx in [30u64, 10, 20, 40] {
        store.alt().set(id, idx, idx * 2).unwrap();
    }

    let forward: Vec<_> = store.alt().iter_forward(id).collect();
    let backward: Vec<_> = store.alt().iter_backward(id).collect();

    assert_eq!(
        forward,
        vec![(10, Some(20)), (20, Some(40)), (30, Some(60)), (40, Some(80))]
    );
    assert_eq!(forward, reversed(backward));
}

#[test]
fn test_sup_forward_backward_reverse() {
    let (store, id) = setup_node();
    store.sup().set(id, 3, b"three").unwrap();
    store.sup().set(id, 1, b"one").unwrap();
    store.sup().set(id, 2, b"two").unwrap();

    let forward: Vec<u64> = store.sup().iter_forward(id).keys().collect();
    let backward: Vec<u64> = store.sup().iter_backward(id).keys().collect();

    assert_eq!(forward, vec![1, 2, 3]);
    assert_eq!(backward, vec![3, 2, 1]);
}

#[test]
fn test_char_forward_backward_reverse() {
    let (store, id) = setup_node();
    for (idx, b) in [(5u64, b'e'), (1, b'a'), (3, b'c')] {
        store.chars().set(id, idx, b).unwrap();
    }

    let forward: Vec<_> = store.chars().iter_forward(id).collect();
    let backward: Vec<_> = store.chars().iter_backward(id).collect();

    assert_eq!(forward, vec![(1, Some(b'a')), (3, Some(b'c')), (5, Some(b'e'))]);
    assert_eq!(forward, reversed(backward));
}

#[test]
fn test_hash_forward_backward_reverse() {
    let (store, id) = setup_node();
    store.hash().set(id, "gamma", 3u64).unwrap();
    store.hash().set(id, "alpha", 1u64).unwrap();
    store.hash().set(id, "beta", 2u64).unwrap();

    let forward: Vec<String> = store.hash().iter_forward(id).keys().collect();
    let backward: Vec<String> = store.hash().iter_backward(id).keys().collect();

    assert_eq!(forward, vec!["alpha", "beta", "gamma"]);
    assert_eq!(forward, reversed(backward));
}

// =============================================================================
// Edge Case Tests
// =============================================================================

#[test]
fn test_empty_namespaces_yield_nothing() {
    let (store, id) = setup_node();

    assert_eq!(store.alt().iter_forward(id).count(), 0);
    assert_eq!(store.alt().iter_backward(id).count(), 0);
    assert_eq!(store.sup().iter_forward(id).count(), 0);
    assert_eq!(store.chars().iter_backward(id).count(), 0);
    assert_eq!(store.hash().iter_forward(id).count(), 0);
    assert_eq!(store.hash().iter_backward(id).count(), 0);
}

#[test]
fn test_walk_over_absent_node_yields_nothing() {
    let store = Store::in_memory(Config::default()).unwrap();

    assert_eq!(store.alt().iter_forward(NodeId(99)).count(), 0);
    assert_eq!(store.hash().iter_backward(NodeId(99)).count(), 0);
}

#[test]
fn test_single_entry_yielded_once() {
    let (store, id) = setup_node();
    store.alt().set(id, 0, 7).unwrap();

    assert_eq!(store.alt().iter_forward(id).collect::<Vec<_>>(), vec![(0, Some(7))]);
    assert_eq!(store.alt().iter_backward(id).collect::<Vec<_>>(), vec![(0, Some(7))]);
}

#[test]
fn test_extreme_keys() {
    let (store, id) = setup_node();
    store.alt().set(id, 0, 1).unwrap();
    store.alt().set(id, u64::MAX, 2).unwrap();

    let keys: Vec<u64> = store.alt().iter_forward(id).keys().collect();
    assert_eq!(keys, vec![0, u64::MAX]);
}

#[test]
fn test_walk_stops_where_consumer_stops() {
    let (store, id) = setup_node();
    for idx in 0..1000u64 {
        store.alt().set(id, idx, idx).unwrap();
    }

    let first_three: Vec<u64> = store.alt().iter_forward(id).keys().take(3).collect();
    assert_eq!(first_three, vec![0, 1, 2]);

    let last_two: Vec<u64> = store.alt().iter_backward(id).keys().take(2).collect();
    assert_eq!(last_two, vec![999, 998]);
}

// =============================================================================
// Presence Tests
// =============================================================================

/// Hash keys whose seed reads as absent, as some hosts report
fn hollow_hash_cursor() -> Cursor<MemoryHost, NodeId, String, Vec<u8>> {
    Cursor {
        first: |h, node| h.hash_first(node),
        last: |h, node| h.hash_last(node),
        next: |h, node, key| h.hash_next(node, key),
        prev: |h, node, key| h.hash_prev(node, key),
        read: |h, node, key| h.hash_read(node, key).filter(|raw| !raw.is_empty()),
    }
}

#[test]
fn test_value_presence_with_hollow_seed() {
    let (store, id) = setup_node();
    store.hash().set(id, "a", b"").unwrap();
    store.hash().set(id, "b", b"x").unwrap();

    let value_walk = Walk::forward(store.host(), id, hollow_hash_cursor(), Presence::Value);
    assert_eq!(value_walk.count(), 0);

    let key_walk = Walk::forward(store.host(), id, hollow_hash_cursor(), Presence::Key);
    let items: Vec<_> = key_walk.collect();
    assert_eq!(
        items,
        vec![("a".to_string(), None), ("b".to_string(), Some(b"x".to_vec()))]
    );
}
