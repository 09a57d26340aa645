//! In-memory host
//!
//! BTreeMap-based node storage with a RwLock for concurrency.
//!
//! Each primitive call takes the lock for its own duration only, so walks
//! built on top see a live view rather than a snapshot.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{NodeError, Result};

use super::{NodeId, NodePrimitive, Tag};

/// Everything the host stores, in serializable form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostState {
    /// Identity handed to the next anonymous or named allocation
    next_id: u64,

    /// Name → identity
    names: BTreeMap<String, NodeId>,

    /// Identity → per-node namespaces
    nodes: BTreeMap<NodeId, NodeRecord>,
}

impl HostState {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// The sibling namespaces of one node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NodeRecord {
    name: Option<String>,
    value: Option<Vec<u8>>,
    alt: BTreeMap<u64, u64>,
    sup: BTreeMap<u64, Vec<u8>>,
    chars: BTreeMap<u64, u8>,
    hash: BTreeMap<String, Vec<u8>>,
    blobs: BTreeMap<(Tag, u64), Vec<u8>>,
}

/// Limits copied out of the config when the host is built
#[derive(Debug, Clone, Copy)]
struct HostLimits {
    max_value_size: usize,
    max_name_size: usize,
    blob_chunk_size: usize,
}

/// Host that keeps every node in memory
pub struct MemoryHost {
    state: RwLock<HostState>,
    limits: HostLimits,

    /// Set by every mutation, cleared after a successful snapshot
    dirty: AtomicBool,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new(config: &Config) -> Self {
        let state = HostState {
            next_id: config.word_width.first_node_id(),
            ..HostState::default()
        };
        Self::from_state(state, config)
    }

    /// Rebuild a host from a saved state
    pub fn from_state(state: HostState, config: &Config) -> Self {
        Self {
            state: RwLock::new(state),
            limits: HostLimits {
                max_value_size: config.max_value_size,
                max_name_size: config.max_name_size,
                blob_chunk_size: config.blob_chunk_size.max(1),
            },
            dirty: AtomicBool::new(false),
        }
    }

    /// Copy of the current state (for snapshots)
    pub fn state(&self) -> HostState {
        self.state.read().clone()
    }

    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn mark_clean(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_value(&self, raw: &[u8]) -> Result<()> {
        if raw.len() > self.limits.max_value_size {
            return Err(NodeError::ValueTooLarge {
                size: raw.len(),
                limit: self.limits.max_value_size,
            });
        }
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.len() > self.limits.max_name_size {
            return Err(NodeError::KeyTooLong {
                len: name.len(),
                limit: self.limits.max_name_size,
            });
        }
        Ok(())
    }

    /// Run `f` against a node's record, materializing the node
    fn with_record_mut<T>(&self, id: NodeId, f: impl FnOnce(&mut NodeRecord) -> T) -> T {
        let mut state = self.state.write();
        let out = f(state.nodes.entry(id).or_default());
        self.mark_dirty();
        out
    }

    /// Run `f` against a node's record if the node exists
    fn with_record<T>(&self, id: NodeId, f: impl FnOnce(&NodeRecord) -> Option<T>) -> Option<T> {
        let state = self.state.read();
        state.nodes.get(&id).and_then(f)
    }

    /// Drop a key from one namespace of an existing node
    fn remove_from(&self, id: NodeId, f: impl FnOnce(&mut NodeRecord) -> bool) {
        let mut state = self.state.write();
        if let Some(record) = state.nodes.get_mut(&id) {
            if f(record) {
                self.mark_dirty();
            }
        }
    }
}

fn first_key<V>(map: &BTreeMap<u64, V>) -> Option<u64> {
    map.keys().next().copied()
}

fn last_key<V>(map: &BTreeMap<u64, V>) -> Option<u64> {
    map.keys().next_back().copied()
}

fn key_after<V>(map: &BTreeMap<u64, V>, idx: u64) -> Option<u64> {
    map.range((Excluded(idx), Unbounded)).next().map(|(k, _)| *k)
}

fn key_before<V>(map: &BTreeMap<u64, V>, idx: u64) -> Option<u64> {
    map.range(..idx).next_back().map(|(k, _)| *k)
}

impl NodePrimitive for MemoryHost {
    // =========================================================================
    // Identity
    // =========================================================================

    fn allocate(&self, name: Option<&str>) -> Result<NodeId> {
        if let Some(name) = name {
            self.check_name(name)?;
        }

        let mut state = self.state.write();
        if let Some(existing) = name.and_then(|n| state.names.get(n)) {
            return Ok(*existing);
        }

        // Skip identities that were materialized by a direct write
        let mut id = NodeId(state.next_id);
        while state.nodes.contains_key(&id) {
            id = NodeId(id.0.wrapping_add(1));
        }
        state.next_id = id.0.wrapping_add(1);

        let record = NodeRecord {
            name: name.map(str::to_string),
            ..NodeRecord::default()
        };
        state.nodes.insert(id, record);
        if let Some(name) = name {
            state.names.insert(name.to_string(), id);
        }
        self.mark_dirty();

        Ok(id)
    }

    fn lookup_name(&self, name: &str) -> Option<NodeId> {
        self.state.read().names.get(name).copied()
    }

    fn lookup_id(&self, id: NodeId) -> Option<NodeId> {
        self.state.read().nodes.contains_key(&id).then_some(id)
    }

    fn kill(&self, id: NodeId) {
        let mut state = self.state.write();
        if let Some(record) = state.nodes.remove(&id) {
            if let Some(name) = record.name {
                state.names.remove(&name);
            }
            self.mark_dirty();
        }
    }

    fn name(&self, id: NodeId) -> Option<String> {
        self.with_record(id, |r| r.name.clone())
    }

    /// An empty name removes the node's name
    fn rename(&self, id: NodeId, name: &str) -> Result<()> {
        self.check_name(name)?;

        let mut state = self.state.write();
        if let Some(owner) = state.names.get(name) {
            if *owner != id {
                return Err(NodeError::NameTaken(name.to_string()));
            }
        }

        let record = state.nodes.entry(id).or_default();
        let previous = record.name.take();
        if !name.is_empty() {
            record.name = Some(name.to_string());
        }

        if let Some(previous) = previous {
            state.names.remove(&previous);
        }
        if !name.is_empty() {
            state.names.insert(name.to_string(), id);
        }
        self.mark_dirty();

        Ok(())
    }

    fn node_first(&self) -> Option<NodeId> {
        self.state.read().nodes.keys().next().copied()
    }

    fn node_last(&self) -> Option<NodeId> {
        self.state.read().nodes.keys().next_back().copied()
    }

    fn node_next(&self, id: NodeId) -> Option<NodeId> {
        let state = self.state.read();
        let next = state.nodes.range((Excluded(id), Unbounded)).next();
        next.map(|(k, _)| *k)
    }

    fn node_prev(&self, id: NodeId) -> Option<NodeId> {
        let state = self.state.read();
        let prev = state.nodes.range(..id).next_back();
        prev.map(|(k, _)| *k)
    }

    // =========================================================================
    // Scalar value
    // =========================================================================

    fn value_exists(&self, id: NodeId) -> bool {
        self.with_record(id, |r| r.value.as_ref().map(|_| ())).is_some()
    }

    fn value_read(&self, id: NodeId) -> Option<Vec<u8>> {
        self.with_record(id, |r| r.value.clone())
    }

    fn value_write(&self, id: NodeId, raw: &[u8]) -> Result<()> {
        self.check_value(raw)?;
        self.with_record_mut(id, |r| r.value = Some(raw.to_vec()));
        Ok(())
    }

    fn value_delete(&self, id: NodeId) {
        self.remove_from(id, |r| r.value.take().is_some());
    }

    // =========================================================================
    // Alt
    // =========================================================================

    fn alt_read(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| r.alt.get(&idx).copied())
    }

    fn alt_write(&self, id: NodeId, idx: u64, value: u64) -> Result<()> {
        self.with_record_mut(id, |r| r.alt.insert(idx, value));
        Ok(())
    }

    fn alt_delete(&self, id: NodeId, idx: u64) {
        self.remove_from(id, |r| r.alt.remove(&idx).is_some());
    }

    fn alt_first(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| first_key(&r.alt))
    }

    fn alt_last(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| last_key(&r.alt))
    }

    fn alt_next(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_after(&r.alt, idx))
    }

    fn alt_prev(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_before(&r.alt, idx))
    }

    // =========================================================================
    // Sup
    // =========================================================================

    fn sup_read(&self, id: NodeId, idx: u64) -> Option<Vec<u8>> {
        self.with_record(id, |r| r.sup.get(&idx).cloned())
    }

    fn sup_write(&self, id: NodeId, idx: u64, raw: &[u8]) -> Result<()> {
        self.check_value(raw)?;
        self.with_record_mut(id, |r| r.sup.insert(idx, raw.to_vec()));
        Ok(())
    }

    fn sup_delete(&self, id: NodeId, idx: u64) {
        self.remove_from(id, |r| r.sup.remove(&idx).is_some());
    }

    fn sup_first(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| first_key(&r.sup))
    }

    fn sup_last(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| last_key(&r.sup))
    }

    fn sup_next(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_after(&r.sup, idx))
    }

    fn sup_prev(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_before(&r.sup, idx))
    }

    // =========================================================================
    // Char
    // =========================================================================

    fn char_read(&self, id: NodeId, idx: u64) -> Option<u8> {
        self.with_record(id, |r| r.chars.get(&idx).copied())
    }

    fn char_write(&self, id: NodeId, idx: u64, value: u8) -> Result<()> {
        self.with_record_mut(id, |r| r.chars.insert(idx, value));
        Ok(())
    }

    fn char_delete(&self, id: NodeId, idx: u64) {
        self.remove_from(id, |r| r.chars.remove(&idx).is_some());
    }

    fn char_first(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| first_key(&r.chars))
    }

    fn char_last(&self, id: NodeId) -> Option<u64> {
        self.with_record(id, |r| last_key(&r.chars))
    }

    fn char_next(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_after(&r.chars, idx))
    }

    fn char_prev(&self, id: NodeId, idx: u64) -> Option<u64> {
        self.with_record(id, |r| key_before(&r.chars, idx))
    }

    // =========================================================================
    // Hash
    // =========================================================================

    fn hash_read(&self, id: NodeId, key: &str) -> Option<Vec<u8>> {
        self.with_record(id, |r| r.hash.get(key).cloned())
    }

    fn hash_write(&self, id: NodeId, key: &str, raw: &[u8]) -> Result<()> {
        self.check_name(key)?;
        self.check_value(raw)?;
        self.with_record_mut(id, |r| r.hash.insert(key.to_string(), raw.to_vec()));
        Ok(())
    }

    fn hash_delete(&self, id: NodeId, key: &str) {
        self.remove_from(id, |r| r.hash.remove(key).is_some());
    }

    fn hash_first(&self, id: NodeId) -> Option<String> {
        self.with_record(id, |r| r.hash.keys().next().cloned())
    }

    fn hash_last(&self, id: NodeId) -> Option<String> {
        self.with_record(id, |r| r.hash.keys().next_back().cloned())
    }

    fn hash_next(&self, id: NodeId, key: &str) -> Option<String> {
        self.with_record(id, |r| {
            r.hash
                .range::<str, _>((Excluded(key), Unbounded))
                .next()
                .map(|(k, _)| k.clone())
        })
    }

    fn hash_prev(&self, id: NodeId, key: &str) -> Option<String> {
        self.with_record(id, |r| {
            r.hash
                .range::<str, _>((Unbounded, Excluded(key)))
                .next_back()
                .map(|(k, _)| k.clone())
        })
    }

    // =========================================================================
    // Blob
    // =========================================================================

    fn blob_size(&self, id: NodeId, tag: Tag, start: u64) -> usize {
        self.with_record(id, |r| r.blobs.get(&(tag, start)).map(Vec::len))
            .unwrap_or(0)
    }

    /// Returns whole chunks: the stored bytes zero-padded to a multiple of
    /// the chunk size
    fn blob_read(&self, id: NodeId, tag: Tag, start: u64) -> Option<Vec<u8>> {
        let chunk = self.limits.blob_chunk_size;
        self.with_record(id, |r| {
            r.blobs.get(&(tag, start)).map(|data| {
                let padded_len = data.len().div_ceil(chunk).max(1) * chunk;
                let mut buf = Vec::with_capacity(padded_len);
                buf.extend_from_slice(data);
                buf.resize(padded_len, 0);
                buf
            })
        })
    }

    fn blob_write(&self, id: NodeId, tag: Tag, start: u64, raw: &[u8]) -> Result<()> {
        self.with_record_mut(id, |r| r.blobs.insert((tag, start), raw.to_vec()));
        Ok(())
    }

    fn blob_delete(&self, id: NodeId, tag: Tag, start: u64) {
        self.remove_from(id, |r| r.blobs.remove(&(tag, start)).is_some());
    }
}
