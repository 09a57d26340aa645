//! Host Primitive Module
//!
//! The fixed interface this crate is built on top of.
//!
//! ## Responsibilities
//! - Allocate, look up, rename and kill nodes
//! - Raw per-namespace accessors (read/write/delete at a key)
//! - Per-namespace addressing (first/last/next/prev key)
//!
//! Everything above this trait (typed decoding, enumeration, formatting)
//! is host independent. A host implementation is chosen once, when a
//! `Store` is opened, and never branched on afterwards.
//!
//! ## Namespaces per node
//! ```text
//! ┌──────────┬─────────────────┬───────────────┐
//! │ Name     │ Key             │ Value         │
//! ├──────────┼─────────────────┼───────────────┤
//! │ value    │ (none)          │ bytes         │
//! │ alt      │ u64             │ u64           │
//! │ sup      │ u64             │ bytes ≤ 1024  │
//! │ char     │ u64             │ u8            │
//! │ hash     │ string ≤ 512    │ bytes ≤ 1024  │
//! │ blob     │ (tag, start)    │ bytes         │
//! └──────────┴─────────────────┴───────────────┘
//! ```

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::Value;
use crate::error::Result;

pub use memory::{HostState, MemoryHost};

// =============================================================================
// Identity Types
// =============================================================================

/// Opaque, totally ordered node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// A way of naming a node: by name or by identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Name(String),
    Id(NodeId),
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        NodeRef::Name(name.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(name: String) -> Self {
        NodeRef::Name(name)
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl From<u64> for NodeRef {
    fn from(id: u64) -> Self {
        NodeRef::Id(NodeId(id))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Name(name) => write!(f, "{:?}", name),
            NodeRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Discriminator partitioning a node's blob namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag(pub u8);

impl From<u8> for Tag {
    fn from(tag: u8) -> Self {
        Tag(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

// =============================================================================
// Primitive Interface
// =============================================================================

/// Raw node storage exposed by a host
///
/// Reads return `None` for absent entries. Addressing primitives return
/// `None` when there is no such key (empty namespace, or stepping past an
/// end). Writes to an identity that was never allocated materialize it.
pub trait NodePrimitive {
    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------
    fn allocate(&self, name: Option<&str>) -> Result<NodeId>;
    fn lookup_name(&self, name: &str) -> Option<NodeId>;
    fn lookup_id(&self, id: NodeId) -> Option<NodeId>;
    fn kill(&self, id: NodeId);
    fn name(&self, id: NodeId) -> Option<String>;
    fn rename(&self, id: NodeId, name: &str) -> Result<()>;

    fn node_first(&self) -> Option<NodeId>;
    fn node_last(&self) -> Option<NodeId>;
    fn node_next(&self, id: NodeId) -> Option<NodeId>;
    fn node_prev(&self, id: NodeId) -> Option<NodeId>;

    // -------------------------------------------------------------------------
    // Scalar value
    // -------------------------------------------------------------------------
    fn value_exists(&self, id: NodeId) -> bool;
    fn value_read(&self, id: NodeId) -> Option<Vec<u8>>;
    fn value_write(&self, id: NodeId, raw: &[u8]) -> Result<()>;
    fn value_delete(&self, id: NodeId);

    // -------------------------------------------------------------------------
    // Alt: u64 -> u64
    // -------------------------------------------------------------------------
    fn alt_read(&self, id: NodeId, idx: u64) -> Option<u64>;
    fn alt_write(&self, id: NodeId, idx: u64, value: u64) -> Result<()>;
    fn alt_delete(&self, id: NodeId, idx: u64);
    fn alt_first(&self, id: NodeId) -> Option<u64>;
    fn alt_last(&self, id: NodeId) -> Option<u64>;
    fn alt_next(&self, id: NodeId, idx: u64) -> Option<u64>;
    fn alt_prev(&self, id: NodeId, idx: u64) -> Option<u64>;

    // -------------------------------------------------------------------------
    // Sup: u64 -> bytes
    // -------------------------------------------------------------------------
    fn sup_read(&self, id: NodeId, idx: u64) -> Option<Vec<u8>>;
    fn sup_write(&self, id: NodeId, idx: u64, raw: &[u8]) -> Result<()>;
    fn sup_delete(&self, id: NodeId, idx: u64);
    fn sup_first(&self, id: NodeId) -> Option<u64>;
    fn sup_last(&self, id: NodeId) -> Option<u64>;
    fn sup_next(&self, id: NodeId, idx: u64) -> Option<u64>;
    fn sup_prev(&self, id: NodeId, idx: u64) -> Option<u64>;

    // -------------------------------------------------------------------------
    // Char: u64 -> u8
    // -------------------------------------------------------------------------
    fn char_read(&self, id: NodeId, idx: u64) -> Option<u8>;
    fn char_write(&self, id: NodeId, idx: u64, value: u8) -> Result<()>;
    fn char_delete(&self, id: NodeId, idx: u64);
    fn char_first(&self, id: NodeId) -> Option<u64>;
    fn char_last(&self, id: NodeId) -> Option<u64>;
    fn char_next(&self, id: NodeId, idx: u64) -> Option<u64>;
    fn char_prev(&self, id: NodeId, idx: u64) -> Option<u64>;

    // -------------------------------------------------------------------------
    // Hash: string -> bytes
    // -------------------------------------------------------------------------
    fn hash_read(&self, id: NodeId, key: &str) -> Option<Vec<u8>>;
    fn hash_write(&self, id: NodeId, key: &str, raw: &[u8]) -> Result<()>;
    fn hash_delete(&self, id: NodeId, key: &str);
    fn hash_first(&self, id: NodeId) -> Option<String>;
    fn hash_last(&self, id: NodeId) -> Option<String>;
    fn hash_next(&self, id: NodeId, key: &str) -> Option<String>;
    fn hash_prev(&self, id: NodeId, key: &str) -> Option<String>;

    // -------------------------------------------------------------------------
    // Blob: (tag, start) -> bytes
    // -------------------------------------------------------------------------
    /// Exact number of bytes stored, 0 when absent
    fn blob_size(&self, id: NodeId, tag: Tag, start: u64) -> usize;

    /// Stored bytes; hosts may pad the buffer past `blob_size`
    fn blob_read(&self, id: NodeId, tag: Tag, start: u64) -> Option<Vec<u8>>;
    fn blob_write(&self, id: NodeId, tag: Tag, start: u64, raw: &[u8]) -> Result<()>;
    fn blob_delete(&self, id: NodeId, tag: Tag, start: u64);

    // -------------------------------------------------------------------------
    // Host-defined representation
    // -------------------------------------------------------------------------
    /// What `Decode::Native` yields for stored bytes
    fn native(&self, raw: Vec<u8>) -> Value {
        Value::Buffer(raw.into())
    }
}
