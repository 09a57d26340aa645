//! Sup namespace
//!
//! Sparse array[u64] of byte strings. The host bounds each slot at
//! `max_value_size` (1024 by default); that limit is not re-checked here.

use crate::codec::{self, Decode, Value};
use crate::config::WordWidth;
use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive};
use crate::walk::{Cursor, Presence, Walk};

use super::decode_with;

/// Walk over a node's supvals (raw bytes)
pub type SupWalk<'a, P> = Walk<'a, P, NodeId, u64, Vec<u8>>;

/// Handle on the sup namespace
pub struct Sup<'a, P: ?Sized> {
    host: &'a P,
    width: WordWidth,
}

impl<'a, P: ?Sized> Clone for Sup<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Sup<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Sup<'a, P> {
    pub fn new(host: &'a P, width: WordWidth) -> Self {
        Self { host, width }
    }

    /// Supval decoded as `Native`, `Buffer` or `Text`
    pub fn get(&self, node: NodeId, idx: u64, as_: Decode) -> Result<Option<Value>> {
        if as_ == Decode::Integer {
            return Err(NodeError::InvalidType(format!(
                "sup.get({}, {:#x}) : supvals cannot be decoded as {}",
                node,
                idx,
                as_.name()
            )));
        }
        Ok(self
            .host
            .sup_read(node, idx)
            .map(|raw| decode_with(self.host, raw, as_, self.width)))
    }

    /// Store a buffer or text; integers are rejected
    pub fn set(&self, node: NodeId, idx: u64, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if let Value::Integer(_) = value {
            return Err(NodeError::InvalidType(format!(
                "sup.set({}, {:#x}) : supvals cannot store an {}",
                node,
                idx,
                value.kind()
            )));
        }
        tracing::trace!("sup.set({}, {:#x}) as {}", node, idx, value.kind());
        self.host
            .sup_write(node, idx, &codec::encode(&value, self.width))
    }

    pub fn remove(&self, node: NodeId, idx: u64) {
        self.host.sup_delete(node, idx);
    }

    pub fn iter_forward(&self, node: NodeId) -> SupWalk<'a, P> {
        Walk::forward(self.host, node, Self::cursor(), Presence::Key)
    }

    pub fn iter_backward(&self, node: NodeId) -> SupWalk<'a, P> {
        Walk::backward(self.host, node, Self::cursor(), Presence::Key)
    }

    /// One `[<n>] <idx> : <bytes>` line per entry
    pub fn repr(&self, node: NodeId) -> Result<String> {
        let lines: Vec<String> = self
            .iter_forward(node)
            .enumerate()
            .map(|(i, (idx, raw))| {
                let shown = raw.as_deref().map(codec::escape).unwrap_or_else(|| "<absent>".to_string());
                format!("[{}] {:x} : {}", i, idx, shown)
            })
            .collect();

        if lines.is_empty() {
            return Err(NodeError::MissingAttribute(format!(
                "sup.repr({}) : the node has no supvals",
                node
            )));
        }
        Ok(lines.join("\n"))
    }

    fn cursor() -> Cursor<P, NodeId, u64, Vec<u8>> {
        Cursor {
            first: |h, node| h.sup_first(node),
            last: |h, node| h.sup_last(node),
            next: |h, node, idx| h.sup_next(node, *idx),
            prev: |h, node, idx| h.sup_prev(node, *idx),
            read: |h, node, idx| h.sup_read(node, *idx),
        }
    }
}
