//! Alt namespace
//!
//! Sparse array[u64] of u64.

use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive};
use crate::walk::{Cursor, Presence, Walk};

/// Walk over a node's alt entries
pub type AltWalk<'a, P> = Walk<'a, P, NodeId, u64, u64>;

/// Handle on the alt namespace
pub struct Alt<'a, P: ?Sized> {
    host: &'a P,
}

impl<'a, P: ?Sized> Clone for Alt<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Alt<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Alt<'a, P> {
    pub fn new(host: &'a P) -> Self {
        Self { host }
    }

    pub fn get(&self, node: NodeId, idx: u64) -> Option<u64> {
        self.host.alt_read(node, idx)
    }

    pub fn set(&self, node: NodeId, idx: u64, value: u64) -> Result<()> {
        tracing::trace!("alt.set({}, {:#x}) = {:#x}", node, idx, value);
        self.host.alt_write(node, idx, value)
    }

    pub fn remove(&self, node: NodeId, idx: u64) {
        self.host.alt_delete(node, idx);
    }

    pub fn iter_forward(&self, node: NodeId) -> AltWalk<'a, P> {
        Walk::forward(self.host, node, Self::cursor(), Presence::Key)
    }

    pub fn iter_backward(&self, node: NodeId) -> AltWalk<'a, P> {
        Walk::backward(self.host, node, Self::cursor(), Presence::Key)
    }

    /// One `<idx> : <value hex> (<value dec>)` line per entry
    pub fn repr(&self, node: NodeId) -> Result<String> {
        let lines: Vec<String> = self
            .iter_forward(node)
            .map(|(idx, value)| match value {
                Some(v) => format!("{:x} : {:#x} ({})", idx, v, v),
                None => format!("{:x} : <absent>", idx),
            })
            .collect();

        if lines.is_empty() {
            return Err(NodeError::MissingAttribute(format!(
                "alt.repr({}) : the node has no altvals",
                node
            )));
        }
        Ok(lines.join("\n"))
    }

    fn cursor() -> Cursor<P, NodeId, u64, u64> {
        Cursor {
            first: |h, node| h.alt_first(node),
            last: |h, node| h.alt_last(node),
            next: |h, node, idx| h.alt_next(node, *idx),
            prev: |h, node, idx| h.alt_prev(node, *idx),
            read: |h, node, idx| h.alt_read(node, *idx),
        }
    }
}
