//! Char namespace
//!
//! Sparse array[u64] of u8.

use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive};
use crate::walk::{Cursor, Presence, Walk};

pub type CharWalk<'a, P> = Walk<'a, P, NodeId, u64, u8>;

/// Handle on the char namespace
pub struct Chars<'a, P: ?Sized> {
    host: &'a P,
}

impl<'a, P: ?Sized> Clone for Chars<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Chars<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Chars<'a, P> {
    pub fn new(host: &'a P) -> Self {
        Self { host }
    }

    pub fn get(&self, node: NodeId, idx: u64) -> Option<u8> {
        self.host.char_read(node, idx)
    }

    pub fn set(&self, node: NodeId, idx: u64, value: u8) -> Result<()> {
        self.host.char_write(node, idx, value)
    }

    pub fn remove(&self, node: NodeId, idx: u64) {
        self.host.char_delete(node, idx);
    }

    pub fn iter_forward(&self, node: NodeId) -> CharWalk<'a, P> {
        Walk::forward(self.host, node, Self::cursor(), Presence::Key)
    }

    pub fn iter_backward(&self, node: NodeId) -> CharWalk<'a, P> {
        Walk::backward(self.host, node, Self::cursor(), Presence::Key)
    }

    pub fn repr(&self, node: NodeId) -> Result<String> {
        let lines: Vec<String> = self
            .iter_forward(node)
            .map(|(idx, value)| match value {
                Some(b) => format!("{:x} : {:#04x} ({})", idx, b, std::ascii::escape_default(b)),
                None => format!("{:x} : <absent>", idx),
            })
            .collect();

        if lines.is_empty() {
            return Err(NodeError::MissingAttribute(format!(
                "char.repr({}) : the node has no charvals",
                node
            )));
        }
        Ok(lines.join("\n"))
    }

    fn cursor() -> Cursor<P, NodeId, u64, u8> {
        Cursor {
            first: |h, node| h.char_first(node),
            last: |h, node| h.char_last(node),
            next: |h, node, idx| h.char_next(node, *idx),
            prev: |h, node, idx| h.char_prev(node, *idx),
            read: |h, node, idx| h.char_read(node, *idx),
        }
    }
}
