//! Hash namespace
//!
//! Map[string] of byte strings. Keys are bounded by the host's
//! `max_name_size` (512 by default).
//!
//! Walks are value-checked: a hash entry only counts as present when it
//! reads back, so a walk whose seed key reads as absent yields nothing.

use crate::codec::{self, Decode, Value};
use crate::config::WordWidth;
use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive};
use crate::walk::{Cursor, Presence, Walk};

use super::decode_with;

/// Walk over a node's hash entries (raw bytes)
pub type HashWalk<'a, P> = Walk<'a, P, NodeId, String, Vec<u8>>;

/// Handle on the hash namespace
pub struct Hash<'a, P: ?Sized> {
    host: &'a P,
    width: WordWidth,
}

impl<'a, P: ?Sized> Clone for Hash<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Hash<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Hash<'a, P> {
    pub fn new(host: &'a P, width: WordWidth) -> Self {
        Self { host, width }
    }

    pub fn get(&self, node: NodeId, key: &str, as_: Decode) -> Result<Option<Value>> {
        Ok(self
            .host
            .hash_read(node, key)
            .map(|raw| decode_with(self.host, raw, as_, self.width)))
    }

    /// Store a value; integers go through the fixed-width encoding
    pub fn set(&self, node: NodeId, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        tracing::trace!("hash.set({}, {:?}) as {}", node, key, value.kind());
        self.host
            .hash_write(node, key, &codec::encode(&value, self.width))
    }

    pub fn remove(&self, node: NodeId, key: &str) {
        self.host.hash_delete(node, key);
    }

    pub fn iter_forward(&self, node: NodeId) -> HashWalk<'a, P> {
        Walk::forward(self.host, node, Self::cursor(), Presence::Value)
    }

    pub fn iter_backward(&self, node: NodeId) -> HashWalk<'a, P> {
        Walk::backward(self.host, node, Self::cursor(), Presence::Value)
    }

    /// Every entry in every representation, keys and native values aligned
    pub fn repr(&self, node: NodeId) -> Result<String> {
        let entries: Vec<(String, Vec<u8>)> = self
            .iter_forward(node)
            .filter_map(|(key, raw)| raw.map(|raw| (key, raw)))
            .collect();

        if entries.is_empty() {
            return Err(NodeError::MissingAttribute(format!(
                "hash.repr({}) : the node has no hashvals",
                node
            )));
        }

        let natives: Vec<String> = entries
            .iter()
            .map(|(_, raw)| decode_with(self.host, raw.clone(), Decode::Native, self.width).to_string())
            .collect();
        let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        let native_width = natives.iter().map(String::len).max().unwrap_or(0);

        let lines: Vec<String> = entries
            .iter()
            .zip(&natives)
            .enumerate()
            .map(|(i, ((key, raw), native))| {
                let int = codec::decode_integer(raw, self.width);
                format!(
                    "[{}] {:<kw$} -> {:<nw$} : buffer={}, text={:?}, int={:#x}({})",
                    i,
                    key,
                    native,
                    codec::escape(raw),
                    codec::decode_text(raw),
                    int,
                    int,
                    kw = key_width,
                    nw = native_width,
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn cursor() -> Cursor<P, NodeId, String, Vec<u8>> {
        Cursor {
            first: |h, node| h.hash_first(node),
            last: |h, node| h.hash_last(node),
            next: |h, node, key| h.hash_next(node, key),
            prev: |h, node, key| h.hash_prev(node, key),
            read: |h, node, key| h.hash_read(node, key),
        }
    }
}
