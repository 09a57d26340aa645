//! Scalar value namespace
//!
//! One optional value per node. "No value" and "empty value" are distinct:
//! `get` returns `None` for the first and an empty buffer for the second.

use crate::codec::{self, Decode, Value};
use crate::config::WordWidth;
use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive};

use super::decode_with;

/// Handle on the scalar value namespace
pub struct Scalar<'a, P: ?Sized> {
    host: &'a P,
    width: WordWidth,
}

impl<'a, P: ?Sized> Clone for Scalar<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Scalar<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Scalar<'a, P> {
    pub fn new(host: &'a P, width: WordWidth) -> Self {
        Self { host, width }
    }

    pub fn exists(&self, node: NodeId) -> bool {
        self.host.value_exists(node)
    }

    /// Stored value decoded as requested, `None` if nothing is stored
    pub fn get(&self, node: NodeId, as_: Decode) -> Result<Option<Value>> {
        if !self.host.value_exists(node) {
            return Ok(None);
        }
        Ok(self
            .host
            .value_read(node)
            .map(|raw| decode_with(self.host, raw, as_, self.width)))
    }

    /// Store a value; integers go through the fixed-width encoding
    pub fn set(&self, node: NodeId, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        tracing::trace!("value.set({}) as {}", node, value.kind());
        self.host.value_write(node, &codec::encode(&value, self.width))
    }

    pub fn remove(&self, node: NodeId) {
        self.host.value_delete(node);
    }

    /// `<native> <text> <integer>` for the stored value
    pub fn repr(&self, node: NodeId) -> Result<String> {
        let Some(raw) = self.host.value_read(node) else {
            return Err(NodeError::MissingAttribute(format!(
                "value.repr({}) : the node has no value",
                node
            )));
        };

        let native = decode_with(self.host, raw.clone(), Decode::Native, self.width);
        let text = codec::decode_text(&raw);
        let int = codec::decode_integer(&raw, self.width);
        Ok(format!("{} {:?} {:#x}", native, text, int))
    }
}
