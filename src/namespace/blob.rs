//! Blob namespace
//!
//! (tag, start) → arbitrarily sized bytes.
//!
//! Hosts may hand back more than was stored (whole chunks, zero padded).
//! `blob_size` is authoritative: `get` always returns exactly that many
//! bytes.

use bytes::Bytes;

use crate::codec::{self, Value};
use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive, Tag};

/// Handle on the blob namespace
pub struct Blob<'a, P: ?Sized> {
    host: &'a P,
}

impl<'a, P: ?Sized> Clone for Blob<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Blob<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Blob<'a, P> {
    pub fn new(host: &'a P) -> Self {
        Self { host }
    }

    /// Number of bytes stored at (tag, start), 0 when absent
    pub fn size(&self, node: NodeId, tag: impl Into<Tag>, start: u64) -> usize {
        self.host.blob_size(node, tag.into(), start)
    }

    pub fn get(&self, node: NodeId, tag: impl Into<Tag>, start: u64) -> Option<Bytes> {
        let tag = tag.into();
        let size = self.host.blob_size(node, tag, start);
        let mut raw = self.host.blob_read(node, tag, start)?;
        raw.truncate(size);
        Some(Bytes::from(raw))
    }

    pub fn set(&self, node: NodeId, tag: impl Into<Tag>, value: impl AsRef<[u8]>, start: u64) -> Result<()> {
        let tag = tag.into();
        let value = value.as_ref();
        tracing::trace!("blob.set({}, {}, {:#x}) {} bytes", node, tag, start, value.len());
        self.host.blob_write(node, tag, start, value)
    }

    /// Store the binary form of a `Value`
    pub fn set_value(&self, node: NodeId, tag: impl Into<Tag>, value: &Value, start: u64) -> Result<()> {
        let encoded = bincode::serialize(value)?;
        self.set(node, tag, encoded, start)
    }

    /// Read back a value stored with `set_value`
    pub fn get_value(&self, node: NodeId, tag: impl Into<Tag>, start: u64) -> Result<Option<Value>> {
        match self.get(node, tag, start) {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn remove(&self, node: NodeId, tag: impl Into<Tag>, start: u64) {
        self.host.blob_delete(node, tag.into(), start);
    }

    /// The blob at (tag, 0) as escaped bytes
    pub fn repr(&self, node: NodeId, tag: impl Into<Tag>) -> Result<String> {
        let tag = tag.into();
        if self.size(node, tag, 0) == 0 {
            return Err(NodeError::MissingAttribute(format!(
                "blob.repr({}, {}) : the tag has no blob",
                node, tag
            )));
        }
        let raw = self.get(node, tag, 0).unwrap_or_default();
        Ok(codec::escape(&raw))
    }
}
