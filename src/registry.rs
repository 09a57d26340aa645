//! Node Registry
//!
//! Resolves nodes to stable identities and manages their lifecycle.
//!
//! ## Responsibilities
//! - Create nodes by name (create-if-absent) or anonymously
//! - Resolve a name or an identity, failing with `NotFound`
//! - Destroy and rename nodes
//! - Report the identity range and walk all nodes in identity order

use crate::error::{NodeError, Result};
use crate::primitive::{NodeId, NodePrimitive, NodeRef};
use crate::walk::{Cursor, Presence, Walk};

/// Walk over all nodes, yielding each identity with its name
pub type NodeWalk<'a, P> = Walk<'a, P, (), NodeId, String>;

/// Handle on the node registry
pub struct Registry<'a, P: ?Sized> {
    host: &'a P,
}

impl<'a, P: ?Sized> Clone for Registry<'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ?Sized> Copy for Registry<'a, P> {}

impl<'a, P: NodePrimitive + ?Sized> Registry<'a, P> {
    pub fn new(host: &'a P) -> Self {
        Self { host }
    }

    /// Create a node named `name`, or return the node already holding it
    pub fn create(&self, name: &str) -> Result<NodeId> {
        let id = self.host.allocate(Some(name))?;
        tracing::debug!("Node {:?} -> {}", name, id);
        Ok(id)
    }

    /// Create a node without a name
    pub fn create_unnamed(&self) -> Result<NodeId> {
        let id = self.host.allocate(None)?;
        tracing::debug!("Anonymous node -> {}", id);
        Ok(id)
    }

    /// Look up an existing node by name or identity
    pub fn resolve(&self, node: impl Into<NodeRef>) -> Result<NodeId> {
        let node = node.into();
        let found = match &node {
            NodeRef::Name(name) => self.host.lookup_name(name),
            NodeRef::Id(id) => self.host.lookup_id(*id),
        };
        found.ok_or_else(|| NodeError::NotFound(format!("no node matches {}", node)))
    }

    pub fn exists(&self, node: impl Into<NodeRef>) -> bool {
        self.resolve(node).is_ok()
    }

    /// Delete a node and everything stored under it
    ///
    /// Callers are expected to check the node exists first; destroying an
    /// absent node is not guaranteed to be harmless on every host.
    pub fn destroy(&self, id: NodeId) {
        if self.host.lookup_id(id).is_none() {
            tracing::warn!("Destroying absent node {}", id);
        }
        self.host.kill(id);
        tracing::debug!("Node {} destroyed", id);
    }

    /// Rename a node, returning its previous name
    pub fn rename(&self, id: NodeId, name: &str) -> Result<Option<String>> {
        let previous = self.host.name(id);
        self.host.rename(id, name)?;
        tracing::debug!("Node {} renamed {:?} -> {:?}", id, previous, name);
        Ok(previous)
    }

    pub fn name(&self, id: NodeId) -> Option<String> {
        self.host.name(id)
    }

    /// Lowest and highest allocated identity
    pub fn range(&self) -> Result<(NodeId, NodeId)> {
        let first = self
            .host
            .node_first()
            .ok_or_else(|| NodeError::NotFound("unable to find the first node".to_string()))?;
        let last = self
            .host
            .node_last()
            .ok_or_else(|| NodeError::NotFound("unable to find the last node".to_string()))?;
        Ok((first, last))
    }

    pub fn iter_forward(&self) -> Result<NodeWalk<'a, P>> {
        self.range()?;
        Ok(Walk::forward(self.host, (), Self::cursor(), Presence::Key))
    }

    pub fn iter_backward(&self) -> Result<NodeWalk<'a, P>> {
        self.range()?;
        Ok(Walk::backward(self.host, (), Self::cursor(), Presence::Key))
    }

    /// One `<id> <name>` line per node
    pub fn repr(&self) -> Result<String> {
        let lines: Vec<String> = self
            .iter_forward()?
            .map(|(id, name)| match name {
                Some(name) => format!("{} {:?}", id, name),
                None => format!("{}", id),
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn cursor() -> Cursor<P, (), NodeId, String> {
        Cursor {
            first: |h, _| h.node_first(),
            last: |h, _| h.node_last(),
            next: |h, _, id| h.node_next(*id),
            prev: |h, _, id| h.node_prev(*id),
            read: |h, _, id| h.name(*id),
        }
    }
}
