//! # nodestore
//!
//! Sparse per-node storage built on a host's node primitive:
//! - A registry of nodes addressed by name or numeric identity
//! - Independent namespaces per node: value, alt, sup, char, hash, blob
//! - Lazy forward/backward walks over nodes and over every namespace
//! - Typed reads (buffer, text, fixed-width integer) of stored bytes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                              │
//! │                (config + host, opened once)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │          Registry  ·  value / alt / sup / char / hash / blob │
//! │                  (typed codec, repr formatters)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │    Walk     │          │ NodePrimitive│
//!   │  (Cursor)   │─────────►│ (MemoryHost) │
//!   └─────────────┘          └──────┬───────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  Snapshot   │
//!                           │  (CRC32)    │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use nodestore::{Config, Decode, Store, Value};
//!
//! let store = Store::in_memory(Config::default())?;
//! let id = store.nodes().create("alpha")?;
//!
//! store.hash().set(id, "k1", 42u64)?;
//! assert_eq!(store.hash().get(id, "k1", Decode::Integer)?, Some(Value::Integer(42)));
//!
//! for (idx, value) in store.alt().iter_forward(id) {
//!     println!("{:x} = {:?}", idx, value);
//! }
//! # Ok::<(), nodestore::NodeError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod primitive;
pub mod walk;
pub mod registry;
pub mod namespace;
pub mod snapshot;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NodeError, Result};
pub use config::{Config, FlushPolicy, WordWidth};
pub use codec::{Decode, Value};
pub use primitive::{MemoryHost, NodeId, NodePrimitive, NodeRef, Tag};
pub use registry::Registry;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of nodestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
