//! Error types for nodestore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NodeError
pub type Result<T> = std::result::Result<T, NodeError>;

/// Unified error type for nodestore operations
#[derive(Debug, Error)]
pub enum NodeError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Node not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Type Errors
    // -------------------------------------------------------------------------
    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    // -------------------------------------------------------------------------
    // Host Errors
    // -------------------------------------------------------------------------
    #[error("Name already in use: {0}")]
    NameTaken(String),

    #[error("Value too large: {size} bytes (max {limit})")]
    ValueTooLarge { size: usize, limit: usize },

    #[error("Key too long: {len} bytes (max {limit})")]
    KeyTooLong { len: usize, limit: usize },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for NodeError {
    fn from(err: bincode::Error) -> Self {
        NodeError::Serialization(err.to_string())
    }
}
