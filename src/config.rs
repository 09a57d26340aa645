//! Configuration for nodestore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{NodeError, Result};

/// Main configuration for a nodestore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the snapshot file
    /// Internal structure:
    ///   {data_dir}/
    ///     └── nodes.snapshot
    pub data_dir: PathBuf,

    /// When the in-memory host is written back to disk
    pub flush_policy: FlushPolicy,

    // -------------------------------------------------------------------------
    // Encoding Configuration
    // -------------------------------------------------------------------------
    /// Width of the fixed-width integer encoding
    pub word_width: WordWidth,

    // -------------------------------------------------------------------------
    // Host Limits
    // -------------------------------------------------------------------------
    /// Max size of a scalar, sup or hash value (in bytes)
    pub max_value_size: usize,

    /// Max length of a node name or hash key (in bytes)
    pub max_name_size: usize,

    /// Granularity the host pads blob reads to (in bytes)
    pub blob_chunk_size: usize,
}

/// Snapshot flush policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Write a snapshot when the store is closed
    OnClose,

    /// Only write a snapshot on an explicit `flush()`
    Manual,
}

/// Width of integers stored through the fixed-width numeric path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    W32,
    W64,
}

impl WordWidth {
    /// Number of bytes in one word
    pub fn bytes(self) -> usize {
        match self {
            WordWidth::W32 => 4,
            WordWidth::W64 => 8,
        }
    }

    /// Identity handed to the first anonymous node
    pub fn first_node_id(self) -> u64 {
        match self {
            WordWidth::W32 => 0xFF00_0000,
            WordWidth::W64 => 0xFF00_0000_0000_0000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./nodestore_data"),
            flush_policy: FlushPolicy::OnClose,
            word_width: WordWidth::W64,
            max_value_size: 1024,
            max_name_size: 512,
            blob_chunk_size: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject limits the host cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.blob_chunk_size == 0 {
            return Err(NodeError::Config(
                "blob_chunk_size must be non-zero".to_string(),
            ));
        }
        if self.max_name_size == 0 {
            return Err(NodeError::Config(
                "max_name_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (where the snapshot lives)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the flush policy
    pub fn flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.config.flush_policy = policy;
        self
    }

    /// Set the integer word width
    pub fn word_width(mut self, width: WordWidth) -> Self {
        self.config.word_width = width;
        self
    }

    /// Set the maximum value size (in bytes)
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.config.max_value_size = size;
        self
    }

    /// Set the maximum name / hash key length (in bytes)
    pub fn max_name_size(mut self, size: usize) -> Self {
        self.config.max_name_size = size;
        self
    }

    /// Set the blob read padding granularity (in bytes)
    pub fn blob_chunk_size(mut self, size: usize) -> Self {
        self.config.blob_chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
