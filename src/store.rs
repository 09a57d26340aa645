//! Store Module
//!
//! Owns the configuration and the host, and hands out namespace handles.
//!
//! ## Responsibilities
//! - Pick the host once, at open time
//! - Load an existing snapshot on startup
//! - Write snapshots on `flush()` and (per policy) on `close()`
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                    Store                      │
//! │  nodes() value() alt() sup() chars() hash()   │
//! │                   blob()                      │
//! └──────────────────────┬────────────────────────┘
//!                        │ NodePrimitive
//!                 ┌──────▼──────┐      ┌──────────────┐
//!                 │ MemoryHost  │◄────►│  nodes.snap  │
//!                 │  (RwLock)   │      │   (CRC32)    │
//!                 └─────────────┘      └──────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, FlushPolicy};
use crate::error::Result;
use crate::namespace::{Alt, Blob, Chars, Hash, Scalar, Sup};
use crate::primitive::{MemoryHost, NodePrimitive};
use crate::registry::Registry;
use crate::snapshot;

/// Entry point: a host plus the config it was opened with
pub struct Store<P: NodePrimitive = MemoryHost> {
    /// Store configuration
    config: Config,

    /// The host every namespace talks to
    host: P,

    /// Where snapshots go; `None` for purely in-memory stores
    snapshot_path: Option<PathBuf>,
}

impl Store<MemoryHost> {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const SNAPSHOT_FILENAME: &'static str = "nodes.snapshot";

    /// Open or create a persistent store with the given config
    ///
    /// On startup:
    /// 1. Create the data directory
    /// 2. Load the snapshot if one exists
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let snapshot_path = config.data_dir.join(Self::SNAPSHOT_FILENAME);
        let host = if snapshot_path.exists() {
            let state = snapshot::read(&snapshot_path)?;
            tracing::info!(
                "Loaded {} nodes from {}",
                state.node_count(),
                snapshot_path.display()
            );
            MemoryHost::from_state(state, &config)
        } else {
            tracing::info!("No snapshot at {}, starting empty", snapshot_path.display());
            MemoryHost::new(&config)
        };

        Ok(Self {
            config,
            host,
            snapshot_path: Some(snapshot_path),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// A store that never touches disk
    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        let host = MemoryHost::new(&config);
        Ok(Self {
            config,
            host,
            snapshot_path: None,
        })
    }

    /// Write a snapshot if anything changed since the last one
    pub fn flush(&self) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if !self.host.is_dirty() && path.exists() {
            return Ok(());
        }

        self.host.mark_clean();
        if let Err(e) = snapshot::write(path, &self.host.state()) {
            self.host.mark_dirty();
            return Err(e);
        }
        Ok(())
    }

    /// Close the store, flushing when the policy asks for it
    pub fn close(self) -> Result<()> {
        if self.config.flush_policy == FlushPolicy::OnClose {
            self.flush()?;
        }
        Ok(())
    }

    /// Snapshot location (for testing and debugging)
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }
}

impl<P: NodePrimitive> Store<P> {
    /// Wrap an already constructed host
    pub fn with_host(host: P, config: Config) -> Self {
        Self {
            config,
            host,
            snapshot_path: None,
        }
    }

    pub fn nodes(&self) -> Registry<'_, P> {
        Registry::new(&self.host)
    }

    pub fn value(&self) -> Scalar<'_, P> {
        Scalar::new(&self.host, self.config.word_width)
    }

    pub fn alt(&self) -> Alt<'_, P> {
        Alt::new(&self.host)
    }

    pub fn sup(&self) -> Sup<'_, P> {
        Sup::new(&self.host, self.config.word_width)
    }

    pub fn chars(&self) -> Chars<'_, P> {
        Chars::new(&self.host)
    }

    pub fn hash(&self) -> Hash<'_, P> {
        Hash::new(&self.host, self.config.word_width)
    }

    pub fn blob(&self) -> Blob<'_, P> {
        Blob::new(&self.host)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn host(&self) -> &P {
        &self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
