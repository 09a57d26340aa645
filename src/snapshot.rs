//! Snapshot Module
//!
//! Persists the in-memory host to a single checksummed file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "NDST" (4) | Version: u16 (2) | Len: u64 (8)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Payload (Len bytes)                                     │
//! │   bincode(HostState)                                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   PayloadCRC: u32                                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Integers are little-endian. A snapshot is written to `<path>.tmp`,
//! synced, then renamed over the old one.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{NodeError, Result};
use crate::primitive::HostState;

/// Magic bytes identifying a nodestore snapshot
pub const MAGIC: &[u8; 4] = b"NDST";

/// Current snapshot format version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (8) = 14 bytes
pub const HEADER_SIZE: usize = 14;

/// Footer size: PayloadCRC (4) = 4 bytes
pub const FOOTER_SIZE: usize = 4;

/// Write `state` to `path`, returning the file size
pub fn write(path: &Path, state: &HostState) -> Result<u64> {
    let payload = bincode::serialize(state)?;
    let crc = crc32fast::hash(&payload);

    let tmp_path = tmp_path(path);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp_path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(payload.len() as u64).to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.write_all(&crc.to_le_bytes())?;
    writer.flush()?;

    let file = writer
        .into_inner()
        .map_err(|e| NodeError::Io(e.into_error()))?;
    file.sync_all()?;
    let size = file.metadata()?.len();
    drop(file);

    fs::rename(&tmp_path, path)?;
    tracing::debug!(
        "Snapshot written to {} ({} nodes, {} bytes)",
        path.display(),
        state.node_count(),
        size
    );

    Ok(size)
}

/// Read and verify the snapshot at `path`
pub fn read(path: &Path) -> Result<HostState> {
    let bytes = fs::read(path)?;

    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(NodeError::Corruption(format!(
            "snapshot too short: {} bytes",
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(NodeError::Corruption(format!(
            "invalid snapshot magic: expected NDST, got {:?}",
            &bytes[0..4]
        )));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(NodeError::Corruption(format!(
            "unsupported snapshot version: {}",
            version
        )));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&bytes[6..HEADER_SIZE]);
    let payload_len = u64::from_le_bytes(len_bytes) as usize;

    let expected = HEADER_SIZE
        .checked_add(payload_len)
        .and_then(|n| n.checked_add(FOOTER_SIZE));
    if expected != Some(bytes.len()) {
        return Err(NodeError::Corruption(format!(
            "snapshot length mismatch: header says {} payload bytes, file has {}",
            payload_len,
            bytes.len()
        )));
    }

    let payload = &bytes[HEADER_SIZE..HEADER_SIZE + payload_len];
    let footer = &bytes[HEADER_SIZE + payload_len..];
    let stored_crc = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
    let actual_crc = crc32fast::hash(payload);
    if stored_crc != actual_crc {
        return Err(NodeError::Corruption(format!(
            "snapshot CRC mismatch: stored {:#010x}, computed {:#010x}",
            stored_crc, actual_crc
        )));
    }

    let state: HostState = bincode::deserialize(payload)?;
    tracing::debug!(
        "Snapshot loaded from {} ({} nodes)",
        path.display(),
        state.node_count()
    );
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
