//! Value codec
//!
//! The typed-decode / typed-encode contract shared by every byte-valued
//! namespace (scalar value, sup, hash).
//!
//! ## Physical Encoding
//! ```text
//! Value::Buffer(b)   →  b                     (verbatim)
//! Value::Text(s)     →  s.as_bytes()          (verbatim, no terminator)
//! Value::Integer(n)  →  n.to_le_bytes()[..W]  (W = word width: 4 or 8)
//! ```
//!
//! ## Decoding
//! Decoding never looks at how the bytes were written:
//! - `Buffer`:  bytes as stored
//! - `Text`:    bytes up to the first NUL, capped at `MAX_TEXT_LEN`, lossy UTF-8
//! - `Integer`: the first W bytes little-endian, zero-extended when shorter
//! - `Native`:  whatever the host calls its native representation

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::config::WordWidth;

/// Longest text decode, matching the host's slot size
pub const MAX_TEXT_LEN: usize = 1024;

/// A value handed to, or returned from, a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Raw bytes
    Buffer(Bytes),

    /// A string
    Text(String),

    /// An unsigned integer stored at the configured word width
    Integer(u64),
}

/// Representation requested from a `get`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    /// The host's native representation
    Native,
    Buffer,
    Text,
    Integer,
}

impl Decode {
    pub fn name(self) -> &'static str {
        match self {
            Decode::Native => "native",
            Decode::Buffer => "buffer",
            Decode::Text => "text",
            Decode::Integer => "integer",
        }
    }
}

impl Value {
    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Buffer(_) => "buffer",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Buffer(b) => f.write_str(&escape(b)),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Integer(n) => write!(f, "{:#x}", n),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Buffer(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Buffer(Bytes::from(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Buffer(Bytes::copy_from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Buffer(Bytes::copy_from_slice(b))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n as u64)
    }
}

// =============================================================================
// Encoding / Decoding
// =============================================================================

/// Physical bytes for a value
///
/// Integers wider than the word width are truncated to it.
pub fn encode(value: &Value, width: WordWidth) -> Vec<u8> {
    match value {
        Value::Buffer(b) => b.to_vec(),
        Value::Text(s) => s.as_bytes().to_vec(),
        Value::Integer(n) => encode_integer(*n, width),
    }
}

pub fn encode_integer(n: u64, width: WordWidth) -> Vec<u8> {
    n.to_le_bytes()[..width.bytes()].to_vec()
}

/// Reinterpret stored bytes as the requested representation
///
/// `Decode::Native` is resolved by the host before reaching here and is
/// treated as `Buffer`.
pub fn decode(raw: Vec<u8>, as_: Decode, width: WordWidth) -> Value {
    match as_ {
        Decode::Native | Decode::Buffer => Value::Buffer(Bytes::from(raw)),
        Decode::Text => Value::Text(decode_text(&raw)),
        Decode::Integer => Value::Integer(decode_integer(&raw, width)),
    }
}

/// NUL-terminated, length-bounded, lossy UTF-8
pub fn decode_text(raw: &[u8]) -> String {
    let bounded = &raw[..raw.len().min(MAX_TEXT_LEN)];
    let end = bounded.iter().position(|&b| b == 0).unwrap_or(bounded.len());
    String::from_utf8_lossy(&bounded[..end]).into_owned()
}

/// Little-endian, zero-extended to the word width
pub fn decode_integer(raw: &[u8], width: WordWidth) -> u64 {
    let mut word = [0u8; 8];
    let n = raw.len().min(width.bytes());
    word[..n].copy_from_slice(&raw[..n]);
    u64::from_le_bytes(word)
}

/// Printable rendering of raw bytes, `b"..."` style
pub fn escape(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len() + 3);
    out.push_str("b\"");
    for &b in raw {
        out.extend(std::ascii::escape_default(b).map(char::from));
    }
    out.push('"');
    out
}
