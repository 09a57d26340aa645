//! Namespace Module
//!
//! Per-node sparse namespaces built on the host primitive.
//!
//! ## Handles
//! Each namespace is a small `Copy` handle borrowing the host:
//! - `Scalar` - zero-or-one value per node
//! - `Alt`    - sparse array[u64] of u64
//! - `Sup`    - sparse array[u64] of byte strings (≤ 1024 bytes)
//! - `Chars`  - sparse array[u64] of u8
//! - `Hash`   - map[string] of byte strings
//! - `Blob`   - (tag, start) → arbitrarily sized bytes
//!
//! ## Typed access
//! Byte-valued namespaces take a `Decode` on `get` and a `Value` on `set`.
//! The write encoding follows the `Value` variant, the read decoding follows
//! the `Decode`, so a value can be written as an integer and read back as
//! text (and the other way round).
//!
//! Every handle has a `repr` that renders its contents for a node and fails
//! with `MissingAttribute` when there is nothing to render.

mod alt;
mod blob;
mod chars;
mod hash;
mod sup;
mod value;

pub use alt::{Alt, AltWalk};
pub use blob::Blob;
pub use chars::{CharWalk, Chars};
pub use hash::{Hash, HashWalk};
pub use sup::{Sup, SupWalk};
pub use value::Scalar;

use crate::codec::{self, Decode, Value};
use crate::config::WordWidth;
use crate::primitive::NodePrimitive;

/// Decode stored bytes, letting the host answer `Decode::Native`
fn decode_with<P: NodePrimitive + ?Sized>(host: &P, raw: Vec<u8>, as_: Decode, width: WordWidth) -> Value {
    match as_ {
        Decode::Native => host.native(raw),
        _ => codec::decode(raw, as_, width),
    }
}
