//! Element codec module
//!
//! Describes how a raw byte run decodes into numeric elements: whether an
//! element is a scalar or an (I,Q) pair, the atom kind, and its byte width.

mod decode;
pub mod types;

pub use decode::{decode_atoms, encode_atom};
pub use types::{AtomKind, ByteOrder, ElementFormat};
