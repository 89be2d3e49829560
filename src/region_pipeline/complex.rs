//! Complex reduction module
//!
//! Collapses interleaved (I,Q) pairs into one scalar per pair.

mod reducer;
pub mod types;

pub use reducer::{reduce, reduce_matrix};
pub use types::{ComplexMode, LO_THRESH};
