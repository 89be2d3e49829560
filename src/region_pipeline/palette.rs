//! Palette quantization module
//!
//! Maps scalars in `[zmin, zmax]` onto 256 palette entries and expands
//! them to RGB triples.

mod builtin;
mod provider;
mod quantizer;

pub use builtin::{BuiltinPalettes, PALETTE_NAMES};
pub use provider::PaletteProvider;
pub use quantizer::{palette_index, quantize, PaletteSpec, PALETTE_SIZE};
