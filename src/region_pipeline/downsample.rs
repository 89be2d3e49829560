//! Separable downsampling module
//!
//! Reduces a 2D matrix to a smaller resolution in two passes: each row is
//! thinned along x, then each column of the thinned result along y.

mod separable;
pub mod types;

pub use separable::{downsample, window};
pub use types::ReductionTransform;
