//! Common utilities module
//!
//! Error taxonomy and per-stage timing shared across the region pipeline.

pub mod error;
pub mod timing;

pub use error::{ExtractionError, Result};
pub use timing::{PipelineTimings, StageTiming, Timer};
