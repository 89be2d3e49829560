//! Pipeline conversions module
//!
//! Orchestrates one extraction request end to end: read the region, reduce
//! complex pairs, downsample, quantize to a palette, and encode.

mod region_to_payload;
pub mod types;

#[cfg(test)]
mod tests;

pub use region_to_payload::RegionPipeline;
pub use types::{ExtractionRequest, ExtractionRequestBuilder, RegionResponse, ResponseMetadata};
