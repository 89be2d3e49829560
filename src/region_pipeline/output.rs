//! Output encoding module
//!
//! Serializes thinned values into the requested binary element format, and
//! optionally wraps a result in a TIFF container.

mod encoder;
mod image_writer;
mod standard_tiff_writer;
pub mod types;

pub use encoder::{encode, OutputValues};
pub use image_writer::ImageWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ImageSamples, OutputFormat, RegionImage, TiffCompression};
