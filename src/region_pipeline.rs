//! Region extraction and downsampling pipeline
//!
//! Reads a rectangular region out of a large on-disk 2D binary array,
//! reduces complex samples to scalars, thins the result to a requested
//! resolution, and encodes it as numbers or palette colors.
//!
//! Data flows `source` → `complex` → `downsample` → `palette` → `output`,
//! orchestrated by [`RegionPipeline`].

pub mod codec;
pub mod common;
pub mod complex;
pub mod conversions;
pub mod downsample;
pub mod output;
pub mod palette;
pub mod source;

pub use common::{
    ExtractionError,
    PipelineTimings,
    Result,
};

pub use codec::{
    AtomKind,
    ByteOrder,
    ElementFormat,
};

pub use source::{
    extract,
    BlueHeaderProvider,
    DataSource,
    FilenameConventionProvider,
    MetadataProvider,
    Region,
    RegionReader,
    SampleMatrix,
    SourceLayout,
};

pub use complex::ComplexMode;

pub use downsample::{
    downsample,
    ReductionTransform,
};

pub use palette::{
    quantize,
    BuiltinPalettes,
    PaletteProvider,
    PaletteSpec,
};

pub use output::{
    encode,
    ImageWriter,
    OutputFormat,
    OutputValues,
    StandardTiffWriter,
    TiffCompression,
};

pub use conversions::{
    ExtractionRequest,
    ExtractionRequestBuilder,
    RegionPipeline,
    RegionResponse,
    ResponseMetadata,
};
