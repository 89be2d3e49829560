use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid element format: {0}")]
    InvalidFormat(String),

    #[error("Region out of range: read of {len} bytes at offset {offset} exceeds {available} available bytes")]
    OutOfRangeRegion { offset: u64, len: u64, available: u64 },

    #[error("Enlarging is not supported: {width}x{height} cannot be thinned to {out_width}x{out_height}")]
    UnsupportedUpscale {
        width: usize,
        height: usize,
        out_width: usize,
        out_height: usize,
    },

    #[error("Invalid complex mode: {0}")]
    InvalidComplexMode(String),

    #[error("Invalid reduction transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    #[error("Invalid output format: {0}")]
    InvalidOutputFormat(String),

    #[error("Degenerate color scale: zmin={zmin}, zmax={zmax}")]
    DegenerateScale { zmin: f64, zmax: f64 },

    #[error("Invalid dataset metadata: {0}")]
    InvalidMetadata(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
