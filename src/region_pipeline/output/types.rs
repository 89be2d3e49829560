//! Output format types

use std::fmt;
use std::str::FromStr;

use crate::region_pipeline::codec::{AtomKind, ElementFormat};
use crate::region_pipeline::common::error::{ExtractionError, Result};

/// Binary encoding of the response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One little-endian atom per value.
    Numeric(AtomKind),
    /// Three palette bytes per value.
    Rgb,
    /// Three palette bytes plus an opaque alpha byte per value.
    Rgba,
}

impl OutputFormat {
    pub fn bytes_per_value(&self) -> usize {
        match self {
            OutputFormat::Numeric(kind) => kind.byte_width(),
            OutputFormat::Rgb => 3,
            OutputFormat::Rgba => 4,
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, OutputFormat::Rgb | OutputFormat::Rgba)
    }

    /// Whether `mean` results are truncated to integers for this format.
    pub fn is_integral(&self) -> bool {
        match self {
            OutputFormat::Numeric(kind) => kind.is_integral(),
            OutputFormat::Rgb | OutputFormat::Rgba => false,
        }
    }
}

impl From<AtomKind> for OutputFormat {
    fn from(kind: AtomKind) -> Self {
        OutputFormat::Numeric(kind)
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractionError;

    /// Accepts `RGB`, `RGBA`, a scalar element token such as `SF`, or a
    /// bare atom code such as `I`.
    fn from_str(token: &str) -> Result<Self> {
        let invalid = || ExtractionError::InvalidOutputFormat(token.to_string());

        match token.to_ascii_uppercase().as_str() {
            "RGB" => return Ok(OutputFormat::Rgb),
            "RGBA" => return Ok(OutputFormat::Rgba),
            _ => {}
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => AtomKind::from_code(code).map(OutputFormat::Numeric).map_err(|_| invalid()),
            (Some(_), Some(_)) => {
                let format: ElementFormat = token.parse().map_err(|_| invalid())?;
                if format.is_complex() {
                    return Err(invalid());
                }
                Ok(OutputFormat::Numeric(format.atom_kind()))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Numeric(kind) => write!(f, "S{}", kind.code()),
            OutputFormat::Rgb => f.write_str("RGB"),
            OutputFormat::Rgba => f.write_str("RGBA"),
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

impl FromStr for TiffCompression {
    type Err = ExtractionError;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "none" => Ok(TiffCompression::None),
            "lzw" => Ok(TiffCompression::Lzw),
            "deflate-fast" => Ok(TiffCompression::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(TiffCompression::DeflateBalanced),
            "deflate-best" => Ok(TiffCompression::DeflateBest),
            _ => Err(ExtractionError::EncodeError(format!("unknown TIFF compression '{}'", token))),
        }
    }
}

/// Pixel data handed to an [`ImageWriter`](super::ImageWriter).
#[derive(Debug, Clone, Copy)]
pub enum ImageSamples<'a> {
    Scalars(&'a [f64]),
    Colors { colors: &'a [[u8; 3]], alpha: bool },
}

/// A thinned region viewed as an image.
#[derive(Debug, Clone, Copy)]
pub struct RegionImage<'a> {
    pub width: usize,
    pub height: usize,
    pub samples: ImageSamples<'a>,
}
