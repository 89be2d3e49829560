use tracing::debug;

use crate::region_pipeline::codec::encode_atom;
use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::output::types::OutputFormat;

/// Values ready for serialization, in row-major output order.
#[derive(Debug, Clone, Copy)]
pub enum OutputValues<'a> {
    Scalars(&'a [f64]),
    Colors(&'a [[u8; 3]]),
}

impl OutputValues<'_> {
    pub fn len(&self) -> usize {
        match self {
            OutputValues::Scalars(values) => values.len(),
            OutputValues::Colors(colors) => colors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serializes `values` as `format`.
///
/// Numeric formats convert each value to the target atom (integral kinds
/// round to nearest). Color formats emit one triple, plus alpha for RGBA,
/// per value. Scalars cannot be written as colors without quantizing
/// first, and colors cannot be written as numbers.
pub fn encode(values: OutputValues<'_>, format: OutputFormat) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(values.len() * format.bytes_per_value());

    match (values, format) {
        (OutputValues::Scalars(values), OutputFormat::Numeric(kind)) => {
            for &value in values {
                encode_atom(value, kind, &mut out);
            }
        }
        (OutputValues::Colors(colors), OutputFormat::Rgb) => {
            for color in colors {
                out.extend_from_slice(color);
            }
        }
        (OutputValues::Colors(colors), OutputFormat::Rgba) => {
            for &[r, g, b] in colors {
                out.extend_from_slice(&[r, g, b, u8::MAX]);
            }
        }
        (OutputValues::Scalars(_), _) | (OutputValues::Colors(_), OutputFormat::Numeric(_)) => {
            return Err(ExtractionError::InvalidOutputFormat(format!(
                "{} cannot encode {} values",
                format,
                match values {
                    OutputValues::Scalars(_) => "scalar",
                    OutputValues::Colors(_) => "color",
                }
            )));
        }
    }

    debug!(%format, count = values.len(), bytes = out.len(), "Encoded output");
    Ok(out)
}
