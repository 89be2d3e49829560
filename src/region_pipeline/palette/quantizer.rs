use tracing::debug;

use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::palette::provider::PaletteProvider;

pub const PALETTE_SIZE: usize = 256;

/// Palette name plus the value range spread across it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSpec {
    pub palette_name: String,
    pub zmin: f64,
    pub zmax: f64,
}

impl PaletteSpec {
    pub fn new(palette_name: impl Into<String>, zmin: f64, zmax: f64) -> Self {
        Self {
            palette_name: palette_name.into(),
            zmin,
            zmax,
        }
    }

    /// Value span covered by one palette entry.
    ///
    /// `zmax <= zmin` (or a NaN bound) is rejected rather than corrected.
    pub fn color_per_span(&self) -> Result<f64> {
        if !(self.zmax > self.zmin) {
            return Err(ExtractionError::DegenerateScale {
                zmin: self.zmin,
                zmax: self.zmax,
            });
        }
        Ok((self.zmax - self.zmin) / PALETTE_SIZE as f64)
    }
}

/// `clamp(round((value - zmin) / color_per_span), 0, 255)`; NaN maps to 0.
#[inline]
pub fn palette_index(value: f64, zmin: f64, color_per_span: f64) -> u8 {
    let index = ((value - zmin) / color_per_span).round();
    if index.is_nan() {
        0
    } else {
        index.clamp(0.0, (PALETTE_SIZE - 1) as f64) as u8
    }
}

/// Maps each value to its palette entry.
///
/// The palette is resolved through `provider` once, up front, so an unknown
/// name fails before any value is touched.
pub fn quantize<P>(values: &[f64], spec: &PaletteSpec, provider: &P) -> Result<Vec<[u8; 3]>>
where
    P: PaletteProvider + ?Sized,
{
    let color_per_span = spec.color_per_span()?;

    let mut lookup = [[0u8; 3]; PALETTE_SIZE];
    for (index, entry) in lookup.iter_mut().enumerate() {
        *entry = provider.color(&spec.palette_name, index as u8)?;
    }

    debug!(
        palette = %spec.palette_name,
        zmin = spec.zmin,
        zmax = spec.zmax,
        count = values.len(),
        "Quantizing to palette"
    );

    Ok(values
        .iter()
        .map(|&v| lookup[palette_index(v, spec.zmin, color_per_span) as usize])
        .collect())
}
