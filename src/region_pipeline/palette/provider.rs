use crate::region_pipeline::common::error::Result;

/// Source of named 256-entry color palettes.
pub trait PaletteProvider {
    /// RGB triple at `index` of palette `name`, or
    /// [`ExtractionError::InvalidPalette`](crate::region_pipeline::ExtractionError::InvalidPalette)
    /// for an unknown name.
    fn color(&self, name: &str, index: u8) -> Result<[u8; 3]>;
}
