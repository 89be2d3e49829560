use std::io::{Cursor, Write};

use tiff::encoder::colortype::{Gray32Float, RGB8, RGBA8};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tracing::debug;

use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::output::image_writer::ImageWriter;
use crate::region_pipeline::output::types::{ImageSamples, RegionImage, TiffCompression};

/// Writes thinned regions as single-page TIFFs: 32-bit float grey for
/// scalar output, 8-bit RGB or RGBA for palette output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTiffWriter {
    pub compression: TiffCompression,
}

impl StandardTiffWriter {
    pub fn new(compression: TiffCompression) -> Self {
        Self { compression }
    }

    fn tiff_compression(&self) -> Compression {
        match self.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &RegionImage<'_>, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        if image.width == 0 || image.height == 0 {
            return Err(ExtractionError::EncodeError(format!(
                "cannot write an empty {}x{} image",
                image.width, image.height
            )));
        }
        let (width, height) = (
            u32::try_from(image.width).map_err(|e| ExtractionError::EncodeError(e.to_string()))?,
            u32::try_from(image.height).map_err(|e| ExtractionError::EncodeError(e.to_string()))?,
        );

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ExtractionError::EncodeError(e.to_string()))?
                .with_compression(self.tiff_compression());

            match image.samples {
                ImageSamples::Scalars(values) => {
                    let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
                    encoder.write_image::<Gray32Float>(width, height, &data)
                }
                ImageSamples::Colors { colors, alpha: false } => {
                    let data: Vec<u8> = colors.iter().flatten().copied().collect();
                    encoder.write_image::<RGB8>(width, height, &data)
                }
                ImageSamples::Colors { colors, alpha: true } => {
                    let data: Vec<u8> = colors
                        .iter()
                        .flat_map(|&[r, g, b]| [r, g, b, u8::MAX])
                        .collect();
                    encoder.write_image::<RGBA8>(width, height, &data)
                }
            }
            .map_err(|e| ExtractionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
