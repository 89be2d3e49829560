use std::io::Write;

use crate::region_pipeline::common::error::Result;
use crate::region_pipeline::output::types::RegionImage;

pub trait ImageWriter {
    fn write_image(&self, image: &RegionImage<'_>, output: &mut dyn Write) -> Result<()>;
}
