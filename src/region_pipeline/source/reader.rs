use std::io::{Read, Seek};

use crate::region_pipeline::common::error::Result;
use crate::region_pipeline::source::extract::extract;
use crate::region_pipeline::source::types::{DataSource, Region, SampleMatrix, SourceLayout};

pub trait RegionReader {
    fn layout(&self) -> &SourceLayout;
    fn read_region(&mut self, region: &Region) -> Result<SampleMatrix>;
}

impl<R: Read + Seek> RegionReader for DataSource<R> {
    fn layout(&self) -> &SourceLayout {
        DataSource::layout(self)
    }

    fn read_region(&mut self, region: &Region) -> Result<SampleMatrix> {
        extract(self, region)
    }
}
