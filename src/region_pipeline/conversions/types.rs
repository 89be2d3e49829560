//! Request and response types for region extraction

use crate::region_pipeline::common::timing::PipelineTimings;
use crate::region_pipeline::complex::ComplexMode;
use crate::region_pipeline::downsample::ReductionTransform;
use crate::region_pipeline::output::{ImageSamples, OutputFormat, RegionImage};
use crate::region_pipeline::source::{Region, SampleMatrix};

pub const DEFAULT_COLORMAP: &str = "rainbow";

/// Parameters of one extraction request, as parsed by the request boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    /// Region to read, in element coordinates
    pub region: Region,
    /// Output columns
    pub out_width: usize,
    /// Output rows
    pub out_height: usize,
    pub transform: ReductionTransform,
    /// Applied only when the source is complex
    pub cxmode: ComplexMode,
    /// Output encoding; `None` keeps the source's atom kind
    pub output: Option<OutputFormat>,
    /// Palette for color output
    pub colormap: String,
    /// Lower bound of the color scale; taken from the data when unset
    pub zmin: Option<f64>,
    /// Upper bound of the color scale; taken from the data when unset
    pub zmax: Option<f64>,
}

impl Default for ExtractionRequest {
    fn default() -> Self {
        Self {
            region: Region::new(0, 0, 0, 0),
            out_width: 0,
            out_height: 0,
            transform: ReductionTransform::Mean,
            cxmode: ComplexMode::Magnitude,
            output: None,
            colormap: DEFAULT_COLORMAP.to_string(),
            zmin: None,
            zmax: None,
        }
    }
}

impl ExtractionRequest {
    pub fn builder() -> ExtractionRequestBuilder {
        ExtractionRequestBuilder::default()
    }
}

/// Builder for ExtractionRequest
#[derive(Default)]
pub struct ExtractionRequestBuilder {
    region: Option<Region>,
    out_size: Option<(usize, usize)>,
    transform: Option<ReductionTransform>,
    cxmode: Option<ComplexMode>,
    output: Option<OutputFormat>,
    colormap: Option<String>,
    zmin: Option<f64>,
    zmax: Option<f64>,
}

impl ExtractionRequestBuilder {
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn output_size(mut self, out_width: usize, out_height: usize) -> Self {
        self.out_size = Some((out_width, out_height));
        self
    }

    pub fn transform(mut self, transform: ReductionTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn cxmode(mut self, cxmode: ComplexMode) -> Self {
        self.cxmode = Some(cxmode);
        self
    }

    pub fn output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }

    pub fn colormap(mut self, colormap: impl Into<String>) -> Self {
        self.colormap = Some(colormap.into());
        self
    }

    pub fn zmin(mut self, zmin: f64) -> Self {
        self.zmin = Some(zmin);
        self
    }

    pub fn zmax(mut self, zmax: f64) -> Self {
        self.zmax = Some(zmax);
        self
    }

    pub fn build(self) -> ExtractionRequest {
        let default = ExtractionRequest::default();
        let (out_width, out_height) = self.out_size.unwrap_or((default.out_width, default.out_height));
        ExtractionRequest {
            region: self.region.unwrap_or(default.region),
            out_width,
            out_height,
            transform: self.transform.unwrap_or(default.transform),
            cxmode: self.cxmode.unwrap_or(default.cxmode),
            output: self.output.or(default.output),
            colormap: self.colormap.unwrap_or(default.colormap),
            zmin: self.zmin.or(default.zmin),
            zmax: self.zmax.or(default.zmax),
        }
    }
}

/// Descriptive metadata the boundary layer attaches to a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    pub out_format: OutputFormat,
    pub out_width: usize,
    pub out_height: usize,
    pub colormap: String,
    /// Color scale actually used; `None` for numeric output
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
}

impl ResponseMetadata {
    /// Key/value pairs suitable for response headers.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("out_format", self.out_format.to_string()),
            ("out_width", self.out_width.to_string()),
            ("out_height", self.out_height.to_string()),
            ("colormap", self.colormap.clone()),
        ];
        if let Some(zmin) = self.zmin {
            pairs.push(("zmin", zmin.to_string()));
        }
        if let Some(zmax) = self.zmax {
            pairs.push(("zmax", zmax.to_string()));
        }
        pairs
    }
}

/// Result of one extraction request.
#[derive(Debug, Clone)]
pub struct RegionResponse {
    /// Encoded bytes, row-major
    pub payload: Vec<u8>,
    pub metadata: ResponseMetadata,
    /// Thinned scalars before quantization
    pub values: SampleMatrix,
    /// Palette colors, present for color output
    pub colors: Option<Vec<[u8; 3]>>,
    pub timings: PipelineTimings,
}

impl RegionResponse {
    pub fn image(&self) -> RegionImage<'_> {
        let samples = match &self.colors {
            Some(colors) => ImageSamples::Colors {
                colors,
                alpha: self.metadata.out_format == OutputFormat::Rgba,
            },
            None => ImageSamples::Scalars(&self.values.data),
        };
        RegionImage {
            width: self.values.width,
            height: self.values.height,
            samples,
        }
    }
}
