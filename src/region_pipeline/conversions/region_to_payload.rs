use tracing::{debug, info, instrument};

use crate::region_pipeline::{
    common::error::Result,
    common::timing::PipelineTimings,
    complex::reduce_matrix,
    conversions::types::{ExtractionRequest, RegionResponse, ResponseMetadata},
    downsample::downsample,
    output::{encode, OutputFormat, OutputValues},
    palette::{quantize, BuiltinPalettes, PaletteProvider, PaletteSpec},
    source::{MetadataProvider, RegionReader, SampleMatrix},
};

/// Runs extraction requests against a palette provider.
///
/// The pipeline holds no per-request state; every call reads its region
/// afresh from the source it is given.
pub struct RegionPipeline<P: PaletteProvider> {
    palettes: P,
}

impl RegionPipeline<BuiltinPalettes> {
    pub fn new() -> Self {
        Self {
            palettes: BuiltinPalettes::new(),
        }
    }
}

impl Default for RegionPipeline<BuiltinPalettes> {
    fn default() -> Self {
        Self::new()
    }
}

/// Range of the finite values, if there are any.
fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

impl<P: PaletteProvider> RegionPipeline<P> {
    pub fn with_palettes(palettes: P) -> Self {
        Self { palettes }
    }

    pub fn palettes(&self) -> &P {
        &self.palettes
    }

    /// Opens `dataset` through `provider`, processes `request`, and releases
    /// the dataset before returning.
    #[instrument(skip(self, provider, request))]
    pub fn process_dataset<M: MetadataProvider>(
        &self,
        provider: &M,
        dataset: &str,
        request: &ExtractionRequest,
    ) -> Result<RegionResponse> {
        let mut source = provider.open(dataset)?;
        self.process(&mut source, request)
    }

    #[instrument(skip(self, source, request), fields(region = ?request.region, transform = %request.transform))]
    pub fn process<S: RegionReader>(&self, source: &mut S, request: &ExtractionRequest) -> Result<RegionResponse> {
        info!("Starting region extraction");

        let layout = *source.layout();
        let out_format = request
            .output
            .unwrap_or(OutputFormat::Numeric(layout.format.atom_kind()));
        let mut timings = PipelineTimings::new();

        let raw = timings.time("read_region", || {
            let _span = tracing::info_span!("read_region", format = %layout.format).entered();
            source.read_region(&request.region)
        })?;

        let scalars = if layout.format.is_complex() {
            timings.time("complex_reduce", || {
                let _span = tracing::info_span!("complex_reduce", cxmode = %request.cxmode).entered();
                reduce_matrix(&raw, request.cxmode)
            })
        } else {
            raw
        };

        let values = if scalars.is_empty() {
            debug!("Empty region, skipping downsample");
            SampleMatrix::empty()
        } else {
            timings.time("downsample", || {
                let _span = tracing::info_span!(
                    "downsample",
                    out_width = request.out_width,
                    out_height = request.out_height
                )
                .entered();
                downsample(
                    &scalars,
                    request.out_width,
                    request.out_height,
                    request.transform,
                    out_format.is_integral(),
                )
            })?
        };

        let (colors, zmin, zmax) = if out_format.is_color() {
            let (zmin, zmax) = match (request.zmin, request.zmax, value_range(&values.data)) {
                (Some(zmin), Some(zmax), _) => (zmin, zmax),
                (zmin, zmax, Some((lo, hi))) => (zmin.unwrap_or(lo), zmax.unwrap_or(hi)),
                (zmin, zmax, None) => (zmin.unwrap_or(0.0), zmax.unwrap_or(0.0)),
            };
            let colors = if values.is_empty() {
                Vec::new()
            } else {
                let spec = PaletteSpec::new(request.colormap.clone(), zmin, zmax);
                timings.time("quantize", || {
                    let _span = tracing::info_span!("quantize", palette = %request.colormap).entered();
                    quantize(&values.data, &spec, &self.palettes)
                })?
            };
            (Some(colors), Some(zmin), Some(zmax))
        } else {
            (None, None, None)
        };

        let payload = timings.time("encode", || {
            let _span = tracing::info_span!("encode", format = %out_format).entered();
            match &colors {
                Some(colors) => encode(OutputValues::Colors(colors), out_format),
                None => encode(OutputValues::Scalars(&values.data), out_format),
            }
        })?;

        timings.log_summary();
        info!(
            out_width = values.width,
            out_height = values.height,
            bytes = payload.len(),
            "Region extraction complete"
        );

        let metadata = ResponseMetadata {
            out_format,
            out_width: values.width,
            out_height: values.height,
            colormap: request.colormap.clone(),
            zmin,
            zmax,
        };

        Ok(RegionResponse {
            payload,
            metadata,
            values,
            colors,
            timings,
        })
    }
}
