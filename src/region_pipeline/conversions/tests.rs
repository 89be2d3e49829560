use std::io::Cursor;

use crate::region_pipeline::codec::{AtomKind, ElementFormat};
use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::complex::ComplexMode;
use crate::region_pipeline::conversions::region_to_payload::RegionPipeline;
use crate::region_pipeline::conversions::types::ExtractionRequest;
use crate::region_pipeline::downsample::ReductionTransform;
use crate::region_pipeline::output::OutputFormat;
use crate::region_pipeline::palette::{BuiltinPalettes, PaletteProvider};
use crate::region_pipeline::source::{DataSource, Region, RegionReader, SampleMatrix, SourceLayout};

struct MockReader {
    should_fail: bool,
    layout: SourceLayout,
    matrix: SampleMatrix,
    reads: usize,
}

impl MockReader {
    fn new(layout: SourceLayout, matrix: SampleMatrix) -> Self {
        Self {
            should_fail: false,
            layout,
            matrix,
            reads: 0,
        }
    }
}

impl RegionReader for MockReader {
    fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    fn read_region(&mut self, _region: &Region) -> Result<SampleMatrix> {
        self.reads += 1;
        if self.should_fail {
            return Err(ExtractionError::OutOfRangeRegion {
                offset: 0,
                len: 1,
                available: 0,
            });
        }
        Ok(self.matrix.clone())
    }
}

struct FixedPalette;

impl PaletteProvider for FixedPalette {
    fn color(&self, name: &str, index: u8) -> Result<[u8; 3]> {
        if name != "fixed" {
            return Err(ExtractionError::InvalidPalette(name.to_string()));
        }
        Ok([index, 255 - index, 7])
    }
}

/// Scalar int16 dataset with row stride 500, where `m[y][x] = y * 500 + x`
/// wrapped into the int16 range.
fn strided_int16(rows: usize) -> DataSource<Cursor<Vec<u8>>> {
    let mut bytes = Vec::new();
    for y in 0..rows {
        for x in 0..500 {
            bytes.extend_from_slice(&(((y * 500 + x) % 30_000) as i16).to_le_bytes());
        }
    }
    let layout = SourceLayout::new(ElementFormat::scalar(AtomKind::Int16), 500, 0);
    DataSource::new(Cursor::new(bytes), layout)
}

fn decode_i16(payload: &[u8]) -> Vec<i16> {
    payload
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

#[test]
fn test_mean_over_exact_blocks() {
    let mut source = strided_int16(12);
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 10, 10))
        .output_size(5, 5)
        .transform(ReductionTransform::Mean)
        .build();

    let response = RegionPipeline::new().process(&mut source, &request).unwrap();
    assert_eq!(response.metadata.out_format, OutputFormat::Numeric(AtomKind::Int16));
    assert_eq!((response.metadata.out_width, response.metadata.out_height), (5, 5));

    let out = decode_i16(&response.payload);
    let m = |x: usize, y: usize| (y * 500 + x) as f64;
    for y in 0..5 {
        for x in 0..5 {
            let mean = (m(2 * x, 2 * y) + m(2 * x + 1, 2 * y) + m(2 * x, 2 * y + 1) + m(2 * x + 1, 2 * y + 1)) / 4.0;
            assert_eq!(out[y * 5 + x] as f64, mean.trunc(), "cell ({x},{y})");
        }
    }
    // trunc(mean(0, 1, 500, 501)) = trunc(250.5)
    assert_eq!(out[0], 250);
}

#[test]
fn test_single_point_for_every_transform() {
    for transform in [
        ReductionTransform::Mean,
        ReductionTransform::Max,
        ReductionTransform::Min,
        ReductionTransform::AbsMax,
        ReductionTransform::First,
    ] {
        let mut source = strided_int16(4);
        let request = ExtractionRequest::builder()
            .region(Region::new(123, 2, 124, 3))
            .output_size(1, 1)
            .transform(transform)
            .build();
        let response = RegionPipeline::new().process(&mut source, &request).unwrap();
        assert_eq!(decode_i16(&response.payload), vec![2 * 500 + 123], "{transform}");
    }
}

#[test]
fn test_identical_runs_are_byte_identical() {
    let request = ExtractionRequest::builder()
        .region(Region::new(3, 1, 480, 9))
        .output_size(7, 3)
        .transform(ReductionTransform::AbsMax)
        .output(OutputFormat::Numeric(AtomKind::Float32))
        .build();
    let pipeline = RegionPipeline::new();

    let first = pipeline.process(&mut strided_int16(10), &request).unwrap();
    let second = pipeline.process(&mut strided_int16(10), &request).unwrap();
    assert_eq!(first.payload, second.payload);
    assert_eq!(first.payload.len(), 7 * 3 * 4);
}

#[test]
fn test_complex_real_and_imag_match_scalar_path() {
    let scalars: Vec<f64> = (0..24).map(|i| (i * 7 % 11) as f64 - 5.0).collect();
    let interleaved: Vec<f64> = scalars.iter().flat_map(|&v| [v, v]).collect();

    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 6, 4))
        .output_size(3, 2)
        .transform(ReductionTransform::Mean)
        .output(OutputFormat::Numeric(AtomKind::Float64))
        .build();
    let pipeline = RegionPipeline::new();

    let mut scalar_reader = MockReader::new(
        SourceLayout::new(ElementFormat::scalar(AtomKind::Float32), 6, 0),
        SampleMatrix::new(6, 4, scalars),
    );
    let expected = pipeline.process(&mut scalar_reader, &request).unwrap().payload;

    for cxmode in [ComplexMode::Real, ComplexMode::Imaginary] {
        let mut complex_reader = MockReader::new(
            SourceLayout::new(ElementFormat::complex(AtomKind::Float32), 6, 0),
            SampleMatrix::new(12, 4, interleaved.clone()),
        );
        let request = ExtractionRequest { cxmode, ..request.clone() };
        let payload = pipeline.process(&mut complex_reader, &request).unwrap().payload;
        assert_eq!(payload, expected, "{cxmode}");
    }
}

#[test]
fn test_complex_source_is_always_reduced() {
    let mut reader = MockReader::new(
        SourceLayout::new(ElementFormat::complex(AtomKind::Float32), 2, 0),
        SampleMatrix::new(4, 1, vec![3.0, 4.0, 6.0, 8.0]),
    );
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 2, 1))
        .output_size(2, 1)
        .build();
    let response = RegionPipeline::new().process(&mut reader, &request).unwrap();
    assert_eq!(response.values.data, vec![5.0, 10.0]);
    assert!(response.timings.get_stage("complex_reduce").is_some());
}

#[test]
fn test_degenerate_region_yields_empty_payload() {
    let mut source = strided_int16(4);
    let request = ExtractionRequest::builder()
        .region(Region::new(5, 0, 5, 3))
        .output_size(4, 4)
        .output(OutputFormat::Rgb)
        .build();
    let response = RegionPipeline::new().process(&mut source, &request).unwrap();
    assert!(response.payload.is_empty());
    assert_eq!((response.metadata.out_width, response.metadata.out_height), (0, 0));
}

#[test]
fn test_upscale_request_fails() {
    let mut source = strided_int16(4);
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 4, 4))
        .output_size(8, 2)
        .build();
    let err = RegionPipeline::new().process(&mut source, &request).unwrap_err();
    assert!(matches!(err, ExtractionError::UnsupportedUpscale { .. }));
}

#[test]
fn test_reader_failure_propagates() {
    let mut reader = MockReader::new(
        SourceLayout::new(ElementFormat::scalar(AtomKind::Float32), 4, 0),
        SampleMatrix::empty(),
    );
    reader.should_fail = true;
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 4, 4))
        .output_size(2, 2)
        .build();
    let err = RegionPipeline::new().process(&mut reader, &request).unwrap_err();
    assert!(matches!(err, ExtractionError::OutOfRangeRegion { .. }));
    assert_eq!(reader.reads, 1);
}

#[test]
fn test_rgb_output_against_palette_table() {
    let mut reader = MockReader::new(
        SourceLayout::new(ElementFormat::scalar(AtomKind::Float32), 3, 0),
        SampleMatrix::new(3, 1, vec![0.0, 128.0, 255.0]),
    );
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 3, 1))
        .output_size(3, 1)
        .output(OutputFormat::Rgb)
        .zmin(0.0)
        .zmax(255.0)
        .build();
    let pipeline = RegionPipeline::new();
    let response = pipeline.process(&mut reader, &request).unwrap();

    let palettes = BuiltinPalettes::new();
    let table = palettes.table("rainbow").unwrap();
    let expected: Vec<u8> = [table[0], table[129], table[255]].concat();
    assert_eq!(response.payload, expected);
    assert_eq!(response.metadata.colormap, "rainbow");
    assert_eq!((response.metadata.zmin, response.metadata.zmax), (Some(0.0), Some(255.0)));
}

#[test]
fn test_color_scale_defaults_to_data_range() {
    let mut reader = MockReader::new(
        SourceLayout::new(ElementFormat::scalar(AtomKind::Float64), 2, 0),
        SampleMatrix::new(2, 1, vec![-4.0, 12.0]),
    );
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 2, 1))
        .output_size(2, 1)
        .output(OutputFormat::Rgba)
        .colormap("fixed")
        .build();
    let response = RegionPipeline::with_palettes(FixedPalette)
        .process(&mut reader, &request)
        .unwrap();

    assert_eq!((response.metadata.zmin, response.metadata.zmax), (Some(-4.0), Some(12.0)));
    assert_eq!(response.payload, vec![0, 255, 7, 255, 255, 0, 7, 255]);
}

#[test]
fn test_color_errors() {
    let matrix = SampleMatrix::new(2, 1, vec![1.0, 2.0]);
    let layout = SourceLayout::new(ElementFormat::scalar(AtomKind::Float32), 2, 0);
    let base = ExtractionRequest::builder()
        .region(Region::new(0, 0, 2, 1))
        .output_size(2, 1)
        .output(OutputFormat::Rgb)
        .build();
    let pipeline = RegionPipeline::new();

    let request = ExtractionRequest { zmin: Some(3.0), zmax: Some(3.0), ..base.clone() };
    let err = pipeline.process(&mut MockReader::new(layout, matrix.clone()), &request).unwrap_err();
    assert!(matches!(err, ExtractionError::DegenerateScale { .. }));

    let request = ExtractionRequest { colormap: "nope".to_string(), ..base };
    let err = pipeline.process(&mut MockReader::new(layout, matrix), &request).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidPalette(_)));
}

#[test]
fn test_request_builder_defaults() {
    let request = ExtractionRequest::builder().build();
    assert_eq!(request.transform, ReductionTransform::Mean);
    assert_eq!(request.cxmode, ComplexMode::Magnitude);
    assert_eq!(request.colormap, "rainbow");
    assert_eq!(request.output, None);
    assert_eq!((request.zmin, request.zmax), (None, None));
}

#[test]
fn test_metadata_pairs() {
    let mut source = strided_int16(2);
    let request = ExtractionRequest::builder()
        .region(Region::new(0, 0, 4, 2))
        .output_size(2, 1)
        .output(OutputFormat::Rgb)
        .zmin(0.0)
        .zmax(10.0)
        .build();
    let response = RegionPipeline::new().process(&mut source, &request).unwrap();
    let pairs = response.metadata.to_pairs();
    assert!(pairs.contains(&("out_format", "RGB".to_string())));
    assert!(pairs.contains(&("out_width", "2".to_string())));
    assert!(pairs.contains(&("zmax", "10".to_string())));
    assert_eq!(response.payload.len(), 2 * 3);
}
