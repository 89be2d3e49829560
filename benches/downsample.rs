use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use region_thinner::region_pipeline::{
    downsample, AtomKind, DataSource, ElementFormat, ExtractionRequest, OutputFormat,
    ReductionTransform, Region, RegionPipeline, SampleMatrix, SourceLayout,
};
use std::io::Cursor;

fn generate_matrix(width: usize, height: usize) -> SampleMatrix {
    let data = (0..width * height)
        .map(|i| ((i * 31) % 4093) as f64 - 2046.0)
        .collect();
    SampleMatrix::new(width, height, data)
}

fn generate_int16_file(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let value = ((x + y) % 4096) as i16;
            data.extend_from_slice(&value.to_le_bytes());
        }
    }
    data
}

fn benchmark_downsample_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("downsample_by_size");

    let sizes = vec![
        (500, 500, "500x500"),
        (2000, 1000, "2000x1000"),
        (4096, 4096, "4096x4096"),
    ];

    for (width, height, label) in sizes {
        let matrix = generate_matrix(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &matrix, |b, matrix| {
            b.iter(|| downsample(black_box(matrix), 300, 200, ReductionTransform::Mean, false));
        });
    }

    group.finish();
}

fn benchmark_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let matrix = generate_matrix(2000, 2000);

    let transforms = vec![
        ReductionTransform::Mean,
        ReductionTransform::Max,
        ReductionTransform::Min,
        ReductionTransform::AbsMax,
        ReductionTransform::First,
    ];

    for transform in transforms {
        group.bench_with_input(
            BenchmarkId::from_parameter(transform),
            &matrix,
            |b, matrix| {
                b.iter(|| downsample(black_box(matrix), 500, 7, transform, false));
            },
        );
    }

    group.finish();
}

fn benchmark_full_request(c: &mut Criterion) {
    let bytes = generate_int16_file(1000, 1000);
    let layout = SourceLayout::new(ElementFormat::scalar(AtomKind::Int16), 1000, 0);
    let pipeline = RegionPipeline::new();

    let formats = vec![
        (OutputFormat::Numeric(AtomKind::Int16), "int16"),
        (OutputFormat::Rgb, "rgb"),
    ];

    let mut group = c.benchmark_group("full_request");
    for (format, label) in formats {
        let request = ExtractionRequest::builder()
            .region(Region::new(0, 0, 1000, 1000))
            .output_size(256, 256)
            .output(format)
            .zmin(0.0)
            .zmax(4096.0)
            .build();
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut source = DataSource::new(Cursor::new(bytes.as_slice()), layout);
                pipeline.process(&mut source, black_box(&request))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_downsample_sizes,
    benchmark_transforms,
    benchmark_full_request
);
criterion_main!(benches);
