use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use region_thinner::logger;
use region_thinner::region_pipeline::{
    BlueHeaderProvider, ComplexMode, ExtractionRequest, FilenameConventionProvider, ImageWriter,
    OutputFormat, ReductionTransform, Region, RegionPipeline, RegionResponse, StandardTiffWriter,
    TiffCompression,
};

use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Container {
    /// `<base>_<format>_<xsize>_<ysize>` file names, no header
    Name,
    /// 512-byte BLUE header
    Blue,
}

/// Extract a region of a 2D binary dataset, thin it, and encode it.
#[derive(Parser, Debug)]
#[command(name = "region_thinner")]
struct Args {
    /// Dataset file, relative to --root
    dataset: String,

    /// Directory datasets are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// How dataset metadata is discovered
    #[arg(long, value_enum, default_value_t = Container::Name)]
    container: Container,

    #[arg(long)]
    x1: usize,
    #[arg(long)]
    y1: usize,
    #[arg(long)]
    x2: usize,
    #[arg(long)]
    y2: usize,

    #[arg(long)]
    out_width: usize,
    #[arg(long)]
    out_height: usize,

    /// mean, max, min, absmax, or first
    #[arg(long, default_value = "mean")]
    transform: ReductionTransform,

    /// mag, phase, real, imag, 10log, or 20log
    #[arg(long, default_value = "mag")]
    cxmode: ComplexMode,

    /// Output encoding (e.g. SI, SF, RGB, RGBA); defaults to the source's atom kind
    #[arg(long)]
    format: Option<OutputFormat>,

    #[arg(long, default_value = "rainbow")]
    colormap: String,

    #[arg(long, allow_hyphen_values = true)]
    zmin: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    zmax: Option<f64>,

    /// Payload destination; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the result as a TIFF image
    #[arg(long)]
    tiff: Option<PathBuf>,

    /// none, lzw, deflate-fast, deflate, or deflate-best
    #[arg(long, default_value = "none")]
    tiff_compression: TiffCompression,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn run_request(args: &Args, request: &ExtractionRequest) -> Result<RegionResponse> {
    let pipeline = RegionPipeline::new();
    let response = match args.container {
        Container::Name => pipeline.process_dataset(
            &FilenameConventionProvider::new(&args.root),
            &args.dataset,
            request,
        ),
        Container::Blue => pipeline.process_dataset(
            &BlueHeaderProvider::new(&args.root),
            &args.dataset,
            request,
        ),
    };
    response.with_context(|| format!("processing {}", args.dataset))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    let mut builder = ExtractionRequest::builder()
        .region(Region::new(args.x1, args.y1, args.x2, args.y2))
        .output_size(args.out_width, args.out_height)
        .transform(args.transform)
        .cxmode(args.cxmode)
        .colormap(args.colormap.clone());
    if let Some(format) = args.format {
        builder = builder.output(format);
    }
    if let Some(zmin) = args.zmin {
        builder = builder.zmin(zmin);
    }
    if let Some(zmax) = args.zmax {
        builder = builder.zmax(zmax);
    }
    let request = builder.build();

    let response = run_request(&args, &request)?;
    for (key, value) in response.metadata.to_pairs() {
        info!("{key}: {value}");
    }

    match &args.output {
        Some(path) => {
            let mut file = BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            );
            file.write_all(&response.payload)?;
            file.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&response.payload)?;
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.tiff {
        let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        StandardTiffWriter::new(args.tiff_compression).write_image(&response.image(), &mut file)?;
        info!(path = %path.display(), "Wrote TIFF");
    }

    Ok(())
}
