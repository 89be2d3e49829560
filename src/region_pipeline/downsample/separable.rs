use std::ops::Range;

use tracing::debug;

use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::downsample::types::ReductionTransform;
use crate::region_pipeline::source::types::SampleMatrix;

/// Input indices reduced into output index `i` when thinning `n_in`
/// samples down to `n_out`.
///
/// Every window spans `ceil(n_in / n_out)` samples and starts at
/// `round(i * n_in / n_out)`. The last window is right-aligned to end at
/// `n_in`, so no window reaches past the input. Requires
/// `0 < n_out <= n_in` and `i < n_out`.
pub fn window(n_in: usize, n_out: usize, i: usize) -> Range<usize> {
    let ratio = n_in as f64 / n_out as f64;
    let extent = ratio.ceil() as usize;

    if i + 1 == n_out {
        n_in - extent..n_in
    } else {
        let start = (i as f64 * ratio).round() as usize;
        start..start + extent
    }
}

/// Thins `matrix` to `out_width` x `out_height` under `transform`.
///
/// Pass 1 reduces contiguous windows of each row into a `height` x
/// `out_width` intermediate; pass 2 reduces windows of that intermediate
/// taken with stride `out_width`, i.e. down each column. When
/// `integral_output` is set, `mean` results of the final pass are truncated
/// toward zero.
///
/// Enlarging along either axis fails with
/// [`ExtractionError::UnsupportedUpscale`]. A zero output size yields an
/// empty matrix.
pub fn downsample(
    matrix: &SampleMatrix,
    out_width: usize,
    out_height: usize,
    transform: ReductionTransform,
    integral_output: bool,
) -> Result<SampleMatrix> {
    let (width, height) = (matrix.width, matrix.height);

    if out_width > width || out_height > height {
        return Err(ExtractionError::UnsupportedUpscale {
            width,
            height,
            out_width,
            out_height,
        });
    }
    if out_width == 0 || out_height == 0 {
        return Ok(SampleMatrix::empty());
    }

    debug!(width, height, out_width, out_height, %transform, "Downsampling");

    // pass 1: thin along x
    let x_windows: Vec<Range<usize>> = (0..out_width).map(|x| window(width, out_width, x)).collect();
    let mut thinned = Vec::with_capacity(height * out_width);
    for row in matrix.rows() {
        for w in &x_windows {
            thinned.push(transform.reduce(row[w.clone()].iter().copied()));
        }
    }

    // pass 2: thin along y, striding down the columns of the intermediate
    let truncate = integral_output && transform == ReductionTransform::Mean;
    let mut out = Vec::with_capacity(out_height * out_width);
    for y in 0..out_height {
        let rows = window(height, out_height, y);
        for x in 0..out_width {
            let start = x + out_width * rows.start;
            let end = start + (rows.len() - 1) * out_width + 1;
            let value = transform.reduce(thinned[start..end].iter().step_by(out_width).copied());
            out.push(if truncate { value.trunc() } else { value });
        }
    }

    Ok(SampleMatrix::new(out_width, out_height, out))
}
