use tracing::debug;

use crate::region_pipeline::complex::types::ComplexMode;
use crate::region_pipeline::source::types::SampleMatrix;

/// Reduces a run of interleaved (I,Q) scalars to one scalar per pair.
///
/// A trailing unpaired scalar is dropped.
pub fn reduce(row: &[f64], mode: ComplexMode) -> Vec<f64> {
    row.chunks_exact(2).map(|pair| mode.apply(pair[0], pair[1])).collect()
}

/// Reduces every row of a complex matrix, halving its width.
///
/// Rows hold whole pairs, so reducing the flat buffer in one pass is the
/// same as reducing row by row.
pub fn reduce_matrix(matrix: &SampleMatrix, mode: ComplexMode) -> SampleMatrix {
    debug!(
        width = matrix.width,
        height = matrix.height,
        %mode,
        "Reducing complex pairs"
    );
    SampleMatrix::new(matrix.width / 2, matrix.height, reduce(&matrix.data, mode))
}
