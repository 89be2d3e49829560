//! Region source data types

use crate::region_pipeline::codec::{ByteOrder, ElementFormat};

/// Rectangle in element coordinates. Corners need not be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Region {
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn xstart(&self) -> usize {
        self.x1.min(self.x2)
    }

    pub fn ystart(&self) -> usize {
        self.y1.min(self.y2)
    }

    pub fn width(&self) -> usize {
        self.x1.abs_diff(self.x2)
    }

    pub fn height(&self) -> usize {
        self.y1.abs_diff(self.y2)
    }

    /// Zero-area regions produce empty results rather than errors.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Row-major matrix of decoded scalars.
///
/// `width` counts scalars per row. Before complex reduction a complex
/// source yields two scalars (I then Q) per element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleMatrix {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl SampleMatrix {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}

/// Immutable description of where elements live in a backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLayout {
    pub format: ElementFormat,
    /// Elements per logical row; the store's intrinsic row stride.
    pub frame_width: usize,
    /// Byte offset of the first element.
    pub data_start: u64,
    pub byte_order: ByteOrder,
}

impl SourceLayout {
    pub fn new(format: ElementFormat, frame_width: usize, data_start: u64) -> Self {
        Self {
            format,
            frame_width,
            data_start,
            byte_order: ByteOrder::Little,
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }
}

/// A backing store opened for one request, paired with its layout.
///
/// The store is released when the `DataSource` is dropped, on success and
/// error paths alike.
#[derive(Debug)]
pub struct DataSource<R> {
    store: R,
    layout: SourceLayout,
}

impl<R> DataSource<R> {
    pub fn new(store: R, layout: SourceLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    pub(crate) fn store_mut(&mut self) -> &mut R {
        &mut self.store
    }

    pub fn into_inner(self) -> R {
        self.store
    }
}
