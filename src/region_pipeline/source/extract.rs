use std::io::{ErrorKind, Read, Seek, SeekFrom};

use tracing::debug;

use crate::region_pipeline::codec::decode_atoms;
use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::source::types::{DataSource, Region, SampleMatrix};

/// Reads the elements covered by `region` and decodes them row by row.
///
/// Each row is one seek plus one read of `width` elements starting at
/// `(ystart + r) * frame_width + xstart`. Every read is checked against the
/// store's length up front so a short store surfaces as
/// [`ExtractionError::OutOfRangeRegion`] instead of a truncated result.
/// Complex sources yield `2 * width` scalars per row, I before Q.
pub fn extract<R: Read + Seek>(source: &mut DataSource<R>, region: &Region) -> Result<SampleMatrix> {
    let layout = *source.layout();
    let (xstart, ystart) = (region.xstart(), region.ystart());
    let (width, height) = (region.width(), region.height());

    if region.is_degenerate() {
        debug!(?region, "Degenerate region, returning empty matrix");
        return Ok(SampleMatrix::empty());
    }

    let element_bytes = layout.format.element_byte_width() as u64;
    let row_bytes = (width as u64).saturating_mul(element_bytes);

    let store = source.store_mut();
    let available = store.seek(SeekFrom::End(0))?;

    // the last row ends furthest into the store; reject before allocating
    let last_row_offset = ((ystart + height - 1) as u64)
        .checked_mul(layout.frame_width as u64)
        .and_then(|e| e.checked_add(xstart as u64))
        .and_then(|e| e.checked_mul(element_bytes))
        .and_then(|b| b.checked_add(layout.data_start));
    let fits = last_row_offset
        .and_then(|offset| offset.checked_add(row_bytes))
        .is_some_and(|end| end <= available);
    let row_len = usize::try_from(row_bytes).ok().filter(|_| fits).ok_or(
        ExtractionError::OutOfRangeRegion {
            offset: last_row_offset.unwrap_or(u64::MAX),
            len: row_bytes,
            available,
        },
    )?;

    debug!(
        xstart, ystart, width, height,
        frame_width = layout.frame_width,
        available,
        "Extracting region"
    );

    let scalars_per_row = width * layout.format.atoms_per_element();
    let mut data = Vec::with_capacity(scalars_per_row.saturating_mul(height));
    let mut row_buf = vec![0u8; row_len];

    for r in 0..height {
        let element_offset = ((ystart + r) as u64)
            .saturating_mul(layout.frame_width as u64)
            .saturating_add(xstart as u64);
        let offset = element_offset
            .saturating_mul(element_bytes)
            .saturating_add(layout.data_start);

        let out_of_range = ExtractionError::OutOfRangeRegion {
            offset,
            len: row_bytes,
            available,
        };
        if offset.saturating_add(row_bytes) > available {
            return Err(out_of_range);
        }

        store.seek(SeekFrom::Start(offset))?;
        store.read_exact(&mut row_buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                out_of_range
            } else {
                ExtractionError::IoError(e)
            }
        })?;

        decode_atoms(&row_buf, layout.format.atom_kind(), layout.byte_order, &mut data);
    }

    Ok(SampleMatrix::new(scalars_per_row, height, data))
}
