use crate::region_pipeline::codec::types::{AtomKind, ByteOrder};

macro_rules! decode_as {
    ($bytes:expr, $ty:ty, $order:expr, $out:expr) => {{
        const WIDTH: usize = std::mem::size_of::<$ty>();
        $out.extend($bytes.chunks_exact(WIDTH).map(|chunk| {
            let mut raw = [0u8; WIDTH];
            raw.copy_from_slice(chunk);
            let value = match $order {
                ByteOrder::Little => <$ty>::from_le_bytes(raw),
                ByteOrder::Big => <$ty>::from_be_bytes(raw),
            };
            value as f64
        }));
    }};
}

/// Decodes a run of atoms and appends them to `out` as `f64`.
///
/// Trailing bytes that do not fill a whole atom are ignored; callers size
/// their reads in whole elements.
pub fn decode_atoms(bytes: &[u8], kind: AtomKind, order: ByteOrder, out: &mut Vec<f64>) {
    out.reserve(bytes.len() / kind.byte_width());
    match kind {
        AtomKind::Float32 => decode_as!(bytes, f32, order, out),
        AtomKind::Int16 => decode_as!(bytes, i16, order, out),
        AtomKind::Float64 => decode_as!(bytes, f64, order, out),
        AtomKind::Int32 => decode_as!(bytes, i32, order, out),
        AtomKind::Byte => decode_as!(bytes, i8, order, out),
    }
}

/// Appends `value` to `out` as one little-endian atom of `kind`.
///
/// Integral kinds round to the nearest integer and saturate at the type's
/// bounds; NaN becomes 0.
pub fn encode_atom(value: f64, kind: AtomKind, out: &mut Vec<u8>) {
    match kind {
        AtomKind::Float32 => out.extend_from_slice(&(value as f32).to_le_bytes()),
        AtomKind::Float64 => out.extend_from_slice(&value.to_le_bytes()),
        AtomKind::Int16 => out.extend_from_slice(&(value.round() as i16).to_le_bytes()),
        AtomKind::Int32 => out.extend_from_slice(&(value.round() as i32).to_le_bytes()),
        AtomKind::Byte => out.extend_from_slice(&(value.round() as i8).to_le_bytes()),
    }
}
