use crate::command::Nv12SourceData;
use crate::surface::block_linear;

/// Foreground RGBA of an RGBA stamp at stamp-relative `(fx, fy)`, nearest
/// sampled with the stamp's own alpha.
pub(crate) fn rgba_stamp(src: &[u8], width: i32, fx: i32, fy: i32) -> [u8; 4] {
    let i = ((fy * width + fx) * 4) as usize;
    [src[i], src[i + 1], src[i + 2], src[i + 3]]
}

/// Foreground of an NV12 stamp at stamp-relative `(fx, fy)`.
///
/// The sampled bytes are returned as-is in the R/G/B channels (Y/U/V); no
/// colorspace conversion happens here, the destination blender consumes them
/// natively. A pixel exactly matching the transparent key gets alpha 0,
/// anything else gets the command alpha.
pub(crate) fn nv12_stamp(
    src: &Nv12SourceData,
    width: i32,
    block_linear: bool,
    key: [u8; 3],
    alpha: u8,
    fx: i32,
    fy: i32,
) -> [u8; 4] {
    let (y, u, v) = if block_linear {
        let cols = block_linear::gob_cols(width as usize);
        let crow = (fy / 2) as usize;
        (
            src.luma[block_linear::byte_offset(fx as usize, fy as usize, cols)],
            src.chroma[block_linear::byte_offset((fx & !1) as usize, crow, cols)],
            src.chroma[block_linear::byte_offset((fx | 1) as usize, crow, cols)],
        )
    } else {
        let ci = ((fy / 2) * width + (fx & !1)) as usize;
        (
            src.luma[(fy * width + fx) as usize],
            src.chroma[ci],
            src.chroma[ci + 1],
        )
    };
    let a = if [y, u, v] == key { 0 } else { alpha };
    [y, u, v, a]
}

#[cfg(test)]
#[path = "../../tests/unit/compose/stamp.rs"]
mod tests;
