use crate::foundation::math::mul_div255_u8;

const WEIGHT_BITS: u32 = 11;
const WEIGHT_ONE: i32 = 1 << WEIGHT_BITS;

/// Coverage alpha of a segmentation mask at integer pixel `(x, y)`.
///
/// The mask is binarized against `threshold` (127 inside, 0 outside) and the
/// four neighbors are blended with 11-bit fixed-point bilinear weights, so
/// the result is a quantized 0..=127 which is then scaled by the command
/// alpha. Out-of-range neighbors contribute nothing.
#[allow(clippy::too_many_arguments)]
pub(crate) fn segment_alpha(
    mask: &[f32],
    mask_width: i32,
    mask_height: i32,
    scale_x: f32,
    scale_y: f32,
    threshold: f32,
    c3: u8,
    x: i32,
    y: i32,
    left: i32,
    top: i32,
) -> u8 {
    let sx = ((x - left) as f32 + 0.5) * scale_x - 0.5;
    let sy = ((y - top) as f32 + 0.5) * scale_y - 0.5;
    let x0 = sx.floor() as i32;
    let y0 = sy.floor() as i32;
    let tx = ((sx - x0 as f32) * WEIGHT_ONE as f32) as u32;
    let ty = ((sy - y0 as f32) * WEIGHT_ONE as f32) as u32;

    let sample = |mx: i32, my: i32| -> u32 {
        if mx < 0 || my < 0 || mx >= mask_width || my >= mask_height {
            return 0;
        }
        if mask[(my * mask_width + mx) as usize] > threshold {
            127
        } else {
            0
        }
    };

    let inv_x = WEIGHT_ONE as u32 - tx;
    let inv_y = WEIGHT_ONE as u32 - ty;
    let interp = (sample(x0, y0) * inv_x * inv_y
        + sample(x0 + 1, y0) * tx * inv_y
        + sample(x0, y0 + 1) * inv_x * ty
        + sample(x0 + 1, y0 + 1) * tx * ty)
        >> (2 * WEIGHT_BITS);

    mul_div255_u8(interp as u16, u16::from(c3))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/segment.rs"]
mod tests;
