use serde::{Deserialize, Serialize};

use crate::foundation::error::{ScrimError, ScrimResult};
use crate::foundation::math::clamp_u8;

pub(crate) mod block_linear;
pub(crate) mod pitch;

pub use block_linear::block_linear_plane_len;

/// Pixel layout of a destination surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceFormat {
    /// Pitch-linear RGB, 3 bytes per pixel.
    Rgb,
    /// Pitch-linear RGBA, 4 bytes per pixel.
    Rgba,
    /// NV12 with both planes tiled in 64x8 GOBs.
    BlockLinearNv12,
    /// NV12 with both planes as strided byte rows.
    PitchLinearNv12,
}

/// Borrowed destination surface, mutated in place by [`crate::compose`].
///
/// NV12 variants carry a full-resolution luma plane and a half-height chroma
/// plane with interleaved U (even byte columns) and V (odd byte columns);
/// both NV12 variants require even `width` and `height`.
pub enum SurfaceTarget<'a> {
    /// Pitch-linear RGB24.
    Rgb {
        /// Pixel bytes, `stride` bytes per row.
        data: &'a mut [u8],
        /// Row stride in bytes, at least `3 * width`.
        stride: usize,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Pitch-linear RGBA32.
    Rgba {
        /// Pixel bytes, `stride` bytes per row.
        data: &'a mut [u8],
        /// Row stride in bytes, at least `4 * width`.
        stride: usize,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Block-linear NV12; plane sizes come from [`block_linear_plane_len`].
    BlockLinearNv12 {
        /// GOB-tiled luma plane.
        luma: &'a mut [u8],
        /// GOB-tiled interleaved chroma plane, half height.
        chroma: &'a mut [u8],
        /// Width in pixels (even).
        width: u32,
        /// Height in pixels (even).
        height: u32,
    },
    /// Pitch-linear NV12 with a shared row stride.
    PitchLinearNv12 {
        /// Luma plane, `stride` bytes per row.
        luma: &'a mut [u8],
        /// Interleaved chroma plane, `stride` bytes per row, half height.
        chroma: &'a mut [u8],
        /// Row stride in bytes for both planes, at least `width`.
        stride: usize,
        /// Width in pixels (even).
        width: u32,
        /// Height in pixels (even).
        height: u32,
    },
}

impl SurfaceTarget<'_> {
    /// Format tag of this surface.
    pub fn format(&self) -> SurfaceFormat {
        match self {
            Self::Rgb { .. } => SurfaceFormat::Rgb,
            Self::Rgba { .. } => SurfaceFormat::Rgba,
            Self::BlockLinearNv12 { .. } => SurfaceFormat::BlockLinearNv12,
            Self::PitchLinearNv12 { .. } => SurfaceFormat::PitchLinearNv12,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Self::Rgb { width, .. }
            | Self::Rgba { width, .. }
            | Self::BlockLinearNv12 { width, .. }
            | Self::PitchLinearNv12 { width, .. } => *width,
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Rgb { height, .. }
            | Self::Rgba { height, .. }
            | Self::BlockLinearNv12 { height, .. }
            | Self::PitchLinearNv12 { height, .. } => *height,
        }
    }

    pub(crate) fn validate(&self) -> ScrimResult<()> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        if w == 0 || h == 0 {
            return Err(ScrimError::validation("surface dimensions must be non-zero"));
        }
        match self {
            Self::Rgb { data, stride, .. } => validate_pitch_plane("rgb", data, *stride, w * 3, h),
            Self::Rgba { data, stride, .. } => validate_pitch_plane("rgba", data, *stride, w * 4, h),
            Self::BlockLinearNv12 { luma, chroma, .. } => {
                validate_even_nv12(w, h)?;
                if luma.len() < block_linear_plane_len(w, h) {
                    return Err(ScrimError::validation("block-linear luma plane too small"));
                }
                if chroma.len() < block_linear_plane_len(w, h / 2) {
                    return Err(ScrimError::validation("block-linear chroma plane too small"));
                }
                Ok(())
            }
            Self::PitchLinearNv12 {
                luma,
                chroma,
                stride,
                ..
            } => {
                validate_even_nv12(w, h)?;
                validate_pitch_plane("nv12 luma", luma, *stride, w, h)?;
                validate_pitch_plane("nv12 chroma", chroma, *stride, w, h / 2)
            }
        }
    }
}

fn validate_pitch_plane(
    name: &str,
    data: &[u8],
    stride: usize,
    row_bytes: usize,
    rows: usize,
) -> ScrimResult<()> {
    if stride < row_bytes {
        return Err(ScrimError::validation(format!(
            "{name} stride {stride} is smaller than a row of {row_bytes} bytes"
        )));
    }
    let need = stride
        .checked_mul(rows - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or_else(|| ScrimError::validation(format!("{name} plane size overflow")))?;
    if data.len() < need {
        return Err(ScrimError::validation(format!(
            "{name} plane holds {} bytes, needs {need}",
            data.len()
        )));
    }
    Ok(())
}

fn validate_even_nv12(w: usize, h: usize) -> ScrimResult<()> {
    if !w.is_multiple_of(2) || !h.is_multiple_of(2) {
        return Err(ScrimError::validation(
            "nv12 surfaces require even width and height",
        ));
    }
    Ok(())
}

/// Band splits must keep chroma rows and GOB rows whole.
pub(crate) const BAND_ROW_ALIGN: u32 = 16;

/// Accumulated foreground for one 2x2 quad.
///
/// Straight (non-premultiplied) RGBA per pixel, indexed `(dy << 1) | dx`.
/// For NV12 targets the channels carry Y/U/V instead of R/G/B.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct QuadFg {
    pub(crate) px: [[u8; 4]; 4],
}

impl QuadFg {
    pub(crate) fn any_coverage(&self) -> bool {
        self.px.iter().any(|p| p[3] != 0)
    }
}

/// One horizontally-complete, vertically-disjoint slice of a destination
/// surface. The compose pass hands each band to one worker; the blur pass
/// runs on a band covering the whole image.
pub(crate) trait SurfaceBand: Send {
    fn width(&self) -> u32;
    /// First row owned by this band.
    fn y_start(&self) -> u32;
    /// One past the last row owned by this band.
    fn y_end(&self) -> u32;
    /// Read one logical RGB pixel (NV12 converts through BT.601).
    fn load_rgb(&self, x: u32, y: u32) -> [u8; 3];
    /// Write one logical RGB pixel (NV12 converts through BT.601).
    fn store_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]);
    /// Source-over the accumulated quad foreground at even origin `(x, y)`.
    fn commit_quad(&mut self, x: u32, y: u32, fg: &QuadFg);
}

/// Splitting a full-surface band into disjoint worker bands.
pub(crate) trait BandSplit: SurfaceBand + Sized {
    /// `band_rows` must be a positive multiple of [`BAND_ROW_ALIGN`].
    fn split_bands(self, band_rows: u32) -> Vec<Self>;
}

// Shared blend laws. All compositing is integer arithmetic with 8-bit
// shifts; these forms must stay bit-exact with the accumulator law in
// `compose::accumulator`.

/// Source-over `fg` onto an RGB destination with alpha `ba`, returning the
/// blended channels and the output alpha.
pub(crate) fn blend_rgb_pixel(dst: [u8; 3], ba: u32, fg: [u8; 4]) -> ([u8; 3], u8) {
    let fa = u32::from(fg[3]);
    if fa == 0 {
        return (dst, ba as u8);
    }
    let out_a = ((ba * (255 - fa)) >> 8) + fa;
    if out_a == 0 {
        return (dst, ba as u8);
    }
    let mut out = [0u8; 3];
    for (i, o) in out.iter_mut().enumerate() {
        let c = (((u32::from(dst[i]) * ba * (255 - fa)) >> 8) + u32::from(fg[i]) * fa) / out_a;
        *o = clamp_u8(c as i32);
    }
    (out, out_a.min(255) as u8)
}

/// Blend one luma sample: plain shift lerp, no normalization.
pub(crate) fn blend_luma(dst_y: u8, fg_y: u8, fa: u8) -> u8 {
    let fa = u32::from(fa);
    ((u32::from(fg_y) * fa + (255 - fa) * u32::from(dst_y)) >> 8) as u8
}

/// Blend the single chroma pair shared by a quad.
///
/// U/V contributions are the coverage-weighted means of the foreground G/B
/// channels; the blend alpha is the quad's summed coverage shifted down to
/// an average.
pub(crate) fn blend_quad_chroma(dst_u: u8, dst_v: u8, fg: &QuadFg) -> (u8, u8) {
    let mut asum = 0u32;
    let mut usum = 0u32;
    let mut vsum = 0u32;
    for p in &fg.px {
        let a = u32::from(p[3]);
        asum += a;
        usum += u32::from(p[1]) * a;
        vsum += u32::from(p[2]) * a;
    }
    if asum == 0 {
        return (dst_u, dst_v);
    }
    let fg_u = usum / asum;
    let fg_v = vsum / asum;
    let am = asum >> 2;
    let u = (fg_u * am + (255 - am) * u32::from(dst_u)) >> 8;
    let v = (fg_v * am + (255 - am) * u32::from(dst_v)) >> 8;
    (u as u8, v as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/blend.rs"]
mod blend_tests;

#[cfg(test)]
#[path = "../../tests/unit/surface/target.rs"]
mod target_tests;
