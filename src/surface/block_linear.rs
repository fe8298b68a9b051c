use crate::foundation::math::{rgb_to_yuv, yuv_to_rgb};
use crate::surface::{BandSplit, QuadFg, SurfaceBand, blend_luma, blend_quad_chroma};

// 64-byte x 8-row GOB tiling. A plane is a row-major grid of GOBs; bytes
// inside a GOB are row-major within the 64x8 block.
const GOB_WIDTH_BYTES: usize = 64;
const GOB_HEIGHT_ROWS: usize = 8;
const GOB_BYTES: usize = GOB_WIDTH_BYTES * GOB_HEIGHT_ROWS;

pub(crate) fn gob_cols(row_bytes: usize) -> usize {
    row_bytes.div_ceil(GOB_WIDTH_BYTES)
}

/// Required byte length of a block-linear plane holding `rows` rows of
/// `row_bytes` bytes (both padded up to whole GOBs).
///
/// For an NV12 surface the luma plane is `block_linear_plane_len(width,
/// height)` and the chroma plane `block_linear_plane_len(width, height / 2)`.
pub fn block_linear_plane_len(row_bytes: usize, rows: usize) -> usize {
    gob_cols(row_bytes) * rows.div_ceil(GOB_HEIGHT_ROWS) * GOB_BYTES
}

/// Byte offset of `(x, y)` inside a plane of `cols` GOB columns.
pub(crate) fn byte_offset(x: usize, y: usize, cols: usize) -> usize {
    (y / GOB_HEIGHT_ROWS) * cols * GOB_BYTES
        + (x / GOB_WIDTH_BYTES) * GOB_BYTES
        + (y % GOB_HEIGHT_ROWS) * GOB_WIDTH_BYTES
        + (x % GOB_WIDTH_BYTES)
}

/// Block-linear NV12: GOB-tiled luma plus half-height interleaved chroma.
pub(crate) struct BlockNv12Band<'a> {
    luma: &'a mut [u8],
    chroma: &'a mut [u8],
    luma_cols: usize,
    chroma_cols: usize,
    width: u32,
    y0: u32,
    rows: u32,
}

impl<'a> BlockNv12Band<'a> {
    pub(crate) fn full(
        luma: &'a mut [u8],
        chroma: &'a mut [u8],
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            luma,
            chroma,
            luma_cols: gob_cols(width as usize),
            chroma_cols: gob_cols(width as usize),
            width,
            y0: 0,
            rows: height,
        }
    }

    /// `band_rows` must be a multiple of 16 so both planes split at GOB-row
    /// boundaries.
    pub(crate) fn split(self, band_rows: u32) -> Vec<Self> {
        debug_assert!(band_rows.is_multiple_of(16));
        let Self {
            luma,
            chroma,
            luma_cols,
            chroma_cols,
            width,
            rows,
            ..
        } = self;
        let band_rows = band_rows as usize;
        let luma_chunk = luma_cols * GOB_BYTES * (band_rows / GOB_HEIGHT_ROWS);
        let chroma_chunk = chroma_cols * GOB_BYTES * (band_rows / (2 * GOB_HEIGHT_ROWS));

        let mut out = Vec::new();
        let mut y0 = 0u32;
        for (luma, chroma) in luma.chunks_mut(luma_chunk).zip(chroma.chunks_mut(chroma_chunk)) {
            if y0 >= rows {
                break;
            }
            let band = (band_rows as u32).min(rows - y0);
            out.push(Self {
                luma,
                chroma,
                luma_cols,
                chroma_cols,
                width,
                y0,
                rows: band,
            });
            y0 += band;
        }
        out
    }

    fn luma_idx(&self, x: u32, y: u32) -> usize {
        byte_offset(x as usize, (y - self.y0) as usize, self.luma_cols)
    }

    fn chroma_idx(&self, x: u32, y: u32) -> (usize, usize) {
        let row = ((y - self.y0) / 2) as usize;
        (
            byte_offset((x & !1) as usize, row, self.chroma_cols),
            byte_offset((x | 1) as usize, row, self.chroma_cols),
        )
    }
}

impl BandSplit for BlockNv12Band<'_> {
    fn split_bands(self, band_rows: u32) -> Vec<Self> {
        self.split(band_rows)
    }
}

impl SurfaceBand for BlockNv12Band<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn y_start(&self) -> u32 {
        self.y0
    }

    fn y_end(&self) -> u32 {
        self.y0 + self.rows
    }

    fn load_rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let (ui, vi) = self.chroma_idx(x, y);
        yuv_to_rgb(
            self.luma[self.luma_idx(x, y)],
            self.chroma[ui],
            self.chroma[vi],
        )
    }

    fn store_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let [yv, u, v] = rgb_to_yuv(rgb);
        let li = self.luma_idx(x, y);
        self.luma[li] = yv;
        let (ui, vi) = self.chroma_idx(x, y);
        self.chroma[ui] = u;
        self.chroma[vi] = v;
    }

    fn commit_quad(&mut self, x: u32, y: u32, fg: &QuadFg) {
        for (k, p) in fg.px.iter().enumerate() {
            if p[3] == 0 {
                continue;
            }
            let px = x + (k as u32 & 1);
            let py = y + (k as u32 >> 1);
            if px >= self.width || py >= self.y_end() {
                continue;
            }
            let li = self.luma_idx(px, py);
            self.luma[li] = blend_luma(self.luma[li], p[0], p[3]);
        }
        let (ui, vi) = self.chroma_idx(x, y);
        let (u, v) = blend_quad_chroma(self.chroma[ui], self.chroma[vi], fg);
        self.chroma[ui] = u;
        self.chroma[vi] = v;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/block_linear.rs"]
mod tests;
