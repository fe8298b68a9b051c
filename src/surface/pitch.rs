use crate::foundation::math::{rgb_to_yuv, yuv_to_rgb};
use crate::surface::{
    BandSplit, QuadFg, SurfaceBand, blend_luma, blend_quad_chroma, blend_rgb_pixel,
};

/// Pitch-linear RGB24 rows.
pub(crate) struct RgbBand<'a> {
    data: &'a mut [u8],
    stride: usize,
    width: u32,
    y0: u32,
    rows: u32,
}

impl<'a> RgbBand<'a> {
    pub(crate) fn full(data: &'a mut [u8], stride: usize, width: u32, height: u32) -> Self {
        Self {
            data,
            stride,
            width,
            y0: 0,
            rows: height,
        }
    }

    pub(crate) fn split(self, band_rows: u32) -> Vec<Self> {
        let Self {
            data,
            stride,
            width,
            rows,
            ..
        } = self;
        split_pitch(data, stride, band_rows as usize, rows)
            .into_iter()
            .map(|(y0, band_rows, data)| Self {
                data,
                stride,
                width,
                y0: y0 as u32,
                rows: band_rows as u32,
            })
            .collect()
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y - self.y0) as usize * self.stride + x as usize * 3
    }
}

impl SurfaceBand for RgbBand<'_> {
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
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    fn store_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
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
            let (rgb, _) = blend_rgb_pixel(self.load_rgb(px, py), 255, *p);
            self.store_rgb(px, py, rgb);
        }
    }
}

/// Pitch-linear RGBA32 rows.
pub(crate) struct RgbaBand<'a> {
    data: &'a mut [u8],
    stride: usize,
    width: u32,
    y0: u32,
    rows: u32,
}

impl<'a> RgbaBand<'a> {
    pub(crate) fn full(data: &'a mut [u8], stride: usize, width: u32, height: u32) -> Self {
        Self {
            data,
            stride,
            width,
            y0: 0,
            rows: height,
        }
    }

    pub(crate) fn split(self, band_rows: u32) -> Vec<Self> {
        let Self {
            data,
            stride,
            width,
            rows,
            ..
        } = self;
        split_pitch(data, stride, band_rows as usize, rows)
            .into_iter()
            .map(|(y0, band_rows, data)| Self {
                data,
                stride,
                width,
                y0: y0 as u32,
                rows: band_rows as u32,
            })
            .collect()
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y - self.y0) as usize * self.stride + x as usize * 4
    }
}

impl SurfaceBand for RgbaBand<'_> {
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
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    fn store_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        // Blur writes color only; destination alpha is preserved.
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
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
            let i = self.idx(px, py);
            let dst = [self.data[i], self.data[i + 1], self.data[i + 2]];
            let (rgb, out_a) = blend_rgb_pixel(dst, u32::from(self.data[i + 3]), *p);
            self.data[i..i + 3].copy_from_slice(&rgb);
            self.data[i + 3] = out_a;
        }
    }
}

/// Pitch-linear NV12: strided luma rows plus half-height interleaved chroma.
pub(crate) struct PitchNv12Band<'a> {
    luma: &'a mut [u8],
    chroma: &'a mut [u8],
    stride: usize,
    width: u32,
    y0: u32,
    rows: u32,
}

impl<'a> PitchNv12Band<'a> {
    pub(crate) fn full(
        luma: &'a mut [u8],
        chroma: &'a mut [u8],
        stride: usize,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            luma,
            chroma,
            stride,
            width,
            y0: 0,
            rows: height,
        }
    }

    pub(crate) fn split(self, band_rows: u32) -> Vec<Self> {
        let Self {
            luma,
            chroma,
            stride,
            width,
            rows,
            ..
        } = self;
        let luma_bands = split_pitch(luma, stride, band_rows as usize, rows);
        let chroma_bands = split_pitch(chroma, stride, band_rows as usize / 2, rows.div_ceil(2));
        luma_bands
            .into_iter()
            .zip(chroma_bands)
            .map(|((y0, band_rows, luma), (_, _, chroma))| Self {
                luma,
                chroma,
                stride,
                width,
                y0: y0 as u32,
                rows: band_rows as u32,
            })
            .collect()
    }

    fn luma_idx(&self, x: u32, y: u32) -> usize {
        (y - self.y0) as usize * self.stride + x as usize
    }

    fn chroma_idx(&self, x: u32, y: u32) -> usize {
        ((y - self.y0) / 2) as usize * self.stride + (x & !1) as usize
    }
}

impl SurfaceBand for PitchNv12Band<'_> {
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
        let ci = self.chroma_idx(x, y);
        yuv_to_rgb(
            self.luma[self.luma_idx(x, y)],
            self.chroma[ci],
            self.chroma[ci + 1],
        )
    }

    fn store_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let [yv, u, v] = rgb_to_yuv(rgb);
        let li = self.luma_idx(x, y);
        self.luma[li] = yv;
        let ci = self.chroma_idx(x, y);
        self.chroma[ci] = u;
        self.chroma[ci + 1] = v;
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
        let ci = self.chroma_idx(x, y);
        let (u, v) = blend_quad_chroma(self.chroma[ci], self.chroma[ci + 1], fg);
        self.chroma[ci] = u;
        self.chroma[ci + 1] = v;
    }
}

impl BandSplit for RgbBand<'_> {
    fn split_bands(self, band_rows: u32) -> Vec<Self> {
        self.split(band_rows)
    }
}

impl BandSplit for RgbaBand<'_> {
    fn split_bands(self, band_rows: u32) -> Vec<Self> {
        self.split(band_rows)
    }
}

impl BandSplit for PitchNv12Band<'_> {
    fn split_bands(self, band_rows: u32) -> Vec<Self> {
        self.split(band_rows)
    }
}

/// Split a strided plane into `(first_row, rows, bytes)` bands.
fn split_pitch(
    data: &mut [u8],
    stride: usize,
    band_rows: usize,
    rows_total: u32,
) -> Vec<(usize, usize, &mut [u8])> {
    let rows_total = rows_total as usize;
    let mut out = Vec::with_capacity(rows_total.div_ceil(band_rows.max(1)));
    let mut y0 = 0usize;
    for chunk in data.chunks_mut(stride * band_rows) {
        if y0 >= rows_total {
            break;
        }
        let rows = band_rows.min(rows_total - y0);
        out.push((y0, rows, chunk));
        y0 += rows;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/pitch.rs"]
mod tests;
