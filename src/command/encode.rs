use kurbo::{Affine, Point};

use crate::command::{
    BoxBlurCommand, CommandTag, DrawPlan, Nv12SourceData, TextLocation,
};
use crate::foundation::error::{ScrimError, ScrimResult};
use crate::foundation::geom::PixelRect;
use crate::surface::block_linear_plane_len;

/// Accumulates draw calls and serializes them into a [`DrawPlan`].
///
/// Draw order is composite order: later calls paint over earlier ones.
/// Methods validate their bulk inputs up front so a built plan is always
/// structurally sound.
#[derive(Default)]
pub struct DrawList {
    bytes: Vec<u8>,
    offsets: Vec<i32>,
    text_locations: Vec<TextLocation>,
    line_location_base: Vec<i32>,
    atlas: Vec<u8>,
    atlas_width: u32,
    masks: Vec<Vec<f32>>,
    rgba_sources: Vec<Vec<u8>>,
    nv12_sources: Vec<Nv12SourceData>,
    blurs: Vec<BoxBlurCommand>,
    bounds: Option<PixelRect>,
    rotate_msaa: bool,
}

impl DrawList {
    /// New empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the monochrome glyph atlas sampled by [`DrawList::text_line`].
    ///
    /// `row_width` is the atlas row pitch in bytes; glyph coverage bytes for
    /// row `fy` of a glyph live at `atlas[fy * row_width + text_x ..]`.
    pub fn set_atlas(&mut self, bytes: Vec<u8>, row_width: u32) -> ScrimResult<()> {
        if row_width == 0 {
            return Err(ScrimError::validation("atlas row width must be non-zero"));
        }
        if !bytes.len().is_multiple_of(row_width as usize) {
            return Err(ScrimError::validation(
                "atlas length must be a whole number of rows",
            ));
        }
        self.atlas = bytes;
        self.atlas_width = row_width;
        Ok(())
    }

    /// Axis-aligned rectangle. `thickness` of `-1` fills; `>= 0` strokes a
    /// border that thick, inset from the given edges.
    pub fn rect(
        &mut self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        thickness: i32,
        color: [u8; 4],
    ) -> ScrimResult<()> {
        if right <= left || bottom <= top {
            return Err(ScrimError::validation("rectangle edges are inverted"));
        }
        let outer = corner_quad(left, top, right, bottom);
        let t = thickness.max(0) as f32;
        let inner = corner_quad(left + t, top + t, right - t, bottom - t);
        self.push_rectangle(outer, inner, thickness, false, color)
    }

    /// Rectangle of `width` x `height` centered at `(cx, cy)` and rotated by
    /// `yaw` radians. `interpolation` turns on 4x multisampled edges.
    pub fn rotated_rect(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        yaw: f32,
        thickness: i32,
        color: [u8; 4],
        interpolation: bool,
    ) -> ScrimResult<()> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ScrimError::validation("rotated rectangle must have positive size"));
        }
        let xform = Affine::translate((f64::from(cx), f64::from(cy)))
            * Affine::rotate(f64::from(yaw));
        let outer = rotated_quad(&xform, width, height);
        let t = 2.0 * thickness.max(0) as f32;
        let inner = rotated_quad(&xform, (width - t).max(0.0), (height - t).max(0.0));
        self.rotate_msaa |= yaw != 0.0 || interpolation;
        self.push_rectangle(outer, inner, thickness, interpolation, color)
    }

    fn push_rectangle(
        &mut self,
        outer: [f32; 8],
        inner: [f32; 8],
        thickness: i32,
        interpolation: bool,
        color: [u8; 4],
    ) -> ScrimResult<()> {
        if thickness < -1 {
            return Err(ScrimError::validation("rectangle thickness must be -1 or >= 0"));
        }
        let mut bounds = quad_bounds(&outer);
        if interpolation {
            bounds = bounds.dilate(1);
        }
        self.begin(CommandTag::Rectangle, bounds, color);
        for v in outer.iter().chain(inner.iter()) {
            self.put_f32(*v);
        }
        self.put_i32(thickness);
        self.put_u8_padded(u8::from(interpolation));
        Ok(())
    }

    /// Circle centered at `(cx, cy)`. `thickness` of `-1` fills; `>= 0`
    /// strokes an annulus centered on the radius.
    pub fn circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        thickness: i32,
        color: [u8; 4],
    ) -> ScrimResult<()> {
        if !(radius > 0.0) {
            return Err(ScrimError::validation("circle radius must be positive"));
        }
        if thickness < -1 {
            return Err(ScrimError::validation("circle thickness must be -1 or >= 0"));
        }
        let reach = if thickness < 0 {
            radius
        } else {
            radius + thickness as f32 / 2.0
        } + 1.0;
        let bounds = PixelRect::new(
            (cx - reach).floor() as i32,
            (cy - reach).floor() as i32,
            (cx + reach).ceil() as i32,
            (cy + reach).ceil() as i32,
        );
        self.begin(CommandTag::Circle, bounds, color);
        self.put_f32(cx);
        self.put_f32(cy);
        self.put_f32(radius);
        self.put_i32(thickness);
        Ok(())
    }

    /// One shaped text line: pre-positioned glyph locations sharing a color.
    ///
    /// Requires the atlas to be installed first; every glyph must lie inside
    /// the atlas.
    pub fn text_line(&mut self, glyphs: &[TextLocation], color: [u8; 4]) -> ScrimResult<()> {
        if glyphs.is_empty() {
            return Err(ScrimError::validation("text line needs at least one glyph"));
        }
        if self.atlas_width == 0 {
            return Err(ScrimError::validation("text line submitted before set_atlas"));
        }
        let atlas_rows = (self.atlas.len() / self.atlas_width as usize) as i32;
        let mut bounds: Option<PixelRect> = None;
        for g in glyphs {
            if g.text_w <= 0 || g.text_h <= 0 {
                return Err(ScrimError::validation("glyph extent must be positive"));
            }
            if g.text_x < 0
                || g.text_x + g.text_w > self.atlas_width as i32
                || g.text_h > atlas_rows
            {
                return Err(ScrimError::validation("glyph lies outside the atlas"));
            }
            let r = PixelRect::new(
                g.image_x,
                g.image_y,
                g.image_x + g.text_w - 1,
                g.image_y + g.text_h - 1,
            );
            bounds = Some(bounds.map_or(r, |b| b.union(r)));
        }

        if self.line_location_base.is_empty() {
            self.line_location_base.push(0);
        }
        let ilocation = self.line_location_base.len() as i32 - 1;
        let base = *self.line_location_base.last().unwrap_or(&0);
        self.text_locations.extend_from_slice(glyphs);
        self.line_location_base.push(base + glyphs.len() as i32);

        self.begin(
            CommandTag::Text,
            bounds.unwrap_or(PixelRect::new(0, 0, -1, -1)),
            color,
        );
        self.put_i32(glyphs.len() as i32);
        self.put_i32(ilocation);
        Ok(())
    }

    /// Per-pixel segmentation overlay: a float mask resampled over `rect`,
    /// colored where the mask exceeds `threshold`.
    pub fn segment_mask(
        &mut self,
        rect: PixelRect,
        mask: Vec<f32>,
        mask_width: i32,
        mask_height: i32,
        threshold: f32,
        color: [u8; 4],
    ) -> ScrimResult<()> {
        if rect.is_empty() {
            return Err(ScrimError::validation("segment rect covers no pixels"));
        }
        if mask_width <= 0 || mask_height <= 0 {
            return Err(ScrimError::validation("segment mask extent must be positive"));
        }
        if mask.len() != (mask_width as usize) * (mask_height as usize) {
            return Err(ScrimError::validation(
                "segment mask length must equal mask_width * mask_height",
            ));
        }
        let scale_x = mask_width as f32 / rect.width() as f32;
        let scale_y = mask_height as f32 / rect.height() as f32;
        let index = self.masks.len() as u32;
        self.masks.push(mask);

        self.begin(CommandTag::Segment, rect, color);
        self.put_u32(index);
        self.put_i32(mask_width);
        self.put_i32(mask_height);
        self.put_f32(scale_x);
        self.put_f32(scale_y);
        self.put_f32(threshold);
        Ok(())
    }

    /// Paste an RGBA stamp of `width` x `height` centered at `(cx, cy)`,
    /// blending with the stamp's own per-pixel alpha.
    pub fn rgba_source(
        &mut self,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        data: Vec<u8>,
    ) -> ScrimResult<()> {
        if width <= 0 || height <= 0 {
            return Err(ScrimError::validation("stamp extent must be positive"));
        }
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(ScrimError::validation(
                "rgba stamp length must equal width * height * 4",
            ));
        }
        let bounds = centered_bounds(cx, cy, width, height);
        let index = self.rgba_sources.len() as u32;
        self.rgba_sources.push(data);

        self.begin(CommandTag::RgbaSource, bounds, [255, 255, 255, 255]);
        self.put_i32(cx);
        self.put_i32(cy);
        self.put_i32(width);
        self.put_i32(height);
        self.put_u32(index);
        Ok(())
    }

    /// Paste an NV12 stamp centered at `(cx, cy)`. Pixels exactly matching
    /// the YUV `transparent_key` are dropped; all others take `alpha`.
    ///
    /// NV12 stamps carry their YUV bytes straight through the compositor, so
    /// they only make visual sense on NV12 destinations.
    #[allow(clippy::too_many_arguments)]
    pub fn nv12_source(
        &mut self,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        luma: Vec<u8>,
        chroma: Vec<u8>,
        block_linear: bool,
        transparent_key: [u8; 3],
        alpha: u8,
    ) -> ScrimResult<()> {
        if width <= 0 || height <= 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(ScrimError::validation("nv12 stamp extent must be positive and even"));
        }
        let (w, h) = (width as usize, height as usize);
        let (need_luma, need_chroma) = if block_linear {
            (block_linear_plane_len(w, h), block_linear_plane_len(w, h / 2))
        } else {
            (w * h, w * h / 2)
        };
        if luma.len() < need_luma || chroma.len() < need_chroma {
            return Err(ScrimError::validation("nv12 stamp planes are too small"));
        }
        let bounds = centered_bounds(cx, cy, width, height);
        let index = self.nv12_sources.len() as u32;
        self.nv12_sources.push(Nv12SourceData { luma, chroma });

        let color = [
            transparent_key[0],
            transparent_key[1],
            transparent_key[2],
            alpha,
        ];
        self.begin(CommandTag::Nv12Source, bounds, color);
        self.put_i32(cx);
        self.put_i32(cy);
        self.put_i32(width);
        self.put_i32(height);
        self.put_u32(index);
        self.put_u8_padded(u8::from(block_linear));
        Ok(())
    }

    /// Box-blur `rect` in place with an odd `kernel_size`.
    pub fn box_blur(&mut self, rect: PixelRect, kernel_size: i32) -> ScrimResult<()> {
        if rect.is_empty() {
            return Err(ScrimError::validation("blur rect covers no pixels"));
        }
        if kernel_size < 1 || kernel_size % 2 == 0 {
            return Err(ScrimError::validation("blur kernel size must be odd and >= 1"));
        }
        self.blurs.push(BoxBlurCommand { rect, kernel_size });
        Ok(())
    }

    /// Finish the list into an immutable plan.
    pub fn build(self) -> DrawPlan {
        let mut line_location_base = self.line_location_base;
        if line_location_base.is_empty() {
            line_location_base.push(0);
        }
        DrawPlan {
            commands: self.bytes,
            offsets: self.offsets,
            text_locations: self.text_locations,
            line_location_base,
            atlas: self.atlas,
            atlas_width: self.atlas_width,
            masks: self.masks,
            rgba_sources: self.rgba_sources,
            nv12_sources: self.nv12_sources,
            blurs: self.blurs,
            bounds: self.bounds,
            rotate_msaa: self.rotate_msaa,
        }
    }

    fn begin(&mut self, tag: CommandTag, bounds: PixelRect, color: [u8; 4]) {
        self.offsets.push(self.bytes.len() as i32);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(bounds),
            None => bounds,
        });
        self.bytes.push(tag as u8);
        self.bytes.extend_from_slice(&[0, 0, 0]);
        self.put_i32(bounds.left);
        self.put_i32(bounds.top);
        self.put_i32(bounds.right);
        self.put_i32(bounds.bottom);
        self.bytes.extend_from_slice(&color);
    }

    fn put_i32(&mut self, v: i32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    fn put_u32(&mut self, v: u32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    fn put_f32(&mut self, v: f32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    fn put_u8_padded(&mut self, v: u8) {
        self.bytes.extend_from_slice(&[v, 0, 0, 0]);
    }
}

/// Corners in a/b/c/d order (top-left, top-right, bottom-right, bottom-left).
fn corner_quad(left: f32, top: f32, right: f32, bottom: f32) -> [f32; 8] {
    [left, top, right, top, right, bottom, left, bottom]
}

fn rotated_quad(xform: &Affine, width: f32, height: f32) -> [f32; 8] {
    let hw = f64::from(width) / 2.0;
    let hh = f64::from(height) / 2.0;
    let corners = [
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ];
    let mut out = [0f32; 8];
    for (i, c) in corners.iter().enumerate() {
        let p = *xform * *c;
        out[i * 2] = p.x as f32;
        out[i * 2 + 1] = p.y as f32;
    }
    out
}

fn quad_bounds(q: &[f32; 8]) -> PixelRect {
    let xs = [q[0], q[2], q[4], q[6]];
    let ys = [q[1], q[3], q[5], q[7]];
    let min_x = xs.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_x = xs.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let min_y = ys.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_y = ys.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    PixelRect::new(
        min_x.floor() as i32,
        min_y.floor() as i32,
        max_x.ceil() as i32,
        max_y.ceil() as i32,
    )
}

fn centered_bounds(cx: i32, cy: i32, width: i32, height: i32) -> PixelRect {
    let left = cx - width / 2;
    let top = cy - height / 2;
    PixelRect::new(left, top, left + width - 1, top + height - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/command/encode.rs"]
mod tests;
