use crate::command::{CommandTag, DrawPlan, HEADER_BYTES};
use crate::foundation::error::{ScrimError, ScrimResult};
use crate::foundation::geom::PixelRect;
use crate::foundation::math::rgb_to_yuv;
use crate::surface::block_linear_plane_len;

/// A draw command lifted out of the byte stream for the per-quad loop.
pub(crate) struct Decoded {
    pub(crate) bounds: PixelRect,
    pub(crate) color: [u8; 4],
    pub(crate) kind: DecodedKind,
}

pub(crate) enum DecodedKind {
    Rectangle {
        outer: [f32; 8],
        inner: [f32; 8],
        thickness: i32,
        interpolation: bool,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        thickness: i32,
    },
    Text {
        line_size: i32,
        ilocation: i32,
    },
    Segment {
        mask: u32,
        width: i32,
        height: i32,
        scale_x: f32,
        scale_y: f32,
        threshold: f32,
    },
    RgbaSource {
        src: u32,
        width: i32,
    },
    Nv12Source {
        src: u32,
        width: i32,
        block_linear: bool,
    },
}

/// Decode and validate every record in the plan's command stream.
///
/// When `yuv_colors` is set (NV12 destinations), the colors of vector and
/// text commands are converted to YUV here so the per-pixel loop works in
/// the destination colorspace throughout. Stamp records are exempt: RGBA
/// stamps carry their own pixels and NV12 stamp headers already hold a YUV
/// chroma key.
pub(crate) fn decode_commands(plan: &DrawPlan, yuv_colors: bool) -> ScrimResult<Vec<Decoded>> {
    let mut out = Vec::with_capacity(plan.offsets.len());
    let mut text_seen = 0i32;

    for (i, &off) in plan.offsets.iter().enumerate() {
        if off < 0 || off as usize >= plan.commands.len() {
            return Err(ScrimError::plan(format!(
                "offset {off} of command {i} is outside the stream"
            )));
        }
        let mut r = Reader {
            bytes: &plan.commands,
            pos: off as usize,
            index: i,
        };

        let tag_byte = r.u8()?;
        let tag = CommandTag::from_u8(tag_byte)
            .ok_or_else(|| ScrimError::plan(format!("command {i} has unknown tag {tag_byte}")))?;
        r.skip(3)?;
        if r.remaining() < HEADER_BYTES - 4 + tag.payload_bytes() {
            return Err(ScrimError::plan(format!("command {i} record is truncated")));
        }
        let bounds = PixelRect::new(r.i32()?, r.i32()?, r.i32()?, r.i32()?);
        let mut color = r.color()?;

        let kind = match tag {
            CommandTag::Rectangle => {
                let mut outer = [0f32; 8];
                let mut inner = [0f32; 8];
                for v in outer.iter_mut().chain(inner.iter_mut()) {
                    *v = r.f32()?;
                }
                let thickness = r.i32()?;
                let interpolation = r.u8()? != 0;
                DecodedKind::Rectangle {
                    outer,
                    inner,
                    thickness,
                    interpolation,
                }
            }
            CommandTag::Circle => DecodedKind::Circle {
                cx: r.f32()?,
                cy: r.f32()?,
                radius: r.f32()?,
                thickness: r.i32()?,
            },
            CommandTag::Text => {
                let line_size = r.i32()?;
                let ilocation = r.i32()?;
                if ilocation != text_seen {
                    return Err(ScrimError::plan(format!(
                        "text command {i} has line index {ilocation}, expected {text_seen}"
                    )));
                }
                let base = plan
                    .line_location_base
                    .get(text_seen as usize)
                    .copied()
                    .zip(plan.line_location_base.get(text_seen as usize + 1).copied());
                match base {
                    Some((b, e))
                        if b >= 0
                            && e >= b
                            && e - b == line_size
                            && e as usize <= plan.text_locations.len() => {}
                    _ => {
                        return Err(ScrimError::plan(format!(
                            "text command {i} disagrees with the line location table"
                        )));
                    }
                }
                text_seen += 1;
                DecodedKind::Text {
                    line_size,
                    ilocation,
                }
            }
            CommandTag::Segment => {
                let mask = r.u32()?;
                let width = r.i32()?;
                let height = r.i32()?;
                let kind = DecodedKind::Segment {
                    mask,
                    width,
                    height,
                    scale_x: r.f32()?,
                    scale_y: r.f32()?,
                    threshold: r.f32()?,
                };
                let len = plan
                    .masks
                    .get(mask as usize)
                    .map(Vec::len)
                    .ok_or_else(|| ScrimError::plan(format!("command {i} mask index is unknown")))?;
                if width <= 0 || height <= 0 || len != (width as usize) * (height as usize) {
                    return Err(ScrimError::plan(format!(
                        "command {i} mask extent disagrees with its buffer"
                    )));
                }
                kind
            }
            CommandTag::RgbaSource => {
                r.skip(8)?; // center is redundant with the bounding box
                let width = r.i32()?;
                let height = r.i32()?;
                let src = r.u32()?;
                let len = plan.rgba_sources.get(src as usize).map(Vec::len).ok_or_else(
                    || ScrimError::plan(format!("command {i} stamp index is unknown")),
                )?;
                if width <= 0 || height <= 0 || len != (width as usize) * (height as usize) * 4 {
                    return Err(ScrimError::plan(format!(
                        "command {i} stamp extent disagrees with its buffer"
                    )));
                }
                if bounds.width() != width || bounds.height() != height {
                    return Err(ScrimError::plan(format!(
                        "command {i} stamp bounds disagree with its extent"
                    )));
                }
                DecodedKind::RgbaSource { src, width }
            }
            CommandTag::Nv12Source => {
                r.skip(8)?;
                let width = r.i32()?;
                let height = r.i32()?;
                let src = r.u32()?;
                let block_linear = r.u8()? != 0;
                let data = plan
                    .nv12_sources
                    .get(src as usize)
                    .ok_or_else(|| ScrimError::plan(format!("command {i} stamp index is unknown")))?;
                if width <= 0 || height <= 0 || width % 2 != 0 || height % 2 != 0 {
                    return Err(ScrimError::plan(format!("command {i} stamp extent is invalid")));
                }
                let (w, h) = (width as usize, height as usize);
                let (need_luma, need_chroma) = if block_linear {
                    (block_linear_plane_len(w, h), block_linear_plane_len(w, h / 2))
                } else {
                    (w * h, w * h / 2)
                };
                if data.luma.len() < need_luma || data.chroma.len() < need_chroma {
                    return Err(ScrimError::plan(format!(
                        "command {i} stamp planes disagree with its extent"
                    )));
                }
                if bounds.width() != width || bounds.height() != height {
                    return Err(ScrimError::plan(format!(
                        "command {i} stamp bounds disagree with its extent"
                    )));
                }
                DecodedKind::Nv12Source {
                    src,
                    width,
                    block_linear,
                }
            }
        };

        if yuv_colors
            && matches!(
                tag,
                CommandTag::Rectangle | CommandTag::Circle | CommandTag::Text | CommandTag::Segment
            )
        {
            let [y, u, v] = rgb_to_yuv([color[0], color[1], color[2]]);
            color = [y, u, v, color[3]];
        }

        out.push(Decoded {
            bounds,
            color,
            kind,
        });
    }

    let expected_lines = text_seen as usize + 1;
    if text_seen > 0 && plan.line_location_base.len() != expected_lines {
        return Err(ScrimError::plan(
            "line location table length disagrees with the text command count",
        ));
    }
    if text_seen > 0 {
        let atlas_rows = if plan.atlas_width == 0 {
            0
        } else {
            (plan.atlas.len() / plan.atlas_width as usize) as i32
        };
        for (j, loc) in plan.text_locations.iter().enumerate() {
            if loc.text_w <= 0
                || loc.text_h <= 0
                || loc.text_x < 0
                || loc.text_x + loc.text_w > plan.atlas_width as i32
                || loc.text_h > atlas_rows
            {
                return Err(ScrimError::plan(format!(
                    "text location {j} lies outside the glyph atlas"
                )));
            }
        }
    }

    Ok(out)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    index: usize,
}

impl Reader<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn take(&mut self, n: usize) -> ScrimResult<&[u8]> {
        if self.remaining() < n {
            return Err(ScrimError::plan(format!(
                "command {} record is truncated",
                self.index
            )));
        }
        let s = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn skip(&mut self, n: usize) -> ScrimResult<()> {
        self.take(n).map(|_| ())
    }

    fn u8(&mut self) -> ScrimResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn i32(&mut self) -> ScrimResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u32(&mut self) -> ScrimResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f32(&mut self) -> ScrimResult<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn color(&mut self) -> ScrimResult<[u8; 4]> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/decode.rs"]
mod tests;
