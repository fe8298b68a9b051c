use crate::command::{Nv12SourceData, TextLocation};
use crate::command::decode::{Decoded, DecodedKind};
use crate::compose::accumulator::blend_over;
use crate::compose::{circle, rect, segment, stamp, text};
use crate::foundation::geom::PixelRect;
use crate::surface::{QuadFg, SurfaceBand};

/// Everything one composite launch borrows from a plan.
pub(crate) struct FrameData<'a> {
    pub(crate) commands: &'a [Decoded],
    pub(crate) text_locations: &'a [TextLocation],
    pub(crate) line_location_base: &'a [i32],
    pub(crate) atlas: &'a [u8],
    pub(crate) atlas_width: u32,
    pub(crate) masks: &'a [Vec<f32>],
    pub(crate) rgba_sources: &'a [Vec<u8>],
    pub(crate) nv12_sources: &'a [Nv12SourceData],
}

/// Composite every quad of `grid` owned by `band`.
///
/// `grid` has an even origin, so quads land on the same 2x2 lattice in every
/// band and the chroma partitioning argument holds.
pub(crate) fn composite_band<B: SurfaceBand, const ROTATE_MSAA: bool>(
    band: &mut B,
    grid: PixelRect,
    frame: &FrameData<'_>,
) {
    let y_top = grid.top.max(band.y_start() as i32);
    let y_end = band.y_end() as i32;

    let mut iy = y_top;
    while iy <= grid.bottom && iy < y_end {
        let mut ix = grid.left;
        while ix <= grid.right {
            composite_quad::<B, ROTATE_MSAA>(band, ix, iy, frame);
            ix += 2;
        }
        iy += 2;
    }
}

fn composite_quad<B: SurfaceBand, const ROTATE_MSAA: bool>(
    band: &mut B,
    ix: i32,
    iy: i32,
    frame: &FrameData<'_>,
) {
    let width = band.width() as i32;
    let y_end = band.y_end() as i32;
    let mut fg = QuadFg::default();
    // The only state threaded between commands: every text command consumes
    // one slot of the line location table, whether it draws here or not.
    let mut itext = 0usize;

    for cmd in frame.commands {
        let is_text = matches!(cmd.kind, DecodedKind::Text { .. });
        if ix > cmd.bounds.right
            || ix + 1 < cmd.bounds.left
            || iy > cmd.bounds.bottom
            || iy + 1 < cmd.bounds.top
        {
            if is_text {
                itext += 1;
            }
            continue;
        }

        match &cmd.kind {
            DecodedKind::Rectangle {
                outer,
                inner,
                thickness,
                interpolation,
            } => {
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    let a = rect::rect_alpha::<ROTATE_MSAA>(
                        outer,
                        inner,
                        *thickness,
                        *interpolation,
                        cmd.color[3],
                        px as f32,
                        py as f32,
                    );
                    blend_over(&mut fg.px[k], rgb_of(cmd.color), a);
                });
            }
            DecodedKind::Circle {
                cx,
                cy,
                radius,
                thickness,
            } => {
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    let a = circle::circle_alpha(
                        *cx,
                        *cy,
                        *radius,
                        *thickness,
                        cmd.color[3],
                        px as f32,
                        py as f32,
                    );
                    blend_over(&mut fg.px[k], rgb_of(cmd.color), a);
                });
            }
            DecodedKind::Text {
                ilocation,
                line_size,
            } => {
                debug_assert_eq!(*ilocation as usize, itext);
                let begin = frame.line_location_base[itext] as usize;
                let end = frame.line_location_base[itext + 1] as usize;
                debug_assert_eq!(end - begin, *line_size as usize);
                itext += 1;
                let locations = &frame.text_locations[begin..end];
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    let a = text::text_alpha(
                        locations,
                        frame.atlas,
                        frame.atlas_width,
                        cmd.color[3],
                        px,
                        py,
                    );
                    blend_over(&mut fg.px[k], rgb_of(cmd.color), a);
                });
            }
            DecodedKind::Segment {
                mask,
                width: mw,
                height: mh,
                scale_x,
                scale_y,
                threshold,
            } => {
                let data = &frame.masks[*mask as usize];
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    if !cmd.bounds.contains(px, py) {
                        return;
                    }
                    let a = segment::segment_alpha(
                        data,
                        *mw,
                        *mh,
                        *scale_x,
                        *scale_y,
                        *threshold,
                        cmd.color[3],
                        px,
                        py,
                        cmd.bounds.left,
                        cmd.bounds.top,
                    );
                    blend_over(&mut fg.px[k], rgb_of(cmd.color), a);
                });
            }
            DecodedKind::RgbaSource { src, width: sw } => {
                let data = &frame.rgba_sources[*src as usize];
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    if !cmd.bounds.contains(px, py) {
                        return;
                    }
                    let p =
                        stamp::rgba_stamp(data, *sw, px - cmd.bounds.left, py - cmd.bounds.top);
                    blend_over(&mut fg.px[k], [p[0], p[1], p[2]], p[3]);
                });
            }
            DecodedKind::Nv12Source {
                src,
                width: sw,
                block_linear,
            } => {
                let data = &frame.nv12_sources[*src as usize];
                let key = [cmd.color[0], cmd.color[1], cmd.color[2]];
                for_each_pixel(ix, iy, width, y_end, |k, px, py| {
                    if !cmd.bounds.contains(px, py) {
                        return;
                    }
                    let p = stamp::nv12_stamp(
                        data,
                        *sw,
                        *block_linear,
                        key,
                        cmd.color[3],
                        px - cmd.bounds.left,
                        py - cmd.bounds.top,
                    );
                    blend_over(&mut fg.px[k], [p[0], p[1], p[2]], p[3]);
                });
            }
        }
    }

    if fg.any_coverage() {
        band.commit_quad(ix as u32, iy as u32, &fg);
    }
}

fn rgb_of(color: [u8; 4]) -> [u8; 3] {
    [color[0], color[1], color[2]]
}

/// Visit the in-surface pixels of the quad at `(ix, iy)`.
fn for_each_pixel(ix: i32, iy: i32, width: i32, y_end: i32, mut f: impl FnMut(usize, i32, i32)) {
    for k in 0..4usize {
        let px = ix + (k as i32 & 1);
        let py = iy + (k as i32 >> 1);
        if px < width && py < y_end {
            f(k, px, py);
        }
    }
}
