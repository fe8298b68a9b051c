use crate::command::BoxBlurCommand;
use crate::foundation::geom::PixelRect;
use crate::surface::SurfaceBand;

const TILE: i32 = 32;

/// Box-blur every listed region of `surface` in place.
///
/// Runs before the composite pass. Regions may overlap, so they are applied
/// in list order, one at a time, on the full surface view.
pub(crate) fn run_blur<B: SurfaceBand>(surface: &mut B, blurs: &[BoxBlurCommand]) {
    let full = PixelRect::new(
        0,
        0,
        surface.width() as i32 - 1,
        surface.y_end() as i32 - 1,
    );
    for cmd in blurs {
        let rect = cmd.rect.intersect(full);
        if rect.is_empty() {
            continue;
        }
        blur_region(surface, rect, cmd.kernel_size);
    }
}

/// One region: stage a 32x32 downsample of the rectangle, box-filter it in
/// tile space, and resample the filtered tile back over the rectangle.
fn blur_region<B: SurfaceBand>(surface: &mut B, rect: PixelRect, kernel_size: i32) {
    let bw = rect.width();
    let bh = rect.height();

    let mut tile = [[0u8; 3]; (TILE * TILE) as usize];
    for ty in 0..TILE {
        for tx in 0..TILE {
            let sx = rect.left + tx * bw / TILE;
            let sy = rect.top + ty * bh / TILE;
            tile[(ty * TILE + tx) as usize] = surface.load_rgb(sx as u32, sy as u32);
        }
    }

    // Mean over the window clipped to the tile; edge samples divide by their
    // own valid count.
    let r = kernel_size / 2;
    let mut filtered = [[0u8; 3]; (TILE * TILE) as usize];
    for ty in 0..TILE {
        for tx in 0..TILE {
            let x0 = (tx - r).max(0);
            let x1 = (tx + r).min(TILE - 1);
            let y0 = (ty - r).max(0);
            let y1 = (ty + r).min(TILE - 1);
            let mut acc = [0u32; 3];
            let mut n = 0u32;
            for yy in y0..=y1 {
                for xx in x0..=x1 {
                    let p = tile[(yy * TILE + xx) as usize];
                    acc[0] += u32::from(p[0]);
                    acc[1] += u32::from(p[1]);
                    acc[2] += u32::from(p[2]);
                    n += 1;
                }
            }
            filtered[(ty * TILE + tx) as usize] =
                [(acc[0] / n) as u8, (acc[1] / n) as u8, (acc[2] / n) as u8];
        }
    }

    for y in rect.top..=rect.bottom {
        let ty = (y - rect.top) * TILE / bh;
        for x in rect.left..=rect.right {
            let tx = (x - rect.left) * TILE / bw;
            surface.store_rgb(x as u32, y as u32, filtered[(ty * TILE + tx) as usize]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blur.rs"]
mod tests;
