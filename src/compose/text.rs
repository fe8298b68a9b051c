use crate::command::TextLocation;
use crate::foundation::math::mul_div255_u8;

/// Coverage alpha of a text line at integer pixel `(ix, iy)`.
///
/// Locations are scanned in order and the first glyph whose box contains the
/// pixel wins; its atlas coverage byte is scaled by the command alpha.
pub(crate) fn text_alpha(
    locations: &[TextLocation],
    atlas: &[u8],
    atlas_width: u32,
    c3: u8,
    ix: i32,
    iy: i32,
) -> u8 {
    for loc in locations {
        if ix < loc.image_x
            || ix >= loc.image_x + loc.text_w
            || iy < loc.image_y
            || iy >= loc.image_y + loc.text_h
        {
            continue;
        }
        let fx = ix - loc.image_x;
        let fy = iy - loc.image_y;
        let cov = atlas[fy as usize * atlas_width as usize + (fx + loc.text_x) as usize];
        return mul_div255_u8(u16::from(cov), u16::from(c3));
    }
    0
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
