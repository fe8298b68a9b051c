/// Coverage alpha of a circle command at integer pixel `(x, y)`.
///
/// The annulus is `[inner, outer)` with a 1-pixel linear ramp outside both
/// edges; filled circles collapse the inner edge to the center. The ramp
/// width is fixed at 1 pixel even for strokes thinner than 2 pixels, which
/// slightly double-counts the seam.
pub(crate) fn circle_alpha(
    cx: f32,
    cy: f32,
    radius: f32,
    thickness: i32,
    c3: u8,
    x: f32,
    y: f32,
) -> u8 {
    let r = (x - cx).hypot(y - cy);
    let (inner, outer) = if thickness < 0 {
        (0.0, radius)
    } else {
        let inner = radius - thickness as f32 / 2.0;
        (inner, inner + thickness as f32)
    };

    let w = if r >= inner && r < outer {
        1.0
    } else if r >= inner - 1.0 && r < inner {
        r - (inner - 1.0)
    } else if r >= outer && r < outer + 1.0 {
        (outer + 1.0) - r
    } else {
        0.0
    };
    (f32::from(c3) * w + 0.5) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/circle.rs"]
mod tests;
