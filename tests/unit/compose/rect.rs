use super::*;

fn aligned(left: f32, top: f32, right: f32, bottom: f32) -> [f32; 8] {
    [left, top, right, top, right, bottom, left, bottom]
}

const NONE: [f32; 8] = [0.0; 8];

#[test]
fn aligned_and_general_paths_agree_on_axis_rects() {
    // Fractional corners keep integer samples off the edges, where the hard
    // comparison and the strict cross-product test are allowed to differ.
    let outer = aligned(2.5, 3.5, 10.5, 9.5);
    for y in 0..12 {
        for x in 0..12 {
            let fast = rect_alpha::<false>(&outer, &NONE, -1, false, 255, x as f32, y as f32);
            let slow = rect_alpha::<true>(&outer, &NONE, -1, false, 255, x as f32, y as f32);
            assert_eq!(fast, slow, "disagreement at ({x}, {y})");
        }
    }
}

#[test]
fn filled_covers_half_open_extent() {
    let outer = aligned(4.0, 4.0, 12.0, 12.0);
    assert_eq!(rect_alpha::<false>(&outer, &NONE, -1, false, 200, 4.0, 4.0), 200);
    assert_eq!(rect_alpha::<false>(&outer, &NONE, -1, false, 200, 11.0, 11.0), 200);
    assert_eq!(rect_alpha::<false>(&outer, &NONE, -1, false, 200, 12.0, 8.0), 0);
    assert_eq!(rect_alpha::<false>(&outer, &NONE, -1, false, 200, 3.0, 8.0), 0);
}

#[test]
fn hollow_excludes_the_inner_quad() {
    let outer = aligned(0.0, 0.0, 10.0, 10.0);
    let inner = aligned(2.0, 2.0, 8.0, 8.0);
    assert_eq!(rect_alpha::<false>(&outer, &inner, 2, false, 255, 1.0, 5.0), 255);
    assert_eq!(rect_alpha::<false>(&outer, &inner, 2, false, 255, 5.0, 5.0), 0);
    let general = rect_alpha::<true>(&outer, &inner, 2, false, 255, 5.0, 5.0);
    assert_eq!(general, 0);
}

#[test]
fn rotated_square_covers_its_center_not_its_corner() {
    // 10x10 square rotated 45 degrees about (10, 10).
    let (s, c) = (std::f32::consts::FRAC_PI_4.sin(), std::f32::consts::FRAC_PI_4.cos());
    let mut q = [0f32; 8];
    for (i, (lx, ly)) in [(-5f32, -5f32), (5.0, -5.0), (5.0, 5.0), (-5.0, 5.0)]
        .iter()
        .enumerate()
    {
        q[i * 2] = 10.0 + lx * c - ly * s;
        q[i * 2 + 1] = 10.0 + lx * s + ly * c;
    }
    assert_eq!(rect_alpha::<true>(&q, &NONE, -1, false, 255, 10.0, 10.0), 255);
    // The unrotated corner region is outside the diamond.
    assert_eq!(rect_alpha::<true>(&q, &NONE, -1, false, 255, 14.0, 14.0), 0);
}

#[test]
fn multisampling_grades_edge_pixels() {
    let outer = aligned(2.0, 0.0, 20.0, 20.0);
    // x = 2: all four subsamples inside. x = 1.75 straddles the edge.
    assert_eq!(rect_alpha::<true>(&outer, &NONE, -1, true, 255, 4.0, 10.0), 255);
    let partial = rect_alpha::<true>(&outer, &NONE, -1, true, 255, 1.8, 10.0);
    assert_eq!(partial, ((255u32 * 2) >> 2) as u8);
    let outside = rect_alpha::<true>(&outer, &NONE, -1, true, 255, 1.0, 10.0);
    assert_eq!(outside, 0);
}
