use super::*;

#[test]
fn filled_circle_center_and_far_field() {
    assert_eq!(circle_alpha(10.0, 10.0, 5.0, -1, 255, 10.0, 10.0), 255);
    assert_eq!(circle_alpha(10.0, 10.0, 5.0, -1, 255, 10.0, 14.0), 255);
    assert_eq!(circle_alpha(10.0, 10.0, 5.0, -1, 255, 10.0, 17.0), 0);
}

#[test]
fn edge_ramps_linearly_over_one_pixel() {
    // r = 5.5 sits halfway down the outer ramp of a radius-5 fill.
    let a = circle_alpha(0.0, 0.0, 5.0, -1, 255, 5.5, 0.0);
    assert_eq!(a, 128);
    // Ramp endpoints.
    assert_eq!(circle_alpha(0.0, 0.0, 5.0, -1, 255, 6.0, 0.0), 0);
    assert_eq!(circle_alpha(0.0, 0.0, 5.0, -1, 255, 4.9, 0.0), 255);
}

#[test]
fn stroke_covers_an_annulus_centered_on_the_radius() {
    // radius 8, thickness 4: annulus [6, 10).
    let alpha = |r: f32| circle_alpha(0.0, 0.0, 8.0, 4, 255, r, 0.0);
    assert_eq!(alpha(0.0), 0);
    assert_eq!(alpha(4.0), 0);
    assert_eq!(alpha(7.0), 255);
    assert_eq!(alpha(9.9), 255);
    assert_eq!(alpha(11.5), 0);
    // Inner ramp at r = 5.5: halfway between 5 and 6.
    assert_eq!(alpha(5.5), 128);
}

#[test]
fn command_alpha_scales_the_ramp() {
    assert_eq!(circle_alpha(0.0, 0.0, 5.0, -1, 100, 0.0, 0.0), 100);
    assert_eq!(circle_alpha(0.0, 0.0, 5.0, -1, 100, 5.5, 0.0), 50);
}
