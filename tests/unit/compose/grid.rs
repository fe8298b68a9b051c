use super::*;

#[test]
fn grid_origin_is_rounded_down_to_the_quad_lattice() {
    let g = launch_grid(Some(PixelRect::new(5, 3, 20, 17)), 64, 64).unwrap();
    assert_eq!(g, PixelRect::new(4, 2, 20, 17));
}

#[test]
fn grid_is_clipped_to_the_surface() {
    let g = launch_grid(Some(PixelRect::new(-10, -10, 100, 100)), 32, 16).unwrap();
    assert_eq!(g, PixelRect::new(0, 0, 31, 15));
}

#[test]
fn fully_offscreen_bounds_produce_no_grid() {
    assert!(launch_grid(Some(PixelRect::new(40, 0, 50, 10)), 32, 32).is_none());
    assert!(launch_grid(Some(PixelRect::new(-8, -8, -1, -1)), 32, 32).is_none());
}

#[test]
fn no_bounds_means_no_grid() {
    assert!(launch_grid(None, 32, 32).is_none());
}
