use super::*;

#[test]
fn extent_of_single_pixel_rect() {
    let r = PixelRect::new(3, 4, 3, 4);
    assert_eq!(r.width(), 1);
    assert_eq!(r.height(), 1);
    assert!(!r.is_empty());
}

#[test]
fn inverted_rect_is_empty_with_zero_extent() {
    let r = PixelRect::new(5, 5, 4, 9);
    assert!(r.is_empty());
    assert_eq!(r.width(), 0);
}

#[test]
fn union_covers_both() {
    let a = PixelRect::new(0, 0, 3, 3);
    let b = PixelRect::new(10, -2, 12, 1);
    let u = a.union(b);
    assert_eq!(u, PixelRect::new(0, -2, 12, 3));
}

#[test]
fn intersect_of_disjoint_rects_is_empty() {
    let a = PixelRect::new(0, 0, 3, 3);
    let b = PixelRect::new(5, 5, 8, 8);
    assert!(a.intersect(b).is_empty());
}

#[test]
fn dilate_grows_every_edge() {
    let r = PixelRect::new(2, 2, 4, 4).dilate(1);
    assert_eq!(r, PixelRect::new(1, 1, 5, 5));
}

#[test]
fn contains_is_inclusive() {
    let r = PixelRect::new(1, 1, 2, 2);
    assert!(r.contains(1, 1));
    assert!(r.contains(2, 2));
    assert!(!r.contains(3, 2));
    assert!(!r.contains(0, 1));
}
