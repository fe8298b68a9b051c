use super::*;

fn loc(image_x: i32, text_x: i32) -> TextLocation {
    TextLocation {
        image_x,
        image_y: 0,
        text_x,
        text_w: 2,
        text_h: 2,
    }
}

#[test]
fn samples_the_atlas_column_of_the_glyph() {
    // Two glyphs side by side in a 4-byte-wide atlas, rows of [a0 a1 b0 b1].
    let atlas = vec![10, 20, 30, 40, 50, 60, 70, 80];
    let line = [loc(0, 0), loc(2, 2)];

    assert_eq!(text_alpha(&line, &atlas, 4, 255, 0, 0), 10);
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 1, 1), 60);
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 2, 0), 30);
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 3, 1), 80);
}

#[test]
fn pixel_outside_every_glyph_is_transparent() {
    let atlas = vec![255u8; 8];
    let line = [loc(0, 0)];
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 5, 0), 0);
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 0, 3), 0);
}

#[test]
fn first_overlapping_glyph_wins() {
    let atlas = vec![11, 22, 33, 44, 11, 22, 33, 44];
    // Both glyphs cover pixel (1, 0); the first one must be sampled.
    let line = [loc(0, 0), loc(1, 2)];
    assert_eq!(text_alpha(&line, &atlas, 4, 255, 1, 0), 22);
}

#[test]
fn command_alpha_scales_coverage() {
    let atlas = vec![200u8; 8];
    let line = [loc(0, 0)];
    let a = text_alpha(&line, &atlas, 4, 128, 0, 0);
    assert_eq!(a, 100);
}
