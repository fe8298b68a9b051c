use super::*;

#[test]
fn records_are_tagged_at_their_offsets() {
    let mut list = DrawList::new();
    list.rect(1.0, 1.0, 5.0, 5.0, -1, [1, 2, 3, 4]).unwrap();
    list.circle(8.0, 8.0, 3.0, -1, [5, 6, 7, 8]).unwrap();
    let plan = list.build();

    assert_eq!(plan.offsets.len(), 2);
    assert_eq!(plan.commands[plan.offsets[0] as usize], CommandTag::Rectangle as u8);
    assert_eq!(plan.commands[plan.offsets[1] as usize], CommandTag::Circle as u8);
    // Fixed record sizes: 24-byte header plus payload.
    assert_eq!(plan.offsets[1], 96);
    assert_eq!(plan.commands.len(), 96 + 40);
}

#[test]
fn bounds_union_tracks_every_command() {
    let mut list = DrawList::new();
    list.rect(4.0, 4.0, 8.0, 8.0, -1, [0, 0, 0, 255]).unwrap();
    list.rect(20.0, 2.0, 30.0, 6.0, -1, [0, 0, 0, 255]).unwrap();
    let plan = list.build();

    let b = plan.bounds().unwrap();
    assert!(b.left <= 4 && b.top <= 2 && b.right >= 30 && b.bottom >= 8);
}

#[test]
fn interpolation_dilates_bounds_and_sets_the_flag() {
    let mut plain = DrawList::new();
    plain
        .rotated_rect(16.0, 16.0, 8.0, 8.0, 0.0, -1, [0, 0, 0, 255], false)
        .unwrap();
    let plain = plain.build();
    assert!(!plain.rotate_msaa());

    let mut aa = DrawList::new();
    aa.rotated_rect(16.0, 16.0, 8.0, 8.0, 0.0, -1, [0, 0, 0, 255], true)
        .unwrap();
    let aa = aa.build();
    assert!(aa.rotate_msaa());
    assert_eq!(aa.bounds().unwrap(), plain.bounds().unwrap().dilate(1));
}

#[test]
fn rotation_alone_selects_the_general_path() {
    let mut list = DrawList::new();
    list.rotated_rect(10.0, 10.0, 6.0, 4.0, 0.5, -1, [0, 0, 0, 255], false)
        .unwrap();
    assert!(list.build().rotate_msaa());
}

#[test]
fn text_lines_accumulate_the_location_table() {
    let glyph = |x: i32, col: i32| TextLocation {
        image_x: x,
        image_y: 10,
        text_x: col,
        text_w: 4,
        text_h: 6,
    };
    let mut list = DrawList::new();
    list.set_atlas(vec![0u8; 32 * 6], 32).unwrap();
    list.text_line(&[glyph(0, 0), glyph(4, 4)], [255, 255, 255, 255])
        .unwrap();
    list.text_line(&[glyph(20, 8)], [255, 255, 255, 255]).unwrap();
    let plan = list.build();

    assert_eq!(plan.line_location_base, vec![0, 2, 3]);
    assert_eq!(plan.text_locations.len(), 3);
}

#[test]
fn text_line_requires_an_atlas() {
    let mut list = DrawList::new();
    let g = TextLocation {
        image_x: 0,
        image_y: 0,
        text_x: 0,
        text_w: 2,
        text_h: 2,
    };
    assert!(list.text_line(&[g], [255; 4]).is_err());
}

#[test]
fn glyphs_outside_the_atlas_are_rejected() {
    let mut list = DrawList::new();
    list.set_atlas(vec![0u8; 16 * 4], 16).unwrap();
    let wide = TextLocation {
        image_x: 0,
        image_y: 0,
        text_x: 14,
        text_w: 4,
        text_h: 2,
    };
    assert!(list.text_line(&[wide], [255; 4]).is_err());
    let tall = TextLocation {
        image_x: 0,
        image_y: 0,
        text_x: 0,
        text_w: 2,
        text_h: 5,
    };
    assert!(list.text_line(&[tall], [255; 4]).is_err());
}

#[test]
fn segment_mask_length_must_match_extent() {
    let mut list = DrawList::new();
    let rect = PixelRect::new(0, 0, 7, 7);
    assert!(
        list.segment_mask(rect, vec![0.0; 9], 4, 4, 0.5, [255; 4])
            .is_err()
    );
    assert!(
        list.segment_mask(rect, vec![0.0; 16], 4, 4, 0.5, [255; 4])
            .is_ok()
    );
}

#[test]
fn blur_kernel_must_be_odd() {
    let mut list = DrawList::new();
    let rect = PixelRect::new(0, 0, 9, 9);
    assert!(list.box_blur(rect, 4).is_err());
    assert!(list.box_blur(rect, 0).is_err());
    assert!(list.box_blur(rect, 3).is_ok());
}

#[test]
fn stamp_bounds_are_centered() {
    let mut list = DrawList::new();
    list.rgba_source(10, 10, 4, 6, vec![0u8; 4 * 6 * 4]).unwrap();
    let plan = list.build();
    assert_eq!(plan.bounds().unwrap(), PixelRect::new(8, 7, 11, 12));
}

#[test]
fn empty_list_builds_an_empty_plan() {
    let plan = DrawList::new().build();
    assert!(plan.is_empty());
    assert!(plan.bounds().is_none());
    assert_eq!(plan.line_location_base, vec![0]);
}
