use super::*;

#[test]
fn zero_dimensions_are_rejected() {
    let mut data = vec![0u8; 64];
    let t = SurfaceTarget::Rgb {
        data: &mut data,
        stride: 12,
        width: 0,
        height: 4,
    };
    assert!(matches!(t.validate(), Err(ScrimError::Validation(_))));
}

#[test]
fn plane_shorter_than_the_last_row_is_rejected() {
    // 4x4 RGB at stride 12 needs 3 * 12 + 12 = 48 bytes.
    let mut data = vec![0u8; 47];
    let t = SurfaceTarget::Rgb {
        data: &mut data,
        stride: 12,
        width: 4,
        height: 4,
    };
    assert!(t.validate().is_err());

    let mut data = vec![0u8; 48];
    let t = SurfaceTarget::Rgb {
        data: &mut data,
        stride: 12,
        width: 4,
        height: 4,
    };
    assert!(t.validate().is_ok());
}

#[test]
fn stride_below_the_row_width_is_rejected() {
    let mut data = vec![0u8; 256];
    let t = SurfaceTarget::Rgba {
        data: &mut data,
        stride: 12,
        width: 4,
        height: 4,
    };
    assert!(t.validate().is_err());
}

#[test]
fn padded_stride_needs_no_trailing_padding_on_the_last_row() {
    // Stride 20 with a 16-byte row: the last row may stop at the row width.
    let mut data = vec![0u8; 3 * 20 + 16];
    let t = SurfaceTarget::Rgba {
        data: &mut data,
        stride: 20,
        width: 4,
        height: 4,
    };
    assert!(t.validate().is_ok());
}

#[test]
fn odd_nv12_dimensions_are_rejected() {
    let mut luma = vec![0u8; 64];
    let mut chroma = vec![0u8; 32];
    let t = SurfaceTarget::PitchLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        stride: 8,
        width: 7,
        height: 4,
    };
    assert!(t.validate().is_err());

    let mut luma = vec![0u8; 64];
    let mut chroma = vec![0u8; 32];
    let t = SurfaceTarget::PitchLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        stride: 8,
        width: 8,
        height: 5,
    };
    assert!(t.validate().is_err());
}

#[test]
fn short_nv12_chroma_plane_is_rejected() {
    let mut luma = vec![0u8; 8 * 8];
    let mut chroma = vec![0u8; 8 * 4 - 1];
    let t = SurfaceTarget::PitchLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        stride: 8,
        width: 8,
        height: 8,
    };
    assert!(t.validate().is_err());

    let mut luma = vec![0u8; 8 * 8];
    let mut chroma = vec![0u8; 8 * 4];
    let t = SurfaceTarget::PitchLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        stride: 8,
        width: 8,
        height: 8,
    };
    assert!(t.validate().is_ok());
}

#[test]
fn block_linear_planes_must_cover_whole_gobs() {
    let (w, h) = (64usize, 16usize);
    let mut luma = vec![0u8; block_linear_plane_len(w, h) - 1];
    let mut chroma = vec![0u8; block_linear_plane_len(w, h / 2)];
    let t = SurfaceTarget::BlockLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        width: w as u32,
        height: h as u32,
    };
    assert!(t.validate().is_err());

    let mut luma = vec![0u8; block_linear_plane_len(w, h)];
    let mut chroma = vec![0u8; block_linear_plane_len(w, h / 2) - 1];
    let t = SurfaceTarget::BlockLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        width: w as u32,
        height: h as u32,
    };
    assert!(t.validate().is_err());

    let mut luma = vec![0u8; block_linear_plane_len(w, h)];
    let mut chroma = vec![0u8; block_linear_plane_len(w, h / 2)];
    let t = SurfaceTarget::BlockLinearNv12 {
        luma: &mut luma,
        chroma: &mut chroma,
        width: w as u32,
        height: h as u32,
    };
    assert!(t.validate().is_ok());
}
