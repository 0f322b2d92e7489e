use super::*;
use crate::foundation::core::Resolution;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [10, 20, 30, 255];
    let src = [100, 110, 120, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_alpha_onto_opaque_stays_opaque() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
}

#[test]
fn crossfade_t_0_is_a_and_t_1_is_b() {
    let a = [10, 20, 30, 255];
    let b = [200, 150, 100, 255];
    assert_eq!(crossfade(a, b, 0.0), a);
    assert_eq!(crossfade(a, b, 1.0), b);
}

#[test]
fn crossfade_in_place_rejects_size_mismatch() {
    let mut a = FrameRGBA::black(Resolution::new(2, 2));
    let b = FrameRGBA::black(Resolution::new(4, 2));
    assert!(crossfade_in_place(&mut a, &b, 0.5).is_err());
}

#[test]
fn sprite_clips_at_frame_edges() {
    let mut dst = FrameRGBA::black(Resolution::new(4, 4));
    let sprite = Sprite {
        width: 2,
        height: 2,
        data: vec![255; 16],
    };
    over_sprite(&mut dst, &sprite, 3, -1, 1.0);
    assert_eq!(dst.rgb_at(3, 0), [255, 255, 255]);
    assert_eq!(dst.rgb_at(2, 0), [0, 0, 0]);
    assert_eq!(dst.rgb_at(3, 1), [0, 0, 0]);
}

#[test]
fn fill_rect_blends_and_clips() {
    let mut dst = FrameRGBA::filled(Resolution::new(4, 4), [200, 200, 200]);
    fill_rect(&mut dst, -2, 2, 10, 10, [0, 0, 0], 0.5);
    assert_eq!(dst.rgb_at(0, 0), [200, 200, 200]);
    let px = dst.rgb_at(3, 3);
    assert!((99..=101).contains(&px[0]), "{px:?}");
    assert!(dst.data.chunks_exact(4).all(|p| p[3] == 255));
}
