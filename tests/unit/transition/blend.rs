use super::*;
use crate::foundation::core::Resolution;

const RES: Resolution = Resolution::new(16, 8);

fn spec(kind: TransitionKind) -> TransitionSpec {
    TransitionSpec { kind, overlap: 1.0 }
}

fn frames() -> (FrameRGBA, FrameRGBA) {
    (
        FrameRGBA::filled(RES, [200, 40, 40]),
        FrameRGBA::filled(RES, [20, 60, 220]),
    )
}

#[test]
fn every_kind_starts_at_a_and_ends_at_b() {
    let (a, b) = frames();
    for kind in TransitionKind::ALL {
        let s = spec(kind);
        let start = blend_frames(&s, &a, &b, 0.0, 1).unwrap();
        assert_eq!(start, a, "{kind:?} at t=0");
        let end = blend_frames(&s, &a, &b, s.overlap, 1).unwrap();
        assert_eq!(end, b, "{kind:?} at t=d");
    }
}

#[test]
fn fade_is_linear_midway() {
    let (a, b) = frames();
    let mid = blend_frames(&spec(TransitionKind::Fade), &a, &b, 0.5, 0).unwrap();
    let px = mid.rgb_at(3, 3);
    assert!((i32::from(px[0]) - 110).abs() <= 1, "{px:?}");
    assert!((i32::from(px[2]) - 130).abs() <= 1, "{px:?}");
}

#[test]
fn wipe_has_a_hard_edge() {
    let (a, b) = frames();
    let out = blend_frames(&spec(TransitionKind::Wipe), &a, &b, 0.25, 0).unwrap();
    for y in 0..RES.height {
        for x in 0..RES.width {
            let expected = if x < 4 { b.rgb_at(x, y) } else { a.rgb_at(x, y) };
            assert_eq!(out.rgb_at(x, y), expected);
        }
    }
}

#[test]
fn dissolve_adds_texture_over_the_fade() {
    let (a, b) = frames();
    let fade = blend_frames(&spec(TransitionKind::Fade), &a, &b, 0.5, 9).unwrap();
    let dissolve = blend_frames(&spec(TransitionKind::Dissolve), &a, &b, 0.5, 9).unwrap();
    assert_ne!(fade, dissolve);
    let again = blend_frames(&spec(TransitionKind::Dissolve), &a, &b, 0.5, 9).unwrap();
    assert_eq!(dissolve, again);
}

#[test]
fn audio_weights_are_complementary() {
    for kind in TransitionKind::ALL {
        let s = TransitionSpec { kind, overlap: 2.0 };
        assert_eq!(audio_weights(&s, 0.0), (1.0, 0.0));
        assert_eq!(audio_weights(&s, 0.5), (0.75, 0.25));
        assert_eq!(audio_weights(&s, 2.0), (0.0, 1.0));
    }
}

#[test]
fn size_mismatch_is_rejected() {
    let a = FrameRGBA::black(RES);
    let b = FrameRGBA::black(Resolution::new(8, 8));
    assert!(blend_frames(&spec(TransitionKind::Fade), &a, &b, 0.1, 0).is_err());
}
