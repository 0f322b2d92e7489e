use super::*;
use crate::scene::model::{Mood, ResolvedScene};
use crate::select::Fixed;
use crate::timeline::clip::ClipSettings;
use crate::transition::plan::TransitionKind;

const OUT: Resolution = Resolution::new(32, 18);

fn settings() -> ClipSettings {
    ClipSettings {
        output: OUT,
        fps: Fps::FILM,
        grain_intensity: 0.0,
        vignette_intensity: 0.0,
        seed: 5,
    }
}

fn scene(index: usize, duration: f64) -> ResolvedScene {
    ResolvedScene {
        index,
        image_path: format!("scene_{index}.png").into(),
        audio_path: format!("scene_{index}.wav").into(),
        duration,
        narration_text: String::new(),
        mood: Mood::Drama,
        style_tags: String::new(),
    }
}

fn clip(index: usize, duration: f64, rgb: [u8; 3]) -> SceneClip {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(64, 36, image::Rgb(rgb)));
    SceneClip::from_image(&scene(index, duration), &img, &settings(), &mut Fixed::default(), None)
        .unwrap()
}

fn fade(overlap: f64) -> impl FnMut(usize) -> Option<TransitionSpec> {
    move |_| {
        Some(TransitionSpec {
            kind: TransitionKind::Fade,
            overlap,
        })
    }
}

#[test]
fn three_scene_timeline_lasts_ten_seconds() {
    let clips = vec![
        clip(0, 4.0, [200, 0, 0]),
        clip(1, 5.0, [0, 200, 0]),
        clip(2, 3.0, [0, 0, 200]),
    ];
    let tl = Timeline::assemble(clips, fade(1.0), OUT, Fps::FILM, 1).unwrap();
    assert!((tl.duration() - 10.0).abs() < 1e-12);
    assert_eq!(tl.frame_count(), 240);
    for idx in [0, 1, 60, 80, 119, 200, 239] {
        let f = tl.frame(FrameIndex(idx)).unwrap();
        assert_eq!(f.resolution(), OUT);
    }
}

#[test]
fn overlap_starts_on_outgoing_and_ends_on_incoming() {
    let a = clip(0, 4.0, [200, 0, 0]);
    let b = clip(1, 4.0, [0, 0, 200]);
    let (a_ref, b_ref) = (a.clone(), b.clone());
    let tl = Timeline::assemble(vec![a, b], fade(1.0), OUT, Fps::FILM, 1).unwrap();

    // Overlap spans [3, 4) on the timeline; fades are not active there.
    assert_eq!(tl.frame_at(3.0).unwrap(), a_ref.frame_at(3.0));
    let near_end = tl.frame_at(3.999).unwrap();
    let expected = b_ref.frame_at(0.999);
    for (x, y) in [(0, 0), (16, 9), (31, 17)] {
        let (g, e) = (near_end.rgb_at(x, y), expected.rgb_at(x, y));
        for c in 0..3 {
            assert!((i32::from(g[c]) - i32::from(e[c])).abs() <= 1, "{g:?} vs {e:?}");
        }
    }
}

#[test]
fn short_scene_falls_back_to_cut_without_error() {
    let clips = vec![clip(0, 1.5, [10, 10, 10]), clip(1, 4.0, [90, 90, 90])];
    let tl = Timeline::assemble(clips, fade(1.0), OUT, Fps::FILM, 1).unwrap();
    assert_eq!(tl.duration(), 5.5);
    assert_eq!(tl.plan().junctions[0].overlap(), 0.0);
}

#[test]
fn opening_and_closing_fades_reach_black() {
    let tl = Timeline::assemble(vec![clip(0, 3.0, [250, 250, 250])], |_| None, OUT, Fps::FILM, 1)
        .unwrap();
    assert_eq!(tl.fade_gain(0.0), 0.0);
    assert_eq!(tl.fade_gain(0.25), 0.5);
    assert_eq!(tl.fade_gain(1.5), 1.0);
    assert_eq!(tl.fade_gain(2.6), 0.5);
    assert_eq!(tl.frame_at(0.0).unwrap().rgb_at(5, 5), [0, 0, 0]);
    let mid = tl.frame_at(1.5).unwrap().rgb_at(5, 5);
    assert!(mid[0] > 200);
}
