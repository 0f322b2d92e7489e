use super::*;
use crate::foundation::core::Resolution;
use crate::foundation::math::Rng64;

fn noisy_frame(w: u32, h: u32, seed: u64) -> FrameRGBA {
    let mut rng = Rng64::new(seed);
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        let v = rng.next_u64();
        data.extend_from_slice(&[v as u8, (v >> 8) as u8, (v >> 16) as u8, 255]);
    }
    FrameRGBA::from_raw(w, h, data).unwrap()
}

#[test]
fn output_stays_in_range_for_every_mood_and_intensity() {
    // Extreme inputs: pure black, pure white, saturated primaries and random noise.
    let mut frames = vec![
        FrameRGBA::filled(Resolution::new(8, 8), [0, 0, 0]),
        FrameRGBA::filled(Resolution::new(8, 8), [255, 255, 255]),
        FrameRGBA::filled(Resolution::new(8, 8), [255, 0, 0]),
        FrameRGBA::filled(Resolution::new(8, 8), [0, 0, 255]),
    ];
    frames.push(noisy_frame(8, 8, 3));

    for mood in Mood::ALL {
        for intensity in [0.0, 0.35, 1.0] {
            let t = Treatment::for_mood(mood, intensity, intensity, 11);
            t.validate().unwrap();
            for f in &frames {
                let mut out = f.clone();
                t.apply(&mut out, 5);
                assert_eq!(out.data.len(), f.data.len());
                assert!(out.data.chunks_exact(4).all(|px| px[3] == 255));
            }
        }
    }
}

#[test]
fn treatment_is_deterministic_per_frame_salt() {
    let t = Treatment::for_mood(Mood::Thriller, 0.4, 0.3, 99);
    let src = noisy_frame(16, 9, 1);
    let (mut a, mut b, mut c) = (src.clone(), src.clone(), src.clone());
    t.apply(&mut a, 7);
    t.apply(&mut b, 7);
    t.apply(&mut c, 8);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn intensities_outside_unit_range_are_rejected() {
    let mut t = Treatment::for_mood(Mood::Drama, 0.1, 0.1, 0);
    t.grain_intensity = 1.5;
    assert!(t.validate().is_err());
    t.grain_intensity = 0.1;
    t.vignette_intensity = f32::NAN;
    assert!(t.validate().is_err());
}

#[test]
fn neutral_grade_is_identity() {
    let src = noisy_frame(4, 4, 2);
    let mut out = src.clone();
    grade::apply_grade(&mut out, &GradePreset::NEUTRAL);
    assert_eq!(out, src);
}

#[test]
fn contrast_pivots_around_mid_gray() {
    let p = GradePreset {
        contrast: 2.0,
        ..GradePreset::NEUTRAL
    };
    assert_eq!(p.apply_rgb([128.0; 3]), [128.0; 3]);
    assert_eq!(p.apply_rgb([160.0; 3]), [192.0; 3]);
    assert_eq!(p.apply_rgb([10.0; 3]), [0.0; 3]);
}

#[test]
fn zero_saturation_is_rec709_gray() {
    let p = GradePreset {
        saturation: 0.0,
        ..GradePreset::NEUTRAL
    };
    let out = p.apply_rgb([255.0, 0.0, 0.0]);
    let y = 0.2126 * 255.0;
    for c in out {
        assert!((c - y).abs() < 1e-3);
    }
}

#[test]
fn temperature_shifts_red_blue_balance() {
    let cool = GradePreset {
        temperature: 0.8,
        ..GradePreset::NEUTRAL
    };
    let warm = GradePreset {
        temperature: 1.2,
        ..GradePreset::NEUTRAL
    };
    let gray = [100.0; 3];
    let c = cool.apply_rgb(gray);
    let w = warm.apply_rgb(gray);
    assert!(c[2] > c[0]);
    assert!(w[0] > w[2]);
    assert_eq!(c[1], 100.0);
}

#[test]
fn vignette_keeps_center_and_darkens_corners() {
    let mut f = FrameRGBA::filled(Resolution::new(101, 101), [200, 200, 200]);
    vignette::apply_vignette(&mut f, 0.5);
    assert_eq!(f.rgb_at(50, 50), [200, 200, 200]);
    let corner = f.rgb_at(0, 0)[0];
    assert!((100..=102).contains(&corner), "{corner}");
    assert!(f.rgb_at(0, 50)[0] > corner);
}

#[test]
fn grain_is_roughly_zero_mean() {
    let mut f = FrameRGBA::filled(Resolution::new(64, 64), [128, 128, 128]);
    grain::apply_grain(&mut f, 0.5, 1234);
    let sum: f64 = f.data.chunks_exact(4).map(|px| f64::from(px[0])).sum();
    let mean = sum / (64.0 * 64.0);
    assert!((mean - 128.0).abs() < 1.5, "{mean}");
    assert!(f.data.chunks_exact(4).any(|px| px[0] != 128));
}
