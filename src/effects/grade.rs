use crate::foundation::frame::FrameRGBA;
use crate::scene::model::Mood;

/// Rec.709 luma weights, applied to R, G, B in that order.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];
const MID_GRAY: f32 = 128.0;

/// Multipliers for one color grade.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradePreset {
    /// Scale around mid-gray.
    pub contrast: f32,
    /// Chroma scale around luma.
    pub saturation: f32,
    /// Flat multiplier.
    pub brightness: f32,
    /// Red/blue balance: below 1 boosts blue, above 1 boosts red.
    pub temperature: f32,
}

impl GradePreset {
    /// No-op grade.
    pub const NEUTRAL: GradePreset = GradePreset {
        contrast: 1.0,
        saturation: 1.0,
        brightness: 1.0,
        temperature: 1.0,
    };

    /// Preset table keyed by mood.
    pub fn for_mood(mood: Mood) -> Self {
        let (contrast, saturation, brightness, temperature) = match mood {
            Mood::Drama => (1.2, 0.85, 0.95, 0.95),
            Mood::Thriller => (1.3, 0.7, 0.9, 0.9),
            Mood::Romance => (1.05, 1.1, 1.05, 1.1),
            Mood::SciFi => (1.15, 0.9, 1.0, 0.85),
        };
        Self {
            contrast,
            saturation,
            brightness,
            temperature,
        }
    }

    /// Grade one RGB triple.
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        let clamp = |v: f32| v.clamp(0.0, 255.0);

        let mut c = rgb.map(|v| clamp((v - MID_GRAY) * self.contrast + MID_GRAY));

        let y = LUMA[0] * c[0] + LUMA[1] * c[1] + LUMA[2] * c[2];
        c = c.map(|v| clamp(y + (v - y) * self.saturation));

        c = c.map(|v| clamp(v * self.brightness));

        c[0] = clamp(c[0] * self.temperature);
        c[2] = clamp(c[2] * (2.0 - self.temperature));
        c
    }
}

/// Grade every pixel of `frame` in place. Alpha is untouched.
pub fn apply_grade(frame: &mut FrameRGBA, preset: &GradePreset) {
    if *preset == GradePreset::NEUTRAL {
        return;
    }
    for px in frame.data.chunks_exact_mut(4) {
        let out = preset.apply_rgb([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);
        px[0] = out[0].round() as u8;
        px[1] = out[1].round() as u8;
        px[2] = out[2].round() as u8;
    }
}
