use crate::animation::ease::Ease;
use crate::foundation::core::Resolution;

/// Fixed caption palette, cycled by word index.
pub const PALETTE: [[u8; 3]; 5] = [
    [255, 255, 255],
    [255, 215, 0],
    [0, 255, 255],
    [144, 238, 144],
    [255, 165, 0],
];

/// Layout and animation parameters for word captions.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Vertical center of the caption band, in pixels from the top.
    pub center_y: f32,
    /// Word colors, cycled by index.
    pub palette: Vec<[u8; 3]>,
    /// Upper bound for the per-word fade in/out.
    pub max_fade: f64,
    /// Distance a word rises while settling in.
    pub settle_px: f32,
    /// Settle curve.
    pub settle_ease: Ease,
    /// Backing bar color.
    pub bar_rgb: [u8; 3],
    /// Backing bar coverage.
    pub bar_alpha: f32,
    /// Backing bar height in pixels.
    pub bar_height: f32,
}

impl CaptionStyle {
    /// Lower-third style sized for `output`: font `width / 25`, capped at 40px.
    pub fn for_resolution(output: Resolution) -> Self {
        let font_size = (output.width as f32 / 25.0).min(40.0);
        Self {
            font_size,
            center_y: output.height as f32 * 0.8,
            palette: PALETTE.to_vec(),
            max_fade: 0.3,
            settle_px: font_size * 0.5,
            settle_ease: Ease::OutCubic,
            bar_rgb: [0, 0, 0],
            bar_alpha: 0.5,
            bar_height: font_size * 2.0,
        }
    }

    /// Palette color for word `index`.
    pub fn color_for(&self, index: usize) -> [u8; 3] {
        if self.palette.is_empty() {
            return [255, 255, 255];
        }
        self.palette[index % self.palette.len()]
    }
}

/// One word's time slice and look.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordOverlay {
    /// Position in the narration.
    pub index: usize,
    /// The word itself.
    pub word: String,
    /// Slice start, seconds into the scene.
    pub start: f64,
    /// Slice end (exclusive).
    pub end: f64,
    /// Text color.
    pub color: [u8; 3],
    /// Fade in and fade out length.
    pub fade: f64,
}

impl WordOverlay {
    /// Whether `t` falls in `[start, end)`.
    pub fn is_active(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Opacity at scene time `t`: ramps up over `fade`, holds, ramps down over `fade`.
    pub fn opacity_at(&self, t: f64) -> f32 {
        if !self.is_active(t) {
            return 0.0;
        }
        if self.fade <= 0.0 {
            return 1.0;
        }
        let fade_in = (t - self.start) / self.fade;
        let fade_out = (self.end - t) / self.fade;
        fade_in.min(fade_out).clamp(0.0, 1.0) as f32
    }

    /// Vertical offset (pixels, downward) while the word settles into place.
    pub fn settle_offset(&self, t: f64, style: &CaptionStyle) -> f32 {
        if self.fade <= 0.0 {
            return 0.0;
        }
        let p = ((t - self.start) / self.fade).clamp(0.0, 1.0);
        style.settle_px * (1.0 - style.settle_ease.apply(p) as f32)
    }
}

/// Split `text` on whitespace and give each word an equal slice of `duration`.
///
/// Slices partition `[0, duration)`: the last one ends exactly at `duration`. Text without
/// words yields no overlays.
pub fn plan_captions(text: &str, duration: f64, style: &CaptionStyle) -> Vec<WordOverlay> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || duration <= 0.0 {
        return Vec::new();
    }
    let n = words.len();
    let slice = duration / n as f64;
    let fade = style.max_fade.min(slice / 3.0);

    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| WordOverlay {
            index: i,
            word: word.to_string(),
            start: i as f64 * slice,
            end: if i + 1 == n {
                duration
            } else {
                (i + 1) as f64 * slice
            },
            color: style.color_for(i),
            fade,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/captions/plan.rs"]
mod tests;
