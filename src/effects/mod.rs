pub mod composite;
pub mod grade;
pub mod grain;
pub mod vignette;

use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;
use crate::foundation::math::derive_seed;
use crate::scene::model::Mood;

pub use grade::GradePreset;

/// Per-scene cinematic treatment: grading, then grain, then vignette.
///
/// Stateless per frame: the output depends only on the input frame, these parameters and the
/// frame salt passed to [`Treatment::apply`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Treatment {
    /// Color grade.
    pub grade: GradePreset,
    /// Film grain intensity in `[0, 1]`.
    pub grain_intensity: f32,
    /// Vignette intensity in `[0, 1]`.
    pub vignette_intensity: f32,
    /// Base seed for grain.
    pub seed: u64,
}

impl Treatment {
    /// Treatment for `mood` with the given effect intensities.
    pub fn for_mood(mood: Mood, grain_intensity: f32, vignette_intensity: f32, seed: u64) -> Self {
        Self {
            grade: GradePreset::for_mood(mood),
            grain_intensity,
            vignette_intensity,
            seed,
        }
    }

    /// Check intensities are finite and within `[0, 1]`.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("grain_intensity", self.grain_intensity),
            ("vignette_intensity", self.vignette_intensity),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Apply the treatment in place. `frame_salt` decorrelates grain between frames.
    pub fn apply(&self, frame: &mut FrameRGBA, frame_salt: u64) {
        grade::apply_grade(frame, &self.grade);
        grain::apply_grain(frame, self.grain_intensity, derive_seed(self.seed, frame_salt));
        vignette::apply_vignette(frame, self.vignette_intensity);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/treatment.rs"]
mod tests;
