use crate::foundation::core::{Fps, FrameIndex, Resolution};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;
use crate::foundation::math::derive_seed;
use crate::timeline::clip::SceneClip;
use crate::timeline::plan::{Placement, TimelinePlan};
use crate::transition::blend::blend_frames;
use crate::transition::plan::TransitionSpec;

/// Fade from black at the head of the timeline.
pub const FADE_IN_SECS: f64 = 0.5;
/// Fade to black at the tail of the timeline.
pub const FADE_OUT_SECS: f64 = 0.8;

/// Finished clips joined by their junction plans.
#[derive(Clone, Debug)]
pub struct Timeline {
    clips: Vec<SceneClip>,
    plan: TimelinePlan,
    output: Resolution,
    fps: Fps,
    seed: u64,
}

impl Timeline {
    /// Join `clips` in order, asking `request` for the transition at each junction.
    pub fn assemble(
        clips: Vec<SceneClip>,
        request: impl FnMut(usize) -> Option<TransitionSpec>,
        output: Resolution,
        fps: Fps,
        seed: u64,
    ) -> ReelResult<Self> {
        let durations: Vec<f64> = clips.iter().map(SceneClip::duration).collect();
        let plan = TimelinePlan::build(&durations, request)?;
        tracing::info!(
            scenes = clips.len(),
            total_secs = plan.total,
            "timeline assembled"
        );
        Ok(Self {
            clips,
            plan,
            output,
            fps,
            seed,
        })
    }

    /// Placement plan.
    pub fn plan(&self) -> &TimelinePlan {
        &self.plan
    }

    /// Clips in order.
    pub fn clips(&self) -> &[SceneClip] {
        &self.clips
    }

    /// Output frame size.
    pub fn output(&self) -> Resolution {
        self.output
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.plan.total
    }

    /// Number of output frames.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.plan.total)
    }

    /// Output frame `idx`.
    pub fn frame(&self, idx: FrameIndex) -> ReelResult<FrameRGBA> {
        self.frame_at(self.fps.frame_time_secs(idx))
    }

    /// Composed frame at timeline time `t`, including the opening and closing fades.
    pub fn frame_at(&self, t: f64) -> ReelResult<FrameRGBA> {
        let mut frame = match self.plan.locate(t) {
            Placement::Single { scene, local } => self.clip(scene)?.frame_at(local),
            Placement::Overlap {
                junction,
                spec,
                outgoing_local,
                incoming_local,
            } => {
                let a = self.clip(junction)?.frame_at(outgoing_local);
                let b = self.clip(junction + 1)?.frame_at(incoming_local);
                let salt = (t * self.fps.as_f64()).round() as u64;
                blend_frames(&spec, &a, &b, incoming_local, derive_seed(self.seed, salt))?
            }
        };

        frame.scale_rgb(self.fade_gain(t));
        Ok(frame)
    }

    /// Brightness multiplier from the opening and closing fades.
    pub fn fade_gain(&self, t: f64) -> f32 {
        let head = (t / FADE_IN_SECS).clamp(0.0, 1.0);
        let tail = ((self.plan.total - t) / FADE_OUT_SECS).clamp(0.0, 1.0);
        head.min(tail) as f32
    }

    fn clip(&self, i: usize) -> ReelResult<&SceneClip> {
        self.clips
            .get(i)
            .ok_or_else(|| ReelError::validation(format!("timeline has no clip {i}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assemble.rs"]
mod tests;
