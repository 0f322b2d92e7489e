pub mod blend;
pub mod plan;

pub use blend::{audio_weights, blend_frames};
pub use plan::{CutReason, JunctionPlan, TransitionKind, TransitionSpec, plan_junction};
