pub mod assemble;
pub mod clip;
pub mod plan;

pub use assemble::{FADE_IN_SECS, FADE_OUT_SECS, Timeline};
pub use clip::{ClipSettings, SceneClip};
pub use plan::{Placement, TimelinePlan};
