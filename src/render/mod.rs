pub mod pipeline;

pub use pipeline::{
    RenderPlan, RenderReport, ScenePlan, build_timeline, plan_render, policy_for, render_timeline,
    render_to_mp4, requested_transition, write_soundtrack,
};
