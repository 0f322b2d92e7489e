#![forbid(unsafe_code)]

//! `storyreel` turns an ordered list of narrated scenes (still image, narration audio, text,
//! mood) into one continuous MP4.
//!
//! Each scene becomes a clip with a virtual camera move over an oversized canvas, a mood
//! grade with grain and vignette, and word-by-word captions. Clips are joined by fade,
//! dissolve, wipe or zoom transitions (or straight cuts when a scene is too short), narration
//! and an optional looped background bed are mixed, and frames are streamed into `ffmpeg`.
//!
//! Entry points:
//! - [`render_to_mp4`] for the whole pipeline.
//! - [`build_timeline`] + [`render_timeline`] to drive any [`FrameSink`].
//! - [`plan_render`] to inspect scene windows and junction decisions without rendering.

pub mod animation;
pub mod assets;
pub mod audio;
pub mod captions;
pub mod config;
pub mod effects;
pub mod encode;
pub mod foundation;
pub mod motion;
pub mod project;
pub mod render;
pub mod scene;
pub mod select;
pub mod timeline;
pub mod transition;

pub use animation::ease::Ease;
pub use assets::media::FfprobeProbe;
pub use config::{RenderConfig, TransitionChoice, VideoFormat};
pub use encode::{
    AudioInputConfig, EncoderSettings, FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink,
    SinkConfig,
};
pub use foundation::core::{Fps, FrameIndex, Resolution, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::frame::FrameRGBA;
pub use motion::{CameraMove, CameraPath, MoveKind};
pub use project::{
    ImageGenerator, Project, SpeechSynthesizer, StoryboardGenerator, Waveform, generate_content,
};
pub use render::{
    RenderPlan, RenderReport, ScenePlan, build_timeline, plan_render, policy_for, render_timeline,
    render_to_mp4,
};
pub use scene::manifest::{ScenePrompt, descriptors_for, load_manifest, parse_manifest};
pub use scene::model::{Mood, ResolvedScene, SceneDescriptor};
pub use scene::resolve::{MediaProbe, resolve_scenes};
pub use select::{Fixed, SelectionPolicy, UniformRandom};
pub use timeline::{Timeline, TimelinePlan};
pub use transition::{CutReason, JunctionPlan, TransitionKind, TransitionSpec};
