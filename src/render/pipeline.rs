use std::path::{Path, PathBuf};

use crate::assets::font::resolve_caption_font;
use crate::assets::media::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32, is_ffmpeg_on_path};
use crate::audio::manifest::{BackgroundMix, build_audio_manifest};
use crate::audio::mix::{mix_manifest, write_mix_to_f32le_file};
use crate::captions::raster::CaptionRenderer;
use crate::config::{RenderConfig, TransitionChoice};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::motion::camera::MoveKind;
use crate::scene::model::{Mood, ResolvedScene, SceneDescriptor};
use crate::scene::resolve::{MediaProbe, resolve_scenes};
use crate::select::{SelectionPolicy, UniformRandom};
use crate::timeline::assemble::Timeline;
use crate::timeline::clip::{ClipSettings, SceneClip};
use crate::timeline::plan::TimelinePlan;
use crate::transition::plan::{JunctionPlan, TransitionSpec};

/// Summary of a finished render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Timeline length in seconds.
    pub duration_secs: f64,
    /// Junction decisions in order.
    pub junctions: Vec<JunctionPlan>,
}

/// Per-scene entry of a [`RenderPlan`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScenePlan {
    /// Scene index.
    pub index: usize,
    /// Timeline start in seconds.
    pub start: f64,
    /// Timeline end in seconds.
    pub end: f64,
    /// Mood used for grading.
    pub mood: Mood,
    /// Camera move.
    pub movement: MoveKind,
    /// Number of caption words (0 with captions off).
    pub caption_words: usize,
}

/// What a render would do, without rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderPlan {
    /// Seed every random choice derives from.
    pub seed: u64,
    /// Scenes in order.
    pub scenes: Vec<ScenePlan>,
    /// Junction decisions.
    pub junctions: Vec<JunctionPlan>,
    /// Total length in seconds.
    pub total_secs: f64,
}

/// Selection policy for `config`: seeded when the config pins a seed.
pub fn policy_for(config: &RenderConfig) -> UniformRandom {
    match config.seed {
        Some(seed) => UniformRandom::seeded(seed),
        None => {
            let policy = UniformRandom::from_entropy();
            tracing::info!(seed = policy.seed(), "no seed given, drew one from the clock");
            policy
        }
    }
}

/// Transition requested at junction `j` under `config`.
pub fn requested_transition(
    config: &RenderConfig,
    policy: &mut dyn SelectionPolicy,
    junction: usize,
) -> Option<TransitionSpec> {
    let kind = match config.transition {
        TransitionChoice::Kind(kind) => kind,
        TransitionChoice::Random => policy.pick_transition(junction),
        TransitionChoice::None => return None,
    };
    Some(TransitionSpec {
        kind,
        overlap: config.transition_duration,
    })
}

/// Plan scene windows and junctions for already resolved scenes.
pub fn plan_render(
    scenes: &[ResolvedScene],
    config: &RenderConfig,
    policy: &mut UniformRandom,
) -> ReelResult<RenderPlan> {
    let durations: Vec<f64> = scenes.iter().map(|s| s.duration).collect();
    let plan = TimelinePlan::build(&durations, |j| {
        requested_transition(config, &mut *policy, j)
    })?;
    let scenes = scenes
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (start, end) = plan.scene_window(i);
            ScenePlan {
                index: s.index,
                start,
                end,
                mood: s.mood,
                movement: policy.pick_move(s.index),
                caption_words: if config.captions {
                    s.narration_text.split_whitespace().count()
                } else {
                    0
                },
            }
        })
        .collect();
    Ok(RenderPlan {
        seed: policy.seed(),
        scenes,
        junctions: plan.junctions,
        total_secs: plan.total,
    })
}

fn clip_settings(config: &RenderConfig, seed: u64) -> ClipSettings {
    ClipSettings {
        output: config.resolution(),
        fps: config.fps,
        grain_intensity: config.grain_intensity,
        vignette_intensity: config.vignette_intensity,
        seed,
    }
}

fn warn_outside_guidance(config: &RenderConfig, total: f64) {
    let (lo, hi) = config.format.duration_guidance();
    if total < lo || total > hi {
        tracing::warn!(
            total_secs = total,
            format = config.format.as_str(),
            min = lo,
            max = hi,
            "timeline length is outside the format's usual range"
        );
    }
}

/// Compose every scene clip in order and join them into a timeline.
///
/// Clips are built one after another; a failure in any scene aborts the whole build.
#[tracing::instrument(skip_all, fields(scenes = scenes.len()))]
pub fn build_timeline(
    scenes: &[ResolvedScene],
    config: &RenderConfig,
    policy: &mut UniformRandom,
) -> ReelResult<Timeline> {
    config.validate()?;
    let mut captions = if config.captions {
        let font = resolve_caption_font(config.caption_font.as_deref())?;
        Some(CaptionRenderer::new(&font)?)
    } else {
        None
    };
    let settings = clip_settings(config, policy.seed());

    let mut clips = Vec::with_capacity(scenes.len());
    for scene in scenes {
        clips.push(SceneClip::build(
            scene,
            &settings,
            &mut *policy,
            captions.as_mut(),
        )?);
    }

    let seed = policy.seed();
    let timeline = Timeline::assemble(
        clips,
        |j| requested_transition(config, &mut *policy, j),
        settings.output,
        settings.fps,
        seed,
    )?;
    warn_outside_guidance(config, timeline.duration());
    Ok(timeline)
}

/// Stream every timeline frame into `sink`.
pub fn render_timeline(
    timeline: &Timeline,
    sink: &mut dyn FrameSink,
    audio: Option<AudioInputConfig>,
) -> ReelResult<RenderReport> {
    let output = timeline.output();
    sink.begin(SinkConfig {
        width: output.width,
        height: output.height,
        fps: timeline.fps(),
        audio,
    })?;
    let frames = timeline.frame_count();
    for i in 0..frames {
        let idx = FrameIndex(i);
        let frame = timeline.frame(idx)?;
        sink.push_frame(idx, &frame)?;
        if i % 240 == 0 {
            tracing::debug!(frame = i, of = frames, "rendering");
        }
    }
    sink.end()?;

    Ok(RenderReport {
        frames,
        duration_secs: timeline.duration(),
        junctions: timeline.plan().junctions.clone(),
    })
}

/// Decode narration and background and write the mixed soundtrack to `path`.
pub fn write_soundtrack(
    timeline: &Timeline,
    scenes: &[ResolvedScene],
    config: &RenderConfig,
    path: &Path,
) -> ReelResult<AudioInputConfig> {
    let narration = scenes
        .iter()
        .map(|s| decode_audio_f32(&s.audio_path, MIX_SAMPLE_RATE, 2))
        .collect::<ReelResult<Vec<AudioPcm>>>()?;
    let background = match &config.background_audio {
        Some(path) => Some((
            decode_audio_f32(path, MIX_SAMPLE_RATE, 2)?,
            BackgroundMix {
                volume: config.background_volume,
                ..BackgroundMix::default()
            },
        )),
        None => None,
    };

    let manifest = build_audio_manifest(
        timeline.plan(),
        narration,
        background,
        timeline.fps(),
        MIX_SAMPLE_RATE,
    )?;
    let mixed = mix_manifest(&manifest);
    write_mix_to_f32le_file(&mixed, path)?;
    Ok(AudioInputConfig {
        path: path.to_path_buf(),
        sample_rate: manifest.sample_rate,
        channels: manifest.channels,
    })
}

/// Resolve, compose, mix and encode `descs` into an MP4 at `out_path`.
///
/// Scene resources are all checked before any rendering; the destination is only replaced
/// once encoding succeeds.
#[tracing::instrument(skip_all, fields(out = %out_path.as_ref().display()))]
pub fn render_to_mp4(
    descs: &[SceneDescriptor],
    out_path: impl AsRef<Path>,
    config: &RenderConfig,
    probe: &dyn MediaProbe,
) -> ReelResult<RenderReport> {
    config.validate()?;
    let mut policy = policy_for(config);
    let scenes = resolve_scenes(descs, probe, &mut policy)?;
    if let Some(bg) = &config.background_audio
        && !bg.is_file()
    {
        return Err(ReelError::not_found(bg));
    }
    if !is_ffmpeg_on_path() {
        return Err(ReelError::encode(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }

    let timeline = build_timeline(&scenes, config, &mut policy)?;

    let out_path: PathBuf = out_path.as_ref().to_path_buf();
    let audio_tmp = tempfile::Builder::new()
        .prefix("storyreel_audio_")
        .suffix(".f32le")
        .tempfile()
        .map_err(|e| ReelError::media(format!("cannot create audio scratch file: {e}")))?;
    let audio = write_soundtrack(&timeline, &scenes, config, audio_tmp.path())?;

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path,
        overwrite: true,
        encoder: config.encoder_settings(),
    });
    let report = render_timeline(&timeline, &mut sink, Some(audio))?;
    tracing::info!(
        frames = report.frames,
        secs = report.duration_secs,
        "render finished"
    );
    Ok(report)
}
