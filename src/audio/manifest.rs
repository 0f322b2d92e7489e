use std::sync::Arc;

use crate::assets::media::AudioPcm;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::plan::TimelinePlan;
use crate::transition::plan::TransitionSpec;

/// One placed piece of source audio.
#[derive(Clone, Debug)]
pub struct AudioSegment {
    /// First output sample covered.
    pub timeline_start_sample: u64,
    /// One past the last output sample covered.
    pub timeline_end_sample: u64,
    /// Source offset at `timeline_start_sample`.
    pub source_start_sec: f64,
    /// Linear gain.
    pub volume: f32,
    /// Blend the segment ramps in over, from its start.
    pub junction_in: Option<TransitionSpec>,
    /// Blend the segment ramps out over, up to its end.
    pub junction_out: Option<TransitionSpec>,
    /// Source rate.
    pub source_sample_rate: u32,
    /// Source channel count (1 or 2).
    pub source_channels: u16,
    /// Source samples.
    pub source_interleaved_f32: Arc<Vec<f32>>,
}

/// Background bed parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundMix {
    /// Gain applied to the whole bed.
    pub volume: f32,
    /// Fade in from the start of the timeline.
    pub fade_in_sec: f64,
    /// Fade out to the end of the timeline.
    pub fade_out_sec: f64,
}

impl Default for BackgroundMix {
    fn default() -> Self {
        Self {
            volume: 0.2,
            fade_in_sec: 1.0,
            fade_out_sec: 2.0,
        }
    }
}

/// Looped background track: tiles placed back to back, then faded as one signal.
#[derive(Clone, Debug)]
pub struct BackgroundBed {
    /// Tiles at offsets `k * len`, the last one truncated.
    pub tiles: Vec<AudioSegment>,
    /// Bed gain and edge fades.
    pub mix: BackgroundMix,
}

/// Everything the mixer needs to render the soundtrack.
#[derive(Clone, Debug)]
pub struct AudioManifest {
    /// Output rate.
    pub sample_rate: u32,
    /// Output channels.
    pub channels: u16,
    /// Output length in samples per channel.
    pub total_samples: u64,
    /// Per-scene narration.
    pub narration: Vec<AudioSegment>,
    /// Optional looped bed.
    pub background: Option<BackgroundBed>,
}

/// Output sample at the start of video frame `frame`.
pub fn frame_to_sample(frame: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + den / 2) / den) as u64
}

fn secs_to_sample(secs: f64, sample_rate: u32) -> u64 {
    (secs * f64::from(sample_rate)).round().max(0.0) as u64
}

/// `[start, end)` sample ranges tiling `total` samples with copies of a `len`-sample track.
pub fn background_tiles(len: u64, total: u64) -> Vec<(u64, u64)> {
    if len == 0 {
        return Vec::new();
    }
    (0..total.div_ceil(len))
        .map(|k| (k * len, ((k + 1) * len).min(total)))
        .collect()
}

/// Place narration per scene window and tile the background over the timeline.
///
/// `narration[i]` plays from the start of scene `i` for the scene's duration, ramping in over
/// the incoming overlap and out over the outgoing one, in step with the video blend.
pub fn build_audio_manifest(
    plan: &TimelinePlan,
    narration: Vec<AudioPcm>,
    background: Option<(AudioPcm, BackgroundMix)>,
    fps: Fps,
    sample_rate: u32,
) -> ReelResult<AudioManifest> {
    if narration.len() != plan.scene_count() {
        return Err(ReelError::validation(format!(
            "got {} narration tracks for {} scenes",
            narration.len(),
            plan.scene_count()
        )));
    }
    let total_samples = frame_to_sample(fps.secs_to_frames_round(plan.total), fps, sample_rate);

    let narration = narration
        .into_iter()
        .enumerate()
        .map(|(i, pcm)| {
            let (start, end) = plan.scene_window(i);
            AudioSegment {
                timeline_start_sample: secs_to_sample(start, sample_rate),
                timeline_end_sample: secs_to_sample(end, sample_rate).min(total_samples),
                source_start_sec: 0.0,
                volume: 1.0,
                junction_in: i
                    .checked_sub(1)
                    .and_then(|j| plan.junctions.get(j))
                    .and_then(|j| j.blend_spec()),
                junction_out: plan.junctions.get(i).and_then(|j| j.blend_spec()),
                source_sample_rate: pcm.sample_rate,
                source_channels: pcm.channels,
                source_interleaved_f32: Arc::new(pcm.interleaved_f32),
            }
        })
        .collect();

    let background = match background {
        Some((pcm, mix)) => {
            let len = secs_to_sample(pcm.duration_secs(), sample_rate);
            let source = Arc::new(pcm.interleaved_f32);
            let tiles: Vec<AudioSegment> = background_tiles(len, total_samples)
                .into_iter()
                .map(|(start, end)| AudioSegment {
                    timeline_start_sample: start,
                    timeline_end_sample: end,
                    source_start_sec: 0.0,
                    volume: 1.0,
                    junction_in: None,
                    junction_out: None,
                    source_sample_rate: pcm.sample_rate,
                    source_channels: pcm.channels,
                    source_interleaved_f32: Arc::clone(&source),
                })
                .collect();
            if tiles.is_empty() {
                tracing::warn!("background audio is empty, skipping");
                None
            } else {
                tracing::debug!(tiles = tiles.len(), "background audio tiled");
                Some(BackgroundBed { tiles, mix })
            }
        }
        None => None,
    };

    Ok(AudioManifest {
        sample_rate,
        channels: 2,
        total_samples,
        narration,
        background,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/manifest.rs"]
mod tests;
