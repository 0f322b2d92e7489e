use std::path::Path;

use crate::audio::manifest::{AudioManifest, AudioSegment, BackgroundBed};
use crate::foundation::error::{ReelError, ReelResult};
use crate::transition::blend::audio_weights;

/// Render the manifest to interleaved samples, clamped to `[-1, 1]`.
///
/// Narration and the background bed are summed; the bed never replaces narration.
pub fn mix_manifest(manifest: &AudioManifest) -> Vec<f32> {
    let frames = manifest.total_samples as usize;
    let channels = usize::from(manifest.channels);
    let mut out = vec![0.0f32; frames * channels];

    for seg in &manifest.narration {
        add_segment(&mut out, seg, manifest.sample_rate, channels);
    }

    if let Some(bed) = &manifest.background {
        let bed_buf = render_bed(bed, frames, manifest.sample_rate, channels);
        for (o, b) in out.iter_mut().zip(bed_buf) {
            *o += b;
        }
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn render_bed(bed: &BackgroundBed, frames: usize, sample_rate: u32, channels: usize) -> Vec<f32> {
    let mut buf = vec![0.0f32; frames * channels];
    for tile in &bed.tiles {
        add_segment(&mut buf, tile, sample_rate, channels);
    }
    let total_sec = frames as f64 / f64::from(sample_rate);
    for (i, frame) in buf.chunks_exact_mut(channels).enumerate() {
        let t = i as f64 / f64::from(sample_rate);
        let gain = bed.mix.volume * edge_gain(t, total_sec, bed.mix.fade_in_sec, bed.mix.fade_out_sec);
        for s in frame {
            *s *= gain;
        }
    }
    buf
}

fn add_segment(out: &mut [f32], seg: &AudioSegment, sample_rate: u32, channels: usize) {
    let seg_len_samples = seg
        .timeline_end_sample
        .saturating_sub(seg.timeline_start_sample);
    if seg_len_samples == 0 || seg.source_channels == 0 {
        return;
    }
    let src = seg.source_interleaved_f32.as_ref();
    let src_channels = usize::from(seg.source_channels);
    let src_frames = src.len() / src_channels;
    if src_frames == 0 {
        return;
    }
    let seg_len_sec = seg_len_samples as f64 / f64::from(sample_rate);
    let out_frames = out.len() / channels;

    for dst_sample in seg.timeline_start_sample..seg.timeline_end_sample {
        if dst_sample as usize >= out_frames {
            break;
        }
        let rel_sec = (dst_sample - seg.timeline_start_sample) as f64 / f64::from(sample_rate);
        let src_pos = (seg.source_start_sec + rel_sec) * f64::from(seg.source_sample_rate);
        if !src_pos.is_finite() || src_pos < 0.0 {
            break;
        }
        let src_frame0 = src_pos.floor() as usize;
        if src_frame0 >= src_frames {
            break;
        }
        let src_frame1 = (src_frame0 + 1).min(src_frames - 1);
        let frac = (src_pos - src_frame0 as f64) as f32;

        let gain = seg.volume * junction_gain(seg, rel_sec, seg_len_sec);
        let (l, r) = if src_channels == 1 {
            let v = lerp_f32(src[src_frame0], src[src_frame1], frac);
            (v, v)
        } else {
            let i0 = src_frame0 * src_channels;
            let i1 = src_frame1 * src_channels;
            (
                lerp_f32(src[i0], src[i1], frac),
                lerp_f32(src[i0 + 1], src[i1 + 1], frac),
            )
        };

        let dst_idx = dst_sample as usize * channels;
        out[dst_idx] += l * gain;
        if channels > 1 {
            out[dst_idx + 1] += r * gain;
        }
    }
}

/// Gain from the blends at either end of a segment, in step with the video weights.
fn junction_gain(seg: &AudioSegment, rel_sec: f64, len_sec: f64) -> f32 {
    let incoming = seg
        .junction_in
        .map_or(1.0, |spec| audio_weights(&spec, rel_sec).1);
    let outgoing = seg.junction_out.map_or(1.0, |spec| {
        audio_weights(&spec, rel_sec - (len_sec - spec.overlap)).0
    });
    incoming * outgoing
}

/// Linear fade-in/fade-out envelope at `t` seconds into a span of `len` seconds.
pub(crate) fn edge_gain(t: f64, len: f64, fade_in: f64, fade_out: f64) -> f32 {
    let mut gain = 1.0f64;
    if fade_in > 0.0 {
        gain *= (t / fade_in).clamp(0.0, 1.0);
    }
    if fade_out > 0.0 {
        gain *= ((len - t).max(0.0) / fade_out).clamp(0.0, 1.0);
    }
    gain as f32
}

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Write interleaved samples as raw little-endian f32 (ffmpeg `-f f32le` input).
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> ReelResult<()> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::media(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        ReelError::media(format!(
            "failed to write mixed audio file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
