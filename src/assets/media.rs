use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::resolve::MediaProbe;

/// Sample rate of the final audio mix.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Decoded interleaved PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Interleaved samples in `[-1, 1]`.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.interleaved_f32.len() / usize::from(self.channels)
        }
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Whether a tool answers `-version` on PATH.
pub fn is_tool_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Whether `ffmpeg` is available.
pub fn is_ffmpeg_on_path() -> bool {
    is_tool_on_path("ffmpeg")
}

fn require_file(path: &Path) -> ReelResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ReelError::not_found(path))
    }
}

/// Length of the audio in `path`, in seconds, as reported by `ffprobe`.
pub fn probe_audio_duration(path: &Path) -> ReelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    require_file(path)?;
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| ReelError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::media(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ReelError::media(format!("ffprobe json parse failed: {e}")))?;
    let stream_duration = parsed
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("audio"))
        .find_map(|s| s.duration.as_deref().and_then(|d| d.parse::<f64>().ok()));
    let format_duration = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok());

    stream_duration.or(format_duration).ok_or_else(|| {
        ReelError::media(format!("no audio duration reported for '{}'", path.display()))
    })
}

/// [`MediaProbe`] backed by `ffprobe`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeProbe;

impl MediaProbe for FfprobeProbe {
    fn audio_duration_secs(&self, path: &Path) -> ReelResult<f64> {
        probe_audio_duration(path)
    }
}

/// Decode any audio file `ffmpeg` understands into interleaved f32 PCM.
pub fn decode_audio_f32(path: &Path, sample_rate: u32, channels: u16) -> ReelResult<AudioPcm> {
    require_file(path)?;
    if sample_rate == 0 || channels == 0 {
        return Err(ReelError::validation(
            "audio decode needs a non-zero sample rate and channel count",
        ));
    }
    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &channels.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| ReelError::media(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(ReelError::media(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(ReelError::media(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let interleaved_f32 = out
        .stdout
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(AudioPcm {
        sample_rate,
        channels,
        interleaved_f32,
    })
}

/// Write mono f32 samples to a 16-bit PCM WAV file through `ffmpeg`.
pub fn write_wav_via_ffmpeg(samples: &[f32], sample_rate: u32, path: &Path) -> ReelResult<()> {
    let mut child = Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-f", "f32le", "-ar"])
        .arg(sample_rate.to_string())
        .args(["-ac", "1", "-i", "pipe:0", "-c:a", "pcm_s16le"])
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReelError::media(format!("failed to spawn ffmpeg for wav write: {e}")))?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::media("ffmpeg stdin not available"))?;
        let mut bytes = Vec::with_capacity(samples.len() * 4);
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        stdin
            .write_all(&bytes)
            .map_err(|e| ReelError::media(format!("failed to pipe pcm to ffmpeg: {e}")))?;
    }

    let out = child
        .wait_with_output()
        .map_err(|e| ReelError::media(format!("failed to wait for ffmpeg: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::media(format!(
            "ffmpeg wav write failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(())
}
