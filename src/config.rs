use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::EncoderSettings;
use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{ReelError, ReelResult};
use crate::transition::plan::TransitionKind;

/// Target video format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFormat {
    /// Vertical short-form video.
    Short,
    /// Horizontal long-form video.
    Long,
}

impl VideoFormat {
    /// Final output resolution.
    pub fn resolution(self) -> Resolution {
        match self {
            Self::Short => Resolution::PORTRAIT_1080,
            Self::Long => Resolution::LANDSCAPE_1080,
        }
    }

    /// Resolution images are generated at before upscaling.
    pub fn generation_resolution(self) -> Resolution {
        match self {
            Self::Short => Resolution::new(544, 960),
            Self::Long => Resolution::new(960, 544),
        }
    }

    /// Recommended total length in seconds.
    pub fn duration_guidance(self) -> (f64, f64) {
        match self {
            Self::Short => (15.0, 60.0),
            Self::Long => (60.0, 600.0),
        }
    }

    /// Output file name for a project.
    pub fn output_filename(self, project: &str) -> String {
        let project = project.replace(' ', "_");
        match self {
            Self::Short => format!("short_{project}.mp4"),
            Self::Long => format!("video_{project}.mp4"),
        }
    }

    /// Name used in storyboard requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl std::str::FromStr for VideoFormat {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" | "shorts" => Ok(Self::Short),
            "long" | "video" => Ok(Self::Long),
            other => Err(ReelError::validation(format!(
                "unknown video format '{other}' (expected short or long)"
            ))),
        }
    }
}

/// How junction transitions are chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransitionChoice {
    /// Same kind everywhere.
    Kind(TransitionKind),
    /// Picked per junction by the selection policy.
    Random,
    /// Straight cuts only.
    None,
}

impl std::str::FromStr for TransitionChoice {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "none" | "cut" => Ok(Self::None),
            other => other.parse().map(Self::Kind),
        }
    }
}

impl TryFrom<String> for TransitionChoice {
    type Error = ReelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TransitionChoice> for String {
    fn from(c: TransitionChoice) -> Self {
        match c {
            TransitionChoice::Kind(k) => k.as_str().to_string(),
            TransitionChoice::Random => "random".to_string(),
            TransitionChoice::None => "none".to_string(),
        }
    }
}

/// Parameters for one render. Read-only once the render starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output format; fixes the resolution.
    pub format: VideoFormat,
    /// Output frame rate.
    pub fps: Fps,
    /// Video encoder.
    pub video_codec: String,
    /// Audio encoder.
    pub audio_codec: String,
    /// Video bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// Encoder speed/quality preset.
    pub preset: String,
    /// Encoder worker threads.
    pub threads: u32,
    /// Word captions on or off.
    pub captions: bool,
    /// Caption font file; a system sans-serif is used when absent.
    pub caption_font: Option<PathBuf>,
    /// Looped background track.
    pub background_audio: Option<PathBuf>,
    /// Background gain.
    pub background_volume: f32,
    /// Junction transition selection.
    pub transition: TransitionChoice,
    /// Junction overlap in seconds.
    pub transition_duration: f64,
    /// Film grain intensity in `[0, 1]`.
    pub grain_intensity: f32,
    /// Vignette intensity in `[0, 1]`.
    pub vignette_intensity: f32,
    /// Seed for every random choice; drawn from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let enc = EncoderSettings::default();
        Self {
            format: VideoFormat::Short,
            fps: Fps::FILM,
            video_codec: enc.video_codec,
            audio_codec: enc.audio_codec,
            bitrate_kbps: enc.bitrate_kbps,
            preset: enc.preset,
            threads: enc.threads,
            captions: true,
            caption_font: None,
            background_audio: None,
            background_volume: 0.2,
            transition: TransitionChoice::Random,
            transition_duration: 0.5,
            grain_intensity: 0.08,
            vignette_intensity: 0.3,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Output resolution.
    pub fn resolution(&self) -> Resolution {
        self.format.resolution()
    }

    /// Encoder settings for the ffmpeg sink.
    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
            bitrate_kbps: self.bitrate_kbps,
            preset: self.preset.clone(),
            threads: self.threads,
        }
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load_json(path: &Path) -> ReelResult<Self> {
        if !path.is_file() {
            return Err(ReelError::not_found(path));
        }
        let text = std::fs::read_to_string(path).map_err(|_| ReelError::not_found(path))?;
        serde_json::from_str(&text).map_err(|e| {
            ReelError::validation(format!("invalid config '{}': {e}", path.display()))
        })
    }

    /// Apply `STORYREEL_THREADS` / `STORYREEL_PRESET` from the process environment.
    pub fn apply_env_overrides(&mut self) -> ReelResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides from any lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ReelResult<()> {
        if let Some(v) = lookup("STORYREEL_THREADS") {
            self.threads = v.trim().parse().map_err(|_| {
                ReelError::validation(format!("STORYREEL_THREADS must be an integer, got '{v}'"))
            })?;
        }
        if let Some(v) = lookup("STORYREEL_PRESET").filter(|v| !v.trim().is_empty()) {
            self.preset = v.trim().to_string();
        }
        Ok(())
    }

    /// Check every parameter before any work starts.
    pub fn validate(&self) -> ReelResult<()> {
        self.resolution().validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.fps != Fps::FILM {
            return Err(ReelError::validation(format!(
                "output frame rate is fixed at 24 fps, got {}/{}",
                self.fps.num, self.fps.den
            )));
        }
        if self.bitrate_kbps == 0 {
            return Err(ReelError::validation("bitrate_kbps must be > 0"));
        }
        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(ReelError::validation("codec names must be non-empty"));
        }
        if self.preset.trim().is_empty() {
            return Err(ReelError::validation("preset must be non-empty"));
        }
        for (name, v) in [
            ("grain_intensity", self.grain_intensity),
            ("vignette_intensity", self.vignette_intensity),
            ("background_volume", self.background_volume),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        if self.transition != TransitionChoice::None
            && (!self.transition_duration.is_finite() || self.transition_duration <= 0.0)
        {
            return Err(ReelError::validation(
                "transition_duration must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
