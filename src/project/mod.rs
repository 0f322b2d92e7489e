//! Project folders and resumable content generation.
//!
//! Image, speech and storyboard backends are opaque collaborators; this module only decides
//! which files exist, which are missing, and what each generator is asked for.

use std::path::{Path, PathBuf};

use crate::assets::image::save_png;
use crate::assets::media::write_wav_via_ffmpeg;
use crate::config::VideoFormat;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::manifest::{ScenePrompt, load_manifest};
use crate::scene::model::SceneDescriptor;

/// Root folder every project lives under.
pub const OUTPUT_ROOT: &str = "narrative_output";
/// Voice used when none is chosen.
pub const DEFAULT_VOICE: &str = "pm_alex";
/// Sample rate speech backends produce.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Mono speech samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    /// Samples in `[-1, 1]`.
    pub samples: Vec<f32>,
    /// Samples per second.
    pub sample_rate: u32,
}

/// Text-to-image backend.
pub trait ImageGenerator {
    /// Render `prompt` at `width`x`height`; the same seed must give the same image.
    fn generate_image(
        &mut self,
        prompt: &str,
        width: u32,
        height: u32,
        seed: u64,
    ) -> ReelResult<image::RgbaImage>;
}

/// Text-to-speech backend.
pub trait SpeechSynthesizer {
    /// Speak `text` with `voice`.
    fn synthesize(&mut self, text: &str, voice: &str) -> ReelResult<Waveform>;
}

/// Premise-to-storyboard backend.
pub trait StoryboardGenerator {
    /// Ordered scene prompts for `premise`.
    fn generate_storyboard(
        &mut self,
        premise: &str,
        scene_count: usize,
        style: &str,
        kind: VideoFormat,
    ) -> ReelResult<Vec<ScenePrompt>>;
}

/// A named working directory plus the output it produces.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    /// Project name as given by the user.
    pub name: String,
    /// Working directory for generated scene files.
    pub dir: PathBuf,
    /// Speech voice.
    pub voice: String,
    /// Output format.
    pub format: VideoFormat,
}

impl Project {
    /// Project under [`OUTPUT_ROOT`] in the current directory.
    pub fn new(name: impl Into<String>, format: VideoFormat) -> Self {
        Self::under(OUTPUT_ROOT, name, format)
    }

    /// Project under an explicit root folder.
    pub fn under(root: impl AsRef<Path>, name: impl Into<String>, format: VideoFormat) -> Self {
        let name = name.into();
        Self {
            dir: root.as_ref().join(&name),
            name,
            voice: DEFAULT_VOICE.to_string(),
            format,
        }
    }

    /// Final MP4 path inside the project directory.
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(self.format.output_filename(&self.name))
    }

    /// Storyboard file inside the project directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("scenes.json")
    }

    /// Ask `generator` for a storyboard and save it as [`Project::manifest_path`].
    ///
    /// An existing manifest is loaded instead, so a resumed project keeps its scenes.
    #[tracing::instrument(skip(self, generator), fields(project = %self.name))]
    pub fn draft_storyboard(
        &self,
        generator: &mut dyn StoryboardGenerator,
        premise: &str,
        scene_count: usize,
        style: &str,
    ) -> ReelResult<Vec<ScenePrompt>> {
        let path = self.manifest_path();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "storyboard present, skipping");
            return load_manifest(&path);
        }
        if scene_count == 0 {
            return Err(ReelError::validation("storyboard needs at least one scene"));
        }

        let prompts = generator.generate_storyboard(premise, scene_count, style, self.format)?;
        if prompts.is_empty() {
            return Err(ReelError::malformed("storyboard backend returned no scenes"));
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReelError::media(format!(
                "cannot create project dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        let doc = serde_json::json!({ "scenes": &prompts });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| ReelError::encode(format!("cannot serialize storyboard: {e}")))?;
        std::fs::write(&path, text).map_err(|e| {
            ReelError::media(format!("cannot write storyboard '{}': {e}", path.display()))
        })?;
        tracing::info!(scenes = prompts.len(), "storyboard drafted");
        Ok(prompts)
    }
}

/// Generate the image and narration of every scene that is not already on disk.
///
/// Images use the format's generation resolution and seed `global_seed + index`. Existing files
/// are left alone, so an interrupted run resumes where it stopped.
#[tracing::instrument(skip_all, fields(dir = %project_dir.display(), scenes = prompts.len()))]
pub fn generate_content(
    prompts: &[ScenePrompt],
    images: &mut dyn ImageGenerator,
    speech: &mut dyn SpeechSynthesizer,
    project_dir: &Path,
    format: VideoFormat,
    voice: &str,
    global_seed: u64,
) -> ReelResult<Vec<SceneDescriptor>> {
    if prompts.is_empty() {
        return Err(ReelError::malformed("storyboard has no scenes"));
    }
    std::fs::create_dir_all(project_dir).map_err(|e| {
        ReelError::media(format!(
            "cannot create project dir '{}': {e}",
            project_dir.display()
        ))
    })?;
    let gen_res = format.generation_resolution();

    let mut out = Vec::with_capacity(prompts.len());
    for (idx, prompt) in prompts.iter().enumerate() {
        let desc = prompt.descriptor(project_dir);

        if desc.image_path.exists() {
            tracing::debug!(scene = idx, path = %desc.image_path.display(), "image present, skipping");
        } else {
            let seed = global_seed.wrapping_add(idx as u64);
            let img = images.generate_image(
                &prompt.full_image_prompt(),
                gen_res.width,
                gen_res.height,
                seed,
            )?;
            save_png(&img, &desc.image_path)?;
            tracing::info!(scene = idx, seed, "image generated");
        }

        if desc.audio_path.exists() {
            tracing::debug!(scene = idx, path = %desc.audio_path.display(), "narration present, skipping");
        } else {
            let wave = speech.synthesize(&prompt.prompt_audio, voice)?;
            if wave.samples.is_empty() || wave.sample_rate == 0 {
                return Err(ReelError::media(format!(
                    "speech backend returned no audio for scene #{}",
                    idx + 1
                )));
            }
            write_wav_via_ffmpeg(&wave.samples, wave.sample_rate, &desc.audio_path)?;
            tracing::info!(scene = idx, samples = wave.samples.len(), "narration synthesized");
        }

        out.push(desc);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/project/content.rs"]
mod tests;
