use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{Mood, SceneDescriptor};

/// Style appended to image prompts when a scene does not set one.
pub const DEFAULT_STYLE: &str = "cinematic, high quality";

/// One storyboard entry: prompts plus the file names its resources live under.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenePrompt {
    /// Prompt for the image generator.
    pub prompt_image: String,
    /// Narration text; fed to speech synthesis and captions.
    pub prompt_audio: String,
    /// Image file name inside the project directory.
    pub filename: String,
    /// Narration WAV file name inside the project directory.
    pub audio_filename: String,
    /// Style appended to the image prompt.
    pub style: String,
    /// Optional mood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

#[derive(serde::Deserialize)]
struct RawPrompt {
    prompt_image: Option<String>,
    prompt_audio: Option<String>,
    filename: Option<String>,
    audio_filename: Option<String>,
    style: Option<String>,
    mood: Option<String>,
}

impl ScenePrompt {
    /// Image prompt with the style appended.
    pub fn full_image_prompt(&self) -> String {
        format!("{}, {}", self.prompt_image, self.style)
    }

    /// Descriptor pointing at this scene's files under `dir`.
    pub fn descriptor(&self, dir: &Path) -> SceneDescriptor {
        SceneDescriptor {
            image_path: dir.join(&self.filename),
            audio_path: dir.join(&self.audio_filename),
            narration_text: self.prompt_audio.clone(),
            mood: self.mood,
            style_tags: self.style.clone(),
        }
    }
}

/// Default image file name for the 0-based scene `index` (`scene_001.png`, ...).
pub fn scene_image_filename(index: usize) -> String {
    format!("scene_{:03}.png", index + 1)
}

/// Default narration file name for the 0-based scene `index` (`audio_scene_001.wav`, ...).
pub fn scene_audio_filename(index: usize) -> String {
    format!("audio_scene_{:03}.wav", index + 1)
}

/// Parse a storyboard document: `{"scenes": [...]}` or a bare array.
///
/// Fails with [`ReelError::MalformedSceneData`] on zero scenes or when an entry lacks
/// `prompt_image`/`prompt_audio`.
pub fn parse_manifest(json: &str) -> ReelResult<Vec<ScenePrompt>> {
    let doc: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ReelError::malformed(format!("scene manifest is not valid JSON: {e}")))?;

    let entries = match doc {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("scenes") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => return Err(ReelError::malformed("'scenes' must be an array")),
            None => Vec::new(),
        },
        _ => {
            return Err(ReelError::malformed(
                "scene manifest must be an array or an object with 'scenes'",
            ));
        }
    };
    if entries.is_empty() {
        return Err(ReelError::malformed("no scenes found in manifest"));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| prompt_from_value(i, entry))
        .collect()
}

fn prompt_from_value(index: usize, entry: serde_json::Value) -> ReelResult<ScenePrompt> {
    let raw: RawPrompt = serde_json::from_value(entry)
        .map_err(|e| ReelError::malformed(format!("scene #{}: {e}", index + 1)))?;

    let (Some(prompt_image), Some(prompt_audio)) = (raw.prompt_image, raw.prompt_audio) else {
        return Err(ReelError::malformed(format!(
            "scene #{} needs 'prompt_image' and 'prompt_audio'",
            index + 1
        )));
    };

    Ok(ScenePrompt {
        prompt_image,
        prompt_audio,
        filename: raw
            .filename
            .unwrap_or_else(|| scene_image_filename(index)),
        audio_filename: raw
            .audio_filename
            .unwrap_or_else(|| scene_audio_filename(index)),
        style: raw.style.unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        mood: raw.mood.as_deref().map(Mood::from_name_lenient),
    })
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> ReelResult<Vec<ScenePrompt>> {
    if !path.is_file() {
        return Err(ReelError::not_found(path));
    }
    let text = std::fs::read_to_string(path).map_err(|_| ReelError::not_found(path))?;
    parse_manifest(&text)
}

/// Descriptors for every prompt, resolving file names against `dir`.
pub fn descriptors_for(prompts: &[ScenePrompt], dir: impl Into<PathBuf>) -> Vec<SceneDescriptor> {
    let dir = dir.into();
    prompts.iter().map(|p| p.descriptor(&dir)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manifest.rs"]
mod tests;
