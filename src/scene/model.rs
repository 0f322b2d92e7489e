use std::path::PathBuf;

/// Visual mood of a scene; keys the color grading preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Default grade: punchy contrast, slightly cool and desaturated.
    Drama,
    /// Hard contrast, heavily desaturated, cold.
    Thriller,
    /// Soft contrast, saturated, warm.
    Romance,
    /// Cool, clean highlights.
    SciFi,
}

impl Mood {
    /// Every mood, in a stable order.
    pub const ALL: [Mood; 4] = [Mood::Drama, Mood::Thriller, Mood::Romance, Mood::SciFi];

    /// Parse a mood name, falling back to [`Mood::Drama`] for anything unrecognized.
    pub fn from_name_lenient(name: &str) -> Mood {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "thriller" => Mood::Thriller,
            "romance" => Mood::Romance,
            "sci_fi" | "scifi" => Mood::SciFi,
            "drama" => Mood::Drama,
            other => {
                tracing::warn!(mood = other, "unknown mood, using drama grade");
                Mood::Drama
            }
        }
    }

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Drama => "drama",
            Mood::Thriller => "thriller",
            Mood::Romance => "romance",
            Mood::SciFi => "sci_fi",
        }
    }
}

/// Input unit for one scene: the resources the composer consumes.
///
/// Immutable after creation; the resolver turns it into a [`ResolvedScene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    /// Still image for the scene.
    pub image_path: PathBuf,
    /// Narration audio; its length is the scene duration.
    pub audio_path: PathBuf,
    /// Narration text, source for captions.
    pub narration_text: String,
    /// Mood; chosen by the selection policy when absent.
    pub mood: Option<Mood>,
    /// Free-form style text (provenance only).
    pub style_tags: String,
}

/// A validated scene with its measured duration and a concrete mood.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedScene {
    /// 0-based position in the scene list.
    pub index: usize,
    /// Image path, checked readable.
    pub image_path: PathBuf,
    /// Audio path, checked readable.
    pub audio_path: PathBuf,
    /// Seconds, measured from the narration audio. Always finite and > 0.
    pub duration: f64,
    /// Narration text.
    pub narration_text: String,
    /// Concrete mood.
    pub mood: Mood,
    /// Style text.
    pub style_tags: String,
}
