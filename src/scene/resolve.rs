use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{ResolvedScene, SceneDescriptor};
use crate::select::SelectionPolicy;

/// Measures media length. The narration audio is the duration authority for a scene.
pub trait MediaProbe {
    /// Length of the audio at `path` in seconds.
    fn audio_duration_secs(&self, path: &Path) -> ReelResult<f64>;
}

fn check_readable(path: &Path) -> ReelResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(ReelError::not_found(path)),
    }
    std::fs::File::open(path).map_err(|_| ReelError::not_found(path))?;
    Ok(())
}

/// Verify both resources of one descriptor exist and are readable.
pub fn check_resources(desc: &SceneDescriptor) -> ReelResult<()> {
    check_readable(&desc.image_path)?;
    check_readable(&desc.audio_path)
}

/// Resolve one descriptor: check resources, measure its duration, fill in the mood.
pub fn resolve_scene(
    index: usize,
    desc: &SceneDescriptor,
    probe: &dyn MediaProbe,
    policy: &mut dyn SelectionPolicy,
) -> ReelResult<ResolvedScene> {
    check_resources(desc)?;

    let duration = probe.audio_duration_secs(&desc.audio_path)?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ReelError::malformed(format!(
            "scene #{}: narration '{}' has no measurable duration ({duration})",
            index + 1,
            desc.audio_path.display()
        )));
    }

    let mood = match desc.mood {
        Some(m) => m,
        None => policy.pick_mood(index),
    };

    Ok(ResolvedScene {
        index,
        image_path: desc.image_path.clone(),
        audio_path: desc.audio_path.clone(),
        duration,
        narration_text: desc.narration_text.clone(),
        mood,
        style_tags: desc.style_tags.clone(),
    })
}

/// Resolve a whole scene list before any rendering starts.
///
/// Existence checks for every scene run before any probe so a missing file late in the list
/// is reported without spawning probes for the earlier ones.
pub fn resolve_scenes(
    descs: &[SceneDescriptor],
    probe: &dyn MediaProbe,
    policy: &mut dyn SelectionPolicy,
) -> ReelResult<Vec<ResolvedScene>> {
    if descs.is_empty() {
        return Err(ReelError::malformed("scene list is empty"));
    }
    for desc in descs {
        check_resources(desc)?;
    }

    let scenes = descs
        .iter()
        .enumerate()
        .map(|(i, d)| resolve_scene(i, d, probe, policy))
        .collect::<ReelResult<Vec<_>>>()?;

    tracing::debug!(
        scenes = scenes.len(),
        total_secs = scenes.iter().map(|s| s.duration).sum::<f64>(),
        "scenes resolved"
    );
    Ok(scenes)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/resolve.rs"]
mod tests;
