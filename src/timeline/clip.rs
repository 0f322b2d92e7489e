use crate::assets::image::load_image;
use crate::captions::plan::{CaptionStyle, plan_captions};
use crate::captions::raster::{CaptionLayer, CaptionRenderer};
use crate::effects::Treatment;
use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::ReelResult;
use crate::foundation::frame::FrameRGBA;
use crate::foundation::math::derive_seed;
use crate::motion::camera::{CameraMove, CameraPath};
use crate::motion::canvas::WorkingCanvas;
use crate::scene::model::ResolvedScene;
use crate::select::SelectionPolicy;

/// Read-only settings shared by every clip of a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipSettings {
    /// Output frame size.
    pub output: Resolution,
    /// Output frame rate.
    pub fps: Fps,
    /// Film grain intensity in `[0, 1]`.
    pub grain_intensity: f32,
    /// Vignette intensity in `[0, 1]`.
    pub vignette_intensity: f32,
    /// Base seed for per-scene noise.
    pub seed: u64,
}

/// One scene composed through camera motion, treatment and captions.
///
/// Exactly `duration` seconds long; every frame is the output resolution.
#[derive(Clone, Debug)]
pub struct SceneClip {
    index: usize,
    duration: f64,
    fps: Fps,
    canvas: WorkingCanvas,
    camera: CameraPath,
    treatment: Treatment,
    captions: Option<CaptionLayer>,
}

impl SceneClip {
    /// Load the scene image from disk and compose it.
    #[tracing::instrument(skip_all, fields(scene = scene.index, duration = scene.duration))]
    pub fn build(
        scene: &ResolvedScene,
        settings: &ClipSettings,
        policy: &mut dyn SelectionPolicy,
        captions: Option<&mut CaptionRenderer>,
    ) -> ReelResult<Self> {
        let image = load_image(&scene.image_path)?;
        Self::from_image(scene, &image, settings, policy, captions)
    }

    /// Compose an already decoded image.
    pub fn from_image(
        scene: &ResolvedScene,
        image: &image::DynamicImage,
        settings: &ClipSettings,
        policy: &mut dyn SelectionPolicy,
        captions: Option<&mut CaptionRenderer>,
    ) -> ReelResult<Self> {
        let canvas = WorkingCanvas::prepare(image, settings.output)?;
        let movement = CameraMove::for_kind(policy.pick_move(scene.index));
        let camera = CameraPath::new(movement, scene.duration, settings.output);
        let treatment = Treatment::for_mood(
            scene.mood,
            settings.grain_intensity,
            settings.vignette_intensity,
            derive_seed(settings.seed, scene.index as u64),
        );
        treatment.validate()?;

        let captions = match captions {
            Some(renderer) => {
                let style = CaptionStyle::for_resolution(settings.output);
                let words = plan_captions(&scene.narration_text, scene.duration, &style);
                if words.is_empty() {
                    None
                } else {
                    Some(CaptionLayer::build(
                        renderer,
                        words,
                        style,
                        settings.output,
                        scene.duration,
                    )?)
                }
            }
            None => None,
        };

        tracing::info!(
            scene = scene.index,
            movement = ?movement.kind(),
            mood = scene.mood.as_str(),
            captions = captions.is_some(),
            "scene clip ready"
        );
        Ok(Self {
            index: scene.index,
            duration: scene.duration,
            fps: settings.fps,
            canvas,
            camera,
            treatment,
            captions,
        })
    }

    /// Scene index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clip length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Camera path driving the clip.
    pub fn camera(&self) -> &CameraPath {
        &self.camera
    }

    /// Caption layer, when captions are on and the narration has words.
    pub fn captions(&self) -> Option<&CaptionLayer> {
        self.captions.as_ref()
    }

    /// Frame at `t` seconds into the clip.
    pub fn frame_at(&self, t: f64) -> FrameRGBA {
        let t = t.clamp(0.0, self.duration);
        let mut frame = self.canvas.render(&self.camera.window_at(t));
        let salt = (t * self.fps.as_f64()).round() as u64;
        self.treatment.apply(&mut frame, salt);
        if let Some(layer) = &self.captions {
            layer.composite(&mut frame, t);
        }
        frame
    }
}
