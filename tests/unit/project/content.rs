use super::*;
use crate::assets::media::is_ffmpeg_on_path;
use crate::scene::manifest::parse_manifest;

#[derive(Default)]
struct SolidImages {
    calls: Vec<(String, u32, u32, u64)>,
}

impl ImageGenerator for SolidImages {
    fn generate_image(
        &mut self,
        prompt: &str,
        width: u32,
        height: u32,
        seed: u64,
    ) -> ReelResult<image::RgbaImage> {
        self.calls.push((prompt.to_string(), width, height, seed));
        Ok(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([(seed % 256) as u8, 40, 90, 255]),
        ))
    }
}

#[derive(Default)]
struct ToneSpeech {
    voices: Vec<String>,
}

impl SpeechSynthesizer for ToneSpeech {
    fn synthesize(&mut self, text: &str, voice: &str) -> ReelResult<Waveform> {
        self.voices.push(voice.to_string());
        let n = SPEECH_SAMPLE_RATE as usize / 10 * text.split_whitespace().count().max(1);
        let samples = (0..n)
            .map(|i| (i as f32 * 0.05).sin() * 0.3)
            .collect::<Vec<_>>();
        Ok(Waveform {
            samples,
            sample_rate: SPEECH_SAMPLE_RATE,
        })
    }
}

struct SilentSpeech;

impl SpeechSynthesizer for SilentSpeech {
    fn synthesize(&mut self, _text: &str, _voice: &str) -> ReelResult<Waveform> {
        Ok(Waveform {
            samples: Vec::new(),
            sample_rate: SPEECH_SAMPLE_RATE,
        })
    }
}

fn two_prompts() -> Vec<ScenePrompt> {
    parse_manifest(
        r#"[
            {"prompt_image": "a fox", "prompt_audio": "the fox runs", "style": "ink"},
            {"prompt_image": "a hill", "prompt_audio": "over the hill"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn project_paths_follow_format() {
    let p = Project::new("night fox", VideoFormat::Short);
    assert_eq!(p.dir, Path::new("narrative_output").join("night fox"));
    assert_eq!(p.voice, "pm_alex");
    assert_eq!(p.output_path(), p.dir.join("short_night_fox.mp4"));

    let p = Project::under("/tmp/x", "fox", VideoFormat::Long);
    assert_eq!(p.output_path(), Path::new("/tmp/x/fox/video_fox.mp4"));
    assert_eq!(p.manifest_path(), Path::new("/tmp/x/fox/scenes.json"));
}

#[test]
fn empty_storyboard_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_content(
        &[],
        &mut SolidImages::default(),
        &mut ToneSpeech::default(),
        dir.path(),
        VideoFormat::Short,
        DEFAULT_VOICE,
        7,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::MalformedSceneData(_)));
}

#[test]
fn existing_files_are_not_regenerated() {
    let dir = tempfile::tempdir().unwrap();
    let prompts = two_prompts();
    for p in &prompts {
        std::fs::write(dir.path().join(&p.filename), b"keep").unwrap();
        std::fs::write(dir.path().join(&p.audio_filename), b"keep").unwrap();
    }

    let mut images = SolidImages::default();
    let mut speech = ToneSpeech::default();
    let descs = generate_content(
        &prompts,
        &mut images,
        &mut speech,
        dir.path(),
        VideoFormat::Short,
        DEFAULT_VOICE,
        7,
    )
    .unwrap();

    assert!(images.calls.is_empty());
    assert!(speech.voices.is_empty());
    assert_eq!(descs.len(), 2);
    assert_eq!(descs[0].image_path, dir.path().join("scene_001.png"));
    assert_eq!(descs[1].audio_path, dir.path().join("audio_scene_002.wav"));
    assert_eq!(descs[0].narration_text, "the fox runs");
    assert_eq!(std::fs::read(&descs[0].image_path).unwrap(), b"keep");
}

#[test]
fn missing_images_use_generation_size_and_offset_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let prompts = two_prompts();
    for p in &prompts {
        std::fs::write(dir.path().join(&p.audio_filename), b"keep").unwrap();
    }

    let mut images = SolidImages::default();
    generate_content(
        &prompts,
        &mut images,
        &mut ToneSpeech::default(),
        dir.path(),
        VideoFormat::Long,
        DEFAULT_VOICE,
        100,
    )
    .unwrap();

    assert_eq!(
        images.calls,
        vec![
            ("a fox, ink".to_string(), 960, 544, 100),
            ("a hill, cinematic, high quality".to_string(), 960, 544, 101),
        ]
    );
    let png = image::open(dir.path().join("scene_002.png")).unwrap();
    assert_eq!((png.width(), png.height()), (960, 544));
}

#[test]
fn empty_speech_is_a_media_error() {
    let dir = tempfile::tempdir().unwrap();
    let prompts = two_prompts();
    for p in &prompts {
        std::fs::write(dir.path().join(&p.filename), b"keep").unwrap();
    }
    let err = generate_content(
        &prompts,
        &mut SolidImages::default(),
        &mut SilentSpeech,
        dir.path(),
        VideoFormat::Short,
        DEFAULT_VOICE,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Media(_)));
}

#[test]
fn narration_is_written_as_wav_with_chosen_voice() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let prompts = two_prompts();
    for p in &prompts {
        std::fs::write(dir.path().join(&p.filename), b"keep").unwrap();
    }
    let mut speech = ToneSpeech::default();
    let descs = generate_content(
        &prompts,
        &mut SolidImages::default(),
        &mut speech,
        dir.path(),
        VideoFormat::Short,
        "pf_dora",
        1,
    )
    .unwrap();

    assert_eq!(speech.voices, vec!["pf_dora", "pf_dora"]);
    let wav = std::fs::read(&descs[0].audio_path).unwrap();
    assert_eq!(&wav[..4], b"RIFF");
}

struct ScriptedStoryboard {
    requests: Vec<(String, usize, String, VideoFormat)>,
}

impl StoryboardGenerator for ScriptedStoryboard {
    fn generate_storyboard(
        &mut self,
        premise: &str,
        scene_count: usize,
        style: &str,
        kind: VideoFormat,
    ) -> ReelResult<Vec<ScenePrompt>> {
        self.requests
            .push((premise.to_string(), scene_count, style.to_string(), kind));
        let mut prompts = two_prompts();
        prompts.truncate(scene_count);
        prompts[0].mood = Some(crate::scene::model::Mood::Thriller);
        Ok(prompts)
    }
}

#[test]
fn drafted_storyboard_is_saved_and_reused() {
    let root = tempfile::tempdir().unwrap();
    let project = Project::under(root.path(), "fox", VideoFormat::Short);
    let mut generator = ScriptedStoryboard { requests: Vec::new() };

    let drafted = project
        .draft_storyboard(&mut generator, "a fox crosses a hill", 2, "ink")
        .unwrap();
    assert_eq!(drafted.len(), 2);
    assert_eq!(
        generator.requests,
        vec![(
            "a fox crosses a hill".to_string(),
            2,
            "ink".to_string(),
            VideoFormat::Short
        )]
    );
    assert!(project.manifest_path().is_file());

    let again = project
        .draft_storyboard(&mut generator, "something else", 5, "oil")
        .unwrap();
    assert_eq!(again, drafted);
    assert_eq!(generator.requests.len(), 1);
}

#[test]
fn drafting_zero_scenes_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let project = Project::under(root.path(), "fox", VideoFormat::Long);
    let mut generator = ScriptedStoryboard { requests: Vec::new() };
    let err = project
        .draft_storyboard(&mut generator, "premise", 0, "ink")
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(generator.requests.is_empty());
    assert!(!project.manifest_path().exists());
}
