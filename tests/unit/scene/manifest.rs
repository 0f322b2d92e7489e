use super::*;

#[test]
fn object_form_fills_defaults() {
    let prompts = parse_manifest(
        r#"{"scenes": [
            {"prompt_image": "a lighthouse", "prompt_audio": "It was dark."},
            {"prompt_image": "a storm", "prompt_audio": "Then rain.", "style": "noir", "mood": "thriller"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].filename, "scene_001.png");
    assert_eq!(prompts[0].audio_filename, "audio_scene_001.wav");
    assert_eq!(prompts[0].style, DEFAULT_STYLE);
    assert_eq!(prompts[0].mood, None);
    assert_eq!(prompts[1].filename, "scene_002.png");
    assert_eq!(prompts[1].mood, Some(Mood::Thriller));
    assert_eq!(prompts[1].full_image_prompt(), "a storm, noir");
}

#[test]
fn bare_array_and_explicit_names() {
    let prompts = parse_manifest(
        r#"[{"prompt_image": "x", "prompt_audio": "y", "filename": "hero.png", "audio_filename": "hero.wav"}]"#,
    )
    .unwrap();
    assert_eq!(prompts[0].filename, "hero.png");
    assert_eq!(prompts[0].audio_filename, "hero.wav");

    let desc = prompts[0].descriptor(Path::new("proj"));
    assert_eq!(desc.image_path, Path::new("proj").join("hero.png"));
    assert_eq!(desc.narration_text, "y");
}

#[test]
fn zero_scenes_is_malformed() {
    for doc in [r#"[]"#, r#"{"scenes": []}"#, r#"{"title": "x"}"#] {
        let err = parse_manifest(doc).unwrap_err();
        assert!(matches!(err, ReelError::MalformedSceneData(_)), "{doc}");
    }
}

#[test]
fn missing_prompt_names_the_entry() {
    let err = parse_manifest(
        r#"[{"prompt_image": "x", "prompt_audio": "y"}, {"prompt_image": "only image"}]"#,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, ReelError::MalformedSceneData(_)));
    assert!(msg.contains("scene #2"), "{msg}");
}

#[test]
fn unknown_mood_falls_back_to_drama() {
    let prompts =
        parse_manifest(r#"[{"prompt_image": "x", "prompt_audio": "y", "mood": "western"}]"#)
            .unwrap();
    assert_eq!(prompts[0].mood, Some(Mood::Drama));
}

#[test]
fn missing_file_is_resource_not_found() {
    let err = load_manifest(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, ReelError::ResourceNotFound { .. }));
}
