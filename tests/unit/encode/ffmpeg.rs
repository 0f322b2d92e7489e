use super::*;
use crate::foundation::core::Resolution;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::FILM,
        audio: None,
    }
}

#[test]
fn odd_or_zero_sizes_are_rejected_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.path().join("out.mp4")));
    assert!(matches!(sink.begin(cfg(0, 10)), Err(ReelError::Validation(_))));
    assert!(matches!(sink.begin(cfg(11, 10)), Err(ReelError::Validation(_))));
}

#[test]
fn push_before_begin_is_an_encode_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA::black(Resolution::new(2, 2));
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(ReelError::Encode(_))
    ));
}

#[test]
fn existing_file_is_kept_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    std::fs::write(&out, b"keep").unwrap();
    let mut opts = FfmpegSinkOpts::new(&out);
    opts.overwrite = false;
    let mut sink = FfmpegSink::new(opts);
    assert!(sink.begin(cfg(4, 4)).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep");
}

#[test]
fn failed_encode_leaves_destination_untouched() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    std::fs::write(&out, b"previous render").unwrap();

    let mut opts = FfmpegSinkOpts::new(&out);
    opts.encoder.video_codec = "definitely_not_a_codec".to_string();
    let mut sink = FfmpegSink::new(opts);
    sink.begin(cfg(16, 16)).unwrap();
    let frame = FrameRGBA::black(Resolution::new(16, 16));
    let pushed = (0..4).try_for_each(|i| sink.push_frame(FrameIndex(i), &frame));
    let result = pushed.and_then(|()| sink.end());
    drop(sink);

    assert!(matches!(result, Err(ReelError::Encode(_))));
    assert_eq!(std::fs::read(&out).unwrap(), b"previous render");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(".storyreel-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn rejected_codec_reports_ffmpeg_stderr_for_full_size_frames() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");

    let mut opts = FfmpegSinkOpts::new(&out);
    opts.encoder.video_codec = "definitely_not_a_codec".to_string();
    let mut sink = FfmpegSink::new(opts);
    let size = Resolution::PORTRAIT_1080;
    sink.begin(cfg(size.width, size.height)).unwrap();
    let frame = FrameRGBA::black(size);
    let pushed = (0..8).try_for_each(|i| sink.push_frame(FrameIndex(i), &frame));
    let err = pushed.and_then(|()| sink.end()).unwrap_err();
    drop(sink);

    let msg = err.to_string();
    assert!(matches!(err, ReelError::Encode(_)));
    assert!(msg.contains("definitely_not_a_codec"), "got: {msg}");
    assert!(!out.exists());
}
