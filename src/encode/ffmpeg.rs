use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::assets::media::is_ffmpeg_on_path;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;

/// Codec and rate-control settings passed to `ffmpeg`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncoderSettings {
    /// Video encoder name (`libx264`).
    pub video_codec: String,
    /// Audio encoder name (`aac`).
    pub audio_codec: String,
    /// Target video bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// Speed/quality preset (`ultrafast` .. `veryslow`).
    pub preset: String,
    /// Encoder worker threads; 0 lets ffmpeg decide.
    pub threads: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            bitrate_kbps: 4000,
            preset: "medium".to_string(),
            threads: 4,
        }
    }
}

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Final MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Codec settings.
    pub encoder: EncoderSettings,
}

impl FfmpegSinkOpts {
    /// Default settings writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            encoder: EncoderSettings::default(),
        }
    }
}

/// Sink that streams raw frames into the system `ffmpeg`.
///
/// ffmpeg writes to a temporary file next to the destination; the file is moved into place only
/// after ffmpeg exits successfully, so a failed encode never touches `out_path`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    staging: Option<tempfile::NamedTempFile>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a sink; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            staging: None,
            cfg: None,
            last_idx: None,
        }
    }

    fn build_command(&self, cfg: &SinkConfig, staging: &Path) -> ReelResult<Command> {
        let enc = &self.opts.encoder;
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);

        if let Some(audio) = cfg.audio.as_ref() {
            if audio.sample_rate == 0 || audio.channels == 0 {
                return Err(ReelError::validation(
                    "audio sample rate and channel count must be non-zero",
                ));
            }
            cmd.args([
                "-f",
                "f32le",
                "-ar",
                &audio.sample_rate.to_string(),
                "-ac",
                &audio.channels.to_string(),
                "-i",
            ])
            .arg(&audio.path)
            .args(["-c:a", &enc.audio_codec, "-shortest"]);
        } else {
            cmd.arg("-an");
        }

        cmd.args([
            "-c:v",
            &enc.video_codec,
            "-preset",
            &enc.preset,
            "-b:v",
            &format!("{}k", enc.bitrate_kbps),
            "-threads",
            &enc.threads.to_string(),
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ])
        .arg(staging);
        Ok(cmd)
    }

    /// After a failed write: wait for ffmpeg to exit and return its stderr as `": <text>"`.
    fn collect_exit_stderr(&mut self) -> String {
        drop(self.stdin.take());
        let status = self.child.take().and_then(|mut child| child.wait().ok());
        let stderr = self
            .stderr_drain
            .take()
            .and_then(|handle| handle.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr);
        match (status, stderr.trim()) {
            (Some(status), "") => format!(" (ffmpeg exited with status {status})"),
            (Some(status), text) => format!(" (ffmpeg exited with status {status}): {text}"),
            (None, "") => String::new(),
            (None, text) => format!(": {text}"),
        }
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        // Dropping the staging file deletes it.
        self.staging = None;
        self.cfg = None;
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.opts.encoder.bitrate_kbps == 0 {
            return Err(ReelError::validation("encoder bitrate must be > 0"));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let dir = ensure_parent_dir(&self.opts.out_path)?;
        let staging = tempfile::Builder::new()
            .prefix(".storyreel-")
            .suffix(".mp4.part")
            .tempfile_in(&dir)
            .map_err(|e| {
                ReelError::encode(format!(
                    "cannot create temporary output in '{}': {e}",
                    dir.display()
                ))
            })?;

        if !is_ffmpeg_on_path() {
            return Err(ReelError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = self.build_command(&cfg, staging.path())?;
        tracing::debug!(?cmd, "spawning ffmpeg");
        let mut child = cmd.spawn().map_err(|e| {
            ReelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.staging = Some(staging);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ReelError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&frame.data) {
            let cause = self.collect_exit_stderr();
            self.abort();
            return Err(ReelError::encode(format!(
                "failed to write frame to ffmpeg stdin: {e}{cause}"
            )));
        }
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| ReelError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ReelError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| ReelError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        let staging = self
            .staging
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg sink has no staging file"))?;
        self.cfg = None;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ReelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let persisted = if self.opts.overwrite {
            staging.persist(&self.opts.out_path)
        } else {
            staging.persist_noclobber(&self.opts.out_path)
        };
        persisted.map_err(|e| {
            ReelError::encode(format!(
                "failed to move encoded video to '{}': {}",
                self.opts.out_path.display(),
                e.error
            ))
        })?;
        tracing::info!(out = %self.opts.out_path.display(), "video written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // Raw input needs its rate before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Create the parent directory of `path` and return it.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| {
        ReelError::encode(format!(
            "failed to create output directory '{}': {e}",
            parent.display()
        ))
    })?;
    Ok(parent)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
