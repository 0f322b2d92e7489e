use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyreel::{
    FfprobeProbe, Project, RenderConfig, SceneDescriptor, TransitionChoice, VideoFormat,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version, about = "Compose narrated scenes into an MP4")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full video (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Print scene windows and junction decisions as JSON without rendering.
    Plan(SceneArgs),
    /// Render one composed frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Storyboard JSON (`{"scenes": [...]}` or a bare array).
    #[arg(long)]
    project: PathBuf,

    /// Directory holding the scene images and narration; defaults to the storyboard's folder.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output format.
    #[arg(long)]
    format: Option<VideoFormat>,

    /// Background music, looped under the narration.
    #[arg(long)]
    music: Option<PathBuf>,

    /// Disable word captions.
    #[arg(long)]
    no_captions: bool,

    /// Junction transition: fade, dissolve, wipe, zoom, random or none.
    #[arg(long)]
    transition: Option<TransitionChoice>,

    /// Seed for every random choice.
    #[arg(long)]
    seed: Option<u64>,

    /// Video bitrate in kbit/s.
    #[arg(long)]
    bitrate: Option<u32>,

    /// JSON render config; flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scenes: SceneArgs,

    /// Output MP4 path; defaults to `<format>_<project>.mp4` inside the assets folder.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scenes: SceneArgs,

    /// Timeline time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("STORYREEL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl SceneArgs {
    fn assets_dir(&self) -> PathBuf {
        match &self.assets {
            Some(dir) => dir.clone(),
            None => self
                .project
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        }
    }

    /// Defaults, then the config file, then flags, then environment.
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::load_json(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(format) = self.format {
            cfg.format = format;
        }
        if let Some(music) = &self.music {
            cfg.background_audio = Some(music.clone());
        }
        if self.no_captions {
            cfg.captions = false;
        }
        if let Some(transition) = self.transition {
            cfg.transition = transition;
        }
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(bitrate) = self.bitrate {
            cfg.bitrate_kbps = bitrate;
        }
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn descriptors(&self) -> anyhow::Result<Vec<SceneDescriptor>> {
        let prompts = storyreel::load_manifest(&self.project)
            .with_context(|| format!("load storyboard '{}'", self.project.display()))?;
        Ok(storyreel::descriptors_for(&prompts, self.assets_dir()))
    }
}

fn default_out_path(args: &SceneArgs, format: VideoFormat) -> PathBuf {
    let dir = args.assets_dir();
    let name = dir
        .canonicalize()
        .ok()
        .and_then(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "storyreel".to_string());
    let mut project = Project::new(name, format);
    project.dir = dir;
    project.output_path()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.scenes.render_config()?;
    let descs = args.scenes.descriptors()?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_out_path(&args.scenes, cfg.format));

    let report = storyreel::render_to_mp4(&descs, &out, &cfg, &FfprobeProbe)
        .with_context(|| format!("render '{}'", out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        out.display(),
        report.frames,
        report.duration_secs
    );
    Ok(())
}

fn cmd_plan(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = args.render_config()?;
    let descs = args.descriptors()?;
    let mut policy = storyreel::policy_for(&cfg);
    let scenes = storyreel::resolve_scenes(&descs, &FfprobeProbe, &mut policy)?;
    let plan = storyreel::plan_render(&scenes, &cfg, &mut policy)?;

    let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.scenes.render_config()?;
    let descs = args.scenes.descriptors()?;
    let mut policy = storyreel::policy_for(&cfg);
    let scenes = storyreel::resolve_scenes(&descs, &FfprobeProbe, &mut policy)?;
    let timeline = storyreel::build_timeline(&scenes, &cfg, &mut policy)?;

    if !args.time.is_finite() || args.time < 0.0 || args.time >= timeline.duration() {
        anyhow::bail!(
            "--time {} is outside the timeline [0, {:.3})",
            args.time,
            timeline.duration()
        );
    }
    let frame = timeline.frame_at(args.time)?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
