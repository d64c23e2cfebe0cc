use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "motionscape", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a scene description without running it.
    Validate(ValidateArgs),
    /// Run a scene at a fixed frame rate and dump per-frame element state as JSON.
    Simulate(SimulateArgs),
    /// Run a scene to a frame and write a preview PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of ticks to run.
    #[arg(long)]
    frames: u64,

    /// Record every Nth frame (the last frame is always recorded).
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output trace JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of ticks to run before painting (0 paints the initial state).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<motionscape::SceneSpec> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: motionscape::SceneSpec =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    spec.validate()?;
    Ok(spec)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Start the engine and run `frames` fixed-rate ticks, calling `visit` after each one.
fn run_fixed(
    spec: &motionscape::SceneSpec,
    frames: u64,
    mut visit: impl FnMut(u64, &motionscape::AnimationEngine),
) -> anyhow::Result<motionscape::AnimationEngine> {
    let mut engine = motionscape::AnimationEngine::from_spec(spec)?;
    let step = Duration::from_secs_f64(spec.frame_dt());
    engine.start_animation(Duration::ZERO)?;
    for f in 1..=frames {
        engine.tick(step * u32::try_from(f).context("frame count too large")?);
        visit(f, &engine);
    }
    Ok(engine)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let spec = read_scene_json(&args.in_path)?;
    eprintln!(
        "ok: {} element(s) on a {}x{} canvas",
        spec.elements.len(),
        spec.canvas.width,
        spec.canvas.height
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let spec = read_scene_json(&args.in_path)?;
    let every = args.every.max(1);

    let mut records = Vec::new();
    run_fixed(&spec, args.frames, |f, engine| {
        if f % every == 0 || f == args.frames {
            records.push(motionscape::FrameRecord::from(&engine.frame_view()));
        }
    })?;

    ensure_parent_dir(&args.out)?;
    let f = File::create(&args.out)
        .with_context(|| format!("create trace '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &records).with_context(|| "write trace")?;

    eprintln!("wrote {} frame(s) to {}", records.len(), args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = read_scene_json(&args.in_path)?;
    let engine = run_fixed(&spec, args.frame, |_, _| {})?;

    let mut renderer = motionscape::PreviewRenderer::new(spec.canvas.width, spec.canvas.height)?;
    engine.render(&mut renderer)?;

    ensure_parent_dir(&args.out)?;
    renderer
        .into_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
