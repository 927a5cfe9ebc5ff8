use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "heartwave", version, about = "Render reflecting heart-wave scenes")]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the visible canvas at a point in time as a PNG.
    Frame(FrameArgs),
    /// Export the wave layer at a point in time as SVG.
    Svg(FrameArgs),
    /// Render the scene's whole sequence as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// List built-in presets.
    Presets,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time in seconds from the start of the scene.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Simulation steps per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Overwrite output if it already exists.
    #[arg(long)]
    overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
    }
}

fn load_scene(path: &std::path::Path) -> anyhow::Result<heartwave::Scene> {
    let scene = heartwave::Scene::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fps = heartwave::Fps::new(args.fps, 1)?;
    let stats = heartwave::render_png_at(&scene, args.time, fps, &args.out)
        .with_context(|| format!("render frame to '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} waves, {} sources)",
        args.out.display(),
        stats.waves_drawn,
        stats.source_count
    );
    Ok(())
}

fn cmd_svg(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fps = heartwave::Fps::new(args.fps, 1)?;
    let doc = heartwave::export_svg_at(&scene, args.time, fps)?;
    heartwave::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, doc)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fps = heartwave::Fps::new(args.fps, 1)?;
    let opts = heartwave::FfmpegSinkOpts {
        overwrite: args.overwrite,
        ..heartwave::FfmpegSinkOpts::new(&args.out)
    };
    let stats = heartwave::render_to_mp4(&scene, fps, opts)?;
    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames);
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in heartwave::presets() {
        println!(
            "{:<18} waves={:<2} reflections={}",
            p.name, p.max_wave_count, p.max_reflection_order
        );
    }
    Ok(())
}
