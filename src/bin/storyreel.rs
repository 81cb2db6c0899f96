use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole story to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Story configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Story configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output MP4 path (overrides the config).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for intermediate PNG stills (overrides the config).
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Keep the PNG stills after encoding.
    #[arg(long, default_value_t = false)]
    keep_frames: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = storyreel::StoryConfig::from_path(&args.config)
        .with_context(|| format!("load config '{}'", args.config.display()))?;
    let renderer = storyreel::StoryRenderer::from_config(&cfg)?;

    let mut worker = renderer.worker();
    let frame = renderer.render_frame(&mut worker, storyreel::FrameIndex(args.frame))?;
    let png = frame.encode_png()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = storyreel::StoryConfig::from_path(&args.config)
        .with_context(|| format!("load config '{}'", args.config.display()))?;
    if let Some(out) = args.out {
        cfg.output = out;
    }
    if let Some(dir) = args.frames_dir {
        cfg.frames_dir = dir;
    }
    cfg.keep_frames |= args.keep_frames;

    let threading = storyreel::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let report = storyreel::run(&cfg, threading)?;

    if report.frames_kept {
        eprintln!("frames kept in {}", report.frames_dir.display());
    }
    eprintln!(
        "wrote {} ({} frames)",
        report.output.display(),
        report.stats.frames_rendered
    );
    Ok(())
}
