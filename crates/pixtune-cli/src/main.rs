//! pixtune - image adjustment and palette extraction CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod io;
mod recipe;

#[derive(Parser)]
#[command(name = "pixtune")]
#[command(author, version, about = "Image adjustment pipeline and palette extraction")]
#[command(long_about = "
Applies resize, contrast, invert, HSV and tone-curve adjustments to PNG
images and extracts dominant color palettes.

Examples:
  pixtune info photo.png                          # Size and channel layout
  pixtune apply photo.png -o out.png --resize 2 --contrast 1.2
  pixtune apply photo.png -o out.png --curve 0:0,128:200,255:255
  pixtune apply photo.png -o out.png --recipe look.yaml --palette 5
  pixtune palette photo.png -k 8 --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write log events to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply adjustments and write the result
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Extract the dominant colors of an image
    #[command(visible_alias = "p")]
    Palette(PaletteArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input PNG
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// YAML recipe with the steps to run (replaces the step flags)
    #[arg(short, long, conflicts_with_all = [
        "resize", "contrast", "invert", "hue", "saturation", "value",
        "curve", "curve_red", "curve_green", "curve_blue",
    ])]
    recipe: Option<PathBuf>,

    /// Lanczos upscale factor
    #[arg(long)]
    resize: Option<f32>,

    /// Contrast factor around mid-gray (1.0 = unchanged)
    #[arg(long)]
    contrast: Option<f32>,

    /// Invert all channels
    #[arg(long)]
    invert: bool,

    /// Hue multiplier (wraps around the color wheel)
    #[arg(long)]
    hue: Option<f32>,

    /// Saturation multiplier
    #[arg(long)]
    saturation: Option<f32>,

    /// Value (brightness) multiplier
    #[arg(long)]
    value: Option<f32>,

    /// Shared tone curve as `in:out` pairs, e.g. `0:0,128:200,255:255`
    #[arg(long, conflicts_with_all = ["curve_red", "curve_green", "curve_blue"])]
    curve: Option<String>,

    /// Red channel tone curve (requires --curve-green and --curve-blue)
    #[arg(long, requires_all = ["curve_green", "curve_blue"])]
    curve_red: Option<String>,

    /// Green channel tone curve
    #[arg(long, requires_all = ["curve_red", "curve_blue"])]
    curve_green: Option<String>,

    /// Blue channel tone curve
    #[arg(long, requires_all = ["curve_red", "curve_green"])]
    curve_blue: Option<String>,

    /// Print a palette of K colors extracted from the result
    #[arg(long, value_name = "K")]
    palette: Option<usize>,
}

#[derive(Args)]
struct PaletteArgs {
    /// Input PNG
    input: PathBuf,

    /// Number of colors
    #[arg(short = 'k', long, default_value_t = pixtune_palette::DEFAULT_MAX_COLORS)]
    colors: usize,

    /// Histogram bits per channel
    #[arg(long, default_value_t = pixtune_palette::DEFAULT_BITS)]
    bits: u8,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Installs the global subscriber.
///
/// The returned guard flushes the log file on drop and must live until exit.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_filter(filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr).init();
        return Ok(None);
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr)
        .with(file_layer)
        .init();
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Palette(args) => commands::palette::run(args),
    }
}
