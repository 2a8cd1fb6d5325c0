//! Contour drawing driver.
//!
//! Reads a source image and the 16 contour glyphs, runs the parallel
//! marching-squares pipeline and writes the composited image:
//!
//! ```text
//! contour-cli <in_file> <out_file> [P]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contour_cli::{load_base_config, load_glyph_table, load_image, save_image, ConfigOverrides};
use marching_squares::MarchingSquares;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "contour-cli")]
#[command(about = "Draw contour curves over an image with parallel marching squares")]
struct Args {
    /// Input image (format from extension, e.g. .ppm)
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Number of worker threads (default: available parallelism)
    workers: Option<usize>,

    /// Directory holding the contour glyphs 0.ppm .. 15.ppm
    #[arg(long, env = "CONTOUR_GLYPH_DIR", default_value = "contours")]
    glyph_dir: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Horizontal lattice step in pixels
    #[arg(long)]
    step_x: Option<usize>,

    /// Vertical lattice step in pixels
    #[arg(long)]
    step_y: Option<usize>,

    /// Luminance threshold (cells at or below are inside)
    #[arg(long, allow_negative_numbers = true)]
    sigma: Option<i32>,

    /// Working resolution width
    #[arg(long)]
    target_width: Option<usize>,

    /// Working resolution height
    #[arg(long)]
    target_height: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workers: self.workers,
            step_x: self.step_x,
            step_y: self.step_y,
            sigma: self.sigma,
            target_width: self.target_width,
            target_height: self.target_height,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let config = load_base_config(args.config.as_deref())
        .context("failed to load configuration")?
        .with_env_overrides()
        .context("invalid CONTOUR_* environment variable")?;
    let config = args.overrides().apply(config);

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        workers = config.workers,
        step_x = config.step_x,
        step_y = config.step_y,
        sigma = config.sigma,
        "Starting contour drawing"
    );

    let glyphs = load_glyph_table(&args.glyph_dir)
        .with_context(|| format!("failed to load glyphs from {}", args.glyph_dir.display()))?;
    let source = load_image(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let pipeline = MarchingSquares::new(config, glyphs).context("invalid pipeline setup")?;
    let run = pipeline.run(&source).context("contour pipeline failed")?;

    save_image(&args.output, &run.image)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        rescaled = run.rescaled,
        elapsed_ms = run.elapsed.as_millis() as u64,
        "Contour image written"
    );

    Ok(())
}
