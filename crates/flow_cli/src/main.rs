//! Flow CLI
//!
//! Render the demo animation offline and write the paint commands of every
//! frame as JSON lines.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod render;
mod scene;

use config::FlowConfig;
use flow_animation::FrameClock;

#[derive(Parser)]
#[command(name = "flow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Flow animation renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Config file, or directory containing flow.toml
    #[arg(short, long, default_value = ".")]
    config: PathBuf,

    /// First rendered time, in seconds
    #[arg(long)]
    from: Option<f64>,

    /// Time at which rendering stops, in seconds
    #[arg(long)]
    to: Option<f64>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Frame trace output (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = FlowConfig::load_from_dir(&cli.config)?;
    config
        .override_output(cli.from, cli.to, cli.fps)
        .context("Invalid --from/--to/--fps")?;
    if let Some(out) = cli.out {
        config.output.trace_path = Some(out);
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match &config.log_filter {
        Some(directive) => EnvFilter::new(directive),
        None if cli.verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let (mut scene, timeline) = scene::demo(&config.path)?;

    let (start, end) = config.output.frame_range();
    let mut clock = FrameClock::with_range(start, end);
    info!(
        "Rendering frames {}..{} at {} fps",
        start, end, config.output.fps
    );

    let mut out: Box<dyn Write> = match &config.output.trace_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let written = render::render_frames(&mut scene, &timeline, &mut clock, config.output.fps, &mut out)?;
    info!("Wrote {} frames", written);

    Ok(())
}
