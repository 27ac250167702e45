//! Headless particle field runner
//!
//! Run with: cargo run -p field-core --bin particle_field
//!
//! Examples:
//!   cargo run -p field-core --bin particle_field -- --frames 600 --seed 7
//!   cargo run -p field-core --bin particle_field -- --resize-at 300:640x360 --output output/frames.jsonl

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use field_core::output::{FrameLogger, OutputError};
use field_core::runner::{run_headless, RunPlan, ScheduledResize};
use field_core::{default_config_toml, field_rng, ConfigError, FieldConfig, ParticleField, Viewport};

/// Headless particle field runner
#[derive(Parser, Debug)]
#[command(name = "particle_field")]
#[command(about = "Runs the particle field without a window and logs frame snapshots")]
struct Args {
    /// Container width in logical units
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Container height in logical units
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,

    /// Number of frames to render
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Random seed (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a field.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSONL file for frame snapshots
    #[arg(long)]
    output: Option<PathBuf>,

    /// Frames between snapshots (0 disables)
    #[arg(long, default_value_t = 60)]
    snapshot_interval: u64,

    /// Resize the container before a frame, as FRAME:WxH (repeatable)
    #[arg(long = "resize-at")]
    resize_at: Vec<ScheduledResize>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RunError> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(args.verbose)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install log subscriber: {}", e);
    }

    if args.print_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => FieldConfig::from_file(path)?,
        None => FieldConfig::load_or_default(),
    };

    let mut logger = match &args.output {
        Some(path) => FrameLogger::new(path)?,
        None => FrameLogger::null(),
    };

    let plan = RunPlan {
        viewport: Viewport::new(args.width, args.height, args.dpr),
        frames: args.frames,
        snapshot_interval: args.snapshot_interval,
        resizes: args.resize_at,
    };

    tracing::info!(
        "Running {} frames on {}x{} @{}x",
        plan.frames,
        plan.viewport.width,
        plan.viewport.height,
        plan.viewport.device_pixel_ratio
    );

    let mut field = ParticleField::new(config, field_rng(args.seed));
    let summary = run_headless(&mut field, &plan, &mut logger)?;

    tracing::info!(
        "Rendered {} frames, {} lines, {} resizes, {} snapshots",
        summary.frames_rendered,
        summary.lines_drawn,
        summary.resizes_applied,
        summary.snapshots_written
    );
    if let Some(path) = &args.output {
        tracing::info!("Snapshots written to {:?}", path);
    }

    Ok(())
}
