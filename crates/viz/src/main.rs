//! Particle Field Visualization
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --seed 42
//!   cargo run -p viz -- --config field.toml --width 1920 --height 1080
//!
//! Press Escape to unmount or remount the field.

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use field_core::{field_rng, FieldConfig};
use viz::{HeroField, HeroVizPlugin};

/// Particle Field Visualization
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "Hero background with the animated particle field")]
struct Args {
    /// Random seed (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a field.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FieldConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Warning: Could not load {:?}: {}. Using defaults.", path, e);
            FieldConfig::default()
        }),
        None => FieldConfig::load_or_default(),
    };

    App::new()
        .insert_resource(HeroField::new(config, field_rng(args.seed)))
        .add_plugins(HeroVizPlugin {
            width: args.width,
            height: args.height,
        })
        .run();
}
