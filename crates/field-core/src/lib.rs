//! Particle Field Library
//!
//! A small set of drifting particles joined by proximity-faded lines, drawn
//! onto an injected surface and driven by an injected refresh signal.

pub mod config;
pub mod connections;
pub mod field;
pub mod geometry;
pub mod host;
pub mod output;
pub mod particle;
pub mod runner;
pub mod surface;
pub mod vector;

pub use config::{default_config_toml, ConfigError, FieldConfig, ResizePolicy};
pub use field::ParticleField;
pub use geometry::{Bounds, BufferSize, Viewport};
pub use host::{FrameHandle, FrameScheduler, Host, ListenerId, ManualHost, ResizeEvents};
pub use particle::{advance_position, reflect_on_boundary, Particle};
pub use surface::{DrawSurface, FillStyle, LineStyle, RecordingSurface};
pub use vector::Vector2;

use rand::SeedableRng;

/// Random source particles are seeded from.
pub use rand::rngs::SmallRng as FieldRng;

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn field_rng(seed: Option<u64>) -> FieldRng {
    match seed {
        Some(seed) => FieldRng::seed_from_u64(seed),
        None => FieldRng::from_entropy(),
    }
}
