//! Shared drawing and snapshot types for the particle field.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod color;
pub mod draw;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export color types
pub use color::{ParseColorError, Rgba};

// Re-export draw types
pub use draw::{DrawCommand, Glow, Point};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, FrameSnapshot, FrameStats, ParticleSnapshot};
