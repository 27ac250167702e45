//! Snapshot Types
//!
//! Serialization structs for frame snapshots.
//!
//! A snapshot captures the particle set and the work done for one rendered
//! frame, used for headless runs, replay in the visualizer, and debugging.

use serde::{Deserialize, Serialize};

/// Rounding allowance for bounds checks on accumulated positions.
const BOUNDS_EPSILON: f32 = 1e-3;

/// Generates a snapshot ID for the given frame number.
pub fn generate_snapshot_id(frame: u64) -> String {
    format!("frame_{:08}", frame)
}

/// Work counters for a single rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Unordered particle pairs whose distance was measured
    pub pairs_evaluated: u32,
    /// Pairs close enough to get a connecting line
    pub lines_drawn: u32,
    /// Particle markers filled
    pub particles_drawn: u32,
}

/// Particle state at the moment a snapshot was taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

impl ParticleSnapshot {
    /// Velocity magnitude.
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// Complete field state after a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub snapshot_id: String,
    pub frame: u64,
    /// Logical surface width
    pub width: f32,
    /// Logical surface height
    pub height: f32,
    /// Device pixel ratio
    pub scale: f32,
    pub particles: Vec<ParticleSnapshot>,
    #[serde(default)]
    pub stats: FrameStats,
}

impl FrameSnapshot {
    /// Parses a snapshot from a JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serializes to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns true if every particle sits inside the logical bounds,
    /// allowing each one to overshoot by at most one velocity step.
    pub fn particles_within_bounds(&self) -> bool {
        self.particles.iter().all(|p| {
            let slack_x = p.vx.abs() + BOUNDS_EPSILON;
            let slack_y = p.vy.abs() + BOUNDS_EPSILON;
            p.x >= -slack_x
                && p.x <= self.width + slack_x
                && p.y >= -slack_y
                && p.y <= self.height + slack_y
        })
    }
}
