//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // field-events = { path = "../field-events", features = ["test-fixtures"] }
//!
//! use field_events::fixtures;
//!
//! let frames = fixtures::sample_frames();
//! ```

use crate::FrameSnapshot;

/// Returns sample frames from the fixtures file.
///
/// Contains 2 consecutive frames of a 3-particle field on an 800x400 surface
/// at 2x density. Particle 2 crosses the right edge between the frames and
/// has its horizontal velocity reflected.
pub fn sample_frames() -> Vec<FrameSnapshot> {
    let jsonl = include_str!("../tests/fixtures/sample_frames.jsonl");
    jsonl
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            FrameSnapshot::from_jsonl(l).unwrap_or_else(|e| {
                panic!("Failed to parse frame line: {}\nError: {}", l, e)
            })
        })
        .collect()
}
