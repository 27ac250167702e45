//! Draw Command Types
//!
//! The vocabulary a drawing surface understands, as plain data. Recording
//! surfaces store these; hosts replay them onto a real renderer.

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// A point in surface coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Soft shadow drawn behind a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: Rgba,
    /// Blur radius in logical units
    pub blur: f32,
}

/// One instruction issued to a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Backing buffer was reallocated.
    Resize {
        /// Buffer width in device pixels
        width: u32,
        /// Buffer height in device pixels
        height: u32,
        /// Device pixel ratio applied as the drawing transform
        scale: f32,
    },
    /// Whole buffer cleared to transparent.
    Clear,
    /// Straight stroked segment.
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    /// Filled circle, optionally with a glow.
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        glow: Option<Glow>,
    },
}

impl DrawCommand {
    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::Line { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, DrawCommand::Circle { .. })
    }
}
