//! Drawing Surface
//!
//! The seam between the particle field and whatever actually puts pixels on
//! screen. Coordinates are logical units with the origin at the top-left;
//! implementations apply the device pixel ratio themselves.

use field_events::{DrawCommand, Glow, Point, Rgba};

use crate::geometry::BufferSize;
use crate::vector::Vector2;

/// Stroke settings for connection lines. Lines never carry a glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
}

/// Fill settings for particle markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Rgba,
    pub glow: Option<Glow>,
}

/// A pixel-addressable 2D drawing target.
pub trait DrawSurface {
    /// Reallocates the backing buffer and sets the logical-to-device scale.
    fn resize(&mut self, buffer: BufferSize, scale: f32);

    /// Clears the whole buffer.
    fn clear(&mut self);

    fn stroke_line(&mut self, from: Vector2, to: Vector2, style: &LineStyle);

    fn fill_circle(&mut self, center: Vector2, radius: f32, style: &FillStyle);
}

/// Surface that records every call as a [`DrawCommand`].
///
/// Serves as the headless renderer and as the spy in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frame_start: usize,
    buffer: BufferSize,
    scale: f32,
    clears: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Default::default()
        }
    }

    /// Every command since creation or the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent clear, inclusive.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.commands[self.frame_start.min(self.commands.len())..]
    }

    /// Drains the recorded history.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.frame_start = 0;
        std::mem::take(&mut self.commands)
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    pub fn buffer(&self) -> BufferSize {
        self.buffer
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn lines_in_last_frame(&self) -> usize {
        self.last_frame().iter().filter(|c| c.is_line()).count()
    }

    pub fn circles_in_last_frame(&self) -> usize {
        self.last_frame().iter().filter(|c| c.is_circle()).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, buffer: BufferSize, scale: f32) {
        self.buffer = buffer;
        self.scale = scale;
        self.commands.push(DrawCommand::Resize {
            width: buffer.width,
            height: buffer.height,
            scale,
        });
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.frame_start = self.commands.len();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, style: &LineStyle) {
        self.commands.push(DrawCommand::Line {
            from: from.to_point(),
            to: to.to_point(),
            color: style.color,
            width: style.width,
        });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, style: &FillStyle) {
        self.commands.push(DrawCommand::Circle {
            center: Point::new(center.x, center.y),
            radius,
            color: style.color,
            glow: style.glow,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new();
        surface.resize(BufferSize { width: 20, height: 10 }, 2.0);
        surface.clear();
        surface.stroke_line(
            Vector2::ZERO,
            Vector2::new(1.0, 1.0),
            &LineStyle {
                color: Rgba::rgb(71, 85, 105).with_alpha(0.1),
                width: 1.0,
            },
        );

        assert_eq!(surface.command_count(), 3);
        assert!(matches!(surface.commands()[0], DrawCommand::Resize { scale, .. } if scale == 2.0));
        assert_eq!(surface.commands()[1], DrawCommand::Clear);
        assert!(surface.commands()[2].is_line());
        assert_eq!(surface.buffer(), BufferSize { width: 20, height: 10 });
    }

    #[test]
    fn test_last_frame_starts_at_clear() {
        let mut surface = RecordingSurface::new();
        let style = FillStyle {
            color: Rgba::rgb(71, 85, 105),
            glow: None,
        };

        surface.clear();
        surface.fill_circle(Vector2::ZERO, 6.0, &style);
        surface.fill_circle(Vector2::ZERO, 6.0, &style);
        surface.clear();
        surface.fill_circle(Vector2::ZERO, 6.0, &style);

        assert_eq!(surface.clear_count(), 2);
        assert_eq!(surface.last_frame().len(), 2);
        assert_eq!(surface.circles_in_last_frame(), 1);
        assert_eq!(surface.lines_in_last_frame(), 0);
    }

    #[test]
    fn test_take_commands_resets() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        let taken = surface.take_commands();
        assert_eq!(taken.len(), 1);
        assert_eq!(surface.command_count(), 0);
        assert!(surface.last_frame().is_empty());
    }
}
