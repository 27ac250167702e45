//! Surface Geometry
//!
//! Logical container size, device pixel density, and the backing buffer
//! dimensions derived from them.

use serde::{Deserialize, Serialize};

/// Logical extent particles move within. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero; nothing drawn there is visible.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Backing pixel buffer size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl BufferSize {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// What the host reports about the container at mount or resize time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Logical container width
    pub width: f32,
    /// Logical container height
    pub height: f32,
    /// Device pixels per logical unit
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Creates a viewport, replacing unusable values.
    ///
    /// Negative or non-finite sizes become 0; a density that is not a
    /// positive finite number becomes 1.0.
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            device_pixel_ratio: if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
                device_pixel_ratio
            } else {
                1.0
            },
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Backing buffer dimensions: logical size times density, floored.
    pub fn buffer_size(&self) -> BufferSize {
        BufferSize {
            width: (self.width * self.device_pixel_ratio).floor() as u32,
            height: (self.height * self.device_pixel_ratio).floor() as u32,
        }
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
