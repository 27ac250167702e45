//! Color Types
//!
//! Handles stroke and fill colors in the two textual forms the palette uses:
//! CSS hex (`#475569`) and CSS functional notation (`rgba(71, 85, 105, 0.15)`).
//!
//! # Example
//!
//! ```
//! use field_events::Rgba;
//!
//! let slate = Rgba::from_hex("#475569").unwrap();
//! assert_eq!(slate.with_alpha(0.15).to_css(), "rgba(71, 85, 105, 0.15)");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels and a floating-point alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque)
    pub a: f32,
}

impl Rgba {
    /// Creates a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses `#RRGGBB` or `#RGB`.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::InvalidFormat(s.to_string()))?;
        if !digits.is_ascii() {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }

        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ParseColorError::InvalidHex(s.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(ParseColorError::InvalidHex(s.to_string())),
        }
    }

    /// Returns the same color with a new alpha, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { a, ..self }
    }

    /// Returns true if the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Renders as `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Renders as `rgba(r, g, b, a)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Channels as floats in [0, 1], for renderers that want linear inputs.
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }

    fn from_css(s: &str) -> Result<Self, ParseColorError> {
        let body = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseColorError::InvalidFormat(s.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParseColorError::InvalidFormat(s.to_string()));
        }

        let channel = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| ParseColorError::InvalidChannel(part.to_string()))
        };
        let alpha = parts[3]
            .parse::<f32>()
            .map_err(|_| ParseColorError::InvalidChannel(parts[3].to_string()))?;

        Ok(Self::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?).with_alpha(alpha))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}", self.to_css())
        }
    }
}

/// Error parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    InvalidFormat(String),
    InvalidHex(String),
    InvalidChannel(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidFormat(s) => {
                write!(f, "invalid color: '{}', expected '#rrggbb' or 'rgba(r, g, b, a)'", s)
            }
            ParseColorError::InvalidHex(s) => write!(f, "invalid hex color: '{}'", s),
            ParseColorError::InvalidChannel(s) => write!(f, "invalid color channel: '{}'", s),
        }
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_css(s)
        }
    }
}

// Serialize as the same string Display produces
impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
