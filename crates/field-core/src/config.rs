//! Configuration System
//!
//! Loads field parameters from a TOML file so the animation can be tuned
//! without recompiling. Every section is optional; missing keys fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use field_events::{Glow, Rgba};

use crate::connections::{DEFAULT_FADE_DISTANCE, DEFAULT_MAX_ALPHA, DEFAULT_MAX_DISTANCE};
use crate::surface::{FillStyle, LineStyle};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "field.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub field: ParticleConfig,
    #[serde(default)]
    pub connections: ConnectionConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// What happens to existing particles when the surface changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Discard and seed a fresh set inside the new bounds
    #[default]
    Reseed,
    /// Keep particles, scaling positions by the size ratio
    Rescale,
}

/// Particle set parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Fixed for the lifetime of a mount
    pub particle_count: usize,
    pub particle_radius: f32,
    /// Upper bound on each velocity component, in units per frame
    pub max_speed: f32,
    pub resize_policy: ResizePolicy,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            particle_radius: 6.0,
            max_speed: 0.25,
            resize_policy: ResizePolicy::Reseed,
        }
    }
}

/// Connection line parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Pairs at or beyond this distance are not joined
    pub max_distance: f32,
    /// Alpha at distance 0
    pub max_alpha: f32,
    /// Distance over which alpha drops by 1.0
    pub fade_distance: f32,
    pub line_width: f32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            max_alpha: DEFAULT_MAX_ALPHA,
            fade_distance: DEFAULT_FADE_DISTANCE,
            line_width: 1.0,
        }
    }
}

/// Colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Line color; alpha is replaced per line
    pub line: Rgba,
    pub particle: Rgba,
    pub glow: Rgba,
    pub glow_blur: f32,
    /// Background gradient, painted by the host behind the surface
    pub background_top: Rgba,
    pub background_bottom: Rgba,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            line: Rgba::rgb(0x47, 0x55, 0x69),
            particle: Rgba::rgb(0x47, 0x55, 0x69),
            glow: Rgba::rgb(0x3b, 0x82, 0xf6),
            glow_blur: 10.0,
            background_top: Rgba::rgb(0x1e, 0x29, 0x3b),
            background_bottom: Rgba::rgb(0x0f, 0x17, 0x2a),
        }
    }
}

impl PaletteConfig {
    /// Marker style: particle fill with the glow behind it.
    pub fn particle_style(&self) -> FillStyle {
        FillStyle {
            color: self.particle,
            glow: (self.glow_blur > 0.0).then_some(Glow {
                color: self.glow,
                blur: self.glow_blur,
            }),
        }
    }

    /// Line style for a given opacity.
    pub fn line_style(&self, alpha: f32, width: f32) -> LineStyle {
        LineStyle {
            color: self.line.with_alpha(alpha),
            width,
        }
    }
}

impl FieldConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from the default path, or uses defaults if it is missing or bad.
    pub fn load_or_default() -> Self {
        Self::from_file(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Serializes to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("field.particle_radius", self.field.particle_radius),
            ("field.max_speed", self.field.max_speed),
            ("connections.max_distance", self.connections.max_distance),
            ("connections.max_alpha", self.connections.max_alpha),
            ("connections.line_width", self.connections.line_width),
            ("palette.glow_blur", self.palette.glow_blur),
        ];
        for (key, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }
        if !self.connections.fade_distance.is_finite() || self.connections.fade_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "connections.fade_distance must be positive, got {}",
                self.connections.fade_distance
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r##"# Particle Field Configuration

[field]
particle_count = 20
particle_radius = 6.0
max_speed = 0.25
resize_policy = "reseed"

[connections]
max_distance = 200.0
max_alpha = 0.15
fade_distance = 2000.0
line_width = 1.0

[palette]
line = "#475569"
particle = "#475569"
glow = "#3b82f6"
glow_blur = 10.0
background_top = "#1e293b"
background_bottom = "#0f172a"
"##
    .to_string()
}
