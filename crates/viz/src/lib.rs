//! Visualization layer: Bevy host for the particle field.

pub mod background;
pub mod camera;
pub mod overlay;
pub mod plugin;

pub use background::{HeroField, ParticleBackgroundPlugin};
pub use plugin::HeroVizPlugin;
