//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;

use crate::background::ParticleBackgroundPlugin;
use crate::camera::CameraPlugin;
use crate::overlay::OverlayPlugin;

/// Main plugin for the hero visualization.
///
/// This plugin sets up the window and adds the camera, particle background
/// and text overlay.
pub struct HeroVizPlugin {
    pub width: f32,
    pub height: f32,
}

impl Default for HeroVizPlugin {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Plugin for HeroVizPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particle Field".into(),
                resolution: (self.width, self.height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((CameraPlugin, ParticleBackgroundPlugin, OverlayPlugin));
    }
}
