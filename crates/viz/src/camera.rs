//! Camera setup and canvas-to-world coordinate mapping.

use bevy::prelude::*;

use field_events::Point;

/// Plugin for the fixed 2D camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// System to set up the camera on startup.
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), MainCamera));
}

/// Convert canvas coordinates to world coordinates.
///
/// The canvas has its origin at the top-left with y growing downward; the
/// camera looks at the world origin with y growing upward.
pub fn canvas_to_world(point: Point, canvas_size: Vec2) -> Vec2 {
    Vec2::new(
        point.x - canvas_size.x / 2.0,
        canvas_size.y / 2.0 - point.y,
    )
}
