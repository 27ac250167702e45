//! Integration tests for the visualization layer.

use bevy::math::Vec2;
use field_core::{field_rng, FieldConfig, ManualHost, Viewport};
use field_events::{fixtures, DrawCommand};
use viz::camera::canvas_to_world;
use viz::HeroField;

/// Test that fixture frames map inside the visible world rectangle.
#[test]
fn test_fixture_frames_map_into_view() {
    for frame in fixtures::sample_frames() {
        let size = Vec2::new(frame.width, frame.height);
        for particle in &frame.particles {
            let world = canvas_to_world(field_events::Point::new(particle.x, particle.y), size);
            // One step of overshoot is allowed at the edges
            assert!(world.x.abs() <= size.x / 2.0 + 1.0);
            assert!(world.y.abs() <= size.y / 2.0 + 1.0);
        }
    }
}

/// Test that a hosted field records one marker per particle each frame.
#[test]
fn test_hosted_field_records_markers() {
    let mut hero = HeroField::new(FieldConfig::default(), field_rng(Some(42)));
    let mut host = ManualHost::new();
    hero.mount(&mut host, Viewport::new(1280.0, 720.0, 2.0));

    for _ in 0..3 {
        let handle = host.next_frame().unwrap();
        hero.surface.take_commands();
        hero.field.on_frame(handle, &mut host, &mut hero.surface);
        assert_eq!(hero.surface.circles_in_last_frame(), 20);
    }

    let circles: Vec<_> = hero
        .surface
        .last_frame()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    let size = Vec2::new(1280.0, 720.0);
    for center in circles {
        let world = canvas_to_world(center, size);
        assert!(world.x.abs() <= 641.0);
        assert!(world.y.abs() <= 361.0);
    }
}

/// Test that unmounting leaves nothing to replay.
#[test]
fn test_unmounted_field_replays_nothing() {
    let mut hero = HeroField::new(FieldConfig::default(), field_rng(Some(7)));
    let mut host = ManualHost::new();
    hero.mount(&mut host, Viewport::new(800.0, 600.0, 1.0));
    hero.unmount(&mut host);
    hero.unmount(&mut host);

    assert!(hero.surface.last_frame().is_empty());
    assert!(host.next_frame().is_none());
}
