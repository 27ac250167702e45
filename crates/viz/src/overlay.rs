//! UI overlay: hero headline layered over the particle background.

use bevy::prelude::*;

/// Plugin for the hero text overlay.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeroText>()
            .add_systems(Startup, setup_overlay);
    }
}

/// Copy shown over the background.
#[derive(Resource, Clone, Debug)]
pub struct HeroText {
    pub headline: String,
    pub tagline: String,
}

impl Default for HeroText {
    fn default() -> Self {
        Self {
            headline: "A Multi-Agent Human-in-the-Loop Framework".into(),
            tagline: "Create AI-native spaces where humans and AI agents collaborate seamlessly."
                .into(),
        }
    }
}

/// Component marking the overlay root node.
#[derive(Component)]
pub struct HeroOverlay;

fn setup_overlay(mut commands: Commands, text: Res<HeroText>) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    row_gap: Val::Px(24.0),
                    ..default()
                },
                ..default()
            },
            HeroOverlay,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                text.headline.clone(),
                TextStyle {
                    font_size: 48.0,
                    color: Color::srgb_u8(0x60, 0xa5, 0xfa),
                    ..default()
                },
            ));
            parent.spawn(TextBundle::from_section(
                text.tagline.clone(),
                TextStyle {
                    font_size: 24.0,
                    color: Color::srgb_u8(0xdb, 0xea, 0xfe),
                    ..default()
                },
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_copy() {
        let text = HeroText::default();
        assert!(text.headline.contains("Human-in-the-Loop"));
        assert!(!text.tagline.is_empty());
    }
}
