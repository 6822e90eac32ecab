use bevy::prelude::*;

use crate::player::RescueState;

/// Marker component for the fullscreen fade overlay
#[derive(Component)]
pub struct FadeOverlay;

/// Sets up the fullscreen overlay the rescue sequence fades through
pub fn setup_fade_overlay(mut commands: Commands) {
    commands.spawn((
        FadeOverlay,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        ZIndex(2000),
    ));
}

/// Drives the overlay alpha from the rescue phase
pub fn update_fade_overlay(
    rescue: Res<RescueState>,
    mut overlay_query: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    let Ok(mut background) = overlay_query.single_mut() else {
        // A rescue with nothing to fade through would strand the player
        assert!(!rescue.is_active(), "rescue started without a fade overlay");
        return;
    };
    background.0 = Color::srgba(0.0, 0.0, 0.0, rescue.overlay_alpha());
}
