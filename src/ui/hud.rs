use bevy::prelude::*;

use crate::player::Player;

/// Marker component for the HUD readout text
#[derive(Component)]
pub struct HudReadout;

/// Sets up the always-on HUD in the top-left corner
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        HudReadout,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..default()
        },
        ZIndex(100),
    ));
}

/// Refreshes the HUD readout whenever the player changes
pub fn update_hud(
    player_query: Query<&Player, Changed<Player>>,
    mut readout_query: Single<&mut Text, With<HudReadout>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    readout_query.0 = format!(
        "${}\nFuel {:.1} / {:.0}\nCargo {} / {}\nDepth {}m",
        player.money,
        player.fuel,
        player.max_fuel(),
        player.cargo.len(),
        player.cargo.capacity(),
        player.depth_tiles(),
    );
}
