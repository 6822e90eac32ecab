pub mod constants;
mod movement;
mod rescue;
mod types;

pub use constants::*;
pub use movement::{player_movement, tick, TickEvents, TickInput};
pub use rescue::{apply_rescue, rescue_cost, RescueState, RescueTransition};
pub use types::{Cargo, Direction, HeldDirections, Player, PlayerState, Waypoint};

use crate::tiles::{LAYER_Z_PLAYER, TILE_SIZE};
use crate::world::pixel_to_world;
use bevy::prelude::*;

/// Plugin for the miner: spawning, the movement state machine and the
/// out-of-fuel rescue sequence
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RescueState>()
            .add_systems(
                Update,
                (
                    movement::player_movement,
                    rescue::start_rescue.after(movement::player_movement),
                    rescue::advance_rescue.after(rescue::start_rescue),
                    movement::sync_player_transform.after(rescue::advance_rescue),
                ),
            );
    }
}

/// Marker for the miner's sprite entity
#[derive(Component)]
pub struct PlayerSprite;

/// Spawns the miner entity, fresh or restored from a save
pub fn spawn_player(commands: &mut Commands, player: Player) {
    let translation = pixel_to_world(player.pos + Vec2::splat(TILE_SIZE / 2.0), LAYER_Z_PLAYER);
    commands.spawn((
        player,
        PlayerSprite,
        Sprite {
            color: Color::srgb(0.90, 0.75, 0.20),
            custom_size: Some(Vec2::splat(TILE_SIZE * 0.8)),
            ..default()
        },
        Transform::from_translation(translation),
    ));
}
