use super::constants::{
    CHARGE_CAP, CHARGE_REQ, DEFAULT_SPEED, MINING_FUEL_PER_MS, TRAVEL_FUEL_PER_MS,
};
use super::types::{Direction, HeldDirections, Player, PlayerState};
use crate::events::{TileDestroyed, TileMoved};
use crate::tiles::{
    GridPos, TileKind, GRID_HEIGHT, GRID_WIDTH, HORIZON_GU, LAYER_Z_PLAYER, TILE_SIZE,
};
use crate::world::{pixel_to_world, TileMap};
use bevy::prelude::*;

/// Per-tick input to the movement state machine. Injected rather than
/// read from globals so tests can drive the sim headless.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub delta_ms: f32,
    pub held: HeldDirections,
}

/// Tile events produced by one tick; the driving system forwards them
/// as messages
#[derive(Debug, Default)]
pub struct TickEvents {
    pub moved: Vec<GridPos>,
    pub destroyed: Vec<(GridPos, TileKind)>,
}

/// One simulation tick of the miner.
///
/// Order matters: the fuel gate runs before any movement processing,
/// then input resolution and the charge gate, then motion, then fuel
/// drain for the elapsed time.
pub fn tick(player: &mut Player, map: &mut TileMap, input: TickInput, events: &mut TickEvents) {
    if player.fuel <= 0.0 && player.state != PlayerState::OutOfFuel {
        player.state = PlayerState::OutOfFuel;
        return;
    }
    if player.state == PlayerState::OutOfFuel {
        // Frozen until the rescue sequence releases the state
        return;
    }

    if player.state != PlayerState::Moving {
        match Direction::resolve(input.held) {
            None => {
                player.charge = 0;
                player.state = PlayerState::Idle;
            }
            Some(direction) => {
                player.facing = direction;
                player.state = PlayerState::Charging;
                player.charge = (player.charge + 1).min(CHARGE_CAP);

                let current = player.current_cell();
                let (dx, dy) = direction.offset();
                let candidate = clamp_to_borders(current.translated(dx, dy));
                // A target clamped back onto the current cell is a
                // border push and never commits
                if candidate != current {
                    let destination = map.tile_at(candidate);
                    let mineable = destination.is_some_and(|kind| kind.is_mineable());
                    if player.charge > CHARGE_REQ || !mineable {
                        player.state = PlayerState::Moving;
                        player.target = candidate.to_pixel();
                        player.mining = mineable;
                        player.speed = move_speed(destination, player.speed_multiplier());
                    }
                }
            }
        }
    }

    // Captured before motion so the arriving tick still pays the
    // mining rate for its whole delta
    let mining_move = player.state == PlayerState::Moving && player.mining;

    if player.state == PlayerState::Moving {
        advance_move(player, map, events, input.delta_ms);
    }

    if player.below_fuel_line() {
        let rate = if mining_move {
            MINING_FUEL_PER_MS
        } else {
            TRAVEL_FUEL_PER_MS
        };
        player.fuel -= rate * input.delta_ms;
    }
}

/// Advance toward the target along the one differing axis, snapping
/// exactly onto it on arrival
fn advance_move(player: &mut Player, map: &mut TileMap, events: &mut TickEvents, delta_ms: f32) {
    let step = player.speed * delta_ms;
    player.pos.x = move_toward(player.pos.x, player.target.x, step);
    player.pos.y = move_toward(player.pos.y, player.target.y, step);

    if player.pos == player.target {
        let cell = GridPos::from_pixel(player.pos);
        player.state = PlayerState::Idle;
        player.mining = false;
        player.speed = 0.0;

        if let Some(kind) = map.tile_at(cell) {
            if kind.is_mineable() {
                map.remove_tile(cell);
                player.cargo.add(kind);
                events.destroyed.push((cell, kind));
            }
        }
        events.moved.push(cell);
    }
}

fn move_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step * delta.signum()
    }
}

/// Speed of a committed move. Mining scales with tile thickness and
/// the speed upgrade; empty cells and stations travel at base speed
/// with the multiplier deliberately left out.
fn move_speed(destination: Option<TileKind>, multiplier: f32) -> f32 {
    match destination {
        Some(kind) if kind.is_mineable() => {
            (kind.properties().thickness / 100.0) * DEFAULT_SPEED * multiplier
        }
        _ => DEFAULT_SPEED,
    }
}

/// World borders: the top bound sits one tile above the horizon row,
/// the others are the grid edges
fn clamp_to_borders(cell: GridPos) -> GridPos {
    GridPos::new(
        cell.x.clamp(0, GRID_WIDTH - 1),
        cell.y.clamp(HORIZON_GU - 1, GRID_HEIGHT - 1),
    )
}

/// Drives the state machine from keyboard and clock, forwarding tile
/// events to the message channel
pub fn player_movement(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut map: ResMut<TileMap>,
    mut player_query: Query<&mut Player>,
    mut moved: MessageWriter<TileMoved>,
    mut destroyed: MessageWriter<TileDestroyed>,
) {
    let Ok(mut player) = player_query.single_mut() else {
        return;
    };

    let input = TickInput {
        delta_ms: time.delta_secs() * 1000.0,
        held: HeldDirections::from_keyboard(&keyboard),
    };
    let mut events = TickEvents::default();
    tick(&mut player, &mut map, input, &mut events);

    for (pos, kind) in events.destroyed.drain(..) {
        destroyed.write(TileDestroyed { pos, kind });
    }
    for pos in events.moved.drain(..) {
        moved.write(TileMoved { pos });
    }
}

/// Mirrors the sim position into the render transform
pub fn sync_player_transform(mut query: Query<(&Player, &mut Transform), Changed<Player>>) {
    for (player, mut transform) in &mut query {
        transform.translation =
            pixel_to_world(player.pos + Vec2::splat(TILE_SIZE / 2.0), LAYER_Z_PLAYER);
    }
}
