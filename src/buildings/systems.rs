use bevy::prelude::*;

use super::actions::{
    place_waypoint, purchase_upgrade, refuel, sell_cargo, teleport_to, UpgradeKind,
};
use super::{OpenStation, StationUiState};
use crate::events::TileMoved;
use crate::player::{Player, PlayerState};
use crate::tiles::{TileKind, TILE_SIZE};
use crate::ui::PopupRequest;
use crate::world::{serialization, TileMap};

const COST_COLOR: Color = Color::srgb(0.93, 0.42, 0.35);
const CREDIT_COLOR: Color = Color::srgb(0.42, 0.90, 0.45);
const NOTICE_COLOR: Color = Color::srgb(0.92, 0.92, 0.92);

/// Shop menu slots: number key to upgrade line
const SHOP_KEYS: [(KeyCode, UpgradeKind); 3] = [
    (KeyCode::Digit1, UpgradeKind::FuelTank),
    (KeyCode::Digit2, UpgradeKind::Speed),
    (KeyCode::Digit3, UpgradeKind::CargoBay),
];

/// Teleporter menu slots: number key to stored beacon index
const JUMP_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Opens the matching station panel when the player lands on an
/// interactable cell. Arrivals while another panel is up are ignored.
pub fn dispatch_station_arrivals(
    mut arrivals: MessageReader<TileMoved>,
    map: Res<TileMap>,
    mut ui_state: ResMut<StationUiState>,
) {
    for arrival in arrivals.read() {
        let Some(kind) = map.tile_at(arrival.pos) else {
            continue;
        };
        if !kind.is_interactable() || ui_state.open.is_some() {
            continue;
        }
        ui_state.open = Some(OpenStation {
            kind,
            cell: arrival.pos,
        });
        info!("Docked at the {}", kind.properties().name);
    }
}

/// Closes the open station panel once the player moves off its cell
pub fn close_station_on_departure(
    mut ui_state: ResMut<StationUiState>,
    player_query: Query<&Player>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Some(open) = ui_state.open else {
        return;
    };
    if player.current_cell() != open.cell {
        ui_state.open = None;
    }
}

/// Runs station menu actions off the number keys while a panel is open
pub fn station_keyboard_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut ui_state: ResMut<StationUiState>,
    map: Res<TileMap>,
    mut player_query: Query<&mut Player>,
    mut popups: MessageWriter<PopupRequest>,
) {
    let Some(open) = ui_state.open else {
        return;
    };
    if keyboard.just_pressed(KeyCode::Escape) {
        ui_state.open = None;
        return;
    }
    let Ok(mut player) = player_query.single_mut() else {
        return;
    };
    if player.state == PlayerState::OutOfFuel {
        return;
    }

    let anchor = player.pos + Vec2::splat(TILE_SIZE / 2.0);
    match open.kind {
        TileKind::Shop => {
            for (key, upgrade) in SHOP_KEYS {
                if !keyboard.just_pressed(key) {
                    continue;
                }
                match purchase_upgrade(&mut player, upgrade) {
                    Ok(price) => {
                        info!("Bought {} upgrade for ${}", upgrade.label(), price);
                        popups.write(PopupRequest::new(format!("-${}", price), anchor, COST_COLOR));
                    }
                    Err(refused) => warn!("{} upgrade refused: {}", upgrade.label(), refused),
                }
            }
        }
        TileKind::FuelStation => {
            if keyboard.just_pressed(KeyCode::Digit1) {
                match refuel(&mut player) {
                    Ok(0) => info!("Tank is already full"),
                    Ok(price) => {
                        info!("Refuelled for ${}", price);
                        popups.write(PopupRequest::new(format!("-${}", price), anchor, COST_COLOR));
                    }
                    Err(refused) => warn!("Refuel refused: {}", refused),
                }
            }
        }
        TileKind::SellingPost => {
            if keyboard.just_pressed(KeyCode::Digit1) {
                let (count, value) = sell_cargo(&mut player);
                if count == 0 {
                    info!("Cargo bay is empty, nothing to sell");
                } else {
                    info!("Sold {} minerals for ${}", count, value);
                    popups.write(PopupRequest::new(
                        format!("+${}", value),
                        anchor,
                        CREDIT_COLOR,
                    ));
                }
            }
        }
        TileKind::SaveStation => {
            if keyboard.just_pressed(KeyCode::Digit1) {
                let data = player.to_save_data(map.seed());
                match serialization::save_game(&data, serialization::default_save_path()) {
                    Ok(()) => {
                        info!("Game saved");
                        popups.write(PopupRequest::new("Saved".to_string(), anchor, NOTICE_COLOR));
                    }
                    Err(err) => error!("Save failed: {}", err),
                }
            }
        }
        TileKind::Teleporter => {
            if keyboard.just_pressed(KeyCode::Digit0) {
                let name = place_waypoint(&mut player);
                info!("Placed {}", name);
            }
            for (index, key) in JUMP_KEYS.iter().enumerate() {
                if !keyboard.just_pressed(*key) {
                    continue;
                }
                match teleport_to(&mut player, index) {
                    Ok(cost) => {
                        info!("Teleported to beacon {} for ${}", index + 1, cost);
                        // The player is no longer on the station cell
                        ui_state.open = None;
                        return;
                    }
                    Err(refused) => warn!("Teleport refused: {}", refused),
                }
            }
        }
        _ => {}
    }
}

/// Drops a teleport beacon at the player's feet when 'B' is pressed
pub fn drop_beacon(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<&mut Player>,
    mut popups: MessageWriter<PopupRequest>,
) {
    if !keyboard.just_pressed(KeyCode::KeyB) {
        return;
    }
    let Ok(mut player) = player_query.single_mut() else {
        return;
    };
    if player.state == PlayerState::OutOfFuel {
        return;
    }
    let name = place_waypoint(&mut player);
    info!("Placed {}", name);
    popups.write(PopupRequest::new(
        name,
        player.pos + Vec2::splat(TILE_SIZE / 2.0),
        NOTICE_COLOR,
    ));
}
