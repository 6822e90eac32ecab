mod actions;
mod systems;
mod ui;

pub use actions::{
    place_waypoint, purchase_upgrade, refuel, refuel_price, sell_cargo, teleport_to, ActionRefused,
    UpgradeKind,
};

use bevy::prelude::*;

use crate::player::player_movement;
use crate::tiles::{GridPos, TileKind};

/// Station panel currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenStation {
    pub kind: TileKind,
    pub cell: GridPos,
}

/// Tracks which station panel is open, if any
#[derive(Resource, Default)]
pub struct StationUiState {
    pub open: Option<OpenStation>,
}

/// Marker component for the station panel root
#[derive(Component)]
pub struct StationModal;

/// Marker component for the station panel title text
#[derive(Component)]
pub struct StationModalTitle;

/// Marker component for the station panel menu text
#[derive(Component)]
pub struct StationModalBody;

/// Plugin for the surface stations: docking, menus and their actions
pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StationUiState>()
            .add_systems(Startup, ui::setup_station_ui)
            .add_systems(
                Update,
                (
                    systems::close_station_on_departure,
                    systems::dispatch_station_arrivals,
                    systems::station_keyboard_actions,
                    systems::drop_beacon,
                    ui::update_station_ui,
                )
                    .chain()
                    .after(player_movement),
            );
    }
}
