use bevy::prelude::*;

use super::actions::{refuel_price, UpgradeKind};
use super::{StationModal, StationModalBody, StationModalTitle, StationUiState};
use crate::player::constants::TELEPORT_COST;
use crate::player::Player;
use crate::tiles::TileKind;

/// Sets up the station panel UI (hidden until the player docks)
pub fn setup_station_ui(mut commands: Commands) {
    commands
        .spawn((
            StationModal,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                padding: UiRect::bottom(Val::Px(48.0)),
                ..default()
            },
            Visibility::Hidden, // Hidden by default
            ZIndex(1000),
        ))
        .with_children(|parent| {
            // Panel box anchored near the bottom so the station stays visible
            parent
                .spawn((
                    Node {
                        width: Val::Px(440.0),
                        padding: UiRect::all(Val::Px(18.0)),
                        flex_direction: FlexDirection::Column,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.10, 0.10, 0.16, 0.92)),
                    BorderRadius::all(Val::Px(6.0)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        StationModalTitle,
                        Text::new(""),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Node {
                            margin: UiRect::bottom(Val::Px(12.0)),
                            ..default()
                        },
                    ));

                    parent.spawn((
                        StationModalBody,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.85, 0.85)),
                    ));
                });
        });
}

/// Redraws the station panel to match the open station and the
/// player's current funds
pub fn update_station_ui(
    ui_state: Res<StationUiState>,
    player_query: Query<&Player>,
    player_changed: Query<(), Changed<Player>>,
    mut modal_query: Single<&mut Visibility, With<StationModal>>,
    mut title_query: Single<&mut Text, (With<StationModalTitle>, Without<StationModalBody>)>,
    mut body_query: Single<&mut Text, (With<StationModalBody>, Without<StationModalTitle>)>,
) {
    if !ui_state.is_changed() && player_changed.is_empty() {
        return;
    }

    let Some(open) = ui_state.open else {
        **modal_query = Visibility::Hidden;
        return;
    };
    let Ok(player) = player_query.single() else {
        return;
    };

    **modal_query = Visibility::Visible;
    title_query.0 = open.kind.properties().name.to_string();
    body_query.0 = menu_lines(open.kind, player);
}

/// Builds the menu text for one station, with live prices
fn menu_lines(kind: TileKind, player: &Player) -> String {
    let mut lines = String::new();
    match kind {
        TileKind::Shop => {
            for (slot, upgrade) in UpgradeKind::ALL.iter().enumerate() {
                match upgrade.next_price(player) {
                    Some(price) => {
                        lines.push_str(&format!(
                            "{}) {:<12} ${}\n",
                            slot + 1,
                            upgrade.label(),
                            price
                        ));
                    }
                    None => {
                        lines.push_str(&format!(
                            "{}) {:<12} maxed out\n",
                            slot + 1,
                            upgrade.label()
                        ));
                    }
                }
            }
        }
        TileKind::FuelStation => {
            lines.push_str(&format!(
                "Fuel {:.1} / {:.0}\n",
                player.fuel,
                player.max_fuel()
            ));
            let price = refuel_price(player);
            if price == 0 {
                lines.push_str("Tank is full\n");
            } else {
                lines.push_str(&format!("1) Fill tank    ${}\n", price));
            }
        }
        TileKind::SellingPost => {
            lines.push_str(&format!(
                "Cargo {} / {}\n",
                player.cargo.len(),
                player.cargo.capacity()
            ));
            lines.push_str(&format!("1) Sell all     ${}\n", player.cargo.sell_value()));
        }
        TileKind::SaveStation => {
            lines.push_str("1) Save game\n");
        }
        TileKind::Teleporter => {
            lines.push_str("0) Drop beacon here\n");
            if player.waypoints.is_empty() {
                lines.push_str("No beacons placed yet; B drops one anywhere\n");
            } else {
                for (slot, waypoint) in player.waypoints.iter().take(9).enumerate() {
                    lines.push_str(&format!("{}) {}\n", slot + 1, waypoint.name));
                }
                lines.push_str(&format!("\nEach jump costs ${}\n", TELEPORT_COST));
            }
        }
        _ => {}
    }
    lines.push_str("\nEsc) Leave");
    lines
}
