mod effects;
mod fade;
mod hud;

pub use effects::PopupRequest;

use bevy::prelude::*;

use crate::player::player_movement;

/// Plugin for the HUD, floating text and the rescue fade overlay
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PopupRequest>()
            .add_systems(Startup, (hud::setup_hud, fade::setup_fade_overlay))
            .add_systems(
                Update,
                (
                    hud::update_hud,
                    fade::update_fade_overlay,
                    effects::popup_mined_minerals,
                    effects::spawn_popup_text,
                    effects::animate_popup_text,
                )
                    .chain()
                    .after(player_movement),
            );
    }
}
