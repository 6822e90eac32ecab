use bevy::prelude::*;

use crate::events::TileDestroyed;
use crate::tiles::LAYER_Z_EFFECTS;
use crate::world::pixel_to_world;

/// Seconds a floating text entry stays on screen
const FLOAT_LIFETIME_SECS: f32 = 1.2;

/// Upward drift of floating text in world units per second
const FLOAT_RISE_PER_SEC: f32 = 28.0;

/// Request for a short-lived floating text at a pixel position,
/// such as a sale total or a station charge
#[derive(Message, Debug, Clone)]
pub struct PopupRequest {
    pub text: String,
    pub pixel: Vec2,
    pub color: Color,
}

impl PopupRequest {
    pub fn new(text: String, pixel: Vec2, color: Color) -> Self {
        PopupRequest { text, pixel, color }
    }
}

/// Marker plus lifetime for a floating text entity
#[derive(Component)]
pub struct FloatingText {
    timer: Timer,
}

/// Announces mined minerals above the tile they came from
pub fn popup_mined_minerals(
    mut destroyed: MessageReader<TileDestroyed>,
    mut popups: MessageWriter<PopupRequest>,
) {
    for hit in destroyed.read() {
        let properties = hit.kind.properties();
        if properties.value <= 0 {
            continue;
        }
        popups.write(PopupRequest::new(
            format!("{} +${}", properties.name, properties.value),
            hit.pos.center_pixel(),
            Color::srgb(0.95, 0.85, 0.30),
        ));
    }
}

/// Spawns a floating text entity for each popup request
pub fn spawn_popup_text(mut requests: MessageReader<PopupRequest>, mut commands: Commands) {
    for request in requests.read() {
        commands.spawn((
            FloatingText {
                timer: Timer::from_seconds(FLOAT_LIFETIME_SECS, TimerMode::Once),
            },
            Text2d::new(request.text.clone()),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(request.color),
            Transform::from_translation(pixel_to_world(request.pixel, LAYER_Z_EFFECTS)),
        ));
    }
}

/// Drifts floating text upward while fading it out, despawning
/// entries whose lifetime has run out
pub fn animate_popup_text(
    time: Res<Time>,
    mut commands: Commands,
    mut texts: Query<(Entity, &mut FloatingText, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut floating, mut transform, mut color) in texts.iter_mut() {
        floating.timer.tick(time.delta());
        if floating.timer.finished() {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.y += FLOAT_RISE_PER_SEC * time.delta_secs();
        color.0 = color.0.with_alpha(1.0 - floating.timer.fraction());
    }
}
