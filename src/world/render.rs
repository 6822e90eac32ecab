use super::TileMap;
use crate::events::{TileDestroyed, WorldRebuilt};
use crate::tiles::{GridPos, LAYER_Z_BACKGROUND, LAYER_Z_TILES, TILE_SIZE};
use bevy::prelude::*;
use std::collections::HashMap;

/// Render cache: sprite entity per foreground tile. Kept in lockstep
/// with the store by the systems below so a removed tile can never
/// leave a ghost sprite behind.
#[derive(Resource, Default)]
pub struct RenderedTiles(pub HashMap<GridPos, Entity>);

/// Marker component for foreground tile sprites
#[derive(Component)]
pub struct TileSprite;

/// Marker component for background decoration sprites
#[derive(Component)]
pub struct DecorationSprite;

/// Game space is y-down (depth grows with y); Bevy world space is
/// y-up. This is the single point where the flip happens.
pub fn pixel_to_world(pixel: Vec2, z: f32) -> Vec3 {
    Vec3::new(pixel.x, -pixel.y, z)
}

/// Rebuilds every tile sprite from the store after generation or load
pub fn rebuild_tile_sprites(
    mut commands: Commands,
    mut rebuilt: MessageReader<WorldRebuilt>,
    map: Res<TileMap>,
    mut rendered: ResMut<RenderedTiles>,
    tile_sprites: Query<Entity, With<TileSprite>>,
    decoration_sprites: Query<Entity, With<DecorationSprite>>,
) {
    let mut needs_rebuild = false;
    for _ in rebuilt.read() {
        needs_rebuild = true;
    }
    if !needs_rebuild {
        return;
    }

    for entity in tile_sprites.iter().chain(decoration_sprites.iter()) {
        commands.entity(entity).despawn();
    }
    rendered.0.clear();

    for (pos, color) in map.decorations() {
        commands.spawn((
            DecorationSprite,
            Sprite {
                color: *color,
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(pixel_to_world(
                pos.center_pixel(),
                LAYER_Z_BACKGROUND,
            )),
        ));
    }

    for (pos, kind) in map.iter_tiles() {
        let entity = commands
            .spawn((
                TileSprite,
                Sprite {
                    color: kind.properties().color,
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(pixel_to_world(
                    pos.center_pixel(),
                    LAYER_Z_TILES,
                )),
            ))
            .id();
        rendered.0.insert(pos, entity);
    }

    info!("Rebuilt {} tile sprites ({})", rendered.0.len(), map.stats());
}

/// Despawns sprites for tiles mined this tick, keeping the render
/// cache atomic with the store
pub fn despawn_destroyed_tiles(
    mut commands: Commands,
    mut destroyed: MessageReader<TileDestroyed>,
    mut rendered: ResMut<RenderedTiles>,
) {
    for message in destroyed.read() {
        if let Some(entity) = rendered.0.remove(&message.pos) {
            commands.entity(entity).despawn();
        } else {
            warn!("Destroyed tile at {:?} had no sprite", message.pos);
        }
    }
}
