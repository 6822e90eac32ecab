use bevy::{input::mouse::MouseWheel, prelude::*};

mod buildings;
mod events;
mod player;
mod tiles;
mod ui;
mod world;

use buildings::BuildingsPlugin;
use events::{TileDestroyed, TileMoved, WorldRebuilt};
use player::{Player, PlayerPlugin, PlayerSprite};
use ui::UiPlugin;
use world::{render, serialization, RenderedTiles, TileMap};

// Camera zoom configuration
const ZOOM_MIN: f32 = 0.5; // Max zoom in (smaller = more zoomed in)
const ZOOM_MAX: f32 = 2.5; // Max zoom out (larger = more zoomed out)
const ZOOM_SPEED: f32 = 0.1; // Zoom change per input

/// Sky color shown above the horizon
const SKY_COLOR: Color = Color::srgb(0.36, 0.58, 0.89);

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .insert_resource(ClearColor(SKY_COLOR))
        .init_resource::<TileMap>()
        .init_resource::<RenderedTiles>()
        .add_message::<TileMoved>()
        .add_message::<TileDestroyed>()
        .add_message::<WorldRebuilt>()
        .add_plugins((PlayerPlugin, BuildingsPlugin, UiPlugin))
        .add_systems(Startup, (setup_camera, setup_session))
        .add_systems(
            Update,
            (
                render::despawn_destroyed_tiles.after(player::player_movement),
                render::rebuild_tile_sprites.after(render::despawn_destroyed_tiles),
                camera_follow_player,
                zoom_camera,
            ),
        )
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 999.0)));
}

/// Restores the saved game if one exists, otherwise seeds a fresh world
fn setup_session(
    mut commands: Commands,
    mut map: ResMut<TileMap>,
    mut rebuilt: MessageWriter<WorldRebuilt>,
) {
    let path = serialization::default_save_path();
    let player = if serialization::save_exists(&path) {
        match serialization::load_game(&path) {
            Ok(data) => {
                info!("Resuming saved game from {}", path.display());
                world::generate(&mut map, data.seed);
                Player::from_save_data(&data)
            }
            Err(err) => {
                warn!("Save file unreadable ({}), starting a fresh game", err);
                start_fresh(&mut map)
            }
        }
    } else {
        start_fresh(&mut map)
    };

    player::spawn_player(&mut commands, player);
    rebuilt.write(WorldRebuilt);
}

fn start_fresh(map: &mut TileMap) -> Player {
    let seed: u64 = rand::random();
    info!("Starting a fresh game with seed {}", seed);
    world::generate(map, seed);
    Player::new()
}

/// Keeps the camera centered on the miner
fn camera_follow_player(
    player_query: Query<&Transform, With<PlayerSprite>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<PlayerSprite>)>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    camera_transform.translation.x = player_transform.translation.x;
    camera_transform.translation.y = player_transform.translation.y;
}

/// Camera zoom system - supports scroll wheel and keyboard (- and = keys)
fn zoom_camera(
    mut scroll_events: MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<&mut Projection, With<Camera2d>>,
) {
    if let Ok(mut projection) = camera_query.single_mut() {
        let mut zoom_delta = 0.0;

        // Handle scroll wheel input
        for event in scroll_events.read() {
            zoom_delta -= event.y * ZOOM_SPEED;
        }

        // Handle keyboard input (- to zoom out, = to zoom in)
        if keyboard.just_pressed(KeyCode::Minus) {
            zoom_delta += ZOOM_SPEED;
        }
        if keyboard.just_pressed(KeyCode::Equal) {
            zoom_delta -= ZOOM_SPEED;
        }

        // Apply zoom delta and clamp to bounds
        if zoom_delta != 0.0 {
            if let Projection::Orthographic(ref mut ortho) = projection.as_mut() {
                ortho.scale = (ortho.scale + zoom_delta).clamp(ZOOM_MIN, ZOOM_MAX);
            }
        }
    }
}
