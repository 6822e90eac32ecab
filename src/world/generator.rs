use crate::tiles::{
    GridPos, TileKind, FUEL_STATION_COLUMN, HORIZON_GU, ORE_CHANCE, ORE_ROWS, SAVE_STATION_COLUMN,
    SELLING_POST_COLUMN, SHOP_COLUMN, TELEPORTER_COLUMN,
};
use crate::world::TileMap;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The five surface stations and the horizon-row column each occupies
pub const STATION_COLUMNS: [(i32, TileKind); 5] = [
    (SHOP_COLUMN, TileKind::Shop),
    (SAVE_STATION_COLUMN, TileKind::SaveStation),
    (SELLING_POST_COLUMN, TileKind::SellingPost),
    (FUEL_STATION_COLUMN, TileKind::FuelStation),
    (TELEPORTER_COLUMN, TileKind::Teleporter),
];

/// Generate the world from a seed. Clears any previous content first,
/// so regenerating an already-populated map starts from scratch.
///
/// Layout: a flat horizon row holding one column per station kind and
/// grass everywhere else, dirt from there down to the bottom of the
/// grid, and coal scattered through the ore band (the first `ORE_ROWS`
/// underground rows) by an independent 7.5% trial per cell. Cells are
/// visited left-to-right, top-to-bottom; a later placement at the same
/// coordinate overwrites an earlier one, which is how coal replaces
/// dirt. The same seed always produces the same foreground layer.
pub fn generate(map: &mut TileMap, seed: u64) {
    map.ungenerate();
    map.set_seed(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    // Horizon row: stations at their columns, grass elsewhere
    for x in 0..map.width() {
        let kind = station_at(x).unwrap_or(TileKind::Grass);
        map.insert_tile(GridPos::new(x, HORIZON_GU), kind);
    }

    // Underground: dirt everywhere, coal trials inside the ore band
    let ore_band_end = HORIZON_GU + ORE_ROWS;
    for y in (HORIZON_GU + 1)..map.height() {
        for x in 0..map.width() {
            let pos = GridPos::new(x, y);
            map.insert_tile(pos, TileKind::Dirt);
            if y <= ore_band_end && rng.random_bool(ORE_CHANCE) {
                map.insert_tile(pos, TileKind::Coal);
            }
        }
    }

    // Background cave fill behind the diggable rows (render-only)
    for y in (HORIZON_GU + 1)..map.height() {
        for x in 0..map.width() {
            map.push_decoration(GridPos::new(x, y), cave_color(&mut rng));
        }
    }

    info!("Generated world ({})", map.stats());
}

/// Station kind occupying a horizon-row column, if any
fn station_at(x: i32) -> Option<TileKind> {
    STATION_COLUMNS
        .iter()
        .find(|(column, _)| *column == x)
        .map(|(_, kind)| *kind)
}

/// Dark backdrop with a little per-cell jitter so tunnels read as caves
fn cave_color(rng: &mut StdRng) -> Color {
    let jitter = rng.random_range(-0.02..0.02);
    Color::srgb(0.20 + jitter, 0.14 + jitter, 0.10 + jitter)
}
