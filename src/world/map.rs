use crate::tiles::{GridPos, TileKind, GRID_HEIGHT, GRID_WIDTH};
use bevy::prelude::*;
use std::collections::HashMap;

/// World tile store. Owns the foreground (interactive) layer the
/// simulation queries and the background decoration layer, which is
/// render-only and never consulted by movement or mining.
#[derive(Resource)]
pub struct TileMap {
    /// Foreground tiles by grid position; absent key means empty cell
    tiles: HashMap<GridPos, TileKind>,
    /// Background decoration fills for underground cells (render-only)
    decorations: Vec<(GridPos, Color)>,
    /// Seed the current world was generated from
    seed: u64,
    width: i32,
    height: i32,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "world dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            tiles: HashMap::new(),
            decorations: Vec::new(),
            seed: 0,
            width,
            height,
        }
    }

    /// Tile at a position; out-of-bounds or empty cells are `None`
    pub fn tile_at(&self, pos: GridPos) -> Option<TileKind> {
        self.tiles.get(&pos).copied()
    }

    /// True when the position holds no foreground tile
    pub fn is_empty_cell(&self, pos: GridPos) -> bool {
        !self.tiles.contains_key(&pos)
    }

    /// Place a tile, overwriting whatever was there
    pub fn insert_tile(&mut self, pos: GridPos, kind: TileKind) {
        self.tiles.insert(pos, kind);
    }

    /// Remove and return the tile at a position. Callers that remove a
    /// mined tile must also emit `TileDestroyed` so the render cache
    /// stays in step with the store.
    pub fn remove_tile(&mut self, pos: GridPos) -> Option<TileKind> {
        self.tiles.remove(&pos)
    }

    pub fn push_decoration(&mut self, pos: GridPos, color: Color) {
        self.decorations.push((pos, color));
    }

    pub fn decorations(&self) -> &[(GridPos, Color)] {
        &self.decorations
    }

    /// Clear both layers back to an ungenerated world. Idempotent; a
    /// later `generate` starts from scratch either way.
    pub fn ungenerate(&mut self) {
        self.tiles.clear();
        self.decorations.clear();
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate all foreground tiles (render rebuild)
    pub fn iter_tiles(&self) -> impl Iterator<Item = (GridPos, TileKind)> + '_ {
        self.tiles.iter().map(|(pos, kind)| (*pos, *kind))
    }

    /// Get statistics about the world state
    pub fn stats(&self) -> MapStats {
        MapStats {
            tiles: self.tiles.len(),
            decorations: self.decorations.len(),
            seed: self.seed,
        }
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

/// Statistics about the current world state
#[derive(Debug, Clone)]
pub struct MapStats {
    pub tiles: usize,
    pub decorations: usize,
    pub seed: u64,
}

impl std::fmt::Display for MapStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tiles: {}, Decorations: {}, Seed: {}",
            self.tiles, self.decorations, self.seed
        )
    }
}
