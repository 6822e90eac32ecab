/// Pixel size of each tile (square)
pub const TILE_SIZE: f32 = 32.0;

/// World width in tiles
pub const GRID_WIDTH: i32 = 40;

/// World height in tiles (depth)
pub const GRID_HEIGHT: i32 = 120;

/// Grid row of the flat horizon. Rows above it are sky, the row itself
/// is the surface (grass + stations), rows below are diggable ground.
pub const HORIZON_GU: i32 = 8;

/// Pixel y of the horizon line in game space (y grows downward)
pub const HORIZON_PX: f32 = HORIZON_GU as f32 * TILE_SIZE;

/// Number of rows in the ore band, starting one row below the horizon
pub const ORE_ROWS: i32 = 21;

/// Per-cell probability that a dirt cell in the ore band carries coal
pub const ORE_CHANCE: f64 = 0.075;

// Surface station columns. Exactly one column per station kind on the
// horizon row; every other surface column is grass.
pub const SHOP_COLUMN: i32 = 6;
pub const SAVE_STATION_COLUMN: i32 = 12;
pub const SELLING_POST_COLUMN: i32 = 18;
pub const FUEL_STATION_COLUMN: i32 = 24;
pub const TELEPORTER_COLUMN: i32 = 30;

// Z-positions for world-space layers
pub const LAYER_Z_BACKGROUND: f32 = 0.0;
pub const LAYER_Z_TILES: f32 = 1.0;
pub const LAYER_Z_PLAYER: f32 = 2.0;
pub const LAYER_Z_EFFECTS: f32 = 3.0;
