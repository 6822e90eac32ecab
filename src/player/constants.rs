use crate::tiles::{GridPos, GRID_WIDTH, HORIZON_GU};
use bevy::prelude::*;

/// Ticks a direction must be held before a mining move commits
pub const CHARGE_REQ: u32 = 20;

/// Hard cap on banked charge while a key stays held
pub const CHARGE_CAP: u32 = CHARGE_REQ + 1;

/// Base movement speed in pixels per millisecond
pub const DEFAULT_SPEED: f32 = 0.2;

/// Fuel burned per millisecond while a mining move is in progress
pub const MINING_FUEL_PER_MS: f32 = 1.0 / 5100.0;

/// Fuel burned per millisecond for everything else underground
pub const TRAVEL_FUEL_PER_MS: f32 = 1.0 / 7000.0;

/// Fuel only drains below the horizon line, with this much slack in
/// pixels before the drain kicks in
pub const FUEL_TOLERANCE_PX: f32 = 5.0;

/// Flat part of the rescue bill when the tank runs dry
pub const RESCUE_BASE_COST: i64 = 100;

/// Depth-proportional part of the rescue bill, per tile below horizon
pub const RESCUE_COST_PER_TILE: i64 = 2;

/// Seconds for each screen fade of the rescue transition
pub const RESCUE_FADE_SECS: f32 = 0.5;

/// Seconds the screen stays fully obscured mid-rescue
pub const RESCUE_HOLD_SECS: f32 = 1.0;

/// Fuel tank tiers: (capacity, price). Tier 0 is the starting tank.
pub const TANK_TIERS: [(f32, i64); 5] = [
    (10.0, 0),
    (15.0, 150),
    (22.0, 400),
    (32.0, 1000),
    (45.0, 2500),
];

/// Speed upgrade tiers: (multiplier, price). Applies to mining moves.
pub const SPEED_TIERS: [(f32, i64); 4] = [(1.0, 0), (1.2, 200), (1.45, 600), (1.75, 1500)];

/// Cargo bay tiers: (advisory capacity, price)
pub const CARGO_TIERS: [(u32, i64); 4] = [(10, 0), (16, 120), (24, 350), (40, 900)];

/// Price per missing fuel unit at the fuel station
pub const FUEL_PRICE_PER_UNIT: f32 = 3.0;

/// Flat fee per teleporter jump
pub const TELEPORT_COST: i64 = 40;

pub const STARTING_MONEY: i64 = 0;

/// Cell the player starts in and is returned to by a rescue: centered
/// horizontally, one tile above the horizon row
pub fn spawn_cell() -> GridPos {
    GridPos::new(GRID_WIDTH / 2, HORIZON_GU - 1)
}

pub fn spawn_pixel() -> Vec2 {
    spawn_cell().to_pixel()
}
