use super::constants::{
    CARGO_TIERS, SPEED_TIERS, STARTING_MONEY, TANK_TIERS, FUEL_TOLERANCE_PX,
};
use crate::tiles::{GridPos, TileKind, HORIZON_PX, TILE_SIZE};
use crate::world::SaveData;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement phases of the miner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Charging,
    Moving,
    OutOfFuel,
}

/// Cardinal movement directions. `Up` decreases grid y (toward the
/// sky); `Down` digs deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Grid offset of a single step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Resolve held keys to one direction with fixed priority:
    /// up, down, left, right. Opposite keys held together always pick
    /// the same winner.
    pub fn resolve(held: HeldDirections) -> Option<Direction> {
        if held.up {
            Some(Direction::Up)
        } else if held.down {
            Some(Direction::Down)
        } else if held.left {
            Some(Direction::Left)
        } else if held.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Snapshot of the direction keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub const NONE: HeldDirections = HeldDirections {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Read the primary and alternate bindings (WASD and arrows)
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            up: keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp),
            down: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
            left: keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft),
            right: keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight),
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Mined tiles riding along with the player. Capacity is advisory:
/// `add` never rejects, the HUD just shows the overflow.
#[derive(Debug, Clone, Default)]
pub struct Cargo {
    items: Vec<TileKind>,
    pub tier: u32,
}

impl Cargo {
    pub fn new(tier: u32) -> Self {
        Self {
            items: Vec::new(),
            tier: tier.min(CARGO_TIERS.len() as u32 - 1),
        }
    }

    pub fn with_items(items: Vec<TileKind>, tier: u32) -> Self {
        let mut cargo = Self::new(tier);
        cargo.items = items;
        cargo
    }

    pub fn add(&mut self, kind: TileKind) {
        self.items.push(kind);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> u32 {
        CARGO_TIERS[self.tier as usize].0
    }

    pub fn is_full(&self) -> bool {
        self.items.len() as u32 >= self.capacity()
    }

    pub fn items(&self) -> &[TileKind] {
        &self.items
    }

    /// Total sale price of everything on board
    pub fn sell_value(&self) -> i64 {
        self.items.iter().map(|kind| kind.properties().value).sum()
    }

    /// Empty the bay, returning what was carried
    pub fn take_all(&mut self) -> Vec<TileKind> {
        std::mem::take(&mut self.items)
    }
}

/// Named teleporter destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub pos: GridPos,
}

/// The miner. One entity carries the whole simulation state; position
/// is continuous game-pixel space (y down), top-left anchored on the
/// occupied cell whenever the player is at rest.
#[derive(Component, Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub target: Vec2,
    pub state: PlayerState,
    pub facing: Direction,
    pub charge: u32,
    /// Speed of the committed move, pixels per millisecond
    pub speed: f32,
    /// True while the committed move is into a mineable tile
    pub mining: bool,
    pub fuel: f32,
    pub tank_tier: u32,
    pub speed_tier: u32,
    pub money: i64,
    pub cargo: Cargo,
    pub waypoints: Vec<Waypoint>,
}

impl Player {
    pub fn new() -> Self {
        let pos = super::constants::spawn_pixel();
        Self {
            pos,
            target: pos,
            state: PlayerState::Idle,
            facing: Direction::default(),
            charge: 0,
            speed: 0.0,
            mining: false,
            fuel: TANK_TIERS[0].0,
            tank_tier: 0,
            speed_tier: 0,
            money: STARTING_MONEY,
            cargo: Cargo::new(0),
            waypoints: Vec::new(),
        }
    }

    pub fn max_fuel(&self) -> f32 {
        TANK_TIERS[self.tank_tier as usize].0
    }

    pub fn speed_multiplier(&self) -> f32 {
        SPEED_TIERS[self.speed_tier as usize].0
    }

    /// Cell the player currently occupies
    pub fn current_cell(&self) -> GridPos {
        GridPos::from_pixel(self.pos)
    }

    /// Whole tiles below the horizon line, never negative
    pub fn depth_tiles(&self) -> i32 {
        (((self.pos.y - HORIZON_PX) / TILE_SIZE).floor() as i32).max(0)
    }

    /// Fuel drains only here: strictly below the horizon line less the
    /// tolerance band
    pub fn below_fuel_line(&self) -> bool {
        self.pos.y > HORIZON_PX - FUEL_TOLERANCE_PX
    }

    pub fn to_save_data(&self, seed: u64) -> SaveData {
        SaveData {
            money: self.money,
            fuel: self.fuel,
            max_fuel: self.max_fuel(),
            tank_tier: self.tank_tier,
            speed_tier: self.speed_tier,
            cargo_tier: self.cargo.tier,
            position: (self.pos.x, self.pos.y),
            cargo: self.cargo.items().to_vec(),
            seed,
            waypoints: self.waypoints.clone(),
        }
    }

    /// Build a player from a validated save record. All-or-nothing:
    /// callers only reach this with a fully decoded record.
    pub fn from_save_data(data: &SaveData) -> Self {
        let mut player = Self::new();
        player.money = data.money;
        player.tank_tier = data.tank_tier.min(TANK_TIERS.len() as u32 - 1);
        player.speed_tier = data.speed_tier.min(SPEED_TIERS.len() as u32 - 1);
        player.cargo = Cargo::with_items(data.cargo.clone(), data.cargo_tier);
        player.fuel = data.fuel.min(player.max_fuel());
        player.pos = Vec2::new(data.position.0, data.position.1);
        player.target = player.pos;
        player.waypoints = data.waypoints.clone();
        player
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::HORIZON_GU;

    #[test]
    fn test_direction_priority() {
        let all = HeldDirections {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(Direction::resolve(all), Some(Direction::Up));

        let down_right = HeldDirections {
            down: true,
            right: true,
            ..HeldDirections::NONE
        };
        assert_eq!(Direction::resolve(down_right), Some(Direction::Down));

        let left_right = HeldDirections {
            left: true,
            right: true,
            ..HeldDirections::NONE
        };
        assert_eq!(Direction::resolve(left_right), Some(Direction::Left));

        assert_eq!(Direction::resolve(HeldDirections::NONE), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Down.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }

    #[test]
    fn test_cargo_capacity_is_advisory() {
        let mut cargo = Cargo::new(0);
        let capacity = cargo.capacity();
        for _ in 0..capacity + 5 {
            cargo.add(TileKind::Dirt);
        }
        // Nothing is rejected, the bay just reads as full
        assert_eq!(cargo.len() as u32, capacity + 5);
        assert!(cargo.is_full());
    }

    #[test]
    fn test_cargo_sell_value_and_take_all() {
        let mut cargo = Cargo::new(0);
        cargo.add(TileKind::Dirt);
        cargo.add(TileKind::Coal);
        cargo.add(TileKind::Dirt);
        let expected =
            2 * TileKind::Dirt.properties().value + TileKind::Coal.properties().value;
        assert_eq!(cargo.sell_value(), expected);

        let taken = cargo.take_all();
        assert_eq!(taken.len(), 3);
        assert!(cargo.is_empty());
        assert_eq!(cargo.sell_value(), 0);
    }

    #[test]
    fn test_player_spawns_on_surface() {
        let player = Player::new();
        assert_eq!(
            player.current_cell(),
            GridPos::new(crate::tiles::GRID_WIDTH / 2, HORIZON_GU - 1)
        );
        assert_eq!(player.state, PlayerState::Idle);
        assert_eq!(player.fuel, player.max_fuel());
        assert!(!player.below_fuel_line());
    }

    #[test]
    fn test_fuel_line_tolerance_boundary() {
        let mut player = Player::new();
        player.pos.y = HORIZON_PX - FUEL_TOLERANCE_PX;
        assert!(!player.below_fuel_line());
        player.pos.y = HORIZON_PX - FUEL_TOLERANCE_PX + 0.1;
        assert!(player.below_fuel_line());
    }

    #[test]
    fn test_depth_tiles() {
        let mut player = Player::new();
        assert_eq!(player.depth_tiles(), 0);
        player.pos.y = HORIZON_PX + 3.0 * TILE_SIZE;
        assert_eq!(player.depth_tiles(), 3);
        player.pos.y = HORIZON_PX + 3.5 * TILE_SIZE;
        assert_eq!(player.depth_tiles(), 3);
    }

    #[test]
    fn test_save_data_round_trip() {
        let mut player = Player::new();
        player.money = 480;
        player.tank_tier = 2;
        player.speed_tier = 1;
        player.fuel = 12.5;
        player.pos = Vec2::new(100.0, 500.0);
        player.cargo.add(TileKind::Coal);
        player.waypoints.push(Waypoint {
            name: "Shaft A".to_string(),
            pos: GridPos::new(4, 30),
        });

        let data = player.to_save_data(99);
        assert_eq!(data.seed, 99);

        let restored = Player::from_save_data(&data);
        assert_eq!(restored.money, 480);
        assert_eq!(restored.tank_tier, 2);
        assert_eq!(restored.speed_tier, 1);
        assert_eq!(restored.fuel, 12.5);
        assert_eq!(restored.pos, Vec2::new(100.0, 500.0));
        assert_eq!(restored.target, restored.pos);
        assert_eq!(restored.cargo.items(), player.cargo.items());
        assert_eq!(restored.waypoints, player.waypoints);
        assert_eq!(restored.state, PlayerState::Idle);
    }
}
