use std::error::Error;
use std::fmt;

use crate::player::constants::{
    CARGO_TIERS, FUEL_PRICE_PER_UNIT, SPEED_TIERS, TANK_TIERS, TELEPORT_COST,
};
use crate::player::{Player, PlayerState, Waypoint};

/// Upgrade lines sold at the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    FuelTank,
    Speed,
    CargoBay,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::FuelTank,
        UpgradeKind::Speed,
        UpgradeKind::CargoBay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::FuelTank => "Fuel tank",
            UpgradeKind::Speed => "Drive motor",
            UpgradeKind::CargoBay => "Cargo bay",
        }
    }

    fn owned_tier(self, player: &Player) -> u32 {
        match self {
            UpgradeKind::FuelTank => player.tank_tier,
            UpgradeKind::Speed => player.speed_tier,
            UpgradeKind::CargoBay => player.cargo.tier,
        }
    }

    fn tier_count(self) -> u32 {
        match self {
            UpgradeKind::FuelTank => TANK_TIERS.len() as u32,
            UpgradeKind::Speed => SPEED_TIERS.len() as u32,
            UpgradeKind::CargoBay => CARGO_TIERS.len() as u32,
        }
    }

    /// Price of the next tier, or None when this line is already maxed out
    pub fn next_price(self, player: &Player) -> Option<i64> {
        let next = self.owned_tier(player) + 1;
        if next >= self.tier_count() {
            return None;
        }
        let price = match self {
            UpgradeKind::FuelTank => TANK_TIERS[next as usize].1,
            UpgradeKind::Speed => SPEED_TIERS[next as usize].1,
            UpgradeKind::CargoBay => CARGO_TIERS[next as usize].1,
        };
        Some(price)
    }
}

/// Why a station turned down an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRefused {
    InsufficientFunds { price: i64, money: i64 },
    AlreadyMaxed,
    UnknownWaypoint,
}

impl fmt::Display for ActionRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRefused::InsufficientFunds { price, money } => {
                write!(f, "costs ${} but only ${} on hand", price, money)
            }
            ActionRefused::AlreadyMaxed => write!(f, "already at the top tier"),
            ActionRefused::UnknownWaypoint => write!(f, "no beacon in that slot"),
        }
    }
}

impl Error for ActionRefused {}

/// Buys the next tier of an upgrade line and charges the player.
/// Leaves the player untouched when the line is maxed out or the
/// price exceeds the money on hand.
pub fn purchase_upgrade(player: &mut Player, upgrade: UpgradeKind) -> Result<i64, ActionRefused> {
    let Some(price) = upgrade.next_price(player) else {
        return Err(ActionRefused::AlreadyMaxed);
    };
    if player.money < price {
        return Err(ActionRefused::InsufficientFunds {
            price,
            money: player.money,
        });
    }
    player.money -= price;
    match upgrade {
        UpgradeKind::FuelTank => player.tank_tier += 1,
        UpgradeKind::Speed => player.speed_tier += 1,
        UpgradeKind::CargoBay => player.cargo.tier += 1,
    }
    Ok(price)
}

/// Price of topping the tank up from its current level. A tank in
/// deficit after running dry costs correspondingly more to fill.
pub fn refuel_price(player: &Player) -> i64 {
    let missing = (player.max_fuel() - player.fuel).max(0.0);
    (missing * FUEL_PRICE_PER_UNIT).ceil() as i64
}

/// Fills the tank to capacity for the posted price, all or nothing.
/// A full tank is a free no-op.
pub fn refuel(player: &mut Player) -> Result<i64, ActionRefused> {
    let price = refuel_price(player);
    if price == 0 {
        return Ok(0);
    }
    if player.money < price {
        return Err(ActionRefused::InsufficientFunds {
            price,
            money: player.money,
        });
    }
    player.money -= price;
    player.fuel = player.max_fuel();
    Ok(price)
}

/// Sells everything in the cargo bay at list value. Returns the number
/// of minerals sold and the total credited.
pub fn sell_cargo(player: &mut Player) -> (usize, i64) {
    let value = player.cargo.sell_value();
    let sold = player.cargo.take_all();
    player.money += value;
    (sold.len(), value)
}

/// Drops a named beacon at the player's current cell and returns its name.
pub fn place_waypoint(player: &mut Player) -> String {
    let cell = player.current_cell();
    let name = format!(
        "Beacon {} ({}m)",
        player.waypoints.len() + 1,
        player.depth_tiles()
    );
    player.waypoints.push(Waypoint {
        name: name.clone(),
        pos: cell,
    });
    name
}

/// Jumps the player to a stored beacon for a flat fee. The jump is
/// instant, so any move in progress is cancelled.
pub fn teleport_to(player: &mut Player, index: usize) -> Result<i64, ActionRefused> {
    let Some(destination) = player.waypoints.get(index).map(|waypoint| waypoint.pos) else {
        return Err(ActionRefused::UnknownWaypoint);
    };
    if player.money < TELEPORT_COST {
        return Err(ActionRefused::InsufficientFunds {
            price: TELEPORT_COST,
            money: player.money,
        });
    }
    player.money -= TELEPORT_COST;
    let pixel = destination.to_pixel();
    player.pos = pixel;
    player.target = pixel;
    player.state = PlayerState::Idle;
    player.mining = false;
    player.speed = 0.0;
    player.charge = 0;
    Ok(TELEPORT_COST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{GridPos, TileKind};

    fn player_with_money(money: i64) -> Player {
        let mut player = Player::new();
        player.money = money;
        player
    }

    #[test]
    fn test_upgrade_charges_and_bumps_tier() {
        let mut player = player_with_money(150);

        let price = purchase_upgrade(&mut player, UpgradeKind::FuelTank).unwrap();

        assert_eq!(price, 150);
        assert_eq!(player.tank_tier, 1);
        assert_eq!(player.money, 0);
        assert_eq!(player.max_fuel(), 15.0);
    }

    #[test]
    fn test_upgrade_refused_without_funds() {
        let mut player = player_with_money(149);

        let refused = purchase_upgrade(&mut player, UpgradeKind::FuelTank).unwrap_err();

        assert_eq!(
            refused,
            ActionRefused::InsufficientFunds {
                price: 150,
                money: 149
            }
        );
        assert_eq!(player.tank_tier, 0);
        assert_eq!(player.money, 149);
    }

    #[test]
    fn test_upgrade_refused_at_top_tier() {
        let mut player = player_with_money(100_000);

        while purchase_upgrade(&mut player, UpgradeKind::Speed).is_ok() {}

        assert_eq!(player.speed_tier, SPEED_TIERS.len() as u32 - 1);
        assert_eq!(
            purchase_upgrade(&mut player, UpgradeKind::Speed),
            Err(ActionRefused::AlreadyMaxed)
        );
        assert_eq!(player.speed_multiplier(), 1.75);
    }

    #[test]
    fn test_cargo_upgrade_raises_capacity() {
        let mut player = player_with_money(120);

        purchase_upgrade(&mut player, UpgradeKind::CargoBay).unwrap();

        assert_eq!(player.cargo.tier, 1);
        assert_eq!(player.cargo.capacity(), 16);
    }

    #[test]
    fn test_refuel_covers_the_deficit() {
        let mut player = player_with_money(500);
        player.fuel = -2.0;

        let price = refuel(&mut player).unwrap();

        // 12 missing units at $3 each
        assert_eq!(price, 36);
        assert_eq!(player.fuel, player.max_fuel());
        assert_eq!(player.money, 464);
    }

    #[test]
    fn test_refuel_full_tank_is_free_noop() {
        let mut player = player_with_money(10);
        player.fuel = player.max_fuel();

        assert_eq!(refuel(&mut player), Ok(0));
        assert_eq!(player.money, 10);
    }

    #[test]
    fn test_refuel_is_all_or_nothing() {
        let mut player = player_with_money(5);
        player.fuel = 1.0;

        let refused = refuel(&mut player).unwrap_err();

        assert_eq!(
            refused,
            ActionRefused::InsufficientFunds { price: 27, money: 5 }
        );
        assert_eq!(player.fuel, 1.0);
        assert_eq!(player.money, 5);
    }

    #[test]
    fn test_sell_cargo_credits_and_empties() {
        let mut player = player_with_money(0);
        player.cargo.add(TileKind::Coal);
        player.cargo.add(TileKind::Coal);
        player.cargo.add(TileKind::Dirt);

        let (count, value) = sell_cargo(&mut player);

        assert_eq!(count, 3);
        assert_eq!(value, 62);
        assert_eq!(player.money, 62);
        assert!(player.cargo.is_empty());
    }

    #[test]
    fn test_sell_empty_cargo_credits_nothing() {
        let mut player = player_with_money(7);

        assert_eq!(sell_cargo(&mut player), (0, 0));
        assert_eq!(player.money, 7);
    }

    #[test]
    fn test_waypoint_names_count_up() {
        let mut player = Player::new();

        let first = place_waypoint(&mut player);
        let second = place_waypoint(&mut player);

        assert_eq!(first, "Beacon 1 (0m)");
        assert_eq!(second, "Beacon 2 (0m)");
        assert_eq!(player.waypoints.len(), 2);
        assert_eq!(player.waypoints[0].pos, player.current_cell());
    }

    #[test]
    fn test_teleport_moves_and_charges() {
        let mut player = player_with_money(100);
        player.waypoints.push(Waypoint {
            name: "Beacon 1 (30m)".to_string(),
            pos: GridPos::new(5, 38),
        });

        let cost = teleport_to(&mut player, 0).unwrap();

        assert_eq!(cost, TELEPORT_COST);
        assert_eq!(player.money, 60);
        assert_eq!(player.pos, GridPos::new(5, 38).to_pixel());
        assert_eq!(player.target, player.pos);
        assert_eq!(player.state, PlayerState::Idle);
    }

    #[test]
    fn test_teleport_refused_without_funds_or_beacon() {
        let mut player = player_with_money(39);

        assert_eq!(
            teleport_to(&mut player, 0),
            Err(ActionRefused::UnknownWaypoint)
        );

        player.waypoints.push(Waypoint {
            name: "Beacon 1 (0m)".to_string(),
            pos: GridPos::new(3, 7),
        });
        let before = player.pos;

        assert_eq!(
            teleport_to(&mut player, 0),
            Err(ActionRefused::InsufficientFunds {
                price: TELEPORT_COST,
                money: 39
            })
        );
        assert_eq!(player.pos, before);
        assert_eq!(player.money, 39);
    }
}
