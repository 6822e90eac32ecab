use super::constants::{
    spawn_pixel, RESCUE_BASE_COST, RESCUE_COST_PER_TILE, RESCUE_FADE_SECS, RESCUE_HOLD_SECS,
};
use super::types::{Direction, Player, PlayerState};
use bevy::prelude::*;
use std::time::Duration;

/// Phases of the out-of-fuel rescue transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescuePhase {
    FadingOut,
    Obscured,
    FadingIn,
}

/// What one rescue tick asks the driving system to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescueTransition {
    None,
    FullyObscured,
    Revealing,
    Finished,
}

/// Clock and guard for the rescue sequence. Movement stays frozen in
/// `OutOfFuel` for as long as this is active.
#[derive(Resource)]
pub struct RescueState {
    active: bool,
    phase: RescuePhase,
    timer: Timer,
}

impl Default for RescueState {
    fn default() -> Self {
        Self {
            active: false,
            phase: RescuePhase::FadingOut,
            timer: Timer::from_seconds(0.0, TimerMode::Once),
        }
    }
}

impl RescueState {
    /// Begin a rescue unless one is already running
    pub fn try_start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.phase = RescuePhase::FadingOut;
        self.timer = Timer::from_seconds(RESCUE_FADE_SECS, TimerMode::Once);
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the transition clock, reporting phase boundaries
    pub fn advance(&mut self, delta: Duration) -> RescueTransition {
        if !self.active {
            return RescueTransition::None;
        }
        self.timer.tick(delta);
        if !self.timer.just_finished() {
            return RescueTransition::None;
        }
        match self.phase {
            RescuePhase::FadingOut => {
                self.phase = RescuePhase::Obscured;
                self.timer = Timer::from_seconds(RESCUE_HOLD_SECS, TimerMode::Once);
                RescueTransition::FullyObscured
            }
            RescuePhase::Obscured => {
                self.phase = RescuePhase::FadingIn;
                self.timer = Timer::from_seconds(RESCUE_FADE_SECS, TimerMode::Once);
                RescueTransition::Revealing
            }
            RescuePhase::FadingIn => {
                self.active = false;
                RescueTransition::Finished
            }
        }
    }

    /// Overlay opacity at the current moment of the transition
    pub fn overlay_alpha(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        match self.phase {
            RescuePhase::FadingOut => self.timer.fraction(),
            RescuePhase::Obscured => 1.0,
            RescuePhase::FadingIn => 1.0 - self.timer.fraction(),
        }
    }
}

/// Bill for a stranding at the given depth
pub fn rescue_cost(depth_tiles: i32) -> i64 {
    RESCUE_BASE_COST + RESCUE_COST_PER_TILE * i64::from(depth_tiles.max(0))
}

/// The obscured-screen part of the rescue: bill by depth, refill the
/// tank, tow back to the surface spawn with default facing. Returns
/// the amount charged; money floors at zero.
pub fn apply_rescue(player: &mut Player) -> i64 {
    let cost = rescue_cost(player.depth_tiles());
    player.money = (player.money - cost).max(0);
    player.fuel = player.max_fuel();
    player.pos = spawn_pixel();
    player.target = player.pos;
    player.facing = Direction::default();
    player.charge = 0;
    player.mining = false;
    player.speed = 0.0;
    cost
}

/// Starts the rescue when the tank runs dry; repeated triggers while
/// one is running are no-ops
pub fn start_rescue(mut rescue: ResMut<RescueState>, player_query: Query<&Player>) {
    let Ok(player) = player_query.single() else {
        return;
    };
    if player.state == PlayerState::OutOfFuel && rescue.try_start() {
        warn!(
            "Out of fuel {} tiles below the horizon, rescue dispatched",
            player.depth_tiles()
        );
    }
}

/// Walks the transition through its phases, applying the rescue at the
/// fully-obscured midpoint and releasing movement at the end
pub fn advance_rescue(
    time: Res<Time>,
    mut rescue: ResMut<RescueState>,
    mut player_query: Query<&mut Player>,
) {
    match rescue.advance(time.delta()) {
        RescueTransition::None | RescueTransition::Revealing => {}
        RescueTransition::FullyObscured => {
            let Ok(mut player) = player_query.single_mut() else {
                return;
            };
            let cost = apply_rescue(&mut player);
            info!("Towed to the surface, billed ${}", cost);
        }
        RescueTransition::Finished => {
            let Ok(mut player) = player_query.single_mut() else {
                return;
            };
            player.state = PlayerState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{HORIZON_PX, TILE_SIZE};

    #[test]
    fn test_rescue_cost_scales_with_depth() {
        assert_eq!(rescue_cost(0), RESCUE_BASE_COST);
        assert_eq!(rescue_cost(10), RESCUE_BASE_COST + 10 * RESCUE_COST_PER_TILE);
        // Stranding above the horizon never discounts the base fee
        assert_eq!(rescue_cost(-3), RESCUE_BASE_COST);
    }

    #[test]
    fn test_apply_rescue_bills_refuels_and_respawns() {
        let mut player = Player::new();
        player.money = 1000;
        player.fuel = -0.02;
        player.pos = Vec2::new(96.0, HORIZON_PX + 10.0 * TILE_SIZE);
        player.facing = Direction::Down;
        player.charge = 7;

        let cost = apply_rescue(&mut player);
        assert_eq!(cost, RESCUE_BASE_COST + 10 * RESCUE_COST_PER_TILE);
        assert_eq!(player.money, 1000 - cost);
        assert_eq!(player.fuel, player.max_fuel());
        assert_eq!(player.pos, spawn_pixel());
        assert_eq!(player.target, player.pos);
        assert_eq!(player.facing, Direction::Right);
        assert_eq!(player.charge, 0);
    }

    #[test]
    fn test_rescue_bill_floors_money_at_zero() {
        let mut player = Player::new();
        player.money = 5;
        player.pos.y = HORIZON_PX + 40.0 * TILE_SIZE;

        apply_rescue(&mut player);
        assert_eq!(player.money, 0);
    }

    #[test]
    fn test_double_trigger_is_a_no_op() {
        let mut rescue = RescueState::default();
        assert!(rescue.try_start());
        assert!(!rescue.try_start());
        assert!(rescue.is_active());
    }

    #[test]
    fn test_transition_walks_all_phases() {
        let mut rescue = RescueState::default();
        assert!(rescue.try_start());

        // Mid-fade: nothing fires yet, overlay partly opaque
        assert_eq!(
            rescue.advance(Duration::from_millis(100)),
            RescueTransition::None
        );
        let alpha = rescue.overlay_alpha();
        assert!(alpha > 0.0 && alpha < 1.0);

        assert_eq!(
            rescue.advance(Duration::from_millis(500)),
            RescueTransition::FullyObscured
        );
        assert_eq!(rescue.overlay_alpha(), 1.0);

        assert_eq!(
            rescue.advance(Duration::from_secs(2)),
            RescueTransition::Revealing
        );
        assert_eq!(
            rescue.advance(Duration::from_millis(100)),
            RescueTransition::None
        );
        assert_eq!(
            rescue.advance(Duration::from_secs(1)),
            RescueTransition::Finished
        );
        assert!(!rescue.is_active());
        assert_eq!(rescue.overlay_alpha(), 0.0);

        // A later stranding can start a fresh sequence
        assert!(rescue.try_start());
    }

    #[test]
    fn test_inactive_rescue_ignores_time() {
        let mut rescue = RescueState::default();
        assert_eq!(
            rescue.advance(Duration::from_secs(10)),
            RescueTransition::None
        );
        assert_eq!(rescue.overlay_alpha(), 0.0);
    }
}
