//! Power-up lifecycle: Inactive -> Active(time_left) -> Inactive
//!
//! At most one active record per kind; picking up a kind that is already
//! running resets its timer rather than stacking a second one. Double-Score
//! flips the global score multiplier on activation and back on expiry; the
//! other kinds are presence checks read by the movers, collision, and the
//! magnet pass.

use super::events::GameEvent;
use super::state::{ActivePowerUp, GameState, PowerUpKind};
use crate::consts::*;

/// Activate `kind`: reset its timer if already running, otherwise add it
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    let duration = state.config.powerup_duration_ms;
    if let Some(active) = state.active_powerups.iter_mut().find(|a| a.kind == kind) {
        active.time_left_ms = duration;
    } else {
        state.active_powerups.push(ActivePowerUp {
            kind,
            time_left_ms: duration,
        });
    }
    if kind == PowerUpKind::DoubleScore {
        state.score_multiplier = DOUBLE_SCORE_MULT;
    }
}

/// Count down active timers and expire the ones that hit zero
pub fn tick_effects(state: &mut GameState, dt_ms: f32) {
    for active in &mut state.active_powerups {
        active.time_left_ms -= dt_ms;
    }
    let expired: Vec<PowerUpKind> = state
        .active_powerups
        .iter()
        .filter(|a| a.time_left_ms <= 0.0)
        .map(|a| a.kind)
        .collect();
    state.active_powerups.retain(|a| a.time_left_ms > 0.0);

    for kind in expired {
        if kind == PowerUpKind::DoubleScore {
            state.score_multiplier = 1.0;
        }
        state.push_event(GameEvent::PowerUpExpired { kind });
    }
}

/// While Magnet runs, flag every coin inside the capture radius. The flag
/// sticks: a captured coin keeps homing even after the magnet lapses.
pub fn apply_magnet(state: &mut GameState) {
    if !state.has_powerup(PowerUpKind::Magnet) {
        return;
    }
    let center = state.player.rect().center();
    for coin in &mut state.coins {
        if !coin.magnetized && coin.pos.distance(center) <= MAGNET_RADIUS_PX {
            coin.magnetized = true;
        }
    }
}
