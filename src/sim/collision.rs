//! Collision resolution: the player against the three entity pools
//!
//! Pure AABB overlap tests. Obstacles check against the shrunk, forgiving
//! hitbox and stop at the first hit since game-over is terminal; coin and
//! power-up sweeps use the full sprite rect and may consume several per
//! frame.

use glam::Vec2;

use super::events::GameEvent;
use super::particles;
use super::powerup;
use super::state::{GamePhase, GameState, IndicatorLabel, PowerUpKind};
use crate::consts::*;

/// Run the frame's collision pass. May flip the phase to game-over, in
/// which case the pickup sweeps are skipped.
pub fn resolve(state: &mut GameState) {
    resolve_obstacles(state);
    if state.phase == GamePhase::GameOver {
        return;
    }
    resolve_coins(state);
    resolve_powerups(state);
}

fn resolve_obstacles(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    let mut hit: Option<(u32, Vec2)> = None;
    for obstacle in &state.obstacles {
        if hitbox.intersects(&obstacle.rect()) {
            hit = Some((obstacle.id, obstacle.rect().center()));
            break;
        }
    }
    let Some((id, pos)) = hit else {
        return;
    };

    if state.has_powerup(PowerUpKind::Shield) {
        // The shield takes the hit: consume it, wipe the obstacle, pay out
        state
            .active_powerups
            .retain(|a| a.kind != PowerUpKind::Shield);
        let bonus = (SHIELD_SAVE_BONUS as f32 * state.score_multiplier).floor() as u64;
        state.score += bonus;
        state.obstacles.retain(|o| o.id != id);
        state.near_miss.forget(id);
        particles::spawn_indicator(state, pos, IndicatorLabel::Points(bonus));
        state.push_event(GameEvent::ShieldSave { bonus });
    } else {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver {
            score: state.score,
            best_combo: state.combo.best,
            elapsed_ms: state.elapsed_ms,
        });
    }
}

fn resolve_coins(state: &mut GameState) {
    let player = state.player.rect();
    let mut collected: Vec<Vec2> = Vec::new();
    state.coins.retain(|coin| {
        if player.intersects(&coin.rect()) {
            collected.push(coin.pos);
            false
        } else {
            true
        }
    });

    for pos in collected {
        // Combo multiplier deliberately left out of the coin value; the
        // streak itself still grows
        let value = (COIN_VALUE as f32 * state.score_multiplier).floor() as u64;
        state.score += value;
        state.combo.increase(state.elapsed_ms);
        state.player.arm.restart();
        particles::spawn_indicator(state, pos, IndicatorLabel::Points(value));
        state.push_event(GameEvent::CoinCollected {
            value,
            combo: state.combo.count,
        });
    }
}

fn resolve_powerups(state: &mut GameState) {
    let player = state.player.rect();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.powerups.retain(|item| {
        if player.intersects(&item.rect()) {
            collected.push(item.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        powerup::activate(state, kind);
        state.push_event(GameEvent::PowerUpCollected { kind });
    }
}
