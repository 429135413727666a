//! Entity spawning and horizontal scroll
//!
//! One accumulator timer per pool. Each frame the accumulator grows by the
//! raw tick Δt; crossing its randomized bound appends an entity just past
//! the right edge and re-rolls the bound. Obstacle gaps shrink as the world
//! speeds up, bounded below so runs stay survivable.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{Coin, GameState, Obstacle, ObstacleKind, PowerUpItem, PowerUpKind};
use crate::consts::*;
use crate::frame_scale;

/// Accumulator timers driving spawn cadence
#[derive(Debug, Clone)]
pub struct SpawnTimers {
    pub obstacle_elapsed_ms: f64,
    pub next_obstacle_ms: f64,
    pub coin_elapsed_ms: f64,
    pub next_coin_ms: f64,
    /// Sim-time of the last power-up spawn, for the cooldown gate
    pub last_powerup_ms: Option<f64>,
}

impl SpawnTimers {
    pub fn new(first_obstacle_ms: f64, first_coin_ms: f64) -> Self {
        Self {
            obstacle_elapsed_ms: 0.0,
            next_obstacle_ms: first_obstacle_ms,
            coin_elapsed_ms: 0.0,
            next_coin_ms: first_coin_ms,
            last_powerup_ms: None,
        }
    }
}

/// Scroll obstacles left, credit the ones that exit, spawn new ones on
/// cadence. Every exit also rolls the power-up spawn chance.
pub fn update_obstacles(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    let speed = state.effective_speed();

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed * ts;
    }

    let mut exited: Vec<u32> = Vec::new();
    state.obstacles.retain(|o| {
        if o.off_screen() {
            exited.push(o.id);
            false
        } else {
            true
        }
    });
    for id in exited {
        let gained = (PASS_SCORE as f32 * state.score_multiplier).floor() as u64;
        state.score += gained;
        state.near_miss.forget(id);
        state.push_event(GameEvent::ObstaclePassed { score: gained });
        maybe_spawn_powerup(state);
    }

    state.spawn.obstacle_elapsed_ms += dt_ms as f64;
    if state.spawn.obstacle_elapsed_ms >= state.spawn.next_obstacle_ms {
        spawn_obstacle(state);
        state.spawn.obstacle_elapsed_ms = 0.0;
        state.spawn.next_obstacle_ms = roll_obstacle_interval(state);
    }
}

fn spawn_obstacle(state: &mut GameState) {
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let size = kind.size();
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(GAME_WIDTH, GROUND_Y - size.y),
        kind,
    });
}

/// Next obstacle gap: a uniform roll scaled down as the world outpaces its
/// base speed, never below the survivable minimum.
fn roll_obstacle_interval(state: &mut GameState) -> f64 {
    let min = state.config.obstacle_interval_min_ms;
    let max = state.config.obstacle_interval_max_ms;
    let base = state.rng.random_range(min..max);
    let pace = (state.config.base_speed / state.effective_speed()) as f64;
    (base * pace.clamp(0.4, 1.0)).max(state.config.min_obstacle_gap_ms)
}

/// Chance roll for a power-up, made once per obstacle exit. Both gates must
/// pass: the cooldown since the previous spawn, then the probability draw.
fn maybe_spawn_powerup(state: &mut GameState) {
    let cooldown_over = match state.spawn.last_powerup_ms {
        Some(last) => state.elapsed_ms - last >= state.config.powerup_cooldown_ms,
        None => true,
    };
    if !cooldown_over {
        return;
    }
    let chance = state.config.powerup_chance;
    if !state.rng.random_bool(chance) {
        return;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let y = GROUND_Y - state.rng.random_range(60.0..130.0);
    let id = state.next_entity_id();
    state.powerups.push(PowerUpItem {
        id,
        pos: Vec2::new(GAME_WIDTH + POWERUP_SIZE, y),
        rot: 0.0,
        kind,
    });
    state.spawn.last_powerup_ms = Some(state.elapsed_ms);
    log::debug!(
        "power-up {} spawned at t={:.0}ms",
        kind.as_str(),
        state.elapsed_ms
    );
    state.push_event(GameEvent::PowerUpSpawned { kind });
}

/// Scroll coins (or pull magnetized ones toward the player), cull the ones
/// that exit, spawn new ones on cadence.
pub fn update_coins(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    let speed = state.effective_speed();
    let target = state.player.rect().center();

    for coin in &mut state.coins {
        if coin.magnetized {
            // Exponential ease toward the player, stable across tick sizes
            let t = 1.0 - (1.0 - MAGNET_EASE).powf(ts);
            coin.pos += (target - coin.pos) * t;
        } else {
            coin.pos.x -= speed * ts;
        }
        coin.rot += 0.15 * ts;
    }
    state
        .coins
        .retain(|c| c.pos.x > -COIN_SIZE * OFFSCREEN_CULL_FACTOR);

    state.spawn.coin_elapsed_ms += dt_ms as f64;
    if state.spawn.coin_elapsed_ms >= state.spawn.next_coin_ms {
        spawn_coin(state);
        state.spawn.coin_elapsed_ms = 0.0;
        let min = state.config.coin_interval_min_ms;
        let max = state.config.coin_interval_max_ms;
        state.spawn.next_coin_ms = state.rng.random_range(min..max);
    }
}

fn spawn_coin(state: &mut GameState) {
    // Anywhere in the reachable band above the ground line
    let y = GROUND_Y - state.rng.random_range(30.0..150.0);
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos: Vec2::new(GAME_WIDTH + COIN_SIZE, y),
        rot: 0.0,
        magnetized: false,
    });
}

/// Scroll uncollected power-up items left and cull the ones that exit
pub fn update_powerup_items(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    let speed = state.effective_speed();
    for item in &mut state.powerups {
        item.pos.x -= speed * ts;
        item.rot += 0.08 * ts;
    }
    state
        .powerups
        .retain(|p| p.pos.x > -POWERUP_SIZE * OFFSCREEN_CULL_FACTOR);
}
