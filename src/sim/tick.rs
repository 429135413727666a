//! Ordered subsystem pipeline for one simulation tick
//!
//! `advance` is the single mutation entry point: the scheduler hands it the
//! latched input and a clamped Δt, and the subsystems run in a fixed order
//! so none observes a half-updated frame.

use super::state::{GamePhase, GameState};
use super::{collision, combo, particles, player, powerup, spawn};
use crate::consts::*;
use crate::frame_scale;

/// Demo-mode jump lead, in frames of travel at current speed
const AUTOPILOT_LEAD_FRAMES: f32 = 14.0;
/// Far-hills scroll fraction relative to world speed
const HILLS_PARALLAX: f32 = 0.4;
/// How far past the left edge the smoke emitter wraps around
const EMITTER_WRAP_PX: f32 = 220.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump request latched since the previous tick
    pub jump: bool,
    /// Demo mode - the sim times its own jumps
    pub autopilot: bool,
}

/// Advance the run by one tick of `dt_ms` (already clamped by the caller).
/// No-op once the run has ended.
pub fn advance(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.elapsed_ms += dt_ms as f64;

    if input.jump || (input.autopilot && should_autojump(state)) {
        player::jump(state);
    }

    player::update(state, dt_ms);
    spawn::update_obstacles(state, dt_ms);
    spawn::update_coins(state, dt_ms);
    spawn::update_powerup_items(state, dt_ms);
    powerup::tick_effects(state, dt_ms);
    powerup::apply_magnet(state);
    particles::update_indicators(state, dt_ms);
    scroll_background(state, dt_ms);

    // Collision runs against the fully updated pools; a fatal hit ends the
    // frame here so nothing mutates past the terminal transition
    collision::resolve(state);
    if state.phase == GamePhase::GameOver {
        return;
    }
    combo::check_near_misses(state);
    let now = state.elapsed_ms;
    state.combo.update(now);

    particles::update(state, dt_ms);
    ramp_speed(state, dt_ms);
}

/// Demo-mode jump policy: hop once the nearest obstacle still ahead closes
/// to a speed-scaled window, so faster worlds get earlier takeoffs
fn should_autojump(state: &GameState) -> bool {
    if state.player.jumping {
        return false;
    }
    let player = state.player.rect();
    let nearest = state
        .obstacles
        .iter()
        .filter(|o| o.rect().right() > player.left())
        .map(|o| o.rect().left())
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    match nearest {
        Some(left) => left - player.right() < state.effective_speed() * AUTOPILOT_LEAD_FRAMES,
        None => false,
    }
}

/// Scroll the scenery layers. The ground moves at world speed, the far
/// hills at a parallax fraction; the campfire emitter drifts with the
/// ground and wraps back in from the right once it leaves the screen.
fn scroll_background(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    let speed = state.effective_speed();
    let bg = &mut state.background;
    bg.ground_offset = (bg.ground_offset + speed * ts) % GAME_WIDTH;
    bg.hills_offset = (bg.hills_offset + speed * HILLS_PARALLAX * ts) % GAME_WIDTH;
    bg.smoke_emitter_x -= speed * ts;
    if bg.smoke_emitter_x < -60.0 {
        bg.smoke_emitter_x += GAME_WIDTH + EMITTER_WRAP_PX;
    }
}

/// Monotonic difficulty ramp, capped at the preset's max
fn ramp_speed(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    state.speed = (state.speed + state.config.speed_ramp * ts).min(state.config.max_speed);
}
