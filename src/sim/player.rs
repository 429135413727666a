//! Player physics: jumping, gravity, ground contact
//!
//! Simple per-tick Euler integration in frame-normalized units: velocity
//! gains the preset's gravity per 60 Hz frame, position gains velocity per
//! frame. The ground line is a hard clamp - the player never sinks below it.

use super::events::GameEvent;
use super::particles;
use super::state::GameState;
use crate::consts::*;
use crate::frame_scale;

/// Start a jump. Idempotent while airborne: a second request before landing
/// changes nothing (no double jumps, no mid-air velocity resets).
pub fn jump(state: &mut GameState) {
    if state.player.jumping {
        return;
    }
    state.player.vy = state.config.jump_force;
    state.player.jumping = true;
    state.player.arm.restart();

    let feet = state.player.feet();
    particles::spawn_dust_burst(state, feet, JUMP_DUST_COUNT);
    state.push_event(GameEvent::Jumped);
}

/// Advance vertical physics and the arm animation by one tick
pub fn update(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);
    let gravity = state.config.gravity;

    let mut landed = false;
    {
        let player = &mut state.player;
        if player.jumping {
            player.vy += gravity * ts;
            player.pos.y += player.vy * ts;

            // Touchdown: clamp to the ground line and kill the velocity
            if player.pos.y + player.size.y >= GROUND_Y {
                player.pos.y = GROUND_Y - player.size.y;
                player.vy = 0.0;
                player.jumping = false;
                landed = true;
            }
        }
        player.arm.advance();
    }

    if landed {
        let feet = state.player.feet();
        particles::spawn_dust_burst(state, feet, LAND_DUST_COUNT);
        state.push_event(GameEvent::Landed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;

    fn make_state() -> GameState {
        GameState::new(Config::default(), 42)
    }

    #[test]
    fn test_jump_sets_velocity_once() {
        let mut state = make_state();
        jump(&mut state);
        assert_eq!(state.player.vy, JUMP_FORCE);
        assert!(state.player.jumping);

        // Rise a little, then ask again - must be a no-op
        update(&mut state, FRAME_MS);
        let vy_before = state.player.vy;
        let y_before = state.player.pos.y;
        jump(&mut state);
        assert_eq!(state.player.vy, vy_before);
        assert_eq!(state.player.pos.y, y_before);
    }

    #[test]
    fn test_jump_matches_euler_integration() {
        let mut state = make_state();
        jump(&mut state);

        // Closed form for fixed 16 ms ticks: v_n = J + g*n, y advances by v each tick
        let mut v = JUMP_FORCE;
        let mut y = GROUND_Y - PLAYER_HEIGHT;
        for _ in 0..10 {
            update(&mut state, FRAME_MS);
            v += GRAVITY;
            y += v;
            assert!((state.player.vy - v).abs() < 1e-4);
            assert!((state.player.pos.y - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_full_jump_arc_lands() {
        let mut state = make_state();
        jump(&mut state);

        // J=-15, g=0.8 per frame: back on the ground within ~38 frames
        let mut frames = 0;
        while state.player.jumping && frames < 120 {
            update(&mut state, FRAME_MS);
            frames += 1;
        }
        assert!(!state.player.jumping, "player never landed");
        assert_eq!(state.player.pos.y + state.player.size.y, GROUND_Y);
        assert_eq!(state.player.vy, 0.0);
        assert!((36..=40).contains(&frames), "landed after {frames} frames");
    }

    #[test]
    fn test_landing_emits_event_and_dust() {
        let mut state = make_state();
        jump(&mut state);
        let _ = state.take_events();
        state.particles.clear();

        while state.player.jumping {
            update(&mut state, FRAME_MS);
        }
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Landed));
        assert_eq!(state.particles.len(), LAND_DUST_COUNT);
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let mut state = make_state();
        let y = state.player.pos.y;
        for _ in 0..30 {
            update(&mut state, FRAME_MS);
        }
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.player.vy, 0.0);
    }
}
