//! Dust, smoke, and floating point indicators
//!
//! All of this is cosmetic - nothing here feeds back into gameplay. Dust is
//! a one-shot burst that falls and shrinks; smoke puffs from the scenery
//! campfire and animates through three explicit phases; point indicators pop
//! through a four-phase envelope and disappear.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, IndicatorLabel, Particle, ParticleKind, PointIndicator};
use crate::consts::*;
use crate::frame_scale;

/// Smoke lifecycle, classified by fractional age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokePhase {
    /// Slow initial growth near the source
    Forming,
    /// Rapid expansion while the rise decelerates
    Expanding,
    /// Alpha ramp-down with continued drift
    Fading,
}

impl SmokePhase {
    pub fn at(frac: f32) -> Self {
        if frac < 0.15 {
            SmokePhase::Forming
        } else if frac < 0.6 {
            SmokePhase::Expanding
        } else {
            SmokePhase::Fading
        }
    }
}

/// Point indicator lifecycle, classified by fractional age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPhase {
    /// Explosive growth and fast rise
    Burst,
    /// Scale springs back toward rest
    Bounce,
    /// Steady rise, fade begins
    Steady,
    /// Slow fade-out to nothing
    Fadeout,
}

impl IndicatorPhase {
    pub fn at(frac: f32) -> Self {
        if frac < 0.12 {
            IndicatorPhase::Burst
        } else if frac < 0.30 {
            IndicatorPhase::Bounce
        } else if frac < 0.70 {
            IndicatorPhase::Steady
        } else {
            IndicatorPhase::Fadeout
        }
    }
}

/// Push a particle, evicting the oldest when the pool is full
fn push_particle(state: &mut GameState, particle: Particle) {
    if state.particles.len() >= MAX_PARTICLES {
        state.particles.remove(0);
    }
    state.particles.push(particle);
}

/// Kick up a burst of dirt at `origin` (jump take-offs and landings)
pub fn spawn_dust_burst(state: &mut GameState, origin: Vec2, count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(
            state.rng.random_range(-1.8..1.8),
            state.rng.random_range(-2.8..-0.6),
        );
        let particle = Particle {
            kind: ParticleKind::Dust,
            pos: origin + Vec2::new(state.rng.random_range(-6.0..6.0), 0.0),
            vel,
            size: state.rng.random_range(2.0..5.0),
            alpha: state.rng.random_range(0.7..1.0),
            age_ms: 0.0,
            lifetime_ms: state.rng.random_range(300.0..600.0),
        };
        push_particle(state, particle);
    }
}

/// One puff of campfire smoke
pub fn spawn_smoke_puff(state: &mut GameState, pos: Vec2) {
    let particle = Particle {
        kind: ParticleKind::Smoke,
        pos,
        vel: Vec2::new(
            state.rng.random_range(-0.4..0.1),
            state.rng.random_range(-0.8..-0.4),
        ),
        size: 3.0,
        alpha: state.rng.random_range(0.5..0.8),
        age_ms: 0.0,
        lifetime_ms: state.rng.random_range(2400.0..3200.0),
    };
    push_particle(state, particle);
}

/// Float a score popup at `pos`
pub fn spawn_indicator(state: &mut GameState, pos: Vec2, label: IndicatorLabel) {
    state.indicators.push(PointIndicator {
        pos,
        label,
        age_ms: 0.0,
        scale: 0.2,
        opacity: 1.0,
        vy: -2.4,
    });
}

/// Age dust and smoke, and let the campfire puff on its cadence
pub fn update(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);

    // Campfire puffs while it's on screen, capped so smoke can't crowd out
    // the gameplay dust
    let emitter_x = state.background.smoke_emitter_x;
    let on_screen = emitter_x > -40.0 && emitter_x < GAME_WIDTH + 40.0;
    let smoke_count = state
        .particles
        .iter()
        .filter(|p| p.kind == ParticleKind::Smoke)
        .count();
    if on_screen
        && smoke_count < MAX_SMOKE
        && state.elapsed_ms - state.background.last_smoke_ms >= SMOKE_CADENCE_MS
    {
        state.background.last_smoke_ms = state.elapsed_ms;
        let pos = Vec2::new(emitter_x, GROUND_Y - 14.0);
        spawn_smoke_puff(state, pos);
    }

    for p in state.particles.iter_mut() {
        p.age_ms += dt_ms;
        match p.kind {
            ParticleKind::Dust => {
                // Gravity-biased arc, shrinking as it settles
                p.vel.y += 0.25 * ts;
                p.pos += p.vel * ts;
                p.size *= 0.96_f32.powf(ts);
            }
            ParticleKind::Smoke => {
                let frac = (p.age_ms / p.lifetime_ms).min(1.0);
                match SmokePhase::at(frac) {
                    SmokePhase::Forming => {
                        p.size += 0.06 * ts;
                        p.pos += p.vel * ts * 0.5;
                    }
                    SmokePhase::Expanding => {
                        p.size += 0.16 * ts;
                        p.vel.y *= 0.985_f32.powf(ts);
                        p.pos += p.vel * ts;
                    }
                    SmokePhase::Fading => {
                        p.size += 0.04 * ts;
                        p.alpha *= 0.94_f32.powf(ts);
                        p.pos += p.vel * ts;
                    }
                }
            }
        }
    }

    state.particles.retain(|p| {
        p.age_ms < p.lifetime_ms
            && match p.kind {
                ParticleKind::Dust => p.size >= DUST_MIN_SIZE,
                ParticleKind::Smoke => p.alpha >= 0.02,
            }
    });
}

/// Advance every point indicator through its pop animation
pub fn update_indicators(state: &mut GameState, dt_ms: f32) {
    let ts = frame_scale(dt_ms);

    for ind in state.indicators.iter_mut() {
        ind.age_ms += dt_ms;
        let frac = (ind.age_ms / INDICATOR_LIFETIME_MS).min(1.0);
        match IndicatorPhase::at(frac) {
            IndicatorPhase::Burst => {
                ind.scale = (ind.scale + 0.55 * ts).min(1.35);
                ind.vy = -2.4;
            }
            IndicatorPhase::Bounce => {
                // Spring back toward rest scale
                ind.scale += (1.0 - ind.scale) * (0.25 * ts).min(1.0);
                ind.vy = -1.1;
            }
            IndicatorPhase::Steady => {
                ind.scale = 1.0;
                ind.vy = -0.45;
                ind.opacity += (0.85 - ind.opacity) * (0.08 * ts).min(1.0);
            }
            IndicatorPhase::Fadeout => {
                // Map the final phase linearly down to zero opacity
                let t = ((frac - 0.70) / 0.30).clamp(0.0, 1.0);
                ind.opacity = 0.85 * (1.0 - t);
                ind.vy = -0.3;
            }
        }
        ind.pos.y += ind.vy * ts;
    }

    state.indicators.retain(|i| i.age_ms < INDICATOR_LIFETIME_MS);
}
