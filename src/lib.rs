//! Dusty Dash - an endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `scheduler`: Frame-driven game loop with pause/resume and delta clamping
//! - `settings`: Difficulty presets and run configuration
//! - `highscores`: Best-score persistence

pub mod highscores;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use scheduler::{RenderSink, Scheduler};
pub use settings::{Config, Difficulty};

/// Game tuning constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 300.0;
    /// Ground line - the player's feet rest here
    pub const GROUND_Y: f32 = 260.0;

    /// One frame at 60 Hz; all speeds/accelerations are per-frame units
    pub const FRAME_MS: f32 = 16.0;
    /// Delta clamp - a stall longer than this advances the sim by only this much
    pub const MAX_DT_MS: f64 = 100.0;
    /// Delta used for the first tick after start/resume (no previous timestamp)
    pub const FALLBACK_DT_MS: f64 = 16.0;
    /// Minimum interval between pause toggles
    pub const PAUSE_DEBOUNCE_MS: f64 = 200.0;

    /// Player sprite and placement
    pub const PLAYER_X: f32 = 64.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;
    /// Collision rect shrinks by this much on every side (forgiving hitbox)
    pub const HITBOX_INSET: f32 = 5.0;

    /// Vertical physics (per-frame units)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_FORCE: f32 = -15.0;

    /// Arm windmill animation: fixed step per update, runs for N full turns
    pub const ARM_SPIN_STEP: f32 = 0.45;
    pub const ARM_SPIN_CYCLES: f32 = 2.0;

    /// Obstacles are retired once fully off the left edge by this many widths
    pub const OFFSCREEN_CULL_FACTOR: f32 = 1.5;

    /// Base scoring values (score multiplier applies on top)
    pub const PASS_SCORE: u64 = 10;
    pub const COIN_VALUE: u64 = 10;
    pub const NEAR_MISS_BONUS: u64 = 15;
    pub const SHIELD_SAVE_BONUS: u64 = 50;

    /// Combo: multiplier = 1 + step * count, capped
    pub const COMBO_STEP: f32 = 0.2;
    pub const COMBO_MULTIPLIER_CAP: f32 = 3.0;
    /// Streak resets after this long without a scoring action
    pub const COMBO_TIMEOUT_MS: f64 = 3000.0;

    /// Near-miss window: cleared the obstacle top by less than this
    pub const NEAR_MISS_HEIGHT_PX: f32 = 32.0;
    /// ...while horizontally past its leading edge by less than this
    pub const NEAR_MISS_BAND_PX: f32 = 24.0;

    /// Power-up effect tuning
    pub const SPEED_BOOST_MULT: f32 = 1.5;
    pub const DOUBLE_SCORE_MULT: f32 = 2.0;
    pub const MAGNET_RADIUS_PX: f32 = 150.0;
    /// Fraction of remaining distance a magnetized coin closes per frame
    pub const MAGNET_EASE: f32 = 0.18;
    pub const COIN_SIZE: f32 = 20.0;
    pub const POWERUP_SIZE: f32 = 26.0;

    /// Particle pool caps
    pub const MAX_PARTICLES: usize = 256;
    pub const MAX_SMOKE: usize = 24;
    pub const SMOKE_CADENCE_MS: f64 = 180.0;
    pub const JUMP_DUST_COUNT: usize = 6;
    pub const LAND_DUST_COUNT: usize = 10;
    /// Dust is culled once it shrinks below this
    pub const DUST_MIN_SIZE: f32 = 0.5;

    /// Point indicator lifetime (four-phase pop animation)
    pub const INDICATOR_LIFETIME_MS: f32 = 900.0;
}

/// Scale a millisecond delta into 60 Hz frame units
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}
