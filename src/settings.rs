//! Difficulty presets and per-run tuning
//!
//! A `Config` is chosen before a run starts and treated as immutable for
//! that run. Presets swap the same knobs: world speed and ramp, physics,
//! spawn cadences, and power-up odds.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, JUMP_FORCE};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "default" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Per-run tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub difficulty: Difficulty,

    // === World speed ===
    /// Starting scroll speed (px per 60 Hz frame)
    pub base_speed: f32,
    /// Ramp ceiling
    pub max_speed: f32,
    /// Speed gained per 60 Hz frame
    pub speed_ramp: f32,

    // === Physics ===
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Takeoff velocity (negative = up)
    pub jump_force: f32,

    // === Spawn cadence ===
    pub obstacle_interval_min_ms: f64,
    pub obstacle_interval_max_ms: f64,
    /// The very first obstacle lands sooner than the rolling intervals
    pub first_obstacle_delay_ms: f64,
    /// Floor under the speed-scaled interval roll
    pub min_obstacle_gap_ms: f64,
    pub coin_interval_min_ms: f64,
    pub coin_interval_max_ms: f64,

    // === Power-ups ===
    /// Chance rolled each time an obstacle exits the screen
    pub powerup_chance: f64,
    /// Minimum sim-time between two power-up spawns
    pub powerup_cooldown_ms: f64,
    /// How long an activated power-up lasts
    pub powerup_duration_ms: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl Config {
    /// Tuning table for a preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                base_speed: 5.0,
                max_speed: 11.0,
                speed_ramp: 0.0008,
                gravity: GRAVITY,
                jump_force: JUMP_FORCE,
                obstacle_interval_min_ms: 1_100.0,
                obstacle_interval_max_ms: 2_300.0,
                first_obstacle_delay_ms: 900.0,
                min_obstacle_gap_ms: 700.0,
                coin_interval_min_ms: 900.0,
                coin_interval_max_ms: 2_200.0,
                powerup_chance: 0.35,
                powerup_cooldown_ms: 8_000.0,
                powerup_duration_ms: 6_000.0,
            },
            Difficulty::Normal => Self {
                difficulty,
                base_speed: 6.0,
                max_speed: 13.0,
                speed_ramp: 0.0012,
                gravity: GRAVITY,
                jump_force: JUMP_FORCE,
                obstacle_interval_min_ms: 900.0,
                obstacle_interval_max_ms: 2_100.0,
                first_obstacle_delay_ms: 700.0,
                min_obstacle_gap_ms: 600.0,
                coin_interval_min_ms: 800.0,
                coin_interval_max_ms: 2_400.0,
                powerup_chance: 0.30,
                powerup_cooldown_ms: 9_000.0,
                powerup_duration_ms: 5_000.0,
            },
            Difficulty::Hard => Self {
                difficulty,
                base_speed: 7.5,
                max_speed: 15.0,
                speed_ramp: 0.0018,
                gravity: GRAVITY,
                jump_force: JUMP_FORCE,
                obstacle_interval_min_ms: 750.0,
                obstacle_interval_max_ms: 1_800.0,
                first_obstacle_delay_ms: 550.0,
                min_obstacle_gap_ms: 500.0,
                coin_interval_min_ms: 900.0,
                coin_interval_max_ms: 2_600.0,
                powerup_chance: 0.25,
                powerup_cooldown_ms: 11_000.0,
                powerup_duration_ms: 4_000.0,
            },
        }
    }

    /// Preset by name, falling back to the default on anything unknown
    pub fn from_preset_str(s: &str) -> Self {
        match Difficulty::from_str(s) {
            Some(difficulty) => Self::from_preset(difficulty),
            None => {
                log::warn!(
                    "unknown difficulty '{s}', using {}",
                    Difficulty::default().as_str()
                );
                Self::default()
            }
        }
    }

    /// The spawn rolls reject a degenerate range at run time, so a file
    /// that parses cleanly still has to pass these checks before it is
    /// trusted.
    fn ranges_valid(&self) -> bool {
        let ordered = |min: f64, max: f64| min >= 0.0 && min < max && max.is_finite();
        ordered(self.obstacle_interval_min_ms, self.obstacle_interval_max_ms)
            && ordered(self.coin_interval_min_ms, self.coin_interval_max_ms)
            && (0.0..=1.0).contains(&self.powerup_chance)
    }

    /// Full tuning override from a JSON file. `None` when the file is
    /// absent, unparseable, or carries out-of-range values, so the caller
    /// can fall back to a preset.
    pub fn from_file(path: &Path) -> Option<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str::<Config>(&json) {
            Ok(config) if config.ranges_valid() => {
                log::info!("config override loaded from {}", path.display());
                Some(config)
            }
            Ok(_) => {
                log::warn!(
                    "config file {} has out-of-range spawn values, ignoring it",
                    path.display()
                );
                None
            }
            Err(err) => {
                log::warn!("bad config file {}: {err}", path.display());
                None
            }
        }
    }
}
