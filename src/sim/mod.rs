//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped per-tick Δt only, supplied by the scheduler
//! - Seeded RNG only
//! - Fixed subsystem order within a tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod combo;
pub mod events;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use combo::{ComboState, NearMissTracker};
pub use events::GameEvent;
pub use rect::Rect;
pub use state::{
    ActivePowerUp, Background, Coin, GamePhase, GameState, IndicatorLabel, Obstacle, ObstacleKind,
    Particle, ParticleKind, Player, PointIndicator, PowerUpItem, PowerUpKind,
};
pub use tick::{TickInput, advance};
