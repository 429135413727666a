//! Gameplay events emitted during a tick
//!
//! Subsystems push events onto the state as they resolve; the scheduler
//! drains them after each tick and hands them to the host (audio cues,
//! HUD flashes, logging). Dropping them is always safe - nothing in the
//! sim reads its own events back.

use super::state::PowerUpKind;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Player left the ground
    Jumped,
    /// Player touched back down
    Landed,
    /// Coin scored (value already includes the score multiplier)
    CoinCollected { value: u64, combo: u32 },
    /// Cleared an obstacle by a hair
    NearMiss { bonus: u64, combo: u32 },
    /// Obstacle scrolled off the left edge without being hit
    ObstaclePassed { score: u64 },
    /// A power-up item appeared at the right edge
    PowerUpSpawned { kind: PowerUpKind },
    /// Player picked up a power-up
    PowerUpCollected { kind: PowerUpKind },
    /// A timed effect ran out
    PowerUpExpired { kind: PowerUpKind },
    /// Shield absorbed an obstacle hit
    ShieldSave { bonus: u64 },
    /// Run ended
    GameOver {
        score: u64,
        best_combo: u32,
        elapsed_ms: f64,
    },
}
