//! Game state and core simulation types
//!
//! Everything a tick mutates lives here. Subsystems receive `&mut GameState`
//! plus a delta and nothing else, so the whole run is reproducible from a
//! config and a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::combo::{ComboState, NearMissTracker};
use super::events::GameEvent;
use super::rect::Rect;
use super::spawn::SpawnTimers;
use crate::consts::*;
use crate::settings::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// World is scrolling
    Running,
    /// Run ended on an unshielded obstacle hit
    GameOver,
}

/// Arm windmill animation - spins for a fixed number of turns after a jump
/// or a coin pickup, advancing a fixed step per update call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmSpin {
    /// Current angle (radians)
    pub angle: f32,
    /// Radians accumulated since the spin (re)started
    pub turned: f32,
    pub spinning: bool,
}

impl ArmSpin {
    /// Kick off a fresh spin (also restarts one already in progress)
    pub fn restart(&mut self) {
        self.turned = 0.0;
        self.spinning = true;
    }

    /// Advance by the fixed step; stops after the configured number of turns
    pub fn advance(&mut self) {
        if !self.spinning {
            return;
        }
        self.angle = (self.angle + ARM_SPIN_STEP) % std::f32::consts::TAU;
        self.turned += ARM_SPIN_STEP;
        if self.turned >= ARM_SPIN_CYCLES * std::f32::consts::TAU {
            self.angle = 0.0;
            self.spinning = false;
        }
    }
}

/// The runner character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (per-frame units, positive = falling)
    pub vy: f32,
    /// Airborne guard - jump requests are ignored while set
    pub jumping: bool,
    pub arm: ArmSpin,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vy: 0.0,
            jumping: false,
            arm: ArmSpin::default(),
        }
    }

    /// Full sprite rect (used for rendering and near-miss checks)
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Forgiving collision rect, shrunk on every side
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(HITBOX_INSET)
    }

    /// Where the feet meet the ground (dust bursts spawn here)
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Obstacle shapes, each with a fixed silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cactus,
    Rock,
    Spiky,
    Log,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Cactus,
        ObstacleKind::Rock,
        ObstacleKind::Spiky,
        ObstacleKind::Log,
    ];

    /// Sprite dimensions for this shape
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Cactus => Vec2::new(24.0, 46.0),
            ObstacleKind::Rock => Vec2::new(34.0, 26.0),
            ObstacleKind::Spiky => Vec2::new(30.0, 30.0),
            ObstacleKind::Log => Vec2::new(48.0, 22.0),
        }
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.kind.size(),
        }
    }

    /// Fully off the left edge, with margin - safe to retire
    pub fn off_screen(&self) -> bool {
        self.pos.x < -self.kind.size().x * OFFSCREEN_CULL_FACTOR
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Spin phase for rendering
    pub rot: f32,
    /// Once a magnet pulls it, it homes on the player for good
    pub magnetized: bool,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(COIN_SIZE * 0.5),
            size: Vec2::splat(COIN_SIZE),
        }
    }
}

/// Power-up flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Shield,
    Magnet,
    DoubleScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::DoubleScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::DoubleScore => "double-score",
        }
    }
}

/// A collectible power-up item drifting in from the right
#[derive(Debug, Clone)]
pub struct PowerUpItem {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Wobble phase for rendering
    pub rot: f32,
    pub kind: PowerUpKind,
}

impl PowerUpItem {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(POWERUP_SIZE * 0.5),
            size: Vec2::splat(POWERUP_SIZE),
        }
    }
}

/// A running timed effect. At most one record per kind exists; picking the
/// same kind up again resets `time_left_ms` instead of stacking.
#[derive(Debug, Clone)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub time_left_ms: f32,
}

/// Particle flavors with distinct integration rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Kicked-up dirt from jumps and landings
    Dust,
    /// Campfire smoke drifting up from the scenery
    Smoke,
}

/// A cosmetic particle (never gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub age_ms: f32,
    pub lifetime_ms: f32,
}

/// What a point indicator displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLabel {
    /// "+N" score popup
    Points(u64),
    /// "CLOSE!" near-miss flair
    Close,
}

/// A floating score popup running its four-phase pop animation
#[derive(Debug, Clone)]
pub struct PointIndicator {
    pub pos: Vec2,
    pub label: IndicatorLabel,
    pub age_ms: f32,
    /// Render scale (overshoots 1.0 during the burst phase)
    pub scale: f32,
    pub opacity: f32,
    /// Vertical drift (per-frame units, negative = rising)
    pub vy: f32,
}

/// Scenery scroll offsets plus the ambient smoke emitter
#[derive(Debug, Clone)]
pub struct Background {
    /// Ground strip offset, scrolls at full world speed
    pub ground_offset: f32,
    /// Far hills offset, scrolls slower for parallax
    pub hills_offset: f32,
    /// World x of the trackside campfire that puffs smoke
    pub smoke_emitter_x: f32,
    /// Sim-time of the last smoke puff
    pub last_smoke_ms: f64,
}

impl Background {
    pub fn new() -> Self {
        Self {
            ground_offset: 0.0,
            hills_offset: 0.0,
            smoke_emitter_x: GAME_WIDTH * 0.75,
            last_smoke_ms: 0.0,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG - every spawn decision draws from here
    pub rng: Pcg32,
    /// Per-run tuning, immutable once the run starts
    pub config: Config,
    /// Current phase
    pub phase: GamePhase,
    /// Sim-time clock (ms). Freezes while the host is paused.
    pub elapsed_ms: f64,
    /// Score
    pub score: u64,
    /// Exactly 2.0 while DoubleScore is active, 1.0 otherwise
    pub score_multiplier: f32,
    /// Base world speed (per-frame px), ramps up over the run
    pub speed: f32,
    /// The runner
    pub player: Player,
    /// Active obstacles (spawn order, ids ascending)
    pub obstacles: Vec<Obstacle>,
    /// Active coins
    pub coins: Vec<Coin>,
    /// Uncollected power-up items
    pub powerups: Vec<PowerUpItem>,
    /// Running timed effects, at most one per kind
    pub active_powerups: Vec<ActivePowerUp>,
    /// Combo streak bookkeeping
    pub combo: ComboState,
    /// Obstacles already credited for a near miss
    pub near_miss: NearMissTracker,
    /// Spawn accumulators and randomized bounds
    pub spawn: SpawnTimers,
    /// Parallax scenery
    pub background: Background,
    /// Visual particles (dust + smoke)
    pub particles: Vec<Particle>,
    /// Floating score popups
    pub indicators: Vec<PointIndicator>,
    /// Events emitted this tick, drained by the scheduler
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given config and seed
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let first_coin_ms =
            rng.random_range(config.coin_interval_min_ms..config.coin_interval_max_ms);

        Self {
            seed,
            phase: GamePhase::Running,
            elapsed_ms: 0.0,
            score: 0,
            score_multiplier: 1.0,
            speed: config.base_speed,
            player: Player::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            active_powerups: Vec::new(),
            combo: ComboState::new(),
            near_miss: NearMissTracker::new(),
            spawn: SpawnTimers::new(config.first_obstacle_delay_ms, first_coin_ms),
            background: Background::new(),
            particles: Vec::new(),
            indicators: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            rng,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an event for the host
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain everything emitted since the last drain
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Is a timed effect of this kind currently running?
    pub fn has_powerup(&self, kind: PowerUpKind) -> bool {
        self.active_powerups.iter().any(|p| p.kind == kind)
    }

    /// World speed every mover reads: base speed, boosted while the Speed
    /// effect runs. Obstacles, coins, items, background and spawn pacing all
    /// go through here so nothing desyncs.
    pub fn effective_speed(&self) -> f32 {
        if self.has_powerup(PowerUpKind::Speed) {
            self.speed * SPEED_BOOST_MULT
        } else {
            self.speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;

    #[test]
    fn test_new_state_is_grounded_and_idle() {
        let state = GameState::new(Config::default(), 7);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.player.jumping);
        assert_eq!(state.player.rect().bottom(), GROUND_Y);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.score_multiplier, 1.0);
    }

    #[test]
    fn test_entity_ids_ascend() {
        let mut state = GameState::new(Config::default(), 7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_effective_speed_boost() {
        let mut state = GameState::new(Config::default(), 7);
        let base = state.effective_speed();
        state.active_powerups.push(ActivePowerUp {
            kind: PowerUpKind::Speed,
            time_left_ms: 1000.0,
        });
        assert!((state.effective_speed() - base * SPEED_BOOST_MULT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_arm_spin_runs_fixed_turns() {
        let mut arm = ArmSpin::default();
        arm.restart();
        let mut calls = 0;
        while arm.spinning && calls < 1000 {
            arm.advance();
            calls += 1;
        }
        assert!(!arm.spinning);
        // Two full turns at the fixed step
        let expected = (ARM_SPIN_CYCLES * std::f32::consts::TAU / ARM_SPIN_STEP).ceil() as i32;
        assert_eq!(calls, expected);
        assert_eq!(arm.angle, 0.0);
    }
}
