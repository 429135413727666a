//! Combo streaks and near-miss detection
//!
//! Coins and near misses extend a streak; the streak's multiplier feeds the
//! near-miss bonus only. Going quiet for `COMBO_TIMEOUT_MS` drops the streak
//! back to zero.

use super::events::GameEvent;
use super::particles;
use super::state::{GameState, IndicatorLabel, Obstacle, Player};
use crate::consts::*;

/// Streak counter with its derived multiplier
#[derive(Debug, Clone)]
pub struct ComboState {
    /// Consecutive scoring actions inside the timeout window
    pub count: u32,
    /// 1 + COMBO_STEP per action, capped at COMBO_MULTIPLIER_CAP
    pub multiplier: f32,
    /// Sim-time of the last scoring action
    pub last_action_ms: Option<f64>,
    /// Best streak this run
    pub best: u32,
}

impl ComboState {
    pub fn new() -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
            last_action_ms: None,
            best: 0,
        }
    }

    /// Register a scoring action at sim-time `now_ms`
    pub fn increase(&mut self, now_ms: f64) {
        self.count += 1;
        self.multiplier = (1.0 + COMBO_STEP * self.count as f32).min(COMBO_MULTIPLIER_CAP);
        self.last_action_ms = Some(now_ms);
        self.best = self.best.max(self.count);
    }

    /// Drop the streak once the window has lapsed
    pub fn update(&mut self, now_ms: f64) {
        if let Some(last) = self.last_action_ms {
            if now_ms - last >= COMBO_TIMEOUT_MS {
                self.reset();
            }
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.multiplier = 1.0;
        self.last_action_ms = None;
    }
}

impl Default for ComboState {
    fn default() -> Self {
        Self::new()
    }
}

/// Obstacles already credited for a near miss. Each obstacle pays out once
/// no matter how many frames the qualifying geometry holds.
#[derive(Debug, Clone, Default)]
pub struct NearMissTracker {
    credited: Vec<u32>,
}

impl NearMissTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_credited(&self, id: u32) -> bool {
        self.credited.contains(&id)
    }

    pub fn credit(&mut self, id: u32) {
        if !self.credited.contains(&id) {
            self.credited.push(id);
        }
    }

    /// Drop the entry when its obstacle is retired (keeps the list bounded)
    pub fn forget(&mut self, id: u32) {
        self.credited.retain(|&c| c != id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.credited.len()
    }
}

/// Does this frame's geometry qualify as skimming over the obstacle?
/// The player's trailing edge must sit just past the obstacle's leading edge
/// while the feet clear the top by less than the tolerance band.
pub fn is_near_miss(player: &Player, obstacle: &Obstacle) -> bool {
    if !player.jumping {
        return false;
    }
    let p = player.rect();
    let o = obstacle.rect();

    let past_leading = p.left() - o.left();
    let clearance = o.top() - p.bottom();

    past_leading > 0.0
        && past_leading < NEAR_MISS_BAND_PX
        && clearance >= 0.0
        && clearance < NEAR_MISS_HEIGHT_PX
}

/// Scan live obstacles for uncredited near misses and pay them out.
/// Bonus = base * score multiplier * combo multiplier, floored; this is the
/// one scoring path where the combo multiplier applies.
pub fn check_near_misses(state: &mut GameState) {
    let mut hits: Vec<(u32, glam::Vec2)> = Vec::new();
    for obstacle in &state.obstacles {
        if state.near_miss.already_credited(obstacle.id) {
            continue;
        }
        if is_near_miss(&state.player, obstacle) {
            hits.push((obstacle.id, obstacle.rect().center()));
        }
    }

    for (id, pos) in hits {
        state.near_miss.credit(id);
        // Bonus pays out at the multiplier in force before this action
        let bonus = (NEAR_MISS_BONUS as f32 * state.score_multiplier * state.combo.multiplier)
            .floor() as u64;
        state.score += bonus;
        state.combo.increase(state.elapsed_ms);
        particles::spawn_indicator(state, pos, IndicatorLabel::Close);
        state.push_event(GameEvent::NearMiss {
            bonus,
            combo: state.combo.count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;
    use glam::Vec2;

    use super::super::state::ObstacleKind;

    fn make_state() -> GameState {
        GameState::new(Config::default(), 42)
    }

    /// Park an obstacle so the player is skimming right over its top
    fn skimming_setup(state: &mut GameState) -> u32 {
        let kind = ObstacleKind::Cactus;
        let id = state.next_entity_id();
        // Leading edge just behind the player's trailing edge
        let x = PLAYER_X - NEAR_MISS_BAND_PX * 0.5;
        let y = GROUND_Y - kind.size().y;
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, y),
            kind,
        });
        // Player airborne with feet just above the obstacle top
        state.player.jumping = true;
        state.player.pos.y = y - state.player.size.y - NEAR_MISS_HEIGHT_PX * 0.5;
        id
    }

    #[test]
    fn test_combo_multiplier_formula() {
        let mut combo = ComboState::new();
        assert_eq!(combo.multiplier, 1.0);
        combo.increase(0.0);
        assert!((combo.multiplier - 1.2).abs() < 1e-6);
        combo.increase(0.0);
        assert!((combo.multiplier - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_combo_multiplier_caps() {
        let mut combo = ComboState::new();
        for _ in 0..100 {
            combo.increase(0.0);
        }
        assert_eq!(combo.multiplier, COMBO_MULTIPLIER_CAP);
        assert_eq!(combo.best, 100);
    }

    #[test]
    fn test_combo_times_out() {
        let mut combo = ComboState::new();
        combo.increase(1000.0);
        combo.update(1000.0 + COMBO_TIMEOUT_MS - 1.0);
        assert_eq!(combo.count, 1);
        combo.update(1000.0 + COMBO_TIMEOUT_MS);
        assert_eq!(combo.count, 0);
        assert_eq!(combo.multiplier, 1.0);
        assert_eq!(combo.last_action_ms, None);
    }

    #[test]
    fn test_combo_best_survives_reset() {
        let mut combo = ComboState::new();
        for _ in 0..5 {
            combo.increase(0.0);
        }
        combo.reset();
        assert_eq!(combo.count, 0);
        assert_eq!(combo.best, 5);
    }

    #[test]
    fn test_near_miss_geometry() {
        let mut state = make_state();
        skimming_setup(&mut state);
        let ob = state.obstacles[0].clone();
        assert!(is_near_miss(&state.player, &ob));

        // Grounded player never near-misses
        state.player.jumping = false;
        assert!(!is_near_miss(&state.player, &ob));
        state.player.jumping = true;

        // Way too high: outside the tolerance band
        state.player.pos.y = ob.pos.y - state.player.size.y - NEAR_MISS_HEIGHT_PX * 2.0;
        assert!(!is_near_miss(&state.player, &ob));
    }

    #[test]
    fn test_near_miss_credits_once() {
        let mut state = make_state();
        skimming_setup(&mut state);

        check_near_misses(&mut state);
        let first_score = state.score;
        assert!(first_score > 0);
        assert_eq!(state.combo.count, 1);

        // Geometry still holds next frame - no second payout
        check_near_misses(&mut state);
        check_near_misses(&mut state);
        assert_eq!(state.score, first_score);
        assert_eq!(state.combo.count, 1);
        assert_eq!(state.near_miss.len(), 1);
    }

    #[test]
    fn test_near_miss_bonus_uses_both_multipliers() {
        let mut state = make_state();
        skimming_setup(&mut state);
        // DoubleScore active and one action already banked
        state.score_multiplier = 2.0;
        state.combo.increase(0.0);

        check_near_misses(&mut state);
        // Payout uses the pre-increase multiplier: count 1 -> 1.2
        let expected = (NEAR_MISS_BONUS as f32 * 2.0 * 1.2).floor() as u64;
        assert_eq!(state.score, expected);
        let events = state.take_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::NearMiss { bonus, combo: 2 }] if *bonus == expected
        ));
    }

    #[test]
    fn test_tracker_forget() {
        let mut tracker = NearMissTracker::new();
        tracker.credit(3);
        tracker.credit(3);
        assert_eq!(tracker.len(), 1);
        tracker.forget(3);
        assert!(!tracker.already_credited(3));
    }
}
