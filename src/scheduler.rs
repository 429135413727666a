//! Game loop scheduler: Stopped → Running ⇄ Paused → Stopped
//!
//! The host owns the clock and calls `frame` once per animation frame with a
//! monotonic `now_ms`. The scheduler turns that into a clamped Δt, runs one
//! sim tick behind a panic guard, drains events, and renders. `Break` from
//! `frame` tells the host its loop is finished, so a restarted game can
//! never end up with two live loops.

use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};

use crate::consts::*;
use crate::settings::Config;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Host-side boundary: called once per frame with the state to draw, plus
/// every event the tick emitted. Events arrive before the render call.
pub trait RenderSink {
    fn render(&mut self, state: &GameState);
    fn handle_event(&mut self, _event: &GameEvent) {}
}

/// Drives the sim from a host clock
pub struct Scheduler {
    state: GameState,
    config: Config,
    seed: u64,
    running: bool,
    paused: bool,
    /// Host timestamp of the last simulated frame; `None` forces the
    /// fallback Δt on the next frame (fresh start or just resumed)
    last_frame_ms: Option<f64>,
    last_pause_toggle_ms: Option<f64>,
    /// One-shot jump latch, consumed by the next tick
    pending_jump: bool,
    autopilot: bool,
}

impl Scheduler {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            state: GameState::new(config.clone(), seed),
            config,
            seed,
            running: false,
            paused: false,
            last_frame_ms: None,
            last_pause_toggle_ms: None,
            pending_jump: false,
            autopilot: false,
        }
    }

    /// Begin a run. No-op while one is already in progress.
    pub fn start_game(&mut self) {
        if self.running {
            log::debug!("start ignored, run already in progress");
            return;
        }
        self.begin_run();
    }

    /// Abandon the current run (or the finished one) and begin a fresh one
    /// on a derived seed.
    pub fn restart_game(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.begin_run();
    }

    fn begin_run(&mut self) {
        self.state = GameState::new(self.config.clone(), self.seed);
        self.running = true;
        self.paused = false;
        self.last_frame_ms = None;
        self.last_pause_toggle_ms = None;
        self.pending_jump = false;
        log::info!(
            "run started: {} preset, seed {}",
            self.config.difficulty.as_str(),
            self.seed
        );
    }

    /// Flip pause. Debounced so a bouncing key cannot corrupt the frame
    /// clock; unpausing clears the stored timestamp so the first resumed
    /// tick uses the fallback Δt instead of the whole pause duration.
    pub fn toggle_pause(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }
        let bouncing = self
            .last_pause_toggle_ms
            .is_some_and(|last| now_ms - last < PAUSE_DEBOUNCE_MS);
        if bouncing {
            log::debug!("pause toggle debounced");
            return;
        }
        self.last_pause_toggle_ms = Some(now_ms);
        self.paused = !self.paused;
        if !self.paused {
            self.last_frame_ms = None;
        }
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
    }

    /// Latch a jump request for the next simulated tick
    pub fn jump(&mut self) {
        if self.running && !self.paused {
            self.pending_jump = true;
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Current world speed including any active boost
    pub fn speed(&self) -> f32 {
        self.state.effective_speed()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run one scheduled frame at host time `now_ms`.
    ///
    /// `Break` means the loop is over (stopped or game over); `Continue`
    /// asks the host to call again next frame - including while paused,
    /// where the frame is render-only.
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn RenderSink) -> ControlFlow<()> {
        if !self.running {
            return ControlFlow::Break(());
        }
        if self.paused {
            sink.render(&self.state);
            return ControlFlow::Continue(());
        }

        let dt_ms = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_DT_MS),
            None => FALLBACK_DT_MS,
        };
        self.last_frame_ms = Some(now_ms);

        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
            autopilot: self.autopilot,
        };

        // A fault inside one tick must not kill the loop; the frame is
        // dropped and the next one proceeds from whatever state survived
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            tick::advance(&mut self.state, &input, dt_ms as f32);
        }));
        if let Err(payload) = outcome {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());
            log::error!("tick panicked, frame dropped: {msg}");
        }

        for event in self.state.take_events() {
            sink.handle_event(&event);
        }
        sink.render(&self.state);

        // The terminal frame still renders; the loop ends on the next call
        if self.state.phase == GamePhase::GameOver {
            self.running = false;
            log::info!(
                "game over: score {} (best combo {}) after {:.1}s",
                self.state.score,
                self.state.combo.best,
                self.state.elapsed_ms / 1000.0
            );
        }
        ControlFlow::Continue(())
    }
}
