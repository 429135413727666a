//! Dusty Dash entry point
//!
//! Headless demo shell: runs the sim on a wall clock with the autopilot
//! playing, narrates the run into the log, and keeps the high-score file up
//! to date. Usage: `dusty-dash [difficulty] [seed]`. Without a difficulty
//! argument, a `dusty-dash-config.json` in the working directory overrides
//! the default preset.

use std::ops::ControlFlow;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dusty_dash::consts::FRAME_MS;
use dusty_dash::sim::{GameEvent, GameState};
use dusty_dash::{Config, HighScores, RenderSink, Scheduler};

const HIGHSCORE_FILE: &str = "dusty-dash-highscore.json";
const CONFIG_FILE: &str = "dusty-dash-config.json";

/// Stop the demo loop after this much wall clock even if the autopilot is
/// still alive
const MAX_DEMO_MS: f64 = 90_000.0;

/// Render sink that narrates the run into the log
struct LogSink {
    frames: u64,
}

impl RenderSink for LogSink {
    fn render(&mut self, state: &GameState) {
        self.frames += 1;
        if self.frames % 300 == 0 {
            log::debug!(
                "t={:.1}s score={} speed={:.1} obstacles={} coins={}",
                state.elapsed_ms / 1000.0,
                state.score,
                state.effective_speed(),
                state.obstacles.len(),
                state.coins.len()
            );
        }
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { .. }
            | GameEvent::PowerUpCollected { .. }
            | GameEvent::ShieldSave { .. } => log::info!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(name) => Config::from_preset_str(&name),
        None => Config::from_file(Path::new(CONFIG_FILE)).unwrap_or_default(),
    };
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0xD05E)
    });

    let mut scores = HighScores::load(Path::new(HIGHSCORE_FILE));

    let mut scheduler = Scheduler::new(config, seed);
    scheduler.set_autopilot(true);
    scheduler.start_game();

    let mut sink = LogSink { frames: 0 };
    let started = Instant::now();
    loop {
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        if now_ms >= MAX_DEMO_MS {
            log::info!("demo window over");
            break;
        }
        match scheduler.frame(now_ms, &mut sink) {
            ControlFlow::Continue(()) => std::thread::sleep(Duration::from_millis(FRAME_MS as u64)),
            ControlFlow::Break(()) => break,
        }
    }

    let state = scheduler.state();
    log::info!(
        "final: score {} over {:.1}s, best combo {} (seed {})",
        state.score,
        state.elapsed_ms / 1000.0,
        state.combo.best,
        state.seed
    );
    if scores.observe(state.score) {
        log::info!("new high score!");
        scores.save(Path::new(HIGHSCORE_FILE));
    }
}
