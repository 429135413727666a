//! High score persistence
//!
//! A single best-score integer, kept in a small JSON file. Read once at
//! startup and rewritten whenever a run surpasses it; a missing or corrupt
//! file just means starting fresh.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Best score seen so far
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub best: u64,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Would this score replace the stored best?
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns whether the best was beaten.
    pub fn observe(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from `path`, degrading to zero on any problem
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded high score {} from {}", scores.best, path.display());
                    scores
                }
                Err(err) => {
                    log::warn!("corrupt high-score file {}: {err}", path.display());
                    Self::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no high-score file yet, starting fresh");
                Self::new()
            }
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                Self::new()
            }
        }
    }

    /// Write to `path`. Failure is logged, not fatal - losing a high score
    /// must never take the game down with it.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize high score: {err}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("high score {} saved to {}", self.best, path.display()),
            Err(err) => log::warn!("could not write {}: {err}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dusty-dash-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_observe_tracks_the_best() {
        let mut scores = HighScores::new();
        assert!(!scores.observe(0));
        assert!(scores.observe(100));
        assert!(!scores.observe(100));
        assert!(!scores.observe(40));
        assert!(scores.observe(250));
        assert_eq!(scores.best, 250);
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        let scores = HighScores::load(Path::new("/definitely/not/here.json"));
        assert_eq!(scores.best, 0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("roundtrip");
        let mut scores = HighScores::new();
        scores.observe(1234);
        scores.save(&path);

        let loaded = HighScores::load(&path);
        assert_eq!(loaded.best, 1234);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_degrades_to_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let scores = HighScores::load(&path);
        assert_eq!(scores.best, 0);
        let _ = fs::remove_file(&path);
    }
}
