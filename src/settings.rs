//! Game settings and preferences
//!
//! Persisted as JSON next to the score files. Every field has a default, so a
//! partial or missing file still yields a playable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::highscores::LedgerPaths;
use crate::sim::anim::WipeDirection;
use crate::tuning::Tuning;

/// What score gets written to the ledger when the player loses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LossScorePolicy {
    /// A lost run records 0
    #[default]
    ResetToZero,
    /// A lost run records the points accumulated so far
    KeepAccumulated,
}

impl LossScorePolicy {
    /// Score to record for a lost run that had accumulated `score`
    pub fn recorded_score(&self, score: u64) -> u64 {
        match self {
            LossScorePolicy::ResetToZero => 0,
            LossScorePolicy::KeepAccumulated => score,
        }
    }
}

/// Everything the game reads from `invaders.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Score files
    pub ledger: LedgerPaths,
    pub loss_score_policy: LossScorePolicy,

    // === Transitions ===
    pub wipe_direction: WipeDirection,
    /// Full wipe length in seconds (the stage switches at half)
    pub transition_duration: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// RNG seed for enemy fire staggering
    pub seed: u64,

    /// Difficulty × level balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger: LedgerPaths::default(),
            loss_score_policy: LossScorePolicy::ResetToZero,

            wipe_direction: WipeDirection::LeftToRight,
            transition_duration: 0.8,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: 0x5eed,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings file {} ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "loss_score_policy": "KeepAccumulated", "seed": 9 }"#)
                .unwrap();
        assert_eq!(settings.loss_score_policy, LossScorePolicy::KeepAccumulated);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.tuning, Tuning::default());
        assert_eq!(settings.ledger, LedgerPaths::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings.wipe_direction, WipeDirection::LeftToRight);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invaders.json");
        let mut settings = Settings::default();
        settings.wipe_direction = WipeDirection::BottomToTop;
        settings.tuning.max_level = 2;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.wipe_direction, WipeDirection::BottomToTop);
        assert_eq!(loaded.tuning.max_level, 2);
    }

    #[test]
    fn test_loss_policy() {
        assert_eq!(LossScorePolicy::ResetToZero.recorded_score(700), 0);
        assert_eq!(LossScorePolicy::KeepAccumulated.recorded_score(700), 700);
    }
}
