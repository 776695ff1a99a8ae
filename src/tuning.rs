//! Data-driven game balance
//!
//! Every difficulty-scaled number lives in one table keyed by
//! difficulty × level. The table is plain data so it can be tweaked from the
//! settings file without touching simulation code.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_COLUMNS, GRID_ROWS};

/// Difficulty chosen on the mode-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::Extreme];

    /// 0-based rank, also used for the win bonus
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Normal => 0,
            Difficulty::Hard => 1,
            Difficulty::Extreme => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
            Difficulty::Extreme => "EXTREME",
        }
    }

    /// One step harder, or `None` at the top
    pub fn harder(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// One step easier, or `None` at the bottom
    pub fn easier(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Points awarded for clearing a round
    pub fn win_bonus(&self) -> u64 {
        100 * (self.index() as u64 + 1)
    }
}

/// Base numbers for one difficulty at level 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRow {
    /// Enemy horizontal speed (pixels/tick)
    pub enemy_speed: f32,
    /// Enemy bullet speed (pixels/tick)
    pub enemy_bullet_speed: f32,
    /// Seconds between shots of a single enemy
    pub enemy_fire_cooldown: f64,
    pub player_hp: u32,
    pub base_columns: usize,
    pub base_rows: usize,
    pub barrier_hp: u32,
}

/// Parameters for one round, derived from the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundParams {
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_fire_cooldown: f64,
    pub player_hp: u32,
    pub columns: usize,
    pub rows: usize,
    pub barrier_hp: u32,
}

/// Difficulty × level balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// One row per difficulty, in `Difficulty::ALL` order
    pub rows: [DifficultyRow; 3],
    /// Speed multiplier gained per level past the first
    pub level_step: f32,
    /// Cap on the level multiplier (diminishing returns)
    pub max_multiplier: f32,
    /// Winning this level ends the run
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rows: [
                DifficultyRow {
                    enemy_speed: 2.0,
                    enemy_bullet_speed: 5.0,
                    enemy_fire_cooldown: 3.0,
                    player_hp: 3,
                    base_columns: 5,
                    base_rows: 2,
                    barrier_hp: 6,
                },
                DifficultyRow {
                    enemy_speed: 3.0,
                    enemy_bullet_speed: 6.5,
                    enemy_fire_cooldown: 2.0,
                    player_hp: 2,
                    base_columns: 6,
                    base_rows: 3,
                    barrier_hp: 4,
                },
                DifficultyRow {
                    enemy_speed: 4.0,
                    enemy_bullet_speed: 8.0,
                    enemy_fire_cooldown: 1.2,
                    player_hp: 1,
                    base_columns: 7,
                    base_rows: 3,
                    barrier_hp: 3,
                },
            ],
            level_step: 0.1,
            max_multiplier: 1.5,
            max_level: 5,
        }
    }
}

impl Tuning {
    pub fn row(&self, difficulty: Difficulty) -> &DifficultyRow {
        &self.rows[difficulty.index()]
    }

    /// Level multiplier, capped (level is 1-based)
    pub fn level_multiplier(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (1.0 + self.level_step * steps).min(self.max_multiplier)
    }

    /// Derive the parameters for a round
    pub fn params(&self, difficulty: Difficulty, level: u32) -> RoundParams {
        let row = self.row(difficulty);
        let mult = self.level_multiplier(level);
        let extra = level.saturating_sub(1) as usize;

        RoundParams {
            enemy_speed: row.enemy_speed * mult,
            enemy_bullet_speed: row.enemy_bullet_speed * mult,
            enemy_fire_cooldown: row.enemy_fire_cooldown / f64::from(mult),
            player_hp: row.player_hp.max(1),
            columns: (row.base_columns + extra).clamp(1, GRID_COLUMNS),
            rows: (row.base_rows + extra / 2).clamp(1, GRID_ROWS),
            barrier_hp: row.barrier_hp,
        }
    }

    pub fn is_final_level(&self, level: u32) -> bool {
        level >= self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_is_monotonic() {
        let tuning = Tuning::default();
        for pair in Difficulty::ALL.windows(2) {
            let easy = tuning.params(pair[0], 1);
            let hard = tuning.params(pair[1], 1);
            assert!(hard.enemy_speed > easy.enemy_speed);
            assert!(hard.enemy_bullet_speed > easy.enemy_bullet_speed);
            assert!(hard.enemy_fire_cooldown < easy.enemy_fire_cooldown);
            assert!(hard.player_hp < easy.player_hp);
        }
    }

    #[test]
    fn test_level_multiplier_is_capped() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_multiplier(1), 1.0);
        assert!(tuning.level_multiplier(3) > tuning.level_multiplier(2));
        assert_eq!(tuning.level_multiplier(50), tuning.max_multiplier);
    }

    #[test]
    fn test_grid_extent_grows_and_caps() {
        let tuning = Tuning::default();
        let first = tuning.params(Difficulty::Normal, 1);
        let third = tuning.params(Difficulty::Normal, 3);
        assert_eq!((first.columns, first.rows), (5, 2));
        assert_eq!((third.columns, third.rows), (7, 3));

        let huge = tuning.params(Difficulty::Extreme, 40);
        assert_eq!(huge.columns, GRID_COLUMNS);
        assert_eq!(huge.rows, GRID_ROWS);
    }

    #[test]
    fn test_difficulty_steps() {
        assert_eq!(Difficulty::Normal.harder(), Some(Difficulty::Hard));
        assert_eq!(Difficulty::Extreme.harder(), None);
        assert_eq!(Difficulty::Normal.easier(), None);
        assert_eq!(Difficulty::Normal.win_bonus(), 100);
        assert_eq!(Difficulty::Extreme.win_bonus(), 300);
    }
}
