//! Invaders - match core of a Space Invaders arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, stage machine)
//! - `highscores`: Recent and top-5 score ledger persisted to flat files
//! - `tuning`: Data-driven difficulty × level balance
//! - `settings`: JSON configuration
//! - `platform`, `audio`, `renderer`: contracts for the host's clock,
//!   keyboard, sound and drawing services

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{InvadersError, Result};
pub use highscores::{ScoreEntry, ScoreLedger};
pub use settings::{LossScorePolicy, Settings};
pub use tuning::{Difficulty, RoundParams, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal tick length (60 Hz frame clock)
    pub const TICK_DT: f64 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
    pub const BORDER_THICKNESS: f32 = 10.0;

    /// Ship sprites are square
    pub const SHIP_SIZE: f32 = 32.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const PLAYER_BULLET_SPEED: f32 = 5.0;

    /// Player movement in pixels per tick
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Ticks of damage immunity after a hit
    pub const IMMUNITY_TICKS: u32 = 90;

    /// Enemy grid capacity and layout
    pub const GRID_COLUMNS: usize = 10;
    pub const GRID_ROWS: usize = 5;
    pub const ENEMY_SPACING_X: f32 = 48.0;
    pub const ENEMY_SPACING_Y: f32 = 40.0;
    pub const ENEMY_TOP: f32 = 40.0;

    /// Barrier row
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 64.0;
    pub const BARRIER_HEIGHT: f32 = 24.0;
    /// Gap between the top of the player and the bottom of the barriers
    pub const BARRIER_CLEARANCE: f32 = 80.0;

    /// Nickname length entered on the start screen
    pub const NAME_LEN: usize = 3;

    /// Player enter/exit animation durations (seconds)
    pub const ENTER_DURATION: f64 = 1.0;
    pub const EXIT_DURATION: f64 = 1.2;
    /// Enemy sprite frames swap this often (seconds)
    pub const SPRITE_FRAME_SECS: f64 = 1.0;
}
