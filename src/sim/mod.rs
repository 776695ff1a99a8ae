//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only, time is passed in by the host
//! - Seeded RNG only
//! - Stable iteration order (column-major over the enemy grid)
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod stage;
pub mod state;
pub mod tick;

pub use anim::{Animation, Transition, WipeDirection, ease_in_quad, ease_out_cubic};
pub use collision::{Borders, Rect, overlaps};
pub use stage::{Game, ScoreView};
pub use state::{
    Barrier, BarrierTier, Bullet, EnemyGrid, MatchState, Ship, Side, Stage, enemy_sprite_frame,
};
pub use tick::{MatchOutcome, TickInput, tick};
