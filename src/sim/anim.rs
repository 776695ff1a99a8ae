//! Time-keyed animations and stage transitions
//!
//! Animations are evaluated from absolute timestamps every tick, so nothing
//! is ever awaited. Reading an animation never mutates it: `is_expired` is a
//! pure query and `advance` is the single place the running flag clears.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Stage;

/// A timed progress value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Timestamp (seconds) the animation was started at
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
    pub running: bool,
}

impl Animation {
    pub fn new(duration: f64) -> Self {
        Self {
            start: 0.0,
            duration,
            running: false,
        }
    }

    /// Record `now` as the start and mark running
    pub fn start(&mut self, now: f64) {
        self.start = now;
        self.running = true;
    }

    /// Seconds since start (never negative)
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start).max(0.0)
    }

    /// Normalized progress in `[0, 1]`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed(now) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Clear the running flag once the duration has passed
    pub fn advance(&mut self, now: f64) {
        if self.running && self.is_expired(now) {
            self.running = false;
        }
    }
}

/// Decelerating curve: fast start, soft landing
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Accelerating curve: slow start, fast finish
pub fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Edge the wipe enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WipeDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

/// Directional wipe that switches stage at its halfway point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub anim: Animation,
    pub target: Stage,
    pub direction: WipeDirection,
    /// Whether the stage switch has already fired
    pub committed: bool,
}

impl Transition {
    /// Create and start a transition at `now`
    pub fn begin(target: Stage, direction: WipeDirection, duration: f64, now: f64) -> Self {
        let mut anim = Animation::new(duration);
        anim.start(now);
        Self {
            anim,
            target,
            direction,
            committed: false,
        }
    }

    /// Advance one tick. Returns the target stage exactly once, on the first
    /// call where at least half the duration has elapsed.
    pub fn advance(&mut self, now: f64) -> Option<Stage> {
        self.anim.advance(now);
        if !self.committed && self.anim.elapsed(now) >= self.anim.duration / 2.0 {
            self.committed = true;
            return Some(self.target);
        }
        None
    }

    /// Fully played out and safe to drop
    pub fn is_finished(&self) -> bool {
        self.committed && !self.anim.running
    }

    /// Wipe rectangle for a `width × height` screen. Covers the whole screen
    /// at 50% and has slid off the opposite edge by 100%.
    pub fn wipe_rect(&self, now: f64, width: f32, height: f32) -> Rect {
        let p = self.anim.progress(now);
        let offset = match self.direction {
            WipeDirection::LeftToRight => Vec2::new(width * (2.0 * p - 1.0), 0.0),
            WipeDirection::RightToLeft => Vec2::new(width * (1.0 - 2.0 * p), 0.0),
            WipeDirection::TopToBottom => Vec2::new(0.0, height * (2.0 * p - 1.0)),
            WipeDirection::BottomToTop => Vec2::new(0.0, height * (1.0 - 2.0 * p)),
        };
        Rect::new(0.0, 0.0, width, height).translate(offset)
    }
}
