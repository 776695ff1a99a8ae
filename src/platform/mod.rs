//! Platform abstraction layer
//!
//! The host supplies a keyboard and a clock. This module turns them into
//! per-tick [`TickInput`] and fixed-step timestamps for the simulation.

use crate::consts::TICK_DT;
use crate::sim::TickInput;

/// Upper bound on simulation steps run for one host frame
pub const MAX_SUBSTEPS: u32 = 8;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Enter,
    Backspace,
    Tab,
}

/// Keyboard state as reported by the host
pub trait Keyboard {
    /// Key currently held
    fn is_down(&self, key: Key) -> bool;
    /// Key went down since the previous poll
    fn is_pressed(&self, key: Key) -> bool;
    /// Letter typed since the previous poll, if any
    fn letter_pressed(&self) -> Option<char>;
}

/// Build the input for one tick. Movement and fire are level-triggered,
/// menu keys are edge-triggered.
pub fn poll_input(keyboard: &impl Keyboard) -> TickInput {
    TickInput {
        left: keyboard.is_down(Key::Left),
        right: keyboard.is_down(Key::Right),
        fire: keyboard.is_down(Key::Fire),
        confirm: keyboard.is_pressed(Key::Enter),
        cancel: keyboard.is_pressed(Key::Backspace),
        difficulty_up: keyboard.is_pressed(Key::Up),
        difficulty_down: keyboard.is_pressed(Key::Down),
        toggle_scores: keyboard.is_pressed(Key::Tab),
        letter: keyboard.letter_pressed().filter(char::is_ascii_alphabetic),
    }
}

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Accumulates host frame time and hands out whole simulation steps
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    /// Simulation time of the last step taken
    time: f64,
    accumulator: f64,
    step: f64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self {
            time: 0.0,
            accumulator: 0.0,
            step,
        }
    }

    /// Feed one host frame of `dt` seconds. Returns how many steps to run;
    /// long stalls are clamped to [`MAX_SUBSTEPS`] and the backlog dropped.
    pub fn feed(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of frame backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Advance simulation time by one step and return it
    pub fn advance(&mut self) -> f64 {
        self.time += self.step;
        self.time
    }
}

impl Clock for FixedStepClock {
    fn now(&self) -> f64 {
        self.time
    }
}
