//! Rendering contract
//!
//! The host owns the window, textures and font. The game only needs filled
//! rectangles, sprite frames and measurable text, which [`Canvas`] exposes.
//! [`scene::draw_frame`] decides what goes on screen for each stage.

pub mod scene;

pub use scene::draw_frame;

use crate::sim::Rect;

/// RGBA, 0.0 - 1.0 per channel
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const GREY: Color = [0.5, 0.5, 0.5, 1.0];
pub const GREEN: Color = [0.2, 0.9, 0.3, 1.0];
pub const YELLOW: Color = [1.0, 0.85, 0.2, 1.0];
pub const ORANGE: Color = [1.0, 0.55, 0.1, 1.0];
pub const RED: Color = [0.95, 0.2, 0.2, 1.0];

/// Scale a color's alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Sprite sheets the host has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    /// Two-frame flip-book
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

/// Drawing surface provided by the host
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw frame `frame` of `sprite` stretched into `dest`
    fn draw_sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect, tint: Color);
    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    /// Width in pixels `text` would occupy at `size`
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

/// Canvas that draws nothing and logs every call at trace level. Text is
/// measured as a fixed-pitch font.
#[derive(Debug, Default)]
pub struct LogCanvas {
    pub calls: usize,
}

impl Canvas for LogCanvas {
    fn clear(&mut self, _color: Color) {
        self.calls += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls += 1;
        log::trace!("fill {:?} {:?}", rect, color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect, _tint: Color) {
        self.calls += 1;
        log::trace!("sprite {:?}[{}] at {:?}", sprite, frame, dest);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Color) {
        self.calls += 1;
        log::trace!("text {:?} at ({}, {})", text, x, y);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
}
