//! Rendering seam
//!
//! Gameplay objects never talk to a graphics API directly. They describe
//! what to draw through [`Renderer`], and the platform layer decides how.

use crate::geometry::{Rect, Vec2};

/// Sprite sheets the gameplay core knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Paddle,
    BombFalling,
    BombExploding,
}

pub trait Renderer {
    /// Draw `frame` of the `sprite` sheet with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: SpriteId, frame: Rect, pos: Vec2);
}

/// Objects advanced once per frame with the elapsed time in seconds
pub trait Updatable {
    fn update(&mut self, dt: f32);
}

/// Objects drawn once per frame, after all updates
pub trait Drawable {
    fn draw(&self, renderer: &mut dyn Renderer);
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub sprite: SpriteId,
    pub frame: Rect,
    pub pos: Vec2,
}

/// Renderer that records draw calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct FrameRecorder {
    calls: Vec<DrawCall>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn count(&self, sprite: SpriteId) -> usize {
        self.calls.iter().filter(|c| c.sprite == sprite).count()
    }

    /// Drop the calls from the previous frame
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for FrameRecorder {
    fn draw_sprite(&mut self, sprite: SpriteId, frame: Rect, pos: Vec2) {
        self.calls.push(DrawCall { sprite, frame, pos });
    }
}
