//! The player's paddle
//!
//! Drawn as a vertical stack of layers, one per remaining life. The hit box
//! covers the visible stack.

use crate::animation::Animation;
use crate::geometry::{Rect, Vec2};
use crate::input::InputSource;
use crate::renderer::{Drawable, Renderer, SpriteId, Updatable};
use crate::settings::Tuning;

const LAYER_FRAMES: usize = 3;

/// One stacked paddle layer with its own animation
#[derive(Debug, Clone)]
struct Layer {
    animation: Animation,
    y_offset: f32,
}

pub struct Paddle {
    base_position: Vec2,
    speed: Vec2,
    size: Vec2,
    layer_spacing: f32,
    hit_box: Rect,
    lives: u32,
    min_x: f32,
    max_x: f32,
    layers: Vec<Layer>,
    input: Box<dyn InputSource>,
}

impl Paddle {
    pub fn new(tuning: &Tuning, input: Box<dyn InputSource>) -> Self {
        let size = Vec2::new(tuning.paddle_width, tuning.paddle_layer_height);
        let layers = (0..tuning.paddle_lives)
            .map(|i| {
                let mut animation = Animation::strip(
                    Vec2::new(0.0, size.y * i as f32),
                    size,
                    LAYER_FRAMES,
                    tuning.paddle_frame_time,
                    true,
                );
                animation.start();
                Layer {
                    animation,
                    y_offset: tuning.paddle_layer_spacing * i as f32,
                }
            })
            .collect();

        let mut paddle = Self {
            base_position: Vec2::ZERO,
            speed: Vec2::new(tuning.paddle_speed, 0.0),
            size,
            layer_spacing: tuning.paddle_layer_spacing,
            hit_box: Rect::ZERO,
            lives: tuning.paddle_lives,
            min_x: f32::NEG_INFINITY,
            max_x: f32::INFINITY,
            layers,
            input,
        };
        paddle.update_hit_box();
        paddle
    }

    pub fn set_initial_position(&mut self, x: f32, y: f32) {
        self.base_position = Vec2::new(x, y);
        self.clamp_to_bounds();
        self.update_hit_box();
    }

    /// Constrain the paddle's left edge to `[min, max]`. Expects `min <= max`.
    pub fn set_movement_bounds(&mut self, min: f32, max: f32) {
        self.min_x = min;
        self.max_x = max;
        self.clamp_to_bounds();
        self.update_hit_box();
    }

    pub fn position(&self) -> Vec2 {
        self.base_position
    }

    pub fn hit_box(&self) -> Rect {
        self.hit_box
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Lose one life. Position is unchanged.
    pub fn kill(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.update_hit_box();
    }

    /// Restore lives (new game)
    pub fn revive(&mut self, lives: u32) {
        self.lives = lives;
        self.update_hit_box();
    }

    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.hit_box.intersects(rect)
    }

    fn handle_input(&mut self, dt: f32) {
        let axis = self.input.direction().axis();
        self.base_position.x += axis * self.speed.x * dt;
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        // Not f32::clamp: inverted bounds must not panic
        self.base_position.x = self.base_position.x.max(self.min_x).min(self.max_x);
    }

    fn update_hit_box(&mut self) {
        let height = match self.lives {
            0 => 0.0,
            n => self.layer_spacing * (n - 1) as f32 + self.size.y,
        };
        self.hit_box = Rect::new(self.base_position.x, self.base_position.y, self.size.x, height);
    }

    fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().take(self.lives as usize)
    }
}

impl Updatable for Paddle {
    fn update(&mut self, dt: f32) {
        self.handle_input(dt);
        for layer in &mut self.layers {
            layer.animation.update(dt);
        }
        self.update_hit_box();
    }
}

impl Drawable for Paddle {
    fn draw(&self, renderer: &mut dyn Renderer) {
        for layer in self.visible_layers() {
            if let Some(frame) = layer.animation.current_frame() {
                let pos = self.base_position + Vec2::new(0.0, layer.y_offset);
                renderer.draw_sprite(SpriteId::Paddle, frame, pos);
            }
        }
    }
}
