//! A single pooled bomb and its lifecycle state machine
//!
//! ```text
//! Dead --start_dropping--> Alive --explode--> Exploding --anim done--> Dead
//!                            |
//!                            +--kill (caught)--> Dead
//! ```
//!
//! Bombs never change state on their own except at the end of the explosion
//! animation. Landing on the target line only raises a signal; the manager
//! decides when to detonate.

use crate::animation::Animation;
use crate::geometry::{Rect, Vec2};
use crate::renderer::{Drawable, Renderer, SpriteId};
use crate::settings::Tuning;

use super::turn::TurnInfo;

/// Number of frames in the falling (fuse) animation
const FALL_FRAMES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BombState {
    /// Inert, not drawn, not collidable
    #[default]
    Dead,
    /// Falling (or frozen) and catchable
    Alive,
    /// Playing the explosion animation
    Exploding,
}

/// Notifications raised by [`Bomb::update`] for the owning manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombSignal {
    /// The bomb touched the target line. Raised once per drop.
    ReachedTarget,
    /// The explosion animation completed and the bomb is dead again
    ExplodeFinished,
}

#[derive(Debug, Clone)]
pub struct Bomb {
    position: Vec2,
    size: Vec2,
    hit_box: Rect,
    state: BombState,
    /// Fall target (top edge)
    max_y: f32,
    /// Fall speed (pixels/s)
    speed: f32,
    dropping: bool,
    reached_target: bool,
    fall_anim: Animation,
    explode_anim: Animation,
}

impl Bomb {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::splat(tuning.bomb_size);
        let fall_anim = Animation::strip(
            Vec2::ZERO,
            size,
            FALL_FRAMES,
            tuning.bomb_fall_frame_time,
            true,
        );
        let explode_anim = Animation::strip(
            Vec2::new(0.0, size.y),
            size,
            tuning.bomb_explode_frames,
            tuning.bomb_explode_frame_time,
            false,
        );

        Self {
            position: Vec2::ZERO,
            size,
            hit_box: Rect::from_pos_size(Vec2::ZERO, size),
            state: BombState::Dead,
            max_y: tuning.max_bomb_y(),
            speed: 0.0,
            dropping: false,
            reached_target: false,
            fall_anim,
            explode_anim,
        }
    }

    /// Force back to `Dead` and pick up the turn's fall speed
    pub fn reset(&mut self, turn_info: &TurnInfo) {
        self.state = BombState::Dead;
        self.speed = turn_info.bomb_speed;
        self.dropping = false;
        self.reached_target = false;
        self.fall_anim.start();
        self.explode_anim.start();
        self.set_position(Vec2::ZERO);
    }

    /// `Dead -> Alive`. Ignored in any other state.
    pub fn start_dropping(&mut self) {
        if self.state != BombState::Dead {
            return;
        }
        self.state = BombState::Alive;
        self.dropping = true;
        self.reached_target = false;
        self.fall_anim.start();
    }

    /// Freeze vertical motion without changing state
    pub fn stop_dropping(&mut self) {
        self.dropping = false;
    }

    /// `Alive -> Exploding`
    pub fn explode(&mut self) {
        if self.state != BombState::Alive {
            return;
        }
        self.state = BombState::Exploding;
        self.dropping = false;
        self.explode_anim.start();
    }

    /// `Alive -> Dead` (caught)
    pub fn kill(&mut self) {
        if self.state != BombState::Alive {
            return;
        }
        self.state = BombState::Dead;
        self.dropping = false;
    }

    pub fn update(&mut self, dt: f32) -> Option<BombSignal> {
        match self.state {
            BombState::Dead => None,
            BombState::Alive => {
                self.fall_anim.update(dt);
                if self.dropping {
                    let floor = self.max_y.max(self.position.y);
                    let y = (self.position.y + self.speed * dt).min(floor);
                    self.set_position(Vec2::new(self.position.x, y));
                }

                if !self.reached_target && self.position.y >= self.max_y {
                    self.reached_target = true;
                    return Some(BombSignal::ReachedTarget);
                }
                None
            }
            BombState::Exploding => {
                if self.explode_anim.update(dt) {
                    self.state = BombState::Dead;
                    return Some(BombSignal::ExplodeFinished);
                }
                None
            }
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.hit_box = Rect::from_pos_size(position, self.size);
    }

    pub fn set_movement_bounds(&mut self, max_y: f32) {
        self.max_y = max_y;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn hit_box(&self) -> Rect {
        self.hit_box
    }

    pub fn state(&self) -> BombState {
        self.state
    }

    pub fn is_dropping(&self) -> bool {
        self.dropping
    }
}

impl Drawable for Bomb {
    fn draw(&self, renderer: &mut dyn Renderer) {
        let (sprite, anim) = match self.state {
            BombState::Dead => return,
            BombState::Alive => (SpriteId::BombFalling, &self.fall_anim),
            BombState::Exploding => (SpriteId::BombExploding, &self.explode_anim),
        };
        if let Some(frame) = anim.current_frame() {
            renderer.draw_sprite(sprite, frame, self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameRecorder;

    fn test_bomb(max_y: f32) -> Bomb {
        let mut bomb = Bomb::new(&Tuning::default());
        bomb.reset(&TurnInfo {
            bomb_speed: 100.0,
            ..Default::default()
        });
        bomb.set_movement_bounds(max_y);
        bomb
    }

    #[test]
    fn test_new_bomb_is_dead_and_inert() {
        let mut bomb = test_bomb(100.0);
        assert_eq!(bomb.state(), BombState::Dead);
        assert_eq!(bomb.update(1.0), None);
        assert_eq!(bomb.position(), Vec2::ZERO);
    }

    #[test]
    fn test_falls_and_signals_target_once() {
        let mut bomb = test_bomb(100.0);
        bomb.set_position(Vec2::new(20.0, 0.0));
        bomb.start_dropping();
        assert_eq!(bomb.state(), BombState::Alive);

        assert_eq!(bomb.update(0.5), None);
        assert!((bomb.position().y - 50.0).abs() < 1e-4);

        assert_eq!(bomb.update(0.5), Some(BombSignal::ReachedTarget));
        // Stays alive and does not signal again
        assert_eq!(bomb.state(), BombState::Alive);
        assert_eq!(bomb.update(0.5), None);
        assert!(bomb.position().y <= 100.0);
    }

    #[test]
    fn test_hit_box_tracks_position() {
        let mut bomb = test_bomb(100.0);
        bomb.set_position(Vec2::new(5.0, 7.0));
        assert_eq!(bomb.hit_box().x, 5.0);
        assert_eq!(bomb.hit_box().y, 7.0);

        bomb.start_dropping();
        bomb.update(0.1);
        assert_eq!(bomb.hit_box().y, bomb.position().y);
    }

    #[test]
    fn test_stop_dropping_freezes() {
        let mut bomb = test_bomb(100.0);
        bomb.start_dropping();
        bomb.update(0.1);
        let y = bomb.position().y;

        bomb.stop_dropping();
        bomb.update(1.0);
        assert_eq!(bomb.position().y, y);
        assert_eq!(bomb.state(), BombState::Alive);
    }

    #[test]
    fn test_explosion_finishes_dead() {
        let mut bomb = test_bomb(100.0);
        bomb.start_dropping();
        bomb.explode();
        assert_eq!(bomb.state(), BombState::Exploding);

        let mut signals = Vec::new();
        for _ in 0..100 {
            if let Some(signal) = bomb.update(0.05) {
                signals.push(signal);
            }
        }
        assert_eq!(signals, vec![BombSignal::ExplodeFinished]);
        assert_eq!(bomb.state(), BombState::Dead);
    }

    #[test]
    fn test_frameless_explosion_still_finishes() {
        let tuning = Tuning {
            bomb_explode_frames: 0,
            ..Tuning::default()
        };
        let mut bomb = Bomb::new(&tuning);
        bomb.start_dropping();
        bomb.explode();

        assert_eq!(bomb.update(0.05), Some(BombSignal::ExplodeFinished));
        assert_eq!(bomb.state(), BombState::Dead);

        // Nothing to draw while exploding without frames
        let mut recorder = FrameRecorder::new();
        bomb.start_dropping();
        bomb.explode();
        bomb.draw(&mut recorder);
        assert!(recorder.calls().is_empty());
        assert_eq!(bomb.update(0.0), Some(BombSignal::ExplodeFinished));
    }

    #[test]
    fn test_kill_only_from_alive() {
        let mut bomb = test_bomb(100.0);
        bomb.kill();
        assert_eq!(bomb.state(), BombState::Dead);

        bomb.start_dropping();
        bomb.explode();
        bomb.kill();
        assert_eq!(bomb.state(), BombState::Exploding);
    }

    #[test]
    fn test_explode_requires_alive() {
        let mut bomb = test_bomb(100.0);
        bomb.explode();
        assert_eq!(bomb.state(), BombState::Dead);
    }

    #[test]
    fn test_reset_forces_dead() {
        let mut bomb = test_bomb(100.0);
        bomb.set_position(Vec2::new(30.0, 30.0));
        bomb.start_dropping();
        bomb.reset(&TurnInfo::default());
        assert_eq!(bomb.state(), BombState::Dead);
        assert_eq!(bomb.position(), Vec2::ZERO);
        assert!(!bomb.is_dropping());
    }

    #[test]
    fn test_draws_only_when_not_dead() {
        let mut bomb = test_bomb(100.0);
        let mut recorder = FrameRecorder::new();
        bomb.draw(&mut recorder);
        assert!(recorder.calls().is_empty());

        bomb.start_dropping();
        bomb.draw(&mut recorder);
        assert_eq!(recorder.count(SpriteId::BombFalling), 1);

        bomb.explode();
        bomb.draw(&mut recorder);
        assert_eq!(recorder.count(SpriteId::BombExploding), 1);
    }
}
