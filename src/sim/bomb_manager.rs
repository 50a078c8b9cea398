//! Bomb pool and turn orchestration
//!
//! The manager owns a pool of [`Bomb`]s that only ever grows. Each frame it
//! forwards `update`/`draw` to every pooled bomb, resolves catches against
//! the paddle and, once a bomb lands, runs the explosion cascade: all bombs
//! freeze and detonate one at a time, lowest (closest to the target line)
//! first.
//!
//! Bomb signals are handled inline, right after the bomb that raised them is
//! updated, so everything triggered by one bomb completes before the next
//! pooled bomb is touched.

use crate::audio::{PlayMode, SoundEffect, SoundService};
use crate::geometry::Vec2;
use crate::renderer::{Drawable, Renderer, Updatable};
use crate::settings::Tuning;

use super::bomb::{Bomb, BombSignal, BombState};
use super::events::{BombEvent, EventHandlers};
use super::paddle::Paddle;
use super::turn::TurnInfo;

pub struct BombManager<S: SoundService> {
    bombs: Vec<Bomb>,
    /// Template for bombs added when the pool grows
    tuning: Tuning,
    turn_info: TurnInfo,
    /// Bombs dropped this turn and still falling (not caught, not cascading)
    bombs_in_play: u32,
    /// Bombs queued for detonation in the running cascade
    bombs_exploding: u32,
    bombs_caught: u32,
    is_exploding_bombs: bool,
    max_bomb_y: f32,
    is_playing_dropping_effect: bool,
    handlers: EventHandlers,
    sound: S,
}

impl<S: SoundService> BombManager<S> {
    pub fn new(tuning: &Tuning, sound: S) -> Self {
        let mut manager = Self {
            bombs: Vec::new(),
            tuning: tuning.clone(),
            turn_info: TurnInfo::with_bombs(0),
            bombs_in_play: 0,
            bombs_exploding: 0,
            bombs_caught: 0,
            is_exploding_bombs: false,
            max_bomb_y: tuning.max_bomb_y(),
            is_playing_dropping_effect: false,
            handlers: EventHandlers::new(),
            sound,
        };
        manager.init_sounds();
        manager
    }

    // === Actions ===

    /// Start a new turn. Grows the pool to at least `bombs_count` and puts
    /// every pooled bomb back to `Dead`.
    pub fn reset(&mut self, turn_info: TurnInfo) {
        self.turn_info = turn_info;
        self.bombs_in_play = 0;
        self.bombs_exploding = 0;
        self.bombs_caught = 0;
        self.is_exploding_bombs = false;

        if self.is_playing_dropping_effect {
            self.stop_dropping_effect();
        }

        while self.bombs.len() < turn_info.bombs_count as usize {
            self.create_bomb();
        }

        self.reset_all_bombs();
        log::info!(
            "Turn reset: {} bombs (pool {})",
            turn_info.bombs_count,
            self.bombs.len()
        );
    }

    /// Drop the first dead pooled bomb at `pos`. Silently ignored when the
    /// pool is exhausted or the cascade is running.
    pub fn drop_bomb_at(&mut self, pos: Vec2) {
        if self.is_exploding_bombs {
            log::debug!("Drop at {:?} ignored during explosion cascade", pos);
            return;
        }

        self.play_dropping_effect();

        let Some(index) = self.find_first(BombState::Dead) else {
            log::warn!("No dead bomb available to drop at {:?}", pos);
            return;
        };

        let bomb = &mut self.bombs[index];
        bomb.set_position(pos);
        bomb.start_dropping();
        self.bombs_in_play += 1;
    }

    /// Catch every alive bomb overlapping the paddle. Disabled during the
    /// cascade.
    pub fn check_collision(&mut self, paddle: &Paddle) {
        if self.is_exploding_bombs {
            return;
        }

        for index in 0..self.bombs.len() {
            let bomb = &mut self.bombs[index];
            if bomb.state() != BombState::Alive {
                continue;
            }
            if !paddle.check_collision(&bomb.hit_box()) {
                continue;
            }

            bomb.kill();
            self.bombs_caught += 1;
            self.bombs_in_play = self.bombs_in_play.saturating_sub(1);

            self.handlers.emit(BombEvent::BombCaught);
            self.play_caught_effect();

            if self.bombs_caught == self.turn_info.bombs_count {
                self.stop_dropping_effect();
                self.handlers.emit(BombEvent::AllBombsCaught);
            }
        }
    }

    // === Setters ===

    /// Fall target shared by every pooled bomb, current and future
    pub fn set_bomb_movement_bounds(&mut self, max_y: f32) {
        self.max_bomb_y = max_y;
        for bomb in &mut self.bombs {
            bomb.set_movement_bounds(max_y);
        }
    }

    /// Register the handler for `event`, replacing any previous one
    pub fn on(&mut self, event: BombEvent, handler: impl FnMut() + 'static) {
        self.handlers.set(event, handler);
    }

    pub fn set_on_bomb_caught(&mut self, handler: impl FnMut() + 'static) {
        self.on(BombEvent::BombCaught, handler);
    }

    pub fn set_on_all_bombs_caught(&mut self, handler: impl FnMut() + 'static) {
        self.on(BombEvent::AllBombsCaught, handler);
    }

    pub fn set_on_bomb_reach_target(&mut self, handler: impl FnMut() + 'static) {
        self.on(BombEvent::BombReachTarget, handler);
    }

    pub fn set_on_bomb_explode(&mut self, handler: impl FnMut() + 'static) {
        self.on(BombEvent::BombExplode, handler);
    }

    pub fn set_on_all_bombs_exploded(&mut self, handler: impl FnMut() + 'static) {
        self.on(BombEvent::AllBombsExploded, handler);
    }

    // === Getters ===

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn pool_size(&self) -> usize {
        self.bombs.len()
    }

    pub fn turn_info(&self) -> TurnInfo {
        self.turn_info
    }

    pub fn bombs_in_play(&self) -> u32 {
        self.bombs_in_play
    }

    pub fn bombs_exploding(&self) -> u32 {
        self.bombs_exploding
    }

    pub fn bombs_caught(&self) -> u32 {
        self.bombs_caught
    }

    pub fn is_exploding_bombs(&self) -> bool {
        self.is_exploding_bombs
    }

    pub fn max_bomb_y(&self) -> f32 {
        self.max_bomb_y
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    // === Pool ===

    fn create_bomb(&mut self) {
        let mut bomb = Bomb::new(&self.tuning);
        bomb.set_movement_bounds(self.max_bomb_y);
        self.bombs.push(bomb);
    }

    fn reset_all_bombs(&mut self) {
        for bomb in &mut self.bombs {
            bomb.reset(&self.turn_info);
        }
    }

    fn find_first(&self, state: BombState) -> Option<usize> {
        self.bombs.iter().position(|b| b.state() == state)
    }

    fn stop_all_bombs(&mut self) {
        self.stop_dropping_effect();
        for bomb in &mut self.bombs {
            bomb.stop_dropping();
        }
    }

    /// Alive bomb with the largest y. Ties go to the earliest in pool order.
    fn lowest_alive_bomb(&self) -> Option<usize> {
        let mut lowest: Option<usize> = None;
        for (index, bomb) in self.bombs.iter().enumerate() {
            if bomb.state() != BombState::Alive {
                continue;
            }
            match lowest {
                Some(current) if bomb.position().y <= self.bombs[current].position().y => {}
                _ => lowest = Some(index),
            }
        }
        lowest
    }

    fn explode_next_bomb(&mut self) {
        let Some(index) = self.lowest_alive_bomb() else {
            return;
        };

        self.bombs[index].explode();
        self.play_explode_effect();
        self.handlers.emit(BombEvent::BombExplode);
    }

    // === Bomb signals ===

    fn handle_signal(&mut self, signal: BombSignal) {
        match signal {
            BombSignal::ReachedTarget => self.on_bomb_reach_target(),
            BombSignal::ExplodeFinished => self.on_bomb_explode_finished(),
        }
    }

    fn on_bomb_reach_target(&mut self) {
        if self.is_exploding_bombs {
            return;
        }
        log::debug!("Bomb reached target");

        self.handlers.emit(BombEvent::BombReachTarget);

        self.is_exploding_bombs = true;
        self.stop_all_bombs();

        // Every falling bomb is now queued for detonation
        self.bombs_exploding = self
            .bombs
            .iter()
            .filter(|b| b.state() == BombState::Alive)
            .count() as u32;
        self.bombs_in_play = 0;

        self.explode_next_bomb();
    }

    fn on_bomb_explode_finished(&mut self) {
        log::debug!("Bomb explode finished");

        self.bombs_exploding = self.bombs_exploding.saturating_sub(1);
        if self.bombs_exploding == 0 {
            self.handlers.emit(BombEvent::AllBombsExploded);
        } else {
            self.explode_next_bomb();
        }
    }

    // === Sound effects ===

    fn init_sounds(&mut self) {
        for effect in SoundEffect::all() {
            self.sound.load_effect(&effect.file_name());
        }
    }

    fn play_dropping_effect(&mut self) {
        if self.is_playing_dropping_effect {
            return;
        }
        log::debug!("Start playing dropping effect");
        self.is_playing_dropping_effect = true;
        self.sound
            .play_effect(&SoundEffect::Dropping.file_name(), PlayMode::Forever);
    }

    fn stop_dropping_effect(&mut self) {
        self.is_playing_dropping_effect = false;
        self.sound.stop_effect(&SoundEffect::Dropping.file_name());
    }

    fn play_caught_effect(&mut self) {
        self.sound
            .play_effect(&SoundEffect::Caught.file_name(), PlayMode::Once);
    }

    fn play_explode_effect(&mut self) {
        self.sound
            .play_effect(&SoundEffect::Explode(0).file_name(), PlayMode::Once);
    }
}

impl<S: SoundService> Updatable for BombManager<S> {
    fn update(&mut self, dt: f32) {
        for index in 0..self.bombs.len() {
            if let Some(signal) = self.bombs[index].update(dt) {
                self.handle_signal(signal);
            }
        }
    }
}

impl<S: SoundService> Drawable for BombManager<S> {
    fn draw(&self, renderer: &mut dyn Renderer) {
        for bomb in &self.bombs {
            bomb.draw(renderer);
        }
    }
}
