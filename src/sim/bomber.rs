//! The bomber: walks along the top of the field and drops bombs
//!
//! Direction changes come from a seeded PCG stream so a given seed always
//! produces the same drop pattern.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::clock::Clock;
use crate::geometry::Vec2;
use crate::settings::Tuning;

use super::turn::TurnInfo;

#[derive(Debug, Clone)]
pub struct Bomber {
    position: Vec2,
    speed: f32,
    min_x: f32,
    max_x: f32,
    /// -1 moving left, 1 moving right
    direction: f32,
    /// Chance per second of reversing direction
    turn_chance: f32,
    rng: Pcg32,
    drop_interval: f32,
    drop_timer: Clock,
    drops_left: u32,
    active: bool,
}

impl Bomber {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let (min_x, max_x) = tuning.bomber_bounds();
        Self {
            position: Vec2::new((min_x + max_x) / 2.0, tuning.bomber_y),
            speed: tuning.bomber_speed,
            min_x,
            max_x,
            direction: 1.0,
            turn_chance: tuning.bomber_turn_chance,
            rng: Pcg32::seed_from_u64(seed),
            drop_interval: 1.0,
            drop_timer: Clock::new(),
            drops_left: 0,
            active: false,
        }
    }

    /// Arm for a new turn: `bombs_count` drops, one every `drop_interval`
    pub fn reset(&mut self, turn_info: &TurnInfo) {
        self.drop_interval = turn_info.drop_interval;
        self.drops_left = turn_info.bombs_count;
        self.drop_timer.reset();
        self.active = true;
    }

    /// Halt movement and drops until the next reset
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance by `dt`. Returns where to drop a bomb, at most once per call.
    pub fn update(&mut self, dt: f32) -> Option<Vec2> {
        if !self.active {
            return None;
        }

        self.walk(dt);

        if self.drops_left == 0 {
            return None;
        }

        self.drop_timer.update(dt);
        if self.drop_timer.elapsed() < self.drop_interval {
            return None;
        }
        self.drop_timer.consume(self.drop_interval);
        self.drops_left -= 1;
        Some(self.position)
    }

    fn walk(&mut self, dt: f32) {
        let turn_probability = (self.turn_chance * dt).clamp(0.0, 1.0) as f64;
        if self.rng.random_bool(turn_probability) {
            self.direction = -self.direction;
        }

        self.position.x += self.direction * self.speed * dt;
        if self.position.x <= self.min_x {
            self.position.x = self.min_x;
            self.direction = 1.0;
        } else if self.position.x >= self.max_x {
            self.position.x = self.max_x;
            self.direction = -1.0;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn drops_left(&self) -> u32 {
        self.drops_left
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_bomber(seed: u64, bombs_count: u32) -> Bomber {
        let mut bomber = Bomber::new(&Tuning::default(), seed);
        bomber.reset(&TurnInfo {
            bombs_count,
            bomb_speed: 100.0,
            drop_interval: 0.5,
        });
        bomber
    }

    fn collect_drops(bomber: &mut Bomber, frames: usize) -> Vec<Vec2> {
        (0..frames).filter_map(|_| bomber.update(0.05)).collect()
    }

    #[test]
    fn test_inactive_until_reset() {
        let mut bomber = Bomber::new(&Tuning::default(), 1);
        let start = bomber.position();
        assert_eq!(bomber.update(10.0), None);
        assert_eq!(bomber.position(), start);
    }

    #[test]
    fn test_drops_exactly_turn_count() {
        let mut bomber = armed_bomber(7, 4);
        let drops = collect_drops(&mut bomber, 400);
        assert_eq!(drops.len(), 4);
        assert_eq!(bomber.drops_left(), 0);
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let a = collect_drops(&mut armed_bomber(42, 10), 200);
        let b = collect_drops(&mut armed_bomber(42, 10), 200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stays_in_bounds() {
        let tuning = Tuning::default();
        let (min_x, max_x) = tuning.bomber_bounds();
        let mut bomber = armed_bomber(3, 50);
        for _ in 0..2000 {
            bomber.update(0.05);
            let x = bomber.position().x;
            assert!(x >= min_x && x <= max_x);
        }
    }

    #[test]
    fn test_stop_halts_drops() {
        let mut bomber = armed_bomber(9, 10);
        bomber.update(0.5);
        bomber.stop();
        assert!(!bomber.is_active());
        assert!(collect_drops(&mut bomber, 100).is_empty());
    }
}
