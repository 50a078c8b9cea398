//! Directional input consumed by the paddle
//!
//! The platform layer writes the current direction into a [`SharedInput`]
//! handle; the paddle polls it once per update.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

impl Direction {
    /// Horizontal sign: -1 left, 1 right, 0 idle
    pub fn axis(self) -> f32 {
        match self {
            Direction::None => 0.0,
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

pub trait InputSource {
    fn direction(&self) -> Direction;
}

/// Cloneable input handle shared between the game loop and the paddle
#[derive(Debug, Clone, Default)]
pub struct SharedInput(Rc<Cell<Direction>>);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, direction: Direction) {
        self.0.set(direction);
    }
}

impl InputSource for SharedInput {
    fn direction(&self) -> Direction {
        self.0.get()
    }
}
