//! Per-turn parameters and the turn progression table

use serde::{Deserialize, Serialize};

use crate::consts::BOMB_SPEED;

/// Parameters for a single turn. Copied into the manager and bomber on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnInfo {
    /// Bombs that must be caught to clear the turn
    pub bombs_count: u32,
    /// Bomb fall speed (pixels/s)
    pub bomb_speed: f32,
    /// Seconds between bomber drops
    pub drop_interval: f32,
}

impl Default for TurnInfo {
    fn default() -> Self {
        Self {
            bombs_count: 10,
            bomb_speed: BOMB_SPEED,
            drop_interval: 1.0,
        }
    }
}

impl TurnInfo {
    pub fn with_bombs(bombs_count: u32) -> Self {
        Self {
            bombs_count,
            ..Default::default()
        }
    }
}

/// Turn progression. Turns past the end of the table repeat the last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnTable(pub Vec<TurnInfo>);

impl Default for TurnTable {
    fn default() -> Self {
        let turn = |bombs_count, bomb_speed, drop_interval| TurnInfo {
            bombs_count,
            bomb_speed,
            drop_interval,
        };
        Self(vec![
            turn(10, 90.0, 0.9),
            turn(20, 120.0, 0.75),
            turn(30, 150.0, 0.6),
            turn(40, 180.0, 0.5),
            turn(50, 210.0, 0.42),
            turn(75, 240.0, 0.36),
            turn(100, 270.0, 0.3),
            turn(150, 300.0, 0.25),
        ])
    }
}

impl TurnTable {
    pub fn get(&self, turn_index: usize) -> TurnInfo {
        self.0
            .get(turn_index)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
