//! Game settings and tuning
//!
//! Loaded from a JSON file. Every field has a default so partial files work.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::TurnTable;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Data-driven gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    /// Bombs reaching this y have hit the ground
    pub target_line_y: f32,

    // === Paddle ===
    /// Top of the paddle stack
    pub paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_layer_height: f32,
    pub paddle_layer_spacing: f32,
    pub paddle_speed: f32,
    pub paddle_lives: u32,
    pub paddle_frame_time: f32,

    // === Bombs ===
    pub bomb_size: f32,
    pub bomb_fall_frame_time: f32,
    pub bomb_explode_frame_time: f32,
    pub bomb_explode_frames: usize,

    // === Bomber ===
    pub bomber_y: f32,
    pub bomber_speed: f32,
    /// Chance per second of reversing direction
    pub bomber_turn_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            target_line_y: TARGET_LINE_Y,

            paddle_y: FIELD_HEIGHT - PADDLE_BOTTOM_OFFSET,
            paddle_width: PADDLE_WIDTH,
            paddle_layer_height: PADDLE_LAYER_HEIGHT,
            paddle_layer_spacing: PADDLE_LAYER_SPACING,
            paddle_speed: PADDLE_SPEED,
            paddle_lives: PADDLE_LIVES,
            paddle_frame_time: PADDLE_FRAME_TIME,

            bomb_size: BOMB_SIZE,
            bomb_fall_frame_time: BOMB_FALL_FRAME_TIME,
            bomb_explode_frame_time: BOMB_EXPLODE_FRAME_TIME,
            bomb_explode_frames: BOMB_EXPLODE_FRAMES,

            bomber_y: BOMBER_Y,
            bomber_speed: BOMBER_SPEED,
            bomber_turn_chance: BOMBER_TURN_CHANCE,
        }
    }
}

impl Tuning {
    /// Lowest y a bomb's top edge may fall to before it counts as landed
    pub fn max_bomb_y(&self) -> f32 {
        self.target_line_y - self.bomb_size
    }

    /// Horizontal range for the paddle's left edge
    pub fn paddle_bounds(&self) -> (f32, f32) {
        (0.0, (self.field_width - self.paddle_width).max(0.0))
    }

    /// Horizontal range for the bomber's drop point
    pub fn bomber_bounds(&self) -> (f32, f32) {
        (0.0, (self.field_width - self.bomb_size).max(0.0))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    pub tuning: Tuning,
    pub turns: TurnTable,
    /// Seed for the bomber's RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            tuning: Tuning::default(),
            turns: TurnTable::default(),
            seed: 0x5eed,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
