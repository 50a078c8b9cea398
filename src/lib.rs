//! Kaboom - paddle-and-bombs arcade gameplay core
//!
//! Core modules:
//! - `sim`: Bomb lifecycle, bomb pool manager, paddle, bomber and turn driver
//! - `audio`: Sound service seam and the in-process audio manager
//! - `input`: Directional input polled by the paddle
//! - `renderer`: Draw/update capabilities and the renderer seam
//! - `settings`: Data-driven tuning and audio preferences

pub mod animation;
pub mod audio;
pub mod clock;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;
    /// Y coordinate bombs must reach to count as "hit the ground"
    pub const TARGET_LINE_Y: f32 = 440.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 64.0;
    pub const PADDLE_LAYER_HEIGHT: f32 = 10.0;
    pub const PADDLE_LAYER_SPACING: f32 = 18.0;
    pub const PADDLE_SPEED: f32 = 420.0;
    pub const PADDLE_LIVES: u32 = 3;
    /// Distance from the bottom of the field to the top paddle layer
    pub const PADDLE_BOTTOM_OFFSET: f32 = 110.0;

    /// Bomb defaults
    pub const BOMB_SIZE: f32 = 16.0;
    pub const BOMB_SPEED: f32 = 90.0;

    /// Bomber defaults
    pub const BOMBER_Y: f32 = 40.0;
    pub const BOMBER_SPEED: f32 = 160.0;
    /// Chance per second that the bomber reverses direction
    pub const BOMBER_TURN_CHANCE: f32 = 0.8;

    /// Animation pacing (seconds per frame)
    pub const PADDLE_FRAME_TIME: f32 = 0.12;
    pub const BOMB_FALL_FRAME_TIME: f32 = 0.08;
    pub const BOMB_EXPLODE_FRAME_TIME: f32 = 0.06;
    pub const BOMB_EXPLODE_FRAMES: usize = 5;

    /// Number of explosion sound variants loaded at startup
    pub const EXPLODE_SOUND_COUNT: usize = 1;

    /// Fixed simulation timestep for the demo loop (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
