//! Audio seam and the headless audio manager
//!
//! Gameplay code talks to a [`SoundService`] by effect name. The service is
//! handed to its owner at construction instead of living in a global.

use std::collections::{HashMap, HashSet};

use crate::consts::EXPLODE_SOUND_COUNT;
use crate::settings::Settings;

/// How long an effect keeps playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Play once and stop
    #[default]
    Once,
    /// Loop until explicitly stopped
    Forever,
}

pub trait SoundService {
    fn load_effect(&mut self, name: &str);
    fn play_effect(&mut self, name: &str, mode: PlayMode);
    fn stop_effect(&mut self, name: &str);
}

/// Sound effects used by the bomb manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Looping whistle while bombs are falling
    Dropping,
    /// Bomb caught by the paddle
    Caught,
    /// Bomb detonation, by variant index
    Explode(usize),
}

impl SoundEffect {
    pub fn file_name(self) -> String {
        match self {
            SoundEffect::Dropping => "bomb.wav".to_string(),
            SoundEffect::Caught => "bomb_caught.wav".to_string(),
            SoundEffect::Explode(variant) => format!("bomb_explode{}.wav", variant),
        }
    }

    /// Every effect that must be loaded before play
    pub fn all() -> Vec<SoundEffect> {
        let mut effects = vec![SoundEffect::Dropping, SoundEffect::Caught];
        effects.extend((0..EXPLODE_SOUND_COUNT).map(SoundEffect::Explode));
        effects
    }
}

/// Headless audio manager
///
/// Keeps the loaded set, the looping set and per-effect play counts. A
/// platform mixer can be layered on top by reading [`is_playing`].
///
/// [`is_playing`]: AudioManager::is_playing
#[derive(Debug)]
pub struct AudioManager {
    loaded: HashSet<String>,
    looping: HashSet<String>,
    play_counts: HashMap<String, u32>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            loaded: HashSet::new(),
            looping: HashSet::new(),
            play_counts: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }

    /// Whether a looping effect is currently running
    pub fn is_playing(&self, name: &str) -> bool {
        self.looping.contains(name)
    }

    /// How many times an effect has been started
    pub fn play_count(&self, name: &str) -> u32 {
        self.play_counts.get(name).copied().unwrap_or(0)
    }
}

impl SoundService for AudioManager {
    fn load_effect(&mut self, name: &str) {
        if self.loaded.insert(name.to_string()) {
            log::debug!("Loaded effect {}", name);
        }
    }

    fn play_effect(&mut self, name: &str, mode: PlayMode) {
        if !self.loaded.contains(name) {
            log::warn!("Effect {} played before it was loaded", name);
            return;
        }

        *self.play_counts.entry(name.to_string()).or_insert(0) += 1;
        if mode == PlayMode::Forever {
            self.looping.insert(name.to_string());
        }

        if self.effective_volume() <= 0.0 {
            return;
        }
        log::trace!("Playing {} ({:?}) at volume {:.2}", name, mode, self.effective_volume());
    }

    fn stop_effect(&mut self, name: &str) {
        self.looping.remove(name);
    }
}
