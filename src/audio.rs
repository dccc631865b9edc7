use serde::Serialize;

use crate::store::{KeyValueStore, VOLUME_KEY};

pub const DEFAULT_VOLUME: u8 = 50;
const STEP: u8 = 10;
const MAX: u8 = 100;

/// Milliseconds between playback actually starting and unmuting.
pub const UNMUTE_DELAY_MS: u32 = 300;

/// Background audio volume as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioVolume(u8);

impl Default for AudioVolume {
    fn default() -> Self {
        AudioVolume(DEFAULT_VOLUME)
    }
}

impl AudioVolume {
    pub fn new(percent: i64) -> Self {
        AudioVolume(percent.clamp(0, MAX as i64) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Value for `HTMLMediaElement.volume`.
    pub fn as_fraction(self) -> f32 {
        self.0 as f32 / MAX as f32
    }

    pub fn step_up(self) -> Self {
        AudioVolume(self.0.saturating_add(STEP).min(MAX))
    }

    pub fn step_down(self) -> Self {
        AudioVolume(self.0.saturating_sub(STEP))
    }

    /// Persisted volume, or the default when absent or unparseable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        store
            .get(VOLUME_KEY)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(AudioVolume::new)
            .unwrap_or_default()
    }

    pub fn persist(self, store: &dyn KeyValueStore) -> Result<(), String> {
        store.set(VOLUME_KEY, &self.0.to_string())
    }
}
