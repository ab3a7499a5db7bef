//! User settings.
//!
//! Persisted as a TOML file by the infrastructure layer; every field has a
//! default so a missing or partial file always loads.

use serde::{Deserialize, Serialize};

use crate::history::UsageScene;

/// Valid range for the narration playback rate.
pub const MIN_PLAYBACK_RATE: f32 = 0.5;
pub const MAX_PLAYBACK_RATE: f32 = 2.0;

fn default_true() -> bool {
    true
}

fn default_playback_rate() -> f32 {
    1.0
}

/// User-tunable application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether step narration audio is enabled at all.
    #[serde(default = "default_true")]
    pub audio_enabled: bool,
    /// Narration playback rate, 0.5-2.0.
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f32,
    /// Scene tag applied to new session records.
    #[serde(default)]
    pub preferred_scene: UsageScene,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            playback_rate: 1.0,
            preferred_scene: UsageScene::default(),
        }
    }
}

impl Settings {
    /// Clamps fields into their valid ranges after deserialization.
    pub fn sanitized(mut self) -> Self {
        self.playback_rate = self.playback_rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.audio_enabled);
        assert_eq!(settings.playback_rate, 1.0);
        assert_eq!(settings.preferred_scene, UsageScene::Custom);
    }

    #[test]
    fn sanitized_clamps_playback_rate() {
        let settings: Settings = toml::from_str("playback_rate = 9.0").unwrap();
        assert_eq!(settings.sanitized().playback_rate, 2.0);
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = Settings {
            audio_enabled: false,
            playback_rate: 1.5,
            preferred_scene: UsageScene::Morning,
        };
        let text = toml::to_string(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
