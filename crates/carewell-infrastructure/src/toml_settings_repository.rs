//! TOML-file backed user settings.

use std::path::PathBuf;
use tracing::warn;

use carewell_core::config::Settings;
use carewell_core::error::Result;

use crate::storage::AtomicTomlFile;

/// Loads and saves [`Settings`] from a single TOML file.
pub struct TomlSettingsRepository {
    file: AtomicTomlFile<Settings>,
}

impl TomlSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the settings, falling back to defaults when the file is
    /// missing, empty or unreadable.
    pub fn load(&self) -> Settings {
        match self.file.load() {
            Ok(Some(settings)) => settings.sanitized(),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(path = %self.file.path().display(), error = %e,
                    "settings unreadable, using defaults");
                Settings::default()
            }
        }
    }

    /// Saves the settings atomically.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        self.file.save(settings)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carewell_core::history::UsageScene;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlSettingsRepository::new(dir.path().join("settings.toml"));
        assert_eq!(repo.load(), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlSettingsRepository::new(dir.path().join("settings.toml"));

        let settings = Settings {
            audio_enabled: false,
            playback_rate: 1.25,
            preferred_scene: UsageScene::Evening,
        };
        repo.save(&settings).unwrap();
        assert_eq!(repo.load(), settings);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "playback_rate = \"fast\"").unwrap();
        let repo = TomlSettingsRepository::new(path);
        assert_eq!(repo.load(), Settings::default());
    }

    #[test]
    fn out_of_range_rate_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "playback_rate = 0.1").unwrap();
        let repo = TomlSettingsRepository::new(path);
        assert_eq!(repo.load().playback_rate, 0.5);
    }
}
