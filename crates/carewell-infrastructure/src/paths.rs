//! Unified path management for Carewell files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/carewell/          # Config directory
//! └── settings.toml            # User settings
//!
//! ~/.local/share/carewell/     # Data directory
//! ├── sessions.json            # Session history
//! └── audio/                   # Bundled narration assets
//!     ├── organ-care/
//!     ├── massage/
//!     └── stretch/
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "carewell";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Carewell.
pub struct CarePaths;

impl CarePaths {
    /// Returns the Carewell configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the Carewell data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Path of the settings file.
    pub fn settings_path() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("settings.toml"))
    }

    /// Path of the session history file.
    pub fn records_path() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("sessions.json"))
    }

    /// Root directory of the bundled audio assets.
    pub fn audio_root() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("audio"))
    }
}
