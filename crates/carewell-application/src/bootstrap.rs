//! Production wiring.
//!
//! Resolves platform paths, loads settings and assembles the services the
//! shell runs on. This is the only place that knows which concrete
//! repository and player implementations are in use.

use anyhow::{Context, Result};
use std::sync::Arc;

use carewell_core::catalog::{MassagePart, RoutineKey};
use carewell_core::config::Settings;
use carewell_core::session::CuePlayer;
use carewell_infrastructure::{
    CarePaths, JsonRecordRepository, NullCuePlayer, SilentCuePlayer, TomlSettingsRepository,
};

use crate::history_service::HistoryService;
use crate::session_service::SessionService;
use crate::shell::AppShell;

/// Routine pre-selected before the user picks one.
const DEFAULT_ROUTINE: RoutineKey = RoutineKey::Massage(MassagePart::Neck);

/// Builds the shell with file-backed storage and the configured player.
pub async fn build_shell() -> Result<AppShell> {
    let settings = load_settings()?;

    let records_path = CarePaths::records_path().context("resolving session history path")?;
    let repository = Arc::new(JsonRecordRepository::new(records_path));

    let player: Arc<dyn CuePlayer> = if settings.audio_enabled {
        let audio_root = CarePaths::audio_root().context("resolving audio asset root")?;
        Arc::new(SilentCuePlayer::new(audio_root, settings.playback_rate))
    } else {
        Arc::new(NullCuePlayer)
    };

    let session = SessionService::new(DEFAULT_ROUTINE, player, repository.clone());
    session.set_scene(settings.preferred_scene).await;

    let history = HistoryService::new(repository);
    Ok(AppShell::new(session, history).await)
}

/// Loads user settings; a missing or unreadable file falls back to defaults.
pub fn load_settings() -> Result<Settings> {
    let path = CarePaths::settings_path().context("resolving settings path")?;
    Ok(TomlSettingsRepository::new(path).load())
}
