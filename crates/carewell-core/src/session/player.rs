//! Cue player collaborator trait.
//!
//! The session engine never touches audio directly; a `CuePlayer`
//! implementation is injected so the engine (and its tests) stay free of any
//! real audio environment.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::RoutineKey;

/// Ways a cue playback attempt can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CueError {
    /// The environment cannot play audio at all. Sticky for the rest of the
    /// session; the engine degrades to text plus timers.
    #[error("audio playback is not available in this environment")]
    Unsupported,

    /// The asset could not be fetched or decoded. Per attempt only; a later
    /// step may still succeed.
    #[error("audio asset could not be loaded: {0}")]
    LoadFailed(String),

    /// Playback start was rejected by platform policy. Per attempt; the UI
    /// may prompt the user to interact first.
    #[error("audio playback was blocked: {0}")]
    Blocked(String),
}

impl CueError {
    /// Whether this failure permanently degrades the session's audio.
    pub fn is_sticky(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

/// Plays step narration audio and reports completion.
///
/// # Contract
///
/// - Starting a new `play` fully tears down any previous playback unit
///   before creating a new one; audio never overlaps.
/// - `play` resolves exactly once per successful playback, at the moment
///   the "ended" signal fires.
#[async_trait]
pub trait CuePlayer: Send + Sync {
    /// Resolves the audio asset path for a step, or `None` when no asset
    /// exists for it.
    fn resolve(&self, key: RoutineKey, step_index: usize) -> Option<PathBuf>;

    /// Plays the asset to completion.
    ///
    /// `nominal` is the step's catalog duration, available as a fallback for
    /// backends that cannot measure real playback length.
    async fn play(&self, path: &Path, nominal: Duration) -> Result<(), CueError>;

    /// Suspends the current playback unit, if any.
    fn pause(&self);

    /// Tears down the current playback unit, if any.
    fn stop(&self);
}
