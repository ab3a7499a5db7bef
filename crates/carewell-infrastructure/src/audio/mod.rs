//! Audio asset addressing and cue player backends.
//!
//! Backends are trait objects behind [`CuePlayer`], so the application can
//! pick one per environment: [`SilentCuePlayer`] when no audio device is
//! available (the step's nominal duration stands in for playback), and
//! [`NullCuePlayer`] for environments with no audio support at all.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use carewell_core::catalog::RoutineKey;
use carewell_core::config::{MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
use carewell_core::session::{CueError, CuePlayer};

/// File extension of the bundled narration assets.
const AUDIO_EXT: &str = "wav";

/// Resolves the deterministic asset path for one step.
///
/// Layout: `{root}/{care-type-dir}/{subtype}_step{n}.wav`, where `n` is
/// 1-based in the file name while `step_index` is 0-based.
pub fn resolve_audio_path(root: &Path, key: RoutineKey, step_index: usize) -> PathBuf {
    root.join(key.care_type().asset_dir()).join(format!(
        "{}_step{}.{}",
        key.slug(),
        step_index + 1,
        AUDIO_EXT
    ))
}

/// A player for environments without any audio capability.
///
/// Every play attempt reports [`CueError::Unsupported`], which the session
/// layer treats as sticky: the session degrades to text-only.
pub struct NullCuePlayer;

#[async_trait]
impl CuePlayer for NullCuePlayer {
    fn resolve(&self, _key: RoutineKey, _step_index: usize) -> Option<PathBuf> {
        None
    }

    async fn play(&self, _path: &Path, _nominal: Duration) -> std::result::Result<(), CueError> {
        Err(CueError::Unsupported)
    }

    fn pause(&self) {}

    fn stop(&self) {}
}

/// A device-less player that stands in for real narration playback.
///
/// "Plays" each step by waiting its nominal duration, scaled by the user's
/// playback rate, so sessions keep their pacing on machines without an
/// audio stack. Asset paths are still resolved so a real backend can be
/// swapped in without touching callers.
pub struct SilentCuePlayer {
    root: PathBuf,
    playback_rate: f32,
}

impl SilentCuePlayer {
    pub fn new(root: PathBuf, playback_rate: f32) -> Self {
        Self {
            root,
            playback_rate: playback_rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE),
        }
    }
}

#[async_trait]
impl CuePlayer for SilentCuePlayer {
    fn resolve(&self, key: RoutineKey, step_index: usize) -> Option<PathBuf> {
        Some(resolve_audio_path(&self.root, key, step_index))
    }

    async fn play(&self, path: &Path, nominal: Duration) -> std::result::Result<(), CueError> {
        let scaled = nominal.div_f32(self.playback_rate);
        debug!(path = %path.display(), secs = scaled.as_secs(), "silent playback");
        tokio::time::sleep(scaled).await;
        Ok(())
    }

    fn pause(&self) {}

    fn stop(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use carewell_core::catalog::{MassagePart, OrganKind, StretchTarget};

    #[test]
    fn audio_paths_are_one_based() {
        let root = Path::new("/assets/audio");
        assert_eq!(
            resolve_audio_path(root, RoutineKey::Massage(MassagePart::Neck), 0),
            Path::new("/assets/audio/massage/neck_step1.wav")
        );
        assert_eq!(
            resolve_audio_path(root, RoutineKey::OrganCare(OrganKind::Kidney), 3),
            Path::new("/assets/audio/organ-care/kidney_step4.wav")
        );
        assert_eq!(
            resolve_audio_path(root, RoutineKey::Stretch(StretchTarget::ShoulderPain), 1),
            Path::new("/assets/audio/stretch/shoulder-pain_step2.wav")
        );
    }

    #[tokio::test]
    async fn null_player_reports_unsupported() {
        let player = NullCuePlayer;
        let key = RoutineKey::Massage(MassagePart::Neck);
        assert!(player.resolve(key, 0).is_none());
        let err = player
            .play(Path::new("x.wav"), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, CueError::Unsupported);
        assert!(err.is_sticky());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_player_waits_the_nominal_duration() {
        let player = SilentCuePlayer::new(PathBuf::from("/assets/audio"), 1.0);
        let key = RoutineKey::Massage(MassagePart::Neck);
        let path = player.resolve(key, 0).unwrap();

        let before = tokio::time::Instant::now();
        player.play(&path, Duration::from_secs(30)).await.unwrap();
        assert_eq!(before.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn playback_rate_scales_the_silent_wait() {
        let player = SilentCuePlayer::new(PathBuf::from("/assets/audio"), 2.0);

        let before = tokio::time::Instant::now();
        player
            .play(Path::new("cue.wav"), Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(before.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_rate_is_clamped() {
        let player = SilentCuePlayer::new(PathBuf::from("/assets/audio"), 10.0);

        let before = tokio::time::Instant::now();
        player
            .play(Path::new("cue.wav"), Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(before.elapsed(), Duration::from_secs(15));
    }
}
