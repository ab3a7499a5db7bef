//! Session orchestration.
//!
//! [`SessionService`] owns the engine and executes the effects it emits:
//! it runs at most one tokio cue task at a time (audio playback plus the
//! breathing pause, or narration followed by a countdown for timer cues)
//! and feeds the task's completion back into the engine as a
//! [`SessionEvent::CueCompleted`]. Cancellation is two-layered: the task's
//! `CancellationToken` stops the wait early, and the engine's generation
//! check discards any completion that slips through after a pause, stop or
//! routine switch.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use carewell_core::catalog::{CueKind, RoutineKey};
use carewell_core::history::{RecordRepository, UsageScene};
use carewell_core::session::{
    CuePlayer, CueRequest, Effect, Phase, SessionEngine, SessionEvent,
};

/// Stand-in narration length for timer-cue steps, used as the `nominal`
/// hint for backends that cannot measure real playback length.
const NARRATION_FALLBACK: Duration = Duration::from_secs(3);

/// Read-only view of the engine, published after every transition.
///
/// Shells subscribe via [`SessionService::watch`] instead of polling.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub routine: RoutineKey,
    pub phase: Phase,
    pub step: usize,
    pub total_steps: usize,
    pub auto_advance: bool,
    pub audio_degraded: bool,
}

impl SessionSnapshot {
    fn of(engine: &SessionEngine) -> Self {
        Self {
            routine: engine.guide().key,
            phase: engine.phase(),
            step: engine.current_step(),
            total_steps: engine.guide().total_steps(),
            auto_advance: engine.is_auto_advancing(),
            audio_degraded: engine.is_audio_degraded(),
        }
    }
}

/// Drives a [`SessionEngine`] with real timers, audio and persistence.
pub struct SessionService {
    engine: Mutex<SessionEngine>,
    player: Arc<dyn CuePlayer>,
    repository: Arc<dyn RecordRepository>,
    /// Token of the in-flight cue task. Replaced (after cancelling the old
    /// one) whenever a new cue starts.
    cue_token: Mutex<CancellationToken>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionService {
    pub fn new(
        routine: RoutineKey,
        player: Arc<dyn CuePlayer>,
        repository: Arc<dyn RecordRepository>,
    ) -> Arc<Self> {
        let engine = SessionEngine::new(routine);
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::of(&engine));
        Arc::new(Self {
            engine: Mutex::new(engine),
            player,
            repository,
            cue_token: Mutex::new(CancellationToken::new()),
            snapshot_tx,
        })
    }

    /// Subscribes to engine snapshots.
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current snapshot without subscribing.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Tags records produced by subsequent sessions with a usage scene.
    pub async fn set_scene(&self, scene: UsageScene) {
        self.engine.lock().await.set_scene(scene);
    }

    /// Runs one event through the engine and executes the effects.
    pub async fn dispatch(self: &Arc<Self>, event: SessionEvent) {
        let effects = {
            let mut engine = self.engine.lock().await;
            let effects = engine.handle(event);
            self.snapshot_tx.send_replace(SessionSnapshot::of(&engine));
            effects
        };
        self.apply(effects).await;
    }

    /// Switches to a different routine, abandoning any session in progress.
    pub async fn switch_routine(self: &Arc<Self>, routine: RoutineKey) {
        let effects = {
            let mut engine = self.engine.lock().await;
            let effects = engine.switch_routine(routine);
            self.snapshot_tx.send_replace(SessionSnapshot::of(&engine));
            effects
        };
        self.apply(effects).await;
    }

    // Boxed to break the `apply` -> `start_cue` -> `run_cue` -> `dispatch`
    // async cycle, which otherwise leaves `Send` unresolvable.
    fn apply<'a>(
        self: &'a Arc<Self>,
        effects: Vec<Effect>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            for effect in effects {
                match effect {
                    Effect::StartCue(req) => self.start_cue(req).await,
                    Effect::CancelCue => self.cancel_cue().await,
                    Effect::SessionFinished => {
                        debug!("session finished, awaiting feedback");
                    }
                    Effect::RecordCompleted(record) => {
                        // The session itself succeeded; a persistence failure
                        // only costs this entry, so log and move on.
                        if let Err(e) = self.repository.append(record).await {
                            warn!(error = %e, "failed to persist completed session");
                        }
                    }
                }
            }
        })
    }

    async fn cancel_cue(&self) {
        self.cue_token.lock().await.cancel();
        self.player.stop();
    }

    async fn start_cue(self: &Arc<Self>, req: CueRequest) {
        let token = {
            let mut slot = self.cue_token.lock().await;
            slot.cancel();
            *slot = CancellationToken::new();
            slot.clone()
        };

        let service = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = service.run_cue(req) => {}
            }
        });
    }

    /// Waits out one cue, then reports its completion to the engine.
    async fn run_cue(self: &Arc<Self>, req: CueRequest) {
        match req.kind {
            CueKind::Timer => {
                // Narration first, countdown after it ends. The countdown
                // runs regardless, so timer routines survive audio loss.
                self.narrate(&req).await;
                tokio::time::sleep(req.duration).await;
            }
            CueKind::Audio => {
                let routine = self.snapshot_tx.borrow().routine;
                let Some(path) = self.player.resolve(routine, req.step) else {
                    self.degrade_audio().await;
                    return;
                };
                match self.player.play(&path, req.duration).await {
                    Ok(()) => {}
                    Err(e) if e.is_sticky() => {
                        warn!(error = %e, "audio unavailable, degrading session");
                        self.degrade_audio().await;
                        return;
                    }
                    Err(e) => {
                        // One bad asset should not stall the session; pace
                        // this step off its nominal duration instead.
                        warn!(error = %e, step = req.step, "audio cue failed, using timer fallback");
                        tokio::time::sleep(req.duration).await;
                    }
                }
                if let Some(rest) = req.rest_after {
                    tokio::time::sleep(rest).await;
                }
            }
        }

        self.dispatch(SessionEvent::CueCompleted {
            generation: req.generation,
            step: req.step,
        })
        .await;
    }

    /// Plays the step narration ahead of a timer cue's countdown.
    ///
    /// Skipped entirely when the session's audio is already degraded. A
    /// sticky failure degrades the session; any other failure only loses
    /// this step's narration.
    async fn narrate(self: &Arc<Self>, req: &CueRequest) {
        if self.snapshot_tx.borrow().audio_degraded {
            return;
        }
        let routine = self.snapshot_tx.borrow().routine;
        let Some(path) = self.player.resolve(routine, req.step) else {
            return;
        };
        match self.player.play(&path, NARRATION_FALLBACK).await {
            Ok(()) => {}
            Err(e) if e.is_sticky() => {
                warn!(error = %e, "audio unavailable, continuing without narration");
                self.degrade_audio().await;
            }
            Err(e) => {
                warn!(error = %e, step = req.step, "step narration failed");
            }
        }
    }

    async fn degrade_audio(self: &Arc<Self>) {
        let effects = {
            let mut engine = self.engine.lock().await;
            let effects = engine.mark_audio_unavailable();
            self.snapshot_tx.send_replace(SessionSnapshot::of(&engine));
            effects
        };
        self.apply(effects).await;
    }
}
