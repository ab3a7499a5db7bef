//! The session playback engine.
//!
//! A pure state machine: every user action and every cue completion arrives
//! as a [`SessionEvent`], and the engine answers with a list of [`Effect`]s
//! for the driver to execute (start a cue task, cancel it, persist a record).
//! No timers, audio or storage live inside the engine, which keeps every
//! transition unit-testable without an event loop.
//!
//! Stale asynchronous completions are fenced by a monotonically increasing
//! generation counter: each (re)start, pause, stop and routine switch bumps
//! it, and a [`SessionEvent::CueCompleted`] carrying an older generation is
//! discarded. This is the ordering guarantee that keeps a cancelled cue from
//! mutating a newer session's state.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::catalog::{self, CueKind, RoutineGuide, RoutineKey};
use crate::history::{NewSessionRecord, UsageScene};
use crate::session::feedback::SessionFeedback;

/// Breathing pause inserted between audio-driven steps before auto-advancing.
/// Timer-cued routines advance without it.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_secs(2);

/// Lifecycle phase of one routine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not yet started, or fully reset.
    Idle,
    /// Auto-advance active; the current step's cue is in progress.
    Playing,
    /// Cue suspended; the step index is retained.
    Paused,
    /// All steps finished; awaiting feedback.
    Completed,
}

/// Named events driving the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User pressed start (valid from idle).
    Start,
    /// User toggled play/pause.
    TogglePlayPause,
    /// The cue for `step` finished (audio ended or timer reached zero).
    /// Discarded unless `generation` matches the engine's current one.
    CueCompleted { generation: u64, step: usize },
    /// Manual navigation; only honored while not auto-advancing.
    StepForward,
    /// Manual navigation; only honored while not auto-advancing.
    StepBack,
    /// Abandon the session and return to idle. Writes nothing.
    Stop,
    /// Stop followed by an immediate fresh start.
    Restart,
    /// Feedback submission; requires `Completed` phase and a mood.
    SubmitFeedback(SessionFeedback),
}

/// A cue the driver should start for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct CueRequest {
    /// Generation this cue was issued under; echo it back in
    /// [`SessionEvent::CueCompleted`].
    pub generation: u64,
    pub step: usize,
    pub kind: CueKind,
    /// Nominal step duration. For timer cues this is the countdown length;
    /// for audio cues it is the fallback length.
    pub duration: Duration,
    /// Extra pause to insert after the cue ends, before reporting
    /// completion. Set between audio-driven steps, absent on the last step
    /// and on timer cues.
    pub rest_after: Option<Duration>,
}

/// Side effects the driver must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the cue task for a step, cancelling any previous one first.
    StartCue(CueRequest),
    /// Cancel the in-flight cue task and tear down playback.
    CancelCue,
    /// All steps are done; the shell should present the feedback form.
    SessionFinished,
    /// Feedback was accepted; append this record to the history store.
    RecordCompleted(NewSessionRecord),
}

/// Drives a single routine instance from step 0 to completion.
pub struct SessionEngine {
    guide: &'static RoutineGuide,
    phase: Phase,
    step: usize,
    generation: u64,
    started_at: Option<DateTime<Local>>,
    auto_advance: bool,
    audio_degraded: bool,
    scene: UsageScene,
}

impl SessionEngine {
    /// Creates an idle engine for the given routine.
    pub fn new(key: RoutineKey) -> Self {
        Self {
            guide: catalog::guide(key),
            phase: Phase::Idle,
            step: 0,
            generation: 0,
            started_at: None,
            auto_advance: false,
            audio_degraded: false,
            scene: UsageScene::default(),
        }
    }

    pub fn guide(&self) -> &'static RoutineGuide {
        self.guide
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current step index, `0 <= index < total_steps`.
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Generation under which the most recent cue was issued.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance
    }

    pub fn is_audio_degraded(&self) -> bool {
        self.audio_degraded
    }

    /// Tags records produced by this engine with a usage scene.
    pub fn set_scene(&mut self, scene: UsageScene) {
        self.scene = scene;
    }

    /// Handles an event against the wall clock.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        self.handle_at(event, Local::now())
    }

    /// Handles an event at an explicit instant. Exposed so transitions that
    /// read the clock (start, feedback submission) stay deterministic under
    /// test.
    pub fn handle_at(&mut self, event: SessionEvent, now: DateTime<Local>) -> Vec<Effect> {
        match event {
            SessionEvent::Start => self.start(now),
            SessionEvent::TogglePlayPause => self.toggle(now),
            SessionEvent::CueCompleted { generation, step } => {
                self.cue_completed(generation, step)
            }
            SessionEvent::StepForward => self.navigate(1),
            SessionEvent::StepBack => self.navigate(-1),
            SessionEvent::Stop => self.stop(),
            SessionEvent::Restart => {
                let mut effects = self.stop();
                effects.extend(self.start(now));
                effects
            }
            SessionEvent::SubmitFeedback(feedback) => self.submit_feedback(feedback, now),
        }
    }

    /// Marks audio as permanently unavailable for this session.
    ///
    /// Audio-cued auto-advance is disabled; step text, manual navigation and
    /// timer-cued routines keep working.
    pub fn mark_audio_unavailable(&mut self) -> Vec<Effect> {
        self.audio_degraded = true;
        if self.guide.cue == CueKind::Audio && self.auto_advance {
            self.auto_advance = false;
            self.generation += 1;
            vec![Effect::CancelCue]
        } else {
            Vec::new()
        }
    }

    /// Switches to a different routine, fully resetting the engine.
    ///
    /// The generation bump guarantees that cues issued for the old routine
    /// can never fire into the new one.
    pub fn switch_routine(&mut self, key: RoutineKey) -> Vec<Effect> {
        let effects = self.stop();
        self.guide = catalog::guide(key);
        self.audio_degraded = false;
        effects
    }

    fn start(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.phase = Phase::Playing;
        self.step = 0;
        self.auto_advance = true;
        self.generation += 1;
        self.issue_cue(0)
    }

    fn toggle(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        match self.phase {
            // The toggle doubles as the start button.
            Phase::Idle => self.start(now),
            Phase::Playing => {
                // Suspend. Elapsed position within the step is not
                // preserved; resuming re-issues the step's full cue.
                self.generation += 1;
                self.auto_advance = false;
                self.phase = Phase::Paused;
                vec![Effect::CancelCue]
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.auto_advance = true;
                self.generation += 1;
                self.issue_cue(self.step)
            }
            Phase::Completed => Vec::new(),
        }
    }

    fn cue_completed(&mut self, generation: u64, step: usize) -> Vec<Effect> {
        if generation != self.generation || self.phase == Phase::Idle {
            // Stale cue from a stopped, paused or switched session.
            return Vec::new();
        }

        let last = self.guide.total_steps().saturating_sub(1);
        if step < last {
            self.step = step + 1;
            if self.auto_advance && self.phase == Phase::Playing {
                self.issue_cue(self.step)
            } else {
                Vec::new()
            }
        } else {
            self.phase = Phase::Completed;
            self.auto_advance = false;
            self.generation += 1;
            vec![Effect::SessionFinished]
        }
    }

    fn navigate(&mut self, delta: isize) -> Vec<Effect> {
        if self.auto_advance || self.phase == Phase::Completed {
            return Vec::new();
        }

        let last = self.guide.total_steps().saturating_sub(1) as isize;
        let target = (self.step as isize + delta).clamp(0, last) as usize;
        if target == self.step {
            return Vec::new();
        }
        self.step = target;

        // Audio-cued routines re-narrate the target step; the lifecycle
        // phase is untouched either way.
        if self.guide.cue == CueKind::Audio && !self.audio_degraded {
            self.generation += 1;
            self.issue_cue(target)
        } else {
            Vec::new()
        }
    }

    fn stop(&mut self) -> Vec<Effect> {
        if self.phase == Phase::Idle {
            return Vec::new();
        }
        self.reset();
        vec![Effect::CancelCue]
    }

    fn submit_feedback(&mut self, feedback: SessionFeedback, now: DateTime<Local>) -> Vec<Effect> {
        if self.phase != Phase::Completed {
            return Vec::new();
        }
        let Some(mood) = feedback.mood else {
            // Submission is blocked until a mood is chosen.
            return Vec::new();
        };

        let duration = match self.started_at {
            Some(started_at) => (now - started_at).num_seconds().max(1) as u32,
            None => self.guide.total_secs().max(1),
        };

        let record = NewSessionRecord {
            care_type: self.guide.key.care_type(),
            subtype: Some(self.guide.key.slug().to_string()),
            duration,
            completed_at: now.to_rfc3339(),
            rating: feedback.rating.clamp(1, 5),
            mood,
            comment: feedback.comment,
            scene: self.scene,
        };

        self.reset();
        vec![Effect::RecordCompleted(record)]
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.step = 0;
        self.started_at = None;
        self.auto_advance = false;
        self.generation += 1;
    }

    fn issue_cue(&mut self, step: usize) -> Vec<Effect> {
        if self.guide.cue == CueKind::Audio && self.audio_degraded {
            // No audio and no timer to fall back on: the user drives the
            // session manually from here.
            self.auto_advance = false;
            return Vec::new();
        }

        let last = self.guide.total_steps().saturating_sub(1);
        let duration = Duration::from_secs(u64::from(self.guide.steps[step].duration_secs));
        let rest_after =
            (self.guide.cue == CueKind::Audio && step < last).then_some(AUTO_ADVANCE_DELAY);

        vec![Effect::StartCue(CueRequest {
            generation: self.generation,
            step,
            kind: self.guide.cue,
            duration,
            rest_after,
        })]
    }
}
