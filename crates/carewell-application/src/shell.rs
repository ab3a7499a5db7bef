//! Thin navigation shell.
//!
//! [`AppShell`] is a view-state switch over the screens of the app. It
//! holds no session logic of its own: routine selection, playback and
//! feedback submission all go through [`SessionService`], and the shell
//! only decides which screen is visible and keeps the home summary fresh.

use std::sync::Arc;

use carewell_core::catalog::{CareType, RoutineKey};
use carewell_core::history::SessionSummary;
use carewell_core::session::{DEFAULT_RATING, Mood, Phase, SessionEvent, SessionFeedback};

use crate::history_service::HistoryService;
use crate::session_service::SessionService;

/// The visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Summary, streaks and care-type entry points.
    Home,
    /// Routine picker for one care type.
    RoutineSelect(CareType),
    /// Step-by-step playback of the selected routine.
    ActiveSession,
    /// Post-session rating and mood form.
    Feedback,
}

/// Form state for the feedback screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackInput {
    pub rating: u8,
    pub mood: Option<Mood>,
    pub comment: Option<String>,
}

impl Default for FeedbackInput {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            mood: None,
            comment: None,
        }
    }
}

pub struct AppShell {
    screen: Screen,
    session: Arc<SessionService>,
    history: HistoryService,
    feedback: FeedbackInput,
    summary: SessionSummary,
}

impl AppShell {
    /// Builds the shell on the home screen with a fresh summary.
    pub async fn new(session: Arc<SessionService>, history: HistoryService) -> Self {
        let summary = history.summarize().await;
        Self {
            screen: Screen::Home,
            session,
            history,
            feedback: FeedbackInput::default(),
            summary,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn feedback(&self) -> &FeedbackInput {
        &self.feedback
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// Opens the routine picker for one care type.
    pub fn open_care_type(&mut self, care_type: CareType) {
        self.screen = Screen::RoutineSelect(care_type);
    }

    /// Returns to the home screen without touching the session.
    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    /// Selects a routine and starts it immediately.
    pub async fn select_routine(&mut self, routine: RoutineKey) {
        self.session.switch_routine(routine).await;
        self.session.dispatch(SessionEvent::Start).await;
        self.feedback = FeedbackInput::default();
        self.screen = Screen::ActiveSession;
    }

    /// Abandons the running session and returns home. Writes nothing.
    pub async fn exit_session(&mut self) {
        self.session.dispatch(SessionEvent::Stop).await;
        self.screen = Screen::Home;
    }

    /// Moves to the feedback form once the session has completed.
    ///
    /// Callers observe completion through the session snapshot stream and
    /// then invoke this; it refuses to switch early.
    pub fn on_session_complete(&mut self) {
        if self.session.snapshot().phase == Phase::Completed {
            self.screen = Screen::Feedback;
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.feedback.rating = rating.clamp(1, 5);
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.feedback.mood = Some(mood);
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.feedback.comment = comment;
    }

    /// Submits the feedback form.
    ///
    /// Returns `false` (and stays on the form) while no mood is selected.
    /// On success the record is persisted, the summary refreshed and the
    /// shell returns home.
    pub async fn submit_feedback(&mut self) -> bool {
        if self.feedback.mood.is_none() {
            return false;
        }
        let feedback = SessionFeedback {
            rating: self.feedback.rating,
            mood: self.feedback.mood,
            comment: self.feedback.comment.take(),
        };
        self.session
            .dispatch(SessionEvent::SubmitFeedback(feedback))
            .await;

        self.feedback = FeedbackInput::default();
        self.summary = self.history.summarize().await;
        self.screen = Screen::Home;
        true
    }
}
