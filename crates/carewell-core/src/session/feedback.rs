//! Post-session feedback input.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Rating pre-selected when the user has not touched the slider.
pub const DEFAULT_RATING: u8 = 3;

/// Mood reported at session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Energized,
    Relaxed,
    Calm,
    Refreshed,
}

/// Feedback as captured at the end of a session.
///
/// The mood is optional here because the input form starts without a
/// selection; the engine refuses submission until one is present.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFeedback {
    /// Satisfaction rating, 1-5.
    pub rating: u8,
    pub mood: Option<Mood>,
    pub comment: Option<String>,
}

impl Default for SessionFeedback {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            mood: None,
            comment: None,
        }
    }
}

impl SessionFeedback {
    /// Feedback with a mood selected and everything else at its default.
    pub fn with_mood(mood: Mood) -> Self {
        Self {
            mood: Some(mood),
            ..Self::default()
        }
    }
}
