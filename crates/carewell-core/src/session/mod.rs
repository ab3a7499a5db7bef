//! Session domain module.
//!
//! # Module Structure
//!
//! - `engine`: the session playback state machine (`SessionEngine`)
//! - `feedback`: post-session feedback input (`SessionFeedback`, `Mood`)
//! - `player`: cue player collaborator trait (`CuePlayer`, `CueError`)

mod engine;
mod feedback;
mod player;

pub use engine::{
    AUTO_ADVANCE_DELAY, CueRequest, Effect, Phase, SessionEngine, SessionEvent,
};
pub use feedback::{DEFAULT_RATING, Mood, SessionFeedback};
pub use player::{CueError, CuePlayer};
