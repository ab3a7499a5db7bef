//! Session history domain module.
//!
//! # Module Structure
//!
//! - `model`: persisted record shapes (`SessionRecord`, `NewSessionRecord`)
//! - `repository`: repository trait for history persistence
//! - `summary`: pure derivation of streaks and recent-day statistics

mod model;
mod repository;
mod summary;

pub use model::{NewSessionRecord, SessionRecord, UsageScene};
pub use repository::RecordRepository;
pub use summary::{DayStatus, SessionSummary, build_summary, RECENT_WINDOW_DAYS};
