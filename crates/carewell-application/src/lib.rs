//! Application layer for Carewell.
//!
//! This crate wires the domain engine to real timers, audio playback and
//! persistence: `SessionService` executes engine effects, `HistoryService`
//! answers summary queries, and `AppShell` switches between screens.

pub mod bootstrap;
pub mod history_service;
pub mod session_service;
pub mod shell;

pub use history_service::HistoryService;
pub use session_service::{SessionService, SessionSnapshot};
pub use shell::{AppShell, FeedbackInput, Screen};
