//! Carewell core: domain models and the session playback engine.
//!
//! This crate is free of I/O. Storage and audio are reached through the
//! repository and player traits defined here and implemented in
//! `carewell-infrastructure`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod session;

// Re-export common error type
pub use error::CareError;
