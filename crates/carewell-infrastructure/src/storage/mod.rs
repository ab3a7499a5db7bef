//! File storage primitives.

mod atomic;

pub use atomic::{AtomicJsonFile, AtomicTomlFile, StorageError};
