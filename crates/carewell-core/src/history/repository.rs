//! Record repository trait.
//!
//! Defines the interface for append-only session history persistence.

use async_trait::async_trait;

use super::model::{NewSessionRecord, SessionRecord};
use crate::error::Result;

/// An abstract repository for the session history.
///
/// The history is append-only: records are never edited or deleted through
/// this interface. Implementations own id generation and the persisted
/// collection; callers only ever hand over id-less records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Appends a record, generating its unique id, and persists the full
    /// collection.
    ///
    /// # Returns
    ///
    /// The updated collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted. The already
    /// stored records are left untouched in that case.
    async fn append(&self, record: NewSessionRecord) -> Result<Vec<SessionRecord>>;

    /// Lists all stored records.
    ///
    /// Implementations treat corrupt or unreadable persisted data as an
    /// empty collection rather than an error (fail-soft).
    async fn list_all(&self) -> Result<Vec<SessionRecord>>;
}
