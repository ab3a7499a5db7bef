//! JSON-file backed session history.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

use carewell_core::error::Result;
use carewell_core::history::{NewSessionRecord, RecordRepository, SessionRecord};

use crate::storage::AtomicJsonFile;

/// [`RecordRepository`] implementation over a single JSON file.
///
/// The whole collection is rewritten on every append; histories stay small
/// (one record per completed session) so this is deliberately simple.
pub struct JsonRecordRepository {
    file: AtomicJsonFile<Vec<SessionRecord>>,
}

impl JsonRecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Reads the stored collection, treating missing, empty or corrupt data
    /// as an empty history.
    fn load_or_empty(&self) -> Vec<SessionRecord> {
        match self.file.load() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(path = %self.file.path().display(), error = %e,
                    "session history unreadable, starting from empty");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RecordRepository for JsonRecordRepository {
    async fn append(&self, record: NewSessionRecord) -> Result<Vec<SessionRecord>> {
        let mut records = self.load_or_empty();
        records.insert(0, record.into_record(Uuid::new_v4().to_string()));
        self.file.save(&records)?;
        Ok(records)
    }

    async fn list_all(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.load_or_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carewell_core::catalog::CareType;
    use carewell_core::history::UsageScene;
    use carewell_core::session::Mood;

    fn new_record(subtype: &str, duration: u32) -> NewSessionRecord {
        NewSessionRecord {
            care_type: CareType::Massage,
            subtype: Some(subtype.into()),
            duration,
            completed_at: "2026-08-27T12:00:00+09:00".into(),
            rating: 4,
            mood: Mood::Relaxed,
            comment: None,
            scene: UsageScene::Custom,
        }
    }

    #[tokio::test]
    async fn append_assigns_id_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRecordRepository::new(dir.path().join("sessions.json"));

        let records = repo.append(new_record("neck", 300)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].id.is_empty());
        assert_eq!(records[0].subtype.as_deref(), Some("neck"));
        assert_eq!(records[0].duration, 300);
        assert_eq!(records[0].rating, 4);

        // A fresh repository over the same file sees the record.
        let repo2 = JsonRecordRepository::new(dir.path().join("sessions.json"));
        let listed = repo2.list_all().await.unwrap();
        assert_eq!(listed, records);
    }

    #[tokio::test]
    async fn append_prepends_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRecordRepository::new(dir.path().join("sessions.json"));

        repo.append(new_record("neck", 100)).await.unwrap();
        let records = repo.append(new_record("shoulder", 200)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subtype.as_deref(), Some("shoulder"));
        assert_eq!(records[1].subtype.as_deref(), Some("neck"));
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn append_clamps_zero_duration() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRecordRepository::new(dir.path().join("sessions.json"));
        let records = repo.append(new_record("neck", 0)).await.unwrap();
        assert_eq!(records[0].duration, 1);
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{{ definitely not json").unwrap();

        let repo = JsonRecordRepository::new(path);
        assert!(repo.list_all().await.unwrap().is_empty());

        // Appending over a corrupt file starts a fresh collection.
        let records = repo.append(new_record("neck", 60)).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRecordRepository::new(dir.path().join("nope.json"));
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
