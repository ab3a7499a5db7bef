//! History queries and summary derivation.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::warn;

use carewell_core::history::{RecordRepository, SessionRecord, SessionSummary, build_summary};

/// Read side of the session history.
///
/// All methods are fail-soft: an unreadable store behaves like an empty
/// one, so the home screen always has something to show.
pub struct HistoryService {
    repository: Arc<dyn RecordRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Summary anchored to the current local day.
    pub async fn summarize(&self) -> SessionSummary {
        self.summarize_for(Local::now().date_naive()).await
    }

    /// Summary anchored to an explicit day. The seam that keeps streak
    /// logic deterministic under test.
    pub async fn summarize_for(&self, today: NaiveDate) -> SessionSummary {
        build_summary(&self.records().await, today)
    }

    /// All stored records, newest first.
    pub async fn records(&self) -> Vec<SessionRecord> {
        match self.repository.list_all().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "session history unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carewell_core::catalog::CareType;
    use carewell_core::error::Result;
    use carewell_core::history::{NewSessionRecord, UsageScene};
    use carewell_core::session::Mood;
    use std::sync::Mutex;

    struct FixedRepository {
        records: Mutex<Vec<SessionRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl RecordRepository for FixedRepository {
        async fn append(&self, record: NewSessionRecord) -> Result<Vec<SessionRecord>> {
            let mut records = self.records.lock().unwrap();
            records.insert(0, record.into_record("id".into()));
            Ok(records.clone())
        }

        async fn list_all(&self) -> Result<Vec<SessionRecord>> {
            if self.fail {
                return Err(carewell_core::CareError::data_access("mock failure"));
            }
            Ok(self.records.lock().unwrap().clone())
        }
    }

    fn record_on(date: NaiveDate) -> SessionRecord {
        let completed_at = chrono::TimeZone::from_local_datetime(
            &Local,
            &date.and_hms_opt(8, 0, 0).unwrap(),
        )
        .unwrap()
        .to_rfc3339();
        SessionRecord {
            id: date.to_string(),
            care_type: CareType::Stretch,
            subtype: Some("eye-strain".into()),
            duration: 75,
            completed_at,
            rating: 4,
            mood: Mood::Refreshed,
            comment: None,
            scene: UsageScene::Custom,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 27)
    }

    #[tokio::test]
    async fn summarizes_stored_records() {
        let repo = Arc::new(FixedRepository {
            records: Mutex::new(vec![record_on(today()), record_on(date(2026, 8, 26))]),
            fail: false,
        });
        let service = HistoryService::new(repo);

        let summary = service.summarize_for(today()).await;
        assert!(summary.today_completed);
        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.current_streak, 2);
    }

    #[tokio::test]
    async fn unreadable_store_summarizes_as_empty() {
        let repo = Arc::new(FixedRepository {
            records: Mutex::new(vec![record_on(today())]),
            fail: true,
        });
        let service = HistoryService::new(repo);

        let summary = service.summarize_for(today()).await;
        assert!(!summary.today_completed);
        assert_eq!(summary.total_sessions, 0);
        assert!(service.records().await.is_empty());
    }
}
