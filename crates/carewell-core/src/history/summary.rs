//! Summary derivation over the full record collection.
//!
//! Summaries are recomputed on demand and never persisted. All day-based
//! bookkeeping works on local calendar dates, not timestamps: two records on
//! the same local day count as one streak day.

use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeSet;

use super::model::SessionRecord;

/// Number of entries in the recent-days window.
pub const RECENT_WINDOW_DAYS: usize = 7;

/// Completion flag for one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStatus {
    /// Local-day key, `YYYY-MM-DD`.
    pub date: String,
    pub completed: bool,
}

/// Derived statistics over the whole session history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub today_completed: bool,
    pub total_sessions: usize,
    /// Consecutive local days with a session, walking back from today.
    /// Zero when today itself has no session.
    pub current_streak: u32,
    /// Longest run of consecutive calendar days ever observed.
    pub longest_streak: u32,
    /// Exactly [`RECENT_WINDOW_DAYS`] entries, oldest first, ending today.
    pub recent_days: Vec<DayStatus>,
    /// Most recent record, if any.
    pub last_session: Option<SessionRecord>,
}

impl SessionSummary {
    /// The zero-state summary for an empty (or unreadable) history.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            today_completed: false,
            total_sessions: 0,
            current_streak: 0,
            longest_streak: 0,
            recent_days: recent_days(&BTreeSet::new(), today),
            last_session: None,
        }
    }
}

/// Parses a record's completion timestamp into a local calendar date.
///
/// Malformed timestamps yield `None`; such records still count toward the
/// session total but not toward day-based statistics.
fn local_day(record: &SessionRecord) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&record.completed_at)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Consecutive days present in `days`, walking backward from `today`.
/// Stops at the first missing day, so a missing today means zero.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive calendar days in the (already deduplicated,
/// ascending) day set. A gap of exactly one day extends the run; any larger
/// gap resets it to 1.
fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        if let Some(prev) = prev {
            let gap = (day - prev).num_days();
            // A BTreeSet over NaiveDate cannot contain duplicates, so a zero
            // gap is unreachable here.
            debug_assert!(gap >= 1);
            run = if gap == 1 { run + 1 } else { 1 };
        } else {
            run = 1;
        }
        longest = longest.max(run);
        prev = Some(day);
    }

    longest
}

/// The fixed recent-days window: ascending, ending today.
fn recent_days(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> Vec<DayStatus> {
    let mut window = Vec::with_capacity(RECENT_WINDOW_DAYS);
    let mut cursor = today;
    for _ in 0..RECENT_WINDOW_DAYS {
        window.push(DayStatus {
            date: day_key(cursor),
            completed: days.contains(&cursor),
        });
        cursor = cursor.pred_opt().unwrap_or(cursor);
    }
    window.reverse();
    window
}

/// Builds a [`SessionSummary`] from the full record collection.
///
/// `today` is the caller's local calendar date; passing it in keeps the
/// derivation pure and deterministic under test.
pub fn build_summary(records: &[SessionRecord], today: NaiveDate) -> SessionSummary {
    if records.is_empty() {
        return SessionSummary::empty(today);
    }

    // Sort by parsed timestamp, newest first. Records with malformed
    // timestamps sink to the end.
    let mut sorted: Vec<&SessionRecord> = records.iter().collect();
    sorted.sort_by_key(|r| {
        std::cmp::Reverse(
            DateTime::parse_from_rfc3339(&r.completed_at)
                .map(|dt| dt.timestamp_millis())
                .unwrap_or(i64::MIN),
        )
    });

    let days: BTreeSet<NaiveDate> = sorted.iter().filter_map(|r| local_day(r)).collect();

    SessionSummary {
        today_completed: days.contains(&today),
        total_sessions: records.len(),
        current_streak: current_streak(&days, today),
        longest_streak: longest_streak(&days),
        recent_days: recent_days(&days, today),
        last_session: sorted.first().map(|r| (*r).clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CareType;
    use crate::history::UsageScene;
    use crate::session::Mood;
    use chrono::TimeZone;

    fn record_on(date: NaiveDate) -> SessionRecord {
        let completed_at = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .to_rfc3339();
        SessionRecord {
            id: format!("r-{date}"),
            care_type: CareType::Massage,
            subtype: Some("neck".into()),
            duration: 120,
            completed_at,
            rating: 4,
            mood: Mood::Relaxed,
            comment: None,
            scene: UsageScene::Custom,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_yields_zero_state() {
        let today = date(2026, 8, 27);
        let summary = build_summary(&[], today);
        assert!(!summary.today_completed);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 0);
        assert_eq!(summary.recent_days.len(), RECENT_WINDOW_DAYS);
        assert!(summary.last_session.is_none());
    }

    #[test]
    fn total_sessions_counts_every_record() {
        let today = date(2026, 8, 27);
        let records: Vec<_> = (0..5).map(|_| record_on(today)).collect();
        assert_eq!(build_summary(&records, today).total_sessions, 5);
    }

    #[test]
    fn three_consecutive_days_ending_today_streak_is_three() {
        let today = date(2026, 8, 27);
        let records = vec![
            record_on(date(2026, 8, 25)),
            record_on(date(2026, 8, 26)),
            record_on(today),
        ];
        let summary = build_summary(&records, today);
        assert!(summary.today_completed);
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.longest_streak, 3);
    }

    #[test]
    fn missing_today_breaks_walk_back_immediately() {
        let today = date(2026, 8, 27);
        let records = vec![record_on(date(2026, 8, 25)), record_on(date(2026, 8, 26))];
        let summary = build_summary(&records, today);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn gap_larger_than_one_day_resets_longest_run() {
        let today = date(2026, 8, 27);
        let records = vec![
            record_on(date(2026, 8, 10)),
            record_on(date(2026, 8, 11)),
            record_on(date(2026, 8, 12)),
            record_on(date(2026, 8, 20)),
            record_on(date(2026, 8, 21)),
        ];
        assert_eq!(build_summary(&records, today).longest_streak, 3);
    }

    #[test]
    fn same_day_records_count_as_one_streak_day() {
        let today = date(2026, 8, 27);
        let records = vec![record_on(today), record_on(today), record_on(today)];
        let summary = build_summary(&records, today);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 1);
        assert_eq!(summary.total_sessions, 3);
    }

    #[test]
    fn recent_days_window_is_seven_entries_ending_today() {
        let today = date(2026, 8, 27);
        let records = vec![record_on(today), record_on(date(2026, 8, 23))];
        let summary = build_summary(&records, today);
        assert_eq!(summary.recent_days.len(), 7);
        assert_eq!(summary.recent_days[0].date, "2026-08-21");
        assert_eq!(summary.recent_days[6].date, "2026-08-27");
        assert!(summary.recent_days[6].completed);
        assert!(summary.recent_days[2].completed); // 08-23
        assert!(!summary.recent_days[5].completed);
    }

    #[test]
    fn last_session_is_most_recent_by_timestamp() {
        let today = date(2026, 8, 27);
        let older = record_on(date(2026, 8, 20));
        let newer = record_on(today);
        let summary = build_summary(&[older, newer.clone()], today);
        assert_eq!(summary.last_session, Some(newer));
    }

    #[test]
    fn malformed_timestamps_are_skipped_for_day_stats() {
        let today = date(2026, 8, 27);
        let mut bad = record_on(today);
        bad.completed_at = "not-a-timestamp".into();
        let summary = build_summary(&[bad], today);
        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.current_streak, 0);
        assert!(!summary.today_completed);
    }
}
