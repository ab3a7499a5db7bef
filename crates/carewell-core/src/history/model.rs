//! Persisted session record models.
//!
//! Records are append-only and immutable once written. The wire form is
//! camelCase JSON to stay compatible with the persisted history layout.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::catalog::CareType;
use crate::session::Mood;

/// When in the day a session took place.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, Default,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UsageScene {
    Morning,
    Lunch,
    Evening,
    WorkBreak,
    #[default]
    Custom,
}

/// One completed session, as persisted in the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique record identifier (UUID format), generated on append.
    pub id: String,
    /// Care category of the completed routine.
    #[serde(rename = "type")]
    pub care_type: CareType,
    /// Subtype slug (organ, body part or stretch target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Session duration in seconds, always >= 1.
    pub duration: u32,
    /// Completion timestamp (ISO 8601 / RFC 3339).
    pub completed_at: String,
    /// Satisfaction rating, 1-5.
    pub rating: u8,
    /// Mood reported at session end.
    pub mood: Mood,
    /// Optional free-text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Usage-scene tag.
    #[serde(default)]
    pub scene: UsageScene,
}

/// A record as produced by the session engine, before an id is assigned.
///
/// The history store owns id generation; the engine only ever emits this
/// id-less shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRecord {
    #[serde(rename = "type")]
    pub care_type: CareType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub duration: u32,
    pub completed_at: String,
    pub rating: u8,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub scene: UsageScene,
}

impl NewSessionRecord {
    /// Attaches a generated id, producing the persisted record shape.
    pub fn into_record(self, id: String) -> SessionRecord {
        SessionRecord {
            id,
            care_type: self.care_type,
            subtype: self.subtype,
            duration: self.duration.max(1),
            completed_at: self.completed_at,
            rating: self.rating,
            mood: self.mood,
            comment: self.comment,
            scene: self.scene,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionRecord {
        SessionRecord {
            id: "abc".into(),
            care_type: CareType::Massage,
            subtype: Some("neck".into()),
            duration: 300,
            completed_at: "2026-08-27T12:00:00+09:00".into(),
            rating: 5,
            mood: Mood::Relaxed,
            comment: None,
            scene: UsageScene::Custom,
        }
    }

    #[test]
    fn record_serializes_to_camel_case_wire_form() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "massage");
        assert_eq!(json["subtype"], "neck");
        assert_eq!(json["completedAt"], "2026-08-27T12:00:00+09:00");
        assert_eq!(json["scene"], "custom");
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn record_round_trips() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn missing_scene_defaults_to_custom() {
        let json = r#"{"id":"x","type":"stretch","duration":60,
            "completedAt":"2026-08-27T12:00:00Z","rating":3,"mood":"calm"}"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.scene, UsageScene::Custom);
        assert_eq!(record.subtype, None);
    }

    #[test]
    fn into_record_clamps_duration() {
        let new = NewSessionRecord {
            care_type: CareType::Stretch,
            subtype: None,
            duration: 0,
            completed_at: "2026-08-27T12:00:00Z".into(),
            rating: 3,
            mood: Mood::Calm,
            comment: None,
            scene: UsageScene::default(),
        };
        assert_eq!(new.into_record("id".into()).duration, 1);
    }
}
