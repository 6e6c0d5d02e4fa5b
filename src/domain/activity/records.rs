//! Journal, meeting and recovery-scene records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RecordId, SceneId, Timestamp};

/// Free-text journal entry. Only its timestamp matters to detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: RecordId,
    #[serde(default)]
    pub content: String,
    pub timestamp: Timestamp,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id: RecordId::generate(),
            content: content.into(),
            timestamp,
        }
    }
}

/// Meeting attendance record. Undated meetings are ignored by gap checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
}

impl Meeting {
    pub fn attended(name: impl Into<String>, date: Timestamp) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            date: Some(date),
        }
    }

    pub fn undated(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            date: None,
        }
    }
}

/// A pre-authored coping playbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryScene {
    pub id: SceneId,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// One activation of a recovery scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneUsage {
    pub scene_id: SceneId,
    pub activated_at: Timestamp,
}

impl SceneUsage {
    pub fn new(scene_id: SceneId, activated_at: Timestamp) -> Self {
        Self {
            scene_id,
            activated_at,
        }
    }
}
