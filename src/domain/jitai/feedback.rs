//! User feedback on a delivered risk signal.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SignalId, Timestamp, UserId};

/// Whether a suggestion sheet helped, kept alongside the signal it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalFeedback {
    pub signal_id: SignalId,
    pub user_id: UserId,
    pub helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub recorded_at: Timestamp,
}

impl SignalFeedback {
    pub fn new(
        signal_id: SignalId,
        user_id: UserId,
        helpful: bool,
        note: Option<String>,
        recorded_at: Timestamp,
    ) -> Self {
        // blank notes are dropped
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            signal_id,
            user_id,
            helpful,
            note,
            recorded_at,
        }
    }
}
