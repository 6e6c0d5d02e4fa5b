//! Read-only bundle of a user's recent activity, evaluated once per detection pass.

use serde::{Deserialize, Serialize};

use super::{DailyCard, JournalEntry, Meeting, MiddayPulseCheck, RecoveryScene, SceneUsage};
use crate::domain::foundation::Timestamp;
use crate::domain::jitai::JitaiRule;

/// Activity snapshot supplied by the client store.
///
/// Every collection defaults to empty so partial payloads deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivitySnapshot {
    pub daily_cards: Vec<DailyCard>,
    pub journal_entries: Vec<JournalEntry>,
    pub meetings: Vec<Meeting>,
    pub recovery_scenes: Vec<RecoveryScene>,
    pub scene_usages: Vec<SceneUsage>,
    pub jitai_rules: Vec<JitaiRule>,
}

impl ActivitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Midday pulse checks taken at or after `start`, in card order.
    ///
    /// Cards without a pulse check contribute no sample.
    pub fn pulse_checks_since(
        &self,
        start: Timestamp,
    ) -> impl Iterator<Item = &MiddayPulseCheck> + '_ {
        self.daily_cards
            .iter()
            .filter_map(|card| card.midday_pulse_check.as_ref())
            .filter(move |check| check.timestamp >= start)
    }

    /// Number of journal entries written at or after `start`.
    pub fn journal_entries_since(&self, start: Timestamp) -> usize {
        self.journal_entries
            .iter()
            .filter(|entry| entry.timestamp >= start)
            .count()
    }

    /// Most recent meeting date, ignoring undated meetings.
    pub fn latest_meeting_date(&self) -> Option<Timestamp> {
        self.meetings.iter().filter_map(|m| m.date).max()
    }

    /// Number of scene activations at or after `start`.
    pub fn scene_usages_since(&self, start: Timestamp) -> usize {
        self.scene_usages
            .iter()
            .filter(|usage| usage.activated_at >= start)
            .count()
    }
}
