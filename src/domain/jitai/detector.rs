//! Signal Detector - runs the built-in pattern checks and user rules over one snapshot.
//!
//! Output order is insertion order: built-ins first (high cravings, low mood,
//! skipped meetings, isolation, trigger scene), then matching rules in stored
//! order. Sorting by severity is left to the caller.

use tracing::debug;

use super::severity::{mean, to_severity};
use super::{
    JitaiRule, RiskSignal, RuleMatcher, SeverityScorer, SignalInputs, SignalType,
    SuggestedAction,
};
use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::Timestamp;

/// Thresholds and windows for the built-in checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionSettings {
    /// Trailing window for the craving and mood checks.
    pub lookback_days: u32,
    /// Samples needed in the window, and flagged samples needed, before a
    /// craving or mood signal fires.
    pub min_samples: usize,
    /// Craving at or above this is "high".
    pub craving_high_threshold: u8,
    /// Mood at or below this is "low".
    pub mood_low_threshold: u8,
    /// Days since the last meeting that count as skipping.
    pub meeting_gap_days: i64,
    /// Trailing window with no journal entries that counts as isolation.
    pub isolation_days: u32,
    /// Added to the base score for isolation.
    pub isolation_boost: u8,
    /// Trailing window for scene activations.
    pub scene_window_days: u32,
    /// Activations in the window that count as frequent.
    pub scene_usage_min: usize,
    /// Severity points per unit of rule priority.
    pub rule_priority_weight: u8,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            lookback_days: 3,
            min_samples: 3,
            craving_high_threshold: 7,
            mood_low_threshold: 2,
            meeting_gap_days: 7,
            isolation_days: 3,
            isolation_boost: 20,
            scene_window_days: 7,
            scene_usage_min: 3,
            rule_priority_weight: 10,
        }
    }
}

const CHECK_IN_ACTIONS: [SuggestedAction; 3] = [
    SuggestedAction::ShowSafetyPlan,
    SuggestedAction::SuggestMeeting,
    SuggestedAction::SuggestTool,
];

/// Orchestrates one detection pass.
///
/// Pure: reads the snapshot, never mutates it, keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct SignalDetector {
    settings: DetectionSettings,
}

impl SignalDetector {
    /// Detector with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DetectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    /// Runs every check against `snapshot` as of `now`.
    pub fn detect(&self, snapshot: &ActivitySnapshot, now: Timestamp) -> Vec<RiskSignal> {
        let mut signals: Vec<RiskSignal> = [
            self.high_cravings(snapshot, now),
            self.low_mood(snapshot, now),
            self.skipped_meetings(snapshot, now),
            self.isolation(snapshot, now),
            self.frequent_scene_usage(snapshot, now),
        ]
        .into_iter()
        .flatten()
        .collect();

        let built_in = signals.len();
        signals.extend(
            snapshot
                .jitai_rules
                .iter()
                .filter_map(|rule| self.rule_signal(rule, snapshot, now)),
        );

        debug!(
            built_in,
            custom = signals.len() - built_in,
            rules = snapshot.jitai_rules.len(),
            "Risk detection pass complete"
        );

        signals
    }

    /// Several recent check-ins with cravings at or above the high threshold.
    pub fn high_cravings(&self, snapshot: &ActivitySnapshot, now: Timestamp) -> Option<RiskSignal> {
        let s = &self.settings;
        let recent: Vec<u8> = snapshot
            .pulse_checks_since(now.minus_days(s.lookback_days.into()))
            .map(|check| check.craving)
            .collect();
        if recent.len() < s.min_samples {
            return None;
        }

        let high: Vec<f64> = recent
            .iter()
            .filter(|craving| **craving >= s.craving_high_threshold)
            .map(|craving| f64::from(*craving))
            .collect();
        if high.len() < s.min_samples {
            return None;
        }

        let inputs = SignalInputs::new()
            .with("days", high.len() as u64)
            .with("avgCraving", one_decimal(mean(&high).unwrap_or(0.0)));

        Some(RiskSignal::new(
            SignalType::HighCravings,
            SeverityScorer::score(&high, &[], 0.0, 0),
            now,
            inputs,
            CHECK_IN_ACTIONS.to_vec(),
        ))
    }

    /// Several recent check-ins with mood at or below the low threshold.
    pub fn low_mood(&self, snapshot: &ActivitySnapshot, now: Timestamp) -> Option<RiskSignal> {
        let s = &self.settings;
        let recent: Vec<u8> = snapshot
            .pulse_checks_since(now.minus_days(s.lookback_days.into()))
            .map(|check| check.mood)
            .collect();
        if recent.len() < s.min_samples {
            return None;
        }

        let low: Vec<f64> = recent
            .iter()
            .filter(|mood| **mood <= s.mood_low_threshold)
            .map(|mood| f64::from(*mood))
            .collect();
        if low.len() < s.min_samples {
            return None;
        }

        let inputs = SignalInputs::new()
            .with("days", low.len() as u64)
            .with("avgMood", one_decimal(mean(&low).unwrap_or(0.0)));

        Some(RiskSignal::new(
            SignalType::LowMood,
            SeverityScorer::score(&[], &low, 0.0, 0),
            now,
            inputs,
            CHECK_IN_ACTIONS.to_vec(),
        ))
    }

    /// Too long since the most recent dated meeting. Silent when no meeting has a date.
    pub fn skipped_meetings(
        &self,
        snapshot: &ActivitySnapshot,
        now: Timestamp,
    ) -> Option<RiskSignal> {
        let last = snapshot.latest_meeting_date()?;
        let gap_days = now.whole_days_since(&last);
        if gap_days < self.settings.meeting_gap_days {
            return None;
        }

        let inputs = SignalInputs::new()
            .with("gapDays", gap_days)
            .with("lastMeetingISO", last.to_iso_string());

        Some(RiskSignal::new(
            SignalType::SkippedMeetings,
            SeverityScorer::score(&[], &[], gap_days as f64, 0),
            now,
            inputs,
            vec![SuggestedAction::SuggestMeeting],
        ))
    }

    /// No journal entries in the trailing window.
    pub fn isolation(&self, snapshot: &ActivitySnapshot, now: Timestamp) -> Option<RiskSignal> {
        let s = &self.settings;
        if snapshot.journal_entries_since(now.minus_days(s.isolation_days.into())) > 0 {
            return None;
        }

        let severity = to_severity(
            f64::from(SeverityScorer::base()) + f64::from(s.isolation_boost),
        );

        Some(RiskSignal::new(
            SignalType::Isolation,
            severity,
            now,
            SignalInputs::new().with("days", u64::from(s.isolation_days)),
            vec![SuggestedAction::SuggestTool],
        ))
    }

    /// Recovery scenes opened often in the trailing window.
    pub fn frequent_scene_usage(
        &self,
        snapshot: &ActivitySnapshot,
        now: Timestamp,
    ) -> Option<RiskSignal> {
        let s = &self.settings;
        let count = snapshot.scene_usages_since(now.minus_days(s.scene_window_days.into()));
        if count < s.scene_usage_min {
            return None;
        }

        let inputs = SignalInputs::new()
            .with("count", count as u64)
            .with("days", u64::from(s.scene_window_days));

        Some(RiskSignal::new(
            SignalType::TriggerScene,
            SeverityScorer::score(&[], &[], 0.0, count),
            now,
            inputs,
            vec![SuggestedAction::OpenScene],
        ))
    }

    /// A `custom` signal for an enabled rule whose condition holds.
    pub fn rule_signal(
        &self,
        rule: &JitaiRule,
        snapshot: &ActivitySnapshot,
        now: Timestamp,
    ) -> Option<RiskSignal> {
        if !RuleMatcher::matches(rule, snapshot, now) {
            return None;
        }

        let boost = f64::from(rule.action.priority) * f64::from(self.settings.rule_priority_weight);
        let severity = to_severity(f64::from(SeverityScorer::base()) + boost);

        let inputs = SignalInputs::new()
            .with("ruleId", rule.id.to_string())
            .with("ruleName", rule.name.clone())
            .with("conditionType", rule.condition.type_tag())
            .with("explanation", rule.explanation.clone());

        Some(RiskSignal::new(
            SignalType::Custom,
            severity,
            now,
            inputs,
            vec![rule.action.action_type],
        ))
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod detector_test;
