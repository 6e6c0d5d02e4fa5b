//! JITAI domain events.
//!
//! Published after a detection pass, on feedback, and when rules change.
//! Consumers include the intervention notifier and any audit trail.

use serde::{Deserialize, Serialize};

use super::{RiskSignal, SignalType};
use crate::domain::foundation::{domain_event, EventId, RuleId, SignalId, Timestamp, UserId};

/// Published when a detection pass produced at least one signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSignalsDetected {
    /// Unique event identifier for deduplication.
    pub event_id: EventId,
    /// Whose snapshot was evaluated.
    pub user_id: UserId,
    /// Signals in detection order.
    pub signals: Vec<RiskSignal>,
    /// The `now` the pass ran at.
    pub detected_at: Timestamp,
}

domain_event!(
    RiskSignalsDetected,
    event_type = "jitai.risk_signals_detected.v1",
    aggregate_id = user_id,
    aggregate_type = "RiskSignals",
    occurred_at = detected_at,
    event_id = event_id
);

impl RiskSignalsDetected {
    pub fn new(user_id: UserId, signals: Vec<RiskSignal>, detected_at: Timestamp) -> Self {
        Self {
            event_id: EventId::new(),
            user_id,
            signals,
            detected_at,
        }
    }

    /// Highest severity in the batch, 0 when empty.
    pub fn max_severity(&self) -> u8 {
        self.signals.iter().map(|s| s.severity).max().unwrap_or(0)
    }
}

/// Published when the user answers a suggestion sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalFeedbackRecorded {
    pub event_id: EventId,
    pub signal_id: SignalId,
    pub signal_type: SignalType,
    pub user_id: UserId,
    pub helpful: bool,
    pub recorded_at: Timestamp,
}

domain_event!(
    SignalFeedbackRecorded,
    event_type = "jitai.signal_feedback_recorded.v1",
    aggregate_id = signal_id,
    aggregate_type = "RiskSignal",
    occurred_at = recorded_at,
    event_id = event_id
);

/// Published when a user saves a new rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitaiRuleCreated {
    pub event_id: EventId,
    pub rule_id: RuleId,
    pub user_id: UserId,
    pub name: String,
    /// Wire tag of the condition, e.g. `craving-threshold`.
    pub condition_type: String,
    pub created_at: Timestamp,
}

domain_event!(
    JitaiRuleCreated,
    event_type = "jitai.rule_created.v1",
    aggregate_id = rule_id,
    aggregate_type = "JitaiRule",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a rule is switched on or off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitaiRuleToggled {
    pub event_id: EventId,
    pub rule_id: RuleId,
    pub user_id: UserId,
    pub enabled: bool,
    pub toggled_at: Timestamp,
}

domain_event!(
    JitaiRuleToggled,
    event_type = "jitai.rule_toggled.v1",
    aggregate_id = rule_id,
    aggregate_type = "JitaiRule",
    occurred_at = toggled_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};
    use crate::domain::jitai::{SignalInputs, SuggestedAction};

    fn signal(severity: u8) -> RiskSignal {
        RiskSignal::new(
            SignalType::Isolation,
            severity,
            Timestamp::now(),
            SignalInputs::new().with("days", 3u64),
            vec![SuggestedAction::SuggestTool],
        )
    }

    #[test]
    fn detected_event_routes_by_user() {
        let user = UserId::new("user-7").unwrap();
        let event = RiskSignalsDetected::new(user, vec![signal(20)], Timestamp::now());

        assert_eq!(event.event_type(), "jitai.risk_signals_detected.v1");
        assert_eq!(event.aggregate_id(), "user-7");
        assert_eq!(event.aggregate_type(), "RiskSignals");
    }

    #[test]
    fn detected_event_survives_envelope() {
        let user = UserId::new("user-7").unwrap();
        let event = RiskSignalsDetected::new(user, vec![signal(20), signal(45)], Timestamp::now());

        let envelope = EventEnvelope::from_event(&event).unwrap();
        let back: RiskSignalsDetected = envelope.payload_as().unwrap();

        assert_eq!(envelope.schema_version, 1);
        assert_eq!(back.signals, event.signals);
        assert_eq!(back.max_severity(), 45);
    }

    #[test]
    fn max_severity_of_empty_batch_is_zero() {
        let event =
            RiskSignalsDetected::new(UserId::new("u").unwrap(), Vec::new(), Timestamp::now());
        assert_eq!(event.max_severity(), 0);
    }
}
