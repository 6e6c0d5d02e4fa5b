//! Risk signals emitted by a detection pass.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ExplanationGenerator;
use crate::domain::foundation::{SignalId, Timestamp};

/// The pattern (or rule) that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalType {
    HighCravings,
    LowMood,
    SkippedMeetings,
    Isolation,
    TriggerScene,
    Custom,
}

impl SignalType {
    /// Wire tag, e.g. `high-cravings`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::HighCravings => "high-cravings",
            SignalType::LowMood => "low-mood",
            SignalType::SkippedMeetings => "skipped-meetings",
            SignalType::Isolation => "isolation",
            SignalType::TriggerScene => "trigger-scene",
            SignalType::Custom => "custom",
        }
    }

    /// Parses a wire tag; `None` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "high-cravings" => Some(SignalType::HighCravings),
            "low-mood" => Some(SignalType::LowMood),
            "skipped-meetings" => Some(SignalType::SkippedMeetings),
            "isolation" => Some(SignalType::Isolation),
            "trigger-scene" => Some(SignalType::TriggerScene),
            "custom" => Some(SignalType::Custom),
            _ => None,
        }
    }
}

/// Coping action offered alongside a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestedAction {
    ShowSafetyPlan,
    SuggestMeeting,
    SuggestTool,
    OpenScene,
    ContactSponsor,
}

/// Free-form evidence bag attached to a signal (camelCase keys).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalInputs(Map<String, Value>);

impl SignalInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one piece of evidence.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Numeric value for `key`, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Non-negative integer value for `key`.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    /// String value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One severity-scored detection event.
///
/// Built fresh on every pass; persistence belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSignal {
    pub id: SignalId,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// 0 to 100.
    pub severity: u8,
    #[serde(rename = "detectedAtISO")]
    pub detected_at: Timestamp,
    pub inputs: SignalInputs,
    pub suggested_actions: Vec<SuggestedAction>,
}

impl RiskSignal {
    /// Creates a signal with a freshly minted id.
    pub fn new(
        signal_type: SignalType,
        severity: u8,
        detected_at: Timestamp,
        inputs: SignalInputs,
        suggested_actions: Vec<SuggestedAction>,
    ) -> Self {
        Self {
            id: SignalId::generate(detected_at),
            signal_type,
            severity: severity.min(100),
            detected_at,
            inputs,
            suggested_actions,
        }
    }

    /// Human-readable sentence for suggestion sheets.
    pub fn explanation(&self) -> String {
        ExplanationGenerator::explain(self.signal_type, &self.inputs)
    }
}
