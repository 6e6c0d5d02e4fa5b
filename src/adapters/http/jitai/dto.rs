//! HTTP DTOs for risk signal and rule endpoints.
//!
//! Domain types already carry their camelCase wire format, so most
//! requests and responses wrap them directly.

use serde::{Deserialize, Serialize};

use crate::application::handlers::DetectRiskSignalsResult;
use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::Timestamp;
use crate::domain::jitai::{JitaiRule, RiskSignal, RuleAction, RuleCondition};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body for POST /api/risk-signals/evaluate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub snapshot: ActivitySnapshot,
    #[serde(default)]
    pub now: Option<Timestamp>,
}

/// `?sort=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort: Option<String>,
}

/// Body for POST /api/risk-signals/:signal_id/feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub helpful: bool,
    #[serde(default)]
    pub note: Option<String>,
}

/// Body for POST /api/jitai-rules.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRuleRequest {
    pub name: String,
    pub condition: RuleCondition,
    pub action: RuleAction,
    #[serde(default)]
    pub explanation: String,
}

/// Body for PUT /api/jitai-rules/:rule_id/enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A signal plus its rendered sentence.
#[derive(Debug, Clone, Serialize)]
pub struct SignalView {
    #[serde(flatten)]
    pub signal: RiskSignal,
    pub explanation: String,
}

impl From<RiskSignal> for SignalView {
    fn from(signal: RiskSignal) -> Self {
        let explanation = signal.explanation();
        Self {
            signal,
            explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalsResponse {
    pub signals: Vec<SignalView>,
    pub evaluated_at: Timestamp,
}

impl SignalsResponse {
    pub fn new(signals: Vec<RiskSignal>, evaluated_at: Timestamp) -> Self {
        Self {
            signals: signals.into_iter().map(SignalView::from).collect(),
            evaluated_at,
        }
    }
}

impl From<DetectRiskSignalsResult> for SignalsResponse {
    fn from(result: DetectRiskSignalsResult) -> Self {
        Self::new(result.signals, result.detected_at)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesResponse {
    pub rules: Vec<JitaiRule>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
