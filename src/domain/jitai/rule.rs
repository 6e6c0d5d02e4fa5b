//! User-authored JITAI rules.
//!
//! A rule pairs a condition over recent activity with the action to suggest
//! when it fires. Rules are soft-disabled, never hard-deleted.

use serde::{Deserialize, Serialize};

use super::SuggestedAction;
use crate::domain::foundation::{RuleId, Timestamp, ValidationError};

/// Longest trailing window a rule may look at.
pub const MAX_WINDOW_DAYS: u32 = 90;
/// Highest action priority a rule may carry.
pub const MAX_PRIORITY: u8 = 10;

/// Comparison applied to a condition's aggregate.
///
/// Each condition type supports a subset; the rest never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionOperator {
    GreaterThan,
    LessThan,
    Equals,
    TrendingUp,
    TrendingDown,
}

/// Parameters shared by every condition type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionParams {
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    pub operator: ConditionOperator,
}

fn default_window_days() -> u32 {
    7
}

impl ConditionParams {
    pub fn new(operator: ConditionOperator, threshold: f64, window_days: u32) -> Self {
        Self {
            threshold,
            window_days,
            operator,
        }
    }
}

/// What a rule watches, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RuleCondition {
    /// Average midday craving in the window.
    CravingThreshold(ConditionParams),
    /// Direction or level of midday mood in the window.
    MoodTrend(ConditionParams),
    /// Days since the most recent dated meeting.
    MeetingGap(ConditionParams),
    /// Recovery-scene activations in the window.
    SceneUsage(ConditionParams),
    /// Authored in the rule builder but has no evaluator yet.
    Custom(ConditionParams),
    /// Any tag this build does not recognize.
    #[serde(other)]
    Unsupported,
}

impl RuleCondition {
    /// Wire tag for logs and events.
    pub fn type_tag(&self) -> &'static str {
        match self {
            RuleCondition::CravingThreshold(_) => "craving-threshold",
            RuleCondition::MoodTrend(_) => "mood-trend",
            RuleCondition::MeetingGap(_) => "meeting-gap",
            RuleCondition::SceneUsage(_) => "scene-usage",
            RuleCondition::Custom(_) => "custom",
            RuleCondition::Unsupported => "unsupported",
        }
    }

    pub fn params(&self) -> Option<&ConditionParams> {
        match self {
            RuleCondition::CravingThreshold(p)
            | RuleCondition::MoodTrend(p)
            | RuleCondition::MeetingGap(p)
            | RuleCondition::SceneUsage(p)
            | RuleCondition::Custom(p) => Some(p),
            RuleCondition::Unsupported => None,
        }
    }
}

/// The single action a matched rule suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: SuggestedAction,
    /// 1 (gentle) to 10 (urgent); adds `priority * 10` to severity.
    pub priority: u8,
}

/// A user-authored automation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JitaiRule {
    #[serde(default)]
    pub id: RuleId,
    #[serde(default)]
    pub name: String,
    pub condition: RuleCondition,
    pub action: RuleAction,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

fn default_enabled() -> bool {
    true
}

impl JitaiRule {
    /// Creates an enabled rule after validating its fields.
    pub fn new(
        name: impl Into<String>,
        condition: RuleCondition,
        action: RuleAction,
        explanation: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            id: RuleId::new(),
            name: name.into(),
            condition,
            action,
            enabled: true,
            explanation: explanation.into(),
            created_at: None,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Checks rule-builder constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let params = self.condition.params().ok_or_else(|| {
            ValidationError::invalid_format("condition", "unsupported condition type")
        })?;

        if !(1..=MAX_WINDOW_DAYS).contains(&params.window_days) {
            return Err(ValidationError::out_of_range(
                "window_days",
                1,
                MAX_WINDOW_DAYS.into(),
                params.window_days.into(),
            ));
        }
        if !params.threshold.is_finite() {
            return Err(ValidationError::invalid_format(
                "threshold",
                "must be a finite number",
            ));
        }
        if !(1..=MAX_PRIORITY).contains(&self.action.priority) {
            return Err(ValidationError::out_of_range(
                "priority",
                1,
                MAX_PRIORITY.into(),
                self.action.priority.into(),
            ));
        }
        Ok(())
    }

    /// Stamps the creation time; set once by whoever persists the rule.
    pub fn created(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }
}
