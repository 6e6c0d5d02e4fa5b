//! Rule Matcher - evaluates one user rule against an activity snapshot.

use super::severity::mean;
use super::{ConditionOperator, ConditionParams, JitaiRule, RuleCondition, MAX_WINDOW_DAYS};
use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::Timestamp;

/// Two averages closer than this are "equal", and a trend must move at least this much.
pub const TREND_HYSTERESIS: f64 = 0.5;

/// Stateless rule evaluator.
pub struct RuleMatcher;

impl RuleMatcher {
    /// Returns true when `rule` is enabled and its condition holds at `now`.
    ///
    /// Insufficient data is a non-match, never an error.
    pub fn matches(rule: &JitaiRule, snapshot: &ActivitySnapshot, now: Timestamp) -> bool {
        if !rule.enabled {
            return false;
        }

        match &rule.condition {
            RuleCondition::CravingThreshold(params) => {
                Self::craving_threshold(params, snapshot, now)
            }
            RuleCondition::MoodTrend(params) => Self::mood_trend(params, snapshot, now),
            RuleCondition::MeetingGap(params) => Self::meeting_gap(params, snapshot, now),
            RuleCondition::SceneUsage(params) => Self::scene_usage(params, snapshot, now),
            // No evaluator exists for custom logic yet; these rules never fire.
            RuleCondition::Custom(_) => false,
            RuleCondition::Unsupported => false,
        }
    }

    fn craving_threshold(
        params: &ConditionParams,
        snapshot: &ActivitySnapshot,
        now: Timestamp,
    ) -> bool {
        let cravings: Vec<f64> = snapshot
            .pulse_checks_since(window_start(params, now))
            .map(|check| f64::from(check.craving))
            .collect();

        let Some(avg) = mean(&cravings) else {
            return false;
        };

        match params.operator {
            ConditionOperator::GreaterThan => avg >= params.threshold,
            ConditionOperator::LessThan => avg < params.threshold,
            ConditionOperator::Equals => (avg - params.threshold).abs() < TREND_HYSTERESIS,
            _ => false,
        }
    }

    fn mood_trend(params: &ConditionParams, snapshot: &ActivitySnapshot, now: Timestamp) -> bool {
        let moods: Vec<f64> = snapshot
            .pulse_checks_since(window_start(params, now))
            .map(|check| f64::from(check.mood))
            .collect();

        if moods.len() < 2 {
            return false;
        }

        let (first_half, second_half) = moods.split_at(moods.len() / 2);
        let (Some(first), Some(second)) = (mean(first_half), mean(second_half)) else {
            return false;
        };

        match params.operator {
            ConditionOperator::TrendingDown => first - second >= TREND_HYSTERESIS,
            ConditionOperator::TrendingUp => second - first >= TREND_HYSTERESIS,
            ConditionOperator::LessThan => {
                mean(&moods).is_some_and(|avg| avg < params.threshold)
            }
            _ => false,
        }
    }

    fn meeting_gap(params: &ConditionParams, snapshot: &ActivitySnapshot, now: Timestamp) -> bool {
        let gap_days = match snapshot.latest_meeting_date() {
            Some(last) => now.whole_days_since(&last) as f64,
            None => f64::from(window_days(params)),
        };

        match params.operator {
            ConditionOperator::GreaterThan => gap_days >= params.threshold,
            _ => false,
        }
    }

    fn scene_usage(params: &ConditionParams, snapshot: &ActivitySnapshot, now: Timestamp) -> bool {
        let count = snapshot.scene_usages_since(window_start(params, now)) as f64;

        match params.operator {
            ConditionOperator::GreaterThan => count >= params.threshold,
            _ => false,
        }
    }
}

/// Rules from a pushed snapshot skip validation, so the window is clamped here.
fn window_days(params: &ConditionParams) -> u32 {
    params.window_days.min(MAX_WINDOW_DAYS)
}

fn window_start(params: &ConditionParams, now: Timestamp) -> Timestamp {
    now.minus_days(i64::from(window_days(params)))
}

#[cfg(test)]
#[path = "rule_matcher_test.rs"]
mod rule_matcher_test;
