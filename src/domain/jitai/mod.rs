//! JITAI Module - just-in-time adaptive intervention risk detection.
//!
//! Pure domain services that read an [`ActivitySnapshot`](crate::domain::activity::ActivitySnapshot)
//! and decide whether the user may benefit from a timely nudge.
//!
//! # Components
//!
//! - `SeverityScorer` - Weighted 0-100 score from cravings, mood, meeting gap and scene usage
//! - `ExplanationGenerator` - One plain-language sentence per signal
//! - `RuleMatcher` - Evaluates user-authored rules
//! - `SignalDetector` - Runs the built-in checks and rules, producing `RiskSignal`s
//!
//! Nothing here performs I/O. The clock is an argument, so every pass is
//! reproducible for a given snapshot and `now`.

mod detector;
mod events;
mod explanation;
mod feedback;
mod rule;
mod rule_matcher;
pub(crate) mod severity;
mod signal;

pub use detector::{DetectionSettings, SignalDetector};
pub use events::{JitaiRuleCreated, JitaiRuleToggled, RiskSignalsDetected, SignalFeedbackRecorded};
pub use explanation::ExplanationGenerator;
pub use feedback::SignalFeedback;
pub use rule::{
    ConditionOperator, ConditionParams, JitaiRule, RuleAction, RuleCondition, MAX_PRIORITY,
    MAX_WINDOW_DAYS,
};
pub use rule_matcher::{RuleMatcher, TREND_HYSTERESIS};
pub use severity::{
    SeverityScorer, CRAVING_CAP, MAX_SEVERITY, MEETING_GAP_CAP, MOOD_CAP, SCENE_USAGE_CAP,
};
pub use signal::{RiskSignal, SignalInputs, SignalType, SuggestedAction};
