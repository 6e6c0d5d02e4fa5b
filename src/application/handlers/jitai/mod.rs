//! JITAI command and query handlers.

mod create_rule;
mod detect_risk_signals;
mod errors;
mod evaluate_snapshot;
mod list_rules;
mod record_signal_feedback;
mod set_rule_enabled;
mod sync_snapshot;

#[cfg(test)]
mod test_support;

pub use create_rule::{CreateRuleCommand, CreateRuleHandler};
pub use detect_risk_signals::{
    DetectRiskSignalsHandler, DetectRiskSignalsQuery, DetectRiskSignalsResult,
};
pub use errors::JitaiError;
pub use evaluate_snapshot::{EvaluateSnapshotHandler, EvaluateSnapshotQuery};
pub use list_rules::{ListRulesHandler, ListRulesQuery};
pub use record_signal_feedback::{RecordSignalFeedbackCommand, RecordSignalFeedbackHandler};
pub use set_rule_enabled::{SetRuleEnabledCommand, SetRuleEnabledHandler};
pub use sync_snapshot::{SyncSnapshotCommand, SyncSnapshotHandler};
