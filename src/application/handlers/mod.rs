//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod jitai;

pub use jitai::{
    CreateRuleCommand, CreateRuleHandler, DetectRiskSignalsHandler, DetectRiskSignalsQuery,
    DetectRiskSignalsResult, EvaluateSnapshotHandler, EvaluateSnapshotQuery, JitaiError,
    ListRulesHandler, ListRulesQuery, RecordSignalFeedbackCommand, RecordSignalFeedbackHandler,
    SetRuleEnabledCommand, SetRuleEnabledHandler, SyncSnapshotCommand, SyncSnapshotHandler,
};
