//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    CreateRuleCommand, CreateRuleHandler, DetectRiskSignalsHandler, DetectRiskSignalsQuery,
    DetectRiskSignalsResult, EvaluateSnapshotHandler, EvaluateSnapshotQuery, JitaiError,
    ListRulesHandler, ListRulesQuery, RecordSignalFeedbackCommand, RecordSignalFeedbackHandler,
    SetRuleEnabledCommand, SetRuleEnabledHandler, SyncSnapshotCommand, SyncSnapshotHandler,
};
