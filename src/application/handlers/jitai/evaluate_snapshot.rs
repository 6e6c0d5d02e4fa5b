//! EvaluateSnapshotHandler - Stateless detection over a caller-supplied snapshot.
//!
//! Nothing is persisted and no events are published; used by clients that
//! keep activity on-device and only want the verdict.

use std::sync::Arc;
use tracing::debug;

use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::Timestamp;
use crate::domain::jitai::{RiskSignal, SignalDetector};
use crate::ports::Clock;

#[derive(Debug, Clone)]
pub struct EvaluateSnapshotQuery {
    pub snapshot: ActivitySnapshot,
    /// Evaluation time; the clock's `now` when absent.
    pub now: Option<Timestamp>,
    pub sort_by_severity: bool,
}

pub struct EvaluateSnapshotHandler {
    clock: Arc<dyn Clock>,
    detector: SignalDetector,
}

impl EvaluateSnapshotHandler {
    pub fn new(clock: Arc<dyn Clock>, detector: SignalDetector) -> Self {
        Self { clock, detector }
    }

    pub fn handle(&self, query: EvaluateSnapshotQuery) -> Vec<RiskSignal> {
        let now = query.now.unwrap_or_else(|| self.clock.now());
        let mut signals = self.detector.detect(&query.snapshot, now);

        debug!(signal_count = signals.len(), "Evaluated ad-hoc snapshot");

        if query.sort_by_severity {
            signals.sort_by(|a, b| b.severity.cmp(&a.severity));
        }
        signals
    }
}
