//! DetectRiskSignalsHandler - Query handler that runs a detection pass for a user.

use std::sync::Arc;
use tracing::info;

use super::JitaiError;
use crate::domain::foundation::{EventEnvelope, Timestamp, UserId};
use crate::domain::jitai::{RiskSignal, RiskSignalsDetected, SignalDetector};
use crate::ports::{ActivitySnapshotReader, Clock, EventPublisher, RiskSignalRepository};

/// Query to detect risk signals from a user's stored snapshot.
#[derive(Debug, Clone)]
pub struct DetectRiskSignalsQuery {
    pub user_id: UserId,
    /// Highest severity first (stable) instead of detection order.
    pub sort_by_severity: bool,
}

impl DetectRiskSignalsQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            sort_by_severity: false,
        }
    }

    pub fn sorted_by_severity(mut self) -> Self {
        self.sort_by_severity = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct DetectRiskSignalsResult {
    pub signals: Vec<RiskSignal>,
    pub detected_at: Timestamp,
}

/// Handler for per-user detection passes.
pub struct DetectRiskSignalsHandler {
    reader: Arc<dyn ActivitySnapshotReader>,
    signals: Arc<dyn RiskSignalRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    detector: SignalDetector,
}

impl DetectRiskSignalsHandler {
    pub fn new(
        reader: Arc<dyn ActivitySnapshotReader>,
        signals: Arc<dyn RiskSignalRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        detector: SignalDetector,
    ) -> Self {
        Self {
            reader,
            signals,
            event_publisher,
            clock,
            detector,
        }
    }

    pub async fn handle(
        &self,
        query: DetectRiskSignalsQuery,
    ) -> Result<DetectRiskSignalsResult, JitaiError> {
        let now = self.clock.now();

        // 1. Load snapshot (never synced reads as empty)
        let snapshot = self
            .reader
            .snapshot_for(&query.user_id)
            .await?
            .unwrap_or_default();

        // 2. Detect
        let mut signals = self.detector.detect(&snapshot, now);

        // 3. Persist and announce
        if !signals.is_empty() {
            self.signals.save_all(&query.user_id, &signals).await?;

            let event = RiskSignalsDetected::new(query.user_id.clone(), signals.clone(), now);
            let envelope =
                EventEnvelope::from_event(&event)?.with_user_id(query.user_id.to_string());
            self.event_publisher
                .publish(envelope)
                .await
                .map_err(JitaiError::event)?;
        }

        info!(
            user_id = %query.user_id,
            signal_count = signals.len(),
            "Risk signals detected"
        );

        if query.sort_by_severity {
            signals.sort_by(|a, b| b.severity.cmp(&a.severity));
        }

        Ok(DetectRiskSignalsResult {
            signals,
            detected_at: now,
        })
    }
}
