//! RecordSignalFeedbackHandler - Command handler for suggestion-sheet feedback.

use std::sync::Arc;
use tracing::info;

use super::JitaiError;
use crate::domain::foundation::{EventEnvelope, EventId, SignalId, UserId};
use crate::domain::jitai::{SignalFeedback, SignalFeedbackRecorded};
use crate::ports::{Clock, EventPublisher, RiskSignalRepository};

/// Command to record whether a delivered signal helped.
#[derive(Debug, Clone)]
pub struct RecordSignalFeedbackCommand {
    pub user_id: UserId,
    pub signal_id: SignalId,
    pub helpful: bool,
    pub note: Option<String>,
}

pub struct RecordSignalFeedbackHandler {
    signals: Arc<dyn RiskSignalRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RecordSignalFeedbackHandler {
    pub fn new(
        signals: Arc<dyn RiskSignalRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            signals,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordSignalFeedbackCommand,
    ) -> Result<SignalFeedback, JitaiError> {
        // 1. The signal must have been emitted for this user
        let signal = self
            .signals
            .find_by_id(&cmd.user_id, &cmd.signal_id)
            .await?
            .ok_or_else(|| JitaiError::SignalNotFound(cmd.signal_id.clone()))?;

        // 2. Store feedback
        let feedback = SignalFeedback::new(
            signal.id.clone(),
            cmd.user_id.clone(),
            cmd.helpful,
            cmd.note,
            self.clock.now(),
        );
        self.signals.record_feedback(&feedback).await?;

        // 3. Publish
        let event = SignalFeedbackRecorded {
            event_id: EventId::new(),
            signal_id: signal.id,
            signal_type: signal.signal_type,
            user_id: cmd.user_id.clone(),
            helpful: feedback.helpful,
            recorded_at: feedback.recorded_at,
        };
        let envelope = EventEnvelope::from_event(&event)?.with_user_id(cmd.user_id.to_string());
        self.event_publisher
            .publish(envelope)
            .await
            .map_err(JitaiError::event)?;

        info!(
            user_id = %cmd.user_id,
            signal_id = %feedback.signal_id,
            signal_type = signal.signal_type.as_str(),
            helpful = feedback.helpful,
            "Signal feedback recorded"
        );

        Ok(feedback)
    }
}
