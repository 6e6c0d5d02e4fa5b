//! Risk signal repository port.
//!
//! Detection itself is stateless; the application keeps emitted signals so
//! that later feedback can be tied back to them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SignalId, UserId};
use crate::domain::jitai::{RiskSignal, SignalFeedback};

#[async_trait]
pub trait RiskSignalRepository: Send + Sync {
    /// Append a batch of signals for a user.
    async fn save_all(&self, user_id: &UserId, signals: &[RiskSignal]) -> Result<(), DomainError>;

    /// Find a signal previously emitted for this user.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        signal_id: &SignalId,
    ) -> Result<Option<RiskSignal>, DomainError>;

    /// Store feedback, replacing any earlier feedback for the same signal.
    async fn record_feedback(&self, feedback: &SignalFeedback) -> Result<(), DomainError>;

    /// Feedback recorded for a signal, if any.
    async fn feedback_for(
        &self,
        user_id: &UserId,
        signal_id: &SignalId,
    ) -> Result<Option<SignalFeedback>, DomainError>;
}
