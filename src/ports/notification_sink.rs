//! NotificationSink port - last hop for intervention notifications.
//!
//! Push delivery (web push, APNs, ...) lives outside this service; the sink
//! is where an adapter for it would plug in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SignalId, Timestamp, UserId};
use crate::domain::jitai::SignalType;

/// One user-facing nudge derived from a risk signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user_id: UserId,
    pub signal_id: SignalId,
    pub signal_type: SignalType,
    pub severity: u8,
    pub title: String,
    /// The signal's explanation sentence.
    pub body: String,
    pub created_at: Timestamp,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<(), DomainError>;
}
