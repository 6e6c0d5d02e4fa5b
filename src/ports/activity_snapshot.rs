//! Activity snapshot ports.
//!
//! The client store pushes a full snapshot of recent activity; detection
//! reads it back. Both sides are user-scoped.

use async_trait::async_trait;

use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::{DomainError, UserId};

/// Read side: the latest snapshot for a user.
#[async_trait]
pub trait ActivitySnapshotReader: Send + Sync {
    /// Returns `None` when the user has never synced.
    ///
    /// The returned snapshot carries the user's stored rules in
    /// `jitai_rules`, whatever the client last pushed.
    async fn snapshot_for(&self, user_id: &UserId)
        -> Result<Option<ActivitySnapshot>, DomainError>;
}

/// Write side: replace a user's snapshot wholesale.
#[async_trait]
pub trait ActivitySnapshotWriter: Send + Sync {
    /// Stores `snapshot` as the user's current activity.
    ///
    /// Rules in the pushed snapshot are ignored; rules live in
    /// [`JitaiRuleRepository`](super::JitaiRuleRepository).
    async fn replace_snapshot(
        &self,
        user_id: &UserId,
        snapshot: ActivitySnapshot,
    ) -> Result<(), DomainError>;
}
