//! SyncSnapshotHandler - Replaces a user's activity snapshot with a client push.

use std::sync::Arc;
use tracing::debug;

use super::JitaiError;
use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::UserId;
use crate::ports::ActivitySnapshotWriter;

#[derive(Debug, Clone)]
pub struct SyncSnapshotCommand {
    pub user_id: UserId,
    /// Any rules carried here are ignored; the rule repository owns them.
    pub snapshot: ActivitySnapshot,
}

pub struct SyncSnapshotHandler {
    writer: Arc<dyn ActivitySnapshotWriter>,
}

impl SyncSnapshotHandler {
    pub fn new(writer: Arc<dyn ActivitySnapshotWriter>) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, cmd: SyncSnapshotCommand) -> Result<(), JitaiError> {
        let mut snapshot = cmd.snapshot;
        snapshot.jitai_rules.clear();

        debug!(
            user_id = %cmd.user_id,
            daily_cards = snapshot.daily_cards.len(),
            journal_entries = snapshot.journal_entries.len(),
            meetings = snapshot.meetings.len(),
            scene_usages = snapshot.scene_usages.len(),
            "Syncing activity snapshot"
        );

        self.writer.replace_snapshot(&cmd.user_id, snapshot).await?;
        Ok(())
    }
}
