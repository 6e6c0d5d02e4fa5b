//! In-memory activity snapshots and JITAI rules, keyed by user.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::{DomainError, ErrorCode, RuleId, UserId};
use crate::domain::jitai::JitaiRule;
use crate::ports::{ActivitySnapshotReader, ActivitySnapshotWriter, JitaiRuleRepository};

/// Holds each user's last pushed snapshot and their rules.
///
/// Rules are stored apart from the snapshot and merged back in on read, so a
/// client push never overwrites rules managed through the rule endpoints.
#[derive(Default)]
pub struct InMemoryActivityStore {
    snapshots: RwLock<HashMap<UserId, ActivitySnapshot>>,
    rules: RwLock<HashMap<UserId, Vec<JitaiRule>>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivitySnapshotReader for InMemoryActivityStore {
    async fn snapshot_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ActivitySnapshot>, DomainError> {
        let snapshot = self.snapshots.read().await.get(user_id).cloned();
        let rules = self.rules.read().await.get(user_id).cloned();

        Ok(match (snapshot, rules) {
            (None, None) => None,
            (snapshot, rules) => {
                let mut snapshot = snapshot.unwrap_or_default();
                snapshot.jitai_rules = rules.unwrap_or_default();
                Some(snapshot)
            }
        })
    }
}

#[async_trait]
impl ActivitySnapshotWriter for InMemoryActivityStore {
    async fn replace_snapshot(
        &self,
        user_id: &UserId,
        mut snapshot: ActivitySnapshot,
    ) -> Result<(), DomainError> {
        snapshot.jitai_rules.clear();
        self.snapshots
            .write()
            .await
            .insert(user_id.clone(), snapshot);
        Ok(())
    }
}

#[async_trait]
impl JitaiRuleRepository for InMemoryActivityStore {
    async fn save(&self, user_id: &UserId, rule: &JitaiRule) -> Result<(), DomainError> {
        let mut rules = self.rules.write().await;
        let user_rules = rules.entry(user_id.clone()).or_default();
        if user_rules.iter().any(|r| r.id == rule.id) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Rule {} already exists", rule.id),
            ));
        }
        user_rules.push(rule.clone());
        Ok(())
    }

    async fn update(&self, user_id: &UserId, rule: &JitaiRule) -> Result<(), DomainError> {
        let mut rules = self.rules.write().await;
        let stored = rules
            .get_mut(user_id)
            .and_then(|user_rules| user_rules.iter_mut().find(|r| r.id == rule.id))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::RuleNotFound, format!("Rule not found: {}", rule.id))
                    .with_detail("rule_id", rule.id.to_string())
            })?;
        *stored = rule.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        rule_id: &RuleId,
    ) -> Result<Option<JitaiRule>, DomainError> {
        Ok(self
            .rules
            .read()
            .await
            .get(user_id)
            .and_then(|user_rules| user_rules.iter().find(|r| &r.id == rule_id))
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<JitaiRule>, DomainError> {
        Ok(self
            .rules
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
