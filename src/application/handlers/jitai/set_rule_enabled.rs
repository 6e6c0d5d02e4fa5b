//! SetRuleEnabledHandler - Soft enable/disable of a JITAI rule.

use std::sync::Arc;
use tracing::info;

use super::JitaiError;
use crate::domain::foundation::{EventEnvelope, EventId, RuleId, UserId};
use crate::domain::jitai::{JitaiRule, JitaiRuleToggled};
use crate::ports::{Clock, EventPublisher, JitaiRuleRepository};

#[derive(Debug, Clone)]
pub struct SetRuleEnabledCommand {
    pub user_id: UserId,
    pub rule_id: RuleId,
    pub enabled: bool,
}

pub struct SetRuleEnabledHandler {
    repository: Arc<dyn JitaiRuleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl SetRuleEnabledHandler {
    pub fn new(
        repository: Arc<dyn JitaiRuleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
        }
    }

    /// Returns the rule as stored. Setting the current state again is a no-op.
    pub async fn handle(&self, cmd: SetRuleEnabledCommand) -> Result<JitaiRule, JitaiError> {
        let mut rule = self
            .repository
            .find_by_id(&cmd.user_id, &cmd.rule_id)
            .await?
            .ok_or(JitaiError::RuleNotFound(cmd.rule_id))?;

        if rule.enabled == cmd.enabled {
            return Ok(rule);
        }

        if cmd.enabled {
            rule.enable();
        } else {
            rule.disable();
        }
        self.repository.update(&cmd.user_id, &rule).await?;

        let event = JitaiRuleToggled {
            event_id: EventId::new(),
            rule_id: rule.id,
            user_id: cmd.user_id.clone(),
            enabled: rule.enabled,
            toggled_at: self.clock.now(),
        };
        let envelope = EventEnvelope::from_event(&event)?.with_user_id(cmd.user_id.to_string());
        self.event_publisher
            .publish(envelope)
            .await
            .map_err(JitaiError::event)?;

        info!(
            user_id = %cmd.user_id,
            rule_id = %rule.id,
            enabled = rule.enabled,
            "JITAI rule toggled"
        );

        Ok(rule)
    }
}
