//! CreateRuleHandler - Command handler for saving a new JITAI rule.

use std::sync::Arc;
use tracing::info;

use super::JitaiError;
use crate::domain::foundation::{EventEnvelope, EventId, UserId};
use crate::domain::jitai::{JitaiRule, JitaiRuleCreated, RuleAction, RuleCondition};
use crate::ports::{Clock, EventPublisher, JitaiRuleRepository};

/// Command to create a rule from the rule builder.
#[derive(Debug, Clone)]
pub struct CreateRuleCommand {
    pub user_id: UserId,
    pub name: String,
    pub condition: RuleCondition,
    pub action: RuleAction,
    pub explanation: String,
}

pub struct CreateRuleHandler {
    repository: Arc<dyn JitaiRuleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CreateRuleHandler {
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

    pub async fn handle(&self, cmd: CreateRuleCommand) -> Result<JitaiRule, JitaiError> {
        let now = self.clock.now();

        // 1. Validate and build
        let rule = JitaiRule::new(cmd.name, cmd.condition, cmd.action, cmd.explanation)?
            .created(now);

        // 2. Persist
        self.repository.save(&cmd.user_id, &rule).await?;

        // 3. Publish
        let event = JitaiRuleCreated {
            event_id: EventId::new(),
            rule_id: rule.id,
            user_id: cmd.user_id.clone(),
            name: rule.name.clone(),
            condition_type: rule.condition.type_tag().to_string(),
            created_at: now,
        };
        let envelope = EventEnvelope::from_event(&event)?.with_user_id(cmd.user_id.to_string());
        self.event_publisher
            .publish(envelope)
            .await
            .map_err(JitaiError::event)?;

        info!(
            user_id = %cmd.user_id,
            rule_id = %rule.id,
            condition = rule.condition.type_tag(),
            "JITAI rule created"
        );

        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{now, test_user_id, MockEventPublisher};
    use super::*;
    use crate::adapters::{FixedClock, InMemoryActivityStore};
    use crate::domain::foundation::ValidationError;
    use crate::domain::jitai::{ConditionOperator, ConditionParams, SuggestedAction};

    fn setup() -> (
        Arc<InMemoryActivityStore>,
        Arc<MockEventPublisher>,
        CreateRuleHandler,
    ) {
        let store = Arc::new(InMemoryActivityStore::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = CreateRuleHandler::new(
            store.clone(),
            publisher.clone(),
            Arc::new(FixedClock::new(now())),
        );
        (store, publisher, handler)
    }

    fn command(name: &str, priority: u8) -> CreateRuleCommand {
        CreateRuleCommand {
            user_id: test_user_id(),
            name: name.to_string(),
            condition: RuleCondition::CravingThreshold(ConditionParams::new(
                ConditionOperator::GreaterThan,
                6.0,
                3,
            )),
            action: RuleAction {
                action_type: SuggestedAction::ShowSafetyPlan,
                priority,
            },
            explanation: "Evenings are my hardest time.".to_string(),
        }
    }

    #[tokio::test]
    async fn saves_enabled_rule_with_creation_time() {
        let (store, _, handler) = setup();

        let rule = handler.handle(command("Evening cravings", 4)).await.unwrap();

        assert!(rule.enabled);
        assert_eq!(rule.created_at, Some(now()));
        let stored = store.list_for_user(&test_user_id()).await.unwrap();
        assert_eq!(stored, vec![rule]);
    }

    #[tokio::test]
    async fn publishes_rule_created_event() {
        let (_, publisher, handler) = setup();

        let rule = handler.handle(command("Evening cravings", 4)).await.unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "jitai.rule_created.v1");
        assert_eq!(events[0].aggregate_id, rule.id.to_string());
        assert_eq!(events[0].payload["condition_type"], "craving-threshold");
    }

    #[tokio::test]
    async fn invalid_rule_is_rejected_before_saving() {
        let (store, publisher, handler) = setup();

        let err = handler.handle(command("", 4)).await.unwrap_err();

        assert_eq!(
            err,
            JitaiError::Validation(ValidationError::empty_field("name"))
        );
        assert!(store.list_for_user(&test_user_id()).await.unwrap().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn priority_out_of_range_is_rejected() {
        let (_, _, handler) = setup();
        assert!(matches!(
            handler.handle(command("Too urgent", 11)).await,
            Err(JitaiError::Validation(_))
        ));
    }
}
