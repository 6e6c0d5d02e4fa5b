//! JITAI rule repository port.
//!
//! Rules are owned per user and soft-disabled rather than deleted, so there
//! is no delete operation.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RuleId, UserId};
use crate::domain::jitai::JitaiRule;

/// Repository port for user-authored rules.
#[async_trait]
pub trait JitaiRuleRepository: Send + Sync {
    /// Save a new rule at the end of the user's list.
    async fn save(&self, user_id: &UserId, rule: &JitaiRule) -> Result<(), DomainError>;

    /// Replace an existing rule in place.
    ///
    /// # Errors
    ///
    /// - `RuleNotFound` if the user has no rule with this id
    async fn update(&self, user_id: &UserId, rule: &JitaiRule) -> Result<(), DomainError>;

    /// Find one of the user's rules. Returns `None` if not found.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        rule_id: &RuleId,
    ) -> Result<Option<JitaiRule>, DomainError>;

    /// All of the user's rules, enabled or not, in stored order.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<JitaiRule>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitai_rule_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn JitaiRuleRepository) {}
    }
}
