//! ListRulesHandler - Query handler for a user's rules.

use std::sync::Arc;

use super::JitaiError;
use crate::domain::foundation::UserId;
use crate::domain::jitai::JitaiRule;
use crate::ports::JitaiRuleRepository;

#[derive(Debug, Clone)]
pub struct ListRulesQuery {
    pub user_id: UserId,
}

pub struct ListRulesHandler {
    repository: Arc<dyn JitaiRuleRepository>,
}

impl ListRulesHandler {
    pub fn new(repository: Arc<dyn JitaiRuleRepository>) -> Self {
        Self { repository }
    }

    /// Enabled and disabled rules, in stored order.
    pub async fn handle(&self, query: ListRulesQuery) -> Result<Vec<JitaiRule>, JitaiError> {
        Ok(self.repository.list_for_user(&query.user_id).await?)
    }
}
