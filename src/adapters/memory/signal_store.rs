//! In-memory risk signal history and feedback.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SignalId, UserId};
use crate::domain::jitai::{RiskSignal, SignalFeedback};
use crate::ports::RiskSignalRepository;

/// Signals kept per user by default.
pub const DEFAULT_SIGNALS_PER_USER: usize = 500;

/// Keeps the most recent signals per user plus any feedback on them.
pub struct InMemorySignalStore {
    signals: RwLock<HashMap<UserId, VecDeque<RiskSignal>>>,
    feedback: RwLock<HashMap<(UserId, SignalId), SignalFeedback>>,
    per_user_limit: usize,
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_SIGNALS_PER_USER)
    }

    /// Oldest signals are evicted once a user has more than `per_user_limit`.
    pub fn with_limit(per_user_limit: usize) -> Self {
        Self {
            signals: RwLock::new(HashMap::new()),
            feedback: RwLock::new(HashMap::new()),
            per_user_limit: per_user_limit.max(1),
        }
    }

    /// Signals held for a user, oldest first.
    pub async fn signals_for(&self, user_id: &UserId) -> Vec<RiskSignal> {
        self.signals
            .read()
            .await
            .get(user_id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for InMemorySignalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RiskSignalRepository for InMemorySignalStore {
    async fn save_all(&self, user_id: &UserId, signals: &[RiskSignal]) -> Result<(), DomainError> {
        let mut all = self.signals.write().await;
        let history = all.entry(user_id.clone()).or_default();
        let mut evicted = Vec::new();
        for signal in signals {
            if history.len() == self.per_user_limit {
                evicted.extend(history.pop_front().map(|old| old.id));
            }
            history.push_back(signal.clone());
        }

        // Feedback does not outlive its signal.
        if !evicted.is_empty() {
            let mut feedback = self.feedback.write().await;
            for signal_id in evicted {
                feedback.remove(&(user_id.clone(), signal_id));
            }
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        signal_id: &SignalId,
    ) -> Result<Option<RiskSignal>, DomainError> {
        Ok(self
            .signals
            .read()
            .await
            .get(user_id)
            .and_then(|history| history.iter().find(|s| &s.id == signal_id))
            .cloned())
    }

    async fn record_feedback(&self, feedback: &SignalFeedback) -> Result<(), DomainError> {
        self.feedback.write().await.insert(
            (feedback.user_id.clone(), feedback.signal_id.clone()),
            feedback.clone(),
        );
        Ok(())
    }

    async fn feedback_for(
        &self,
        user_id: &UserId,
        signal_id: &SignalId,
    ) -> Result<Option<SignalFeedback>, DomainError> {
        Ok(self
            .feedback
            .read()
            .await
            .get(&(user_id.clone(), signal_id.clone()))
            .cloned())
    }
}
