//! In-process event bus.
//!
//! Delivers each published envelope to every handler subscribed to its
//! type, in subscription order, before `publish` returns. A bounded history
//! of recent envelopes is kept for inspection and tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Envelopes retained by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// In-process event bus.
///
/// Locks are never held across an await; handler lists are cloned out first.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe("jitai.risk_signals_detected.v1", notifier.clone());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("jitai.risk_signals_detected.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    history_limit: usize,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Keeps at most `limit` envelopes in history; 0 disables history.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            history_limit: limit,
        }
    }

    /// Recently published envelopes, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Number of handlers registered for `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .map_or(0, Vec::len)
    }

    fn remember(&self, event: &EventEnvelope) {
        if self.history_limit == 0 {
            return;
        }
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if published.len() == self.history_limit {
            published.pop_front();
        }
        published.push_back(event.clone());
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.remember(&event);

        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        debug!(
            event_type = %event.event_type,
            event_id = %event.event_id,
            handlers = type_handlers.len(),
            "Dispatching event"
        );

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "Event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EventDeliveryFailed,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}
