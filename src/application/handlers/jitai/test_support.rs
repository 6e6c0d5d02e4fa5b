//! Shared doubles for the JITAI handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, Timestamp, UserId};
use crate::ports::EventPublisher;

pub fn now() -> Timestamp {
    Timestamp::parse_rfc3339("2024-03-10T20:00:00Z").unwrap()
}

pub fn test_user_id() -> UserId {
    UserId::new("test-user-123").unwrap()
}

pub struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
    fail_publish: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::EventDeliveryFailed,
                "Simulated publish failure",
            ));
        }
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
