//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event plumbing
//! that form the vocabulary of the recovery companion domain.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{RecordId, RuleId, SceneId, SignalId, UserId};
pub use timestamp::Timestamp;
