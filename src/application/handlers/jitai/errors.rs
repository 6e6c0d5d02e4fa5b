//! JITAI application errors.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, RuleId, SignalId, ValidationError,
};

/// Errors returned by the JITAI command and query handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JitaiError {
    #[error("Risk signal not found: {0}")]
    SignalNotFound(SignalId),

    #[error("Rule not found: {0}")]
    RuleNotFound(RuleId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Event delivery failed: {0}")]
    Event(String),
}

impl JitaiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            JitaiError::SignalNotFound(_) => ErrorCode::SignalNotFound,
            JitaiError::RuleNotFound(_) => ErrorCode::RuleNotFound,
            JitaiError::Validation(_) => ErrorCode::ValidationFailed,
            JitaiError::Storage(_) => ErrorCode::StorageError,
            JitaiError::Event(_) => ErrorCode::EventDeliveryFailed,
        }
    }

    /// Wraps a publisher failure.
    pub fn event(err: impl std::fmt::Display) -> Self {
        JitaiError::Event(err.to_string())
    }
}

impl From<DomainError> for JitaiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "request".to_string());
                JitaiError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::EventDeliveryFailed => JitaiError::Event(err.message),
            _ => JitaiError::Storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for JitaiError {
    fn from(err: serde_json::Error) -> Self {
        JitaiError::Event(format!("event serialization failed: {}", err))
    }
}
