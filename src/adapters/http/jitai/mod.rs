//! Risk signal and rule HTTP adapter module.
//!
//! Provides REST API endpoints for detection, feedback, snapshot sync and
//! the rule builder.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{ApiError, AuthenticatedUser, JitaiAppState, USER_ID_HEADER};
pub use routes::jitai_routes;
