//! HTTP handlers for risk signal and rule endpoints.
//!
//! These handlers connect Axum routes to the JITAI command and query handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Json, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::handlers::{
    CreateRuleCommand, CreateRuleHandler, DetectRiskSignalsHandler, DetectRiskSignalsQuery,
    EvaluateSnapshotHandler, EvaluateSnapshotQuery, JitaiError, ListRulesHandler, ListRulesQuery,
    RecordSignalFeedbackCommand, RecordSignalFeedbackHandler, SetRuleEnabledCommand,
    SetRuleEnabledHandler, SyncSnapshotCommand, SyncSnapshotHandler,
};
use crate::domain::activity::ActivitySnapshot;
use crate::domain::foundation::{ErrorCode, RuleId, SignalId, UserId};
use crate::domain::jitai::{JitaiRule, SignalDetector, SignalFeedback};
use crate::ports::{
    ActivitySnapshotReader, ActivitySnapshotWriter, Clock, EventPublisher, JitaiRuleRepository,
    RiskSignalRepository,
};

use super::dto::{
    CreateRuleRequest, ErrorResponse, EvaluateRequest, FeedbackRequest, RulesResponse,
    SetEnabledRequest, SignalsResponse, SortParams,
};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// API error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    Internal(ErrorResponse),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(ErrorResponse::bad_request(message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, body),
            ApiError::NotFound(body) => (StatusCode::NOT_FOUND, body),
            ApiError::Internal(body) => (StatusCode::INTERNAL_SERVER_ERROR, body),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JitaiError> for ApiError {
    fn from(err: JitaiError) -> Self {
        let body = ErrorResponse::new(err.code(), err.to_string());
        match err {
            JitaiError::SignalNotFound(_) | JitaiError::RuleNotFound(_) => ApiError::NotFound(body),
            JitaiError::Validation(_) => ApiError::BadRequest(body),
            JitaiError::Storage(_) | JitaiError::Event(_) => {
                error!(error = %err, "JITAI request failed");
                ApiError::Internal(ErrorResponse::internal("Internal server error"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(ErrorResponse::new(
            ErrorCode::ValidationFailed,
            rejection.body_text(),
        ))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing JITAI dependencies.
#[derive(Clone)]
pub struct JitaiAppState {
    pub snapshot_reader: Arc<dyn ActivitySnapshotReader>,
    pub snapshot_writer: Arc<dyn ActivitySnapshotWriter>,
    pub rule_repository: Arc<dyn JitaiRuleRepository>,
    pub signal_repository: Arc<dyn RiskSignalRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub clock: Arc<dyn Clock>,
    pub detector: SignalDetector,
}

impl JitaiAppState {
    pub fn detect_handler(&self) -> DetectRiskSignalsHandler {
        DetectRiskSignalsHandler::new(
            self.snapshot_reader.clone(),
            self.signal_repository.clone(),
            self.event_publisher.clone(),
            self.clock.clone(),
            self.detector.clone(),
        )
    }

    pub fn evaluate_handler(&self) -> EvaluateSnapshotHandler {
        EvaluateSnapshotHandler::new(self.clock.clone(), self.detector.clone())
    }

    pub fn feedback_handler(&self) -> RecordSignalFeedbackHandler {
        RecordSignalFeedbackHandler::new(
            self.signal_repository.clone(),
            self.event_publisher.clone(),
            self.clock.clone(),
        )
    }

    pub fn sync_snapshot_handler(&self) -> SyncSnapshotHandler {
        SyncSnapshotHandler::new(self.snapshot_writer.clone())
    }

    pub fn create_rule_handler(&self) -> CreateRuleHandler {
        CreateRuleHandler::new(
            self.rule_repository.clone(),
            self.event_publisher.clone(),
            self.clock.clone(),
        )
    }

    pub fn set_rule_enabled_handler(&self) -> SetRuleEnabledHandler {
        SetRuleEnabledHandler::new(
            self.rule_repository.clone(),
            self.event_publisher.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_rules_handler(&self) -> ListRulesHandler {
        ListRulesHandler::new(self.rule_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Caller identity taken from the `x-user-id` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::unauthorized("Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

fn sort_by_severity(params: &SortParams) -> Result<bool, ApiError> {
    match params.sort.as_deref() {
        None => Ok(false),
        Some("severity") => Ok(true),
        Some(other) => Err(ApiError::bad_request(format!(
            "Unsupported sort '{}', expected 'severity'",
            other
        ))),
    }
}

fn parse_rule_id(raw: &str) -> Result<RuleId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid rule ID format"))
}

fn parse_signal_id(raw: &str) -> Result<SignalId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid signal ID format"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Risk Signal Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/risk-signals/evaluate
///
/// Runs detection over a snapshot in the request body. Nothing is stored.
pub async fn evaluate_snapshot(
    State(state): State<JitaiAppState>,
    Query(params): Query<SortParams>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<SignalsResponse>, ApiError> {
    let Json(request) = body?;
    let sort = sort_by_severity(&params)?;
    let evaluated_at = request.now.unwrap_or_else(|| state.clock.now());

    let signals = state.evaluate_handler().handle(EvaluateSnapshotQuery {
        snapshot: request.snapshot,
        now: Some(evaluated_at),
        sort_by_severity: sort,
    });

    Ok(Json(SignalsResponse::new(signals, evaluated_at)))
}

/// POST /api/risk-signals/detect
///
/// Detects over the caller's stored snapshot, stores and announces the signals.
pub async fn detect_risk_signals(
    State(state): State<JitaiAppState>,
    Query(params): Query<SortParams>,
    user: AuthenticatedUser,
) -> Result<Json<SignalsResponse>, ApiError> {
    let mut query = DetectRiskSignalsQuery::new(user.user_id);
    if sort_by_severity(&params)? {
        query = query.sorted_by_severity();
    }

    let result = state.detect_handler().handle(query).await?;
    Ok(Json(result.into()))
}

/// POST /api/risk-signals/:signal_id/feedback
pub async fn record_feedback(
    State(state): State<JitaiAppState>,
    Path(signal_id): Path<String>,
    user: AuthenticatedUser,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignalFeedback>), ApiError> {
    let Json(request) = body?;
    let signal_id = parse_signal_id(&signal_id)?;

    let feedback = state
        .feedback_handler()
        .handle(RecordSignalFeedbackCommand {
            user_id: user.user_id,
            signal_id,
            helpful: request.helpful,
            note: request.note,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// PUT /api/activity/snapshot
pub async fn sync_snapshot(
    State(state): State<JitaiAppState>,
    user: AuthenticatedUser,
    body: Result<Json<ActivitySnapshot>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(snapshot) = body?;

    state
        .sync_snapshot_handler()
        .handle(SyncSnapshotCommand {
            user_id: user.user_id,
            snapshot,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Rule Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/jitai-rules
pub async fn list_rules(
    State(state): State<JitaiAppState>,
    user: AuthenticatedUser,
) -> Result<Json<RulesResponse>, ApiError> {
    let rules = state
        .list_rules_handler()
        .handle(ListRulesQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(RulesResponse { rules }))
}

/// POST /api/jitai-rules
pub async fn create_rule(
    State(state): State<JitaiAppState>,
    user: AuthenticatedUser,
    body: Result<Json<CreateRuleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JitaiRule>), ApiError> {
    let Json(request) = body?;

    let rule = state
        .create_rule_handler()
        .handle(CreateRuleCommand {
            user_id: user.user_id,
            name: request.name,
            condition: request.condition,
            action: request.action,
            explanation: request.explanation,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

/// PUT /api/jitai-rules/:rule_id/enabled
pub async fn set_rule_enabled(
    State(state): State<JitaiAppState>,
    Path(rule_id): Path<String>,
    user: AuthenticatedUser,
    body: Result<Json<SetEnabledRequest>, JsonRejection>,
) -> Result<Json<JitaiRule>, ApiError> {
    let Json(request) = body?;
    let rule_id = parse_rule_id(&rule_id)?;

    let rule = state
        .set_rule_enabled_handler()
        .handle(SetRuleEnabledCommand {
            user_id: user.user_id,
            rule_id,
            enabled: request.enabled,
        })
        .await?;

    Ok(Json(rule))
}
