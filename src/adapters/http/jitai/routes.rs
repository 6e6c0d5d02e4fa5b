//! HTTP routes for risk signal and rule endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    create_rule, detect_risk_signals, evaluate_snapshot, list_rules, record_feedback,
    set_rule_enabled, sync_snapshot, JitaiAppState,
};

/// Creates the JITAI router with all routes.
pub fn jitai_routes(state: JitaiAppState) -> Router {
    Router::new()
        // POST /api/risk-signals/evaluate
        .route("/api/risk-signals/evaluate", post(evaluate_snapshot))
        // POST /api/risk-signals/detect?sort=severity
        .route("/api/risk-signals/detect", post(detect_risk_signals))
        // POST /api/risk-signals/:signal_id/feedback
        .route("/api/risk-signals/:signal_id/feedback", post(record_feedback))
        // PUT /api/activity/snapshot
        .route("/api/activity/snapshot", put(sync_snapshot))
        // GET, POST /api/jitai-rules
        .route("/api/jitai-rules", get(list_rules).post(create_rule))
        // PUT /api/jitai-rules/:rule_id/enabled
        .route("/api/jitai-rules/:rule_id/enabled", put(set_rule_enabled))
        .with_state(state)
}
