//! Integration tests for the risk signal HTTP surface.
//!
//! Drives the fully wired router (in-memory stores, event bus, notifier)
//! with `tower::ServiceExt::oneshot`, one request at a time.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use recovery_companion::adapters::FixedClock;
use recovery_companion::app::AppServices;
use recovery_companion::config::AppConfig;
use recovery_companion::domain::foundation::Timestamp;

const USER: &str = "user-42";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn services() -> (AppServices, Router) {
    let mut config = AppConfig::default();
    config.notifications.min_severity = 0;
    let clock = FixedClock::new(Timestamp::parse_rfc3339("2024-03-10T20:00:00Z").unwrap());
    let services = AppServices::with_clock(&config, Arc::new(clock));
    services.start_notifier().unwrap();
    let router = services.router(&config);
    (services, router)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn pulse_card(date: &str, mood: u8, craving: u8) -> Value {
    json!({
        "date": date,
        "middayPulseCheck": {
            "mood": mood,
            "craving": craving,
            "timestamp": format!("{}T13:00:00Z", date),
        }
    })
}

/// Three strong-craving days, otherwise engaged: only high cravings fires.
fn craving_snapshot() -> Value {
    json!({
        "dailyCards": [
            pulse_card("2024-03-08", 5, 8),
            pulse_card("2024-03-09", 5, 9),
            pulse_card("2024-03-10", 5, 7),
        ],
        "journalEntries": [
            {"id": "j-1", "content": "Rough week", "timestamp": "2024-03-10T09:00:00Z"}
        ],
        "meetings": [
            {"id": "m-1", "name": "Tuesday group", "date": "2024-03-09T19:00:00Z"}
        ]
    })
}

fn scene_rule(priority: u8) -> Value {
    json!({
        "name": "Any scene",
        "condition": {"type": "scene-usage", "operator": "greater-than", "threshold": 0, "windowDays": 7},
        "action": {"type": "open-scene", "priority": priority},
        "explanation": "You asked to hear about scene use."
    })
}

// =============================================================================
// Health and Auth
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let (_, router) = services();

    let (status, body) = send(&router, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn user_routes_require_user_header() {
    let (_, router) = services();

    let (status, body) =
        send(&router, Method::POST, "/api/risk-signals/detect", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

// =============================================================================
// Detection
// =============================================================================

#[tokio::test]
async fn synced_snapshot_drives_detection() {
    let (services, router) = services();

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/activity/snapshot",
        Some(USER),
        Some(craving_snapshot()),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/risk-signals/detect?sort=severity",
        Some(USER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let signals = body["signals"].as_array().unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0]["type"], "high-cravings");
    assert_eq!(signals[0]["inputs"]["days"], 3);
    assert_eq!(signals[0]["inputs"]["avgCraving"], 8.0);
    assert_eq!(
        signals[0]["explanation"],
        "Your cravings have averaged 8/10 for 3 nights in a row."
    );
    assert_eq!(body["evaluatedAt"], "2024-03-10T20:00:00Z");

    assert_eq!(services.notifier.pending_count(), 1);
    assert_eq!(
        services
            .event_bus
            .events_of_type("jitai.risk_signals_detected.v1")
            .len(),
        1
    );
}

#[tokio::test]
async fn detection_without_snapshot_reports_isolation() {
    let (_, router) = services();

    let (status, body) =
        send(&router, Method::POST, "/api/risk-signals/detect", Some(USER), None).await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = body["signals"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["type"].as_str())
        .collect();
    assert!(types.contains(&"isolation"));
}

#[tokio::test]
async fn unknown_sort_is_rejected() {
    let (_, router) = services();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/risk-signals/detect?sort=newest",
        Some(USER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn evaluate_is_stateless() {
    let (services, router) = services();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/risk-signals/evaluate",
        None,
        Some(json!({"snapshot": craving_snapshot(), "now": "2024-03-10T21:00:00Z"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signals"][0]["type"], "high-cravings");
    assert_eq!(body["evaluatedAt"], "2024-03-10T21:00:00Z");
    assert_eq!(services.event_bus.event_count(), 0);
    assert_eq!(services.notifier.pending_count(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let (_, router) = services();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/risk-signals/evaluate",
        None,
        Some(json!({"snapshot": {"dailyCards": "not a list"}})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn feedback_on_detected_signal() {
    let (_, router) = services();
    send(
        &router,
        Method::PUT,
        "/api/activity/snapshot",
        Some(USER),
        Some(craving_snapshot()),
    )
    .await;
    let (_, detected) =
        send(&router, Method::POST, "/api/risk-signals/detect", Some(USER), None).await;
    let signal_id = detected["signals"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/risk-signals/{}/feedback", signal_id),
        Some(USER),
        Some(json!({"helpful": true, "note": "  called my sponsor  "})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["signalId"], signal_id.as_str());
    assert_eq!(body["helpful"], true);
    assert_eq!(body["note"], "called my sponsor");
}

#[tokio::test]
async fn feedback_on_unknown_signal_is_not_found() {
    let (_, router) = services();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/risk-signals/signal_0_missing/feedback",
        Some(USER),
        Some(json!({"helpful": false})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SIGNAL_NOT_FOUND");
}

#[tokio::test]
async fn feedback_is_scoped_to_the_user() {
    let (_, router) = services();
    let (_, detected) =
        send(&router, Method::POST, "/api/risk-signals/detect", Some(USER), None).await;
    let signal_id = detected["signals"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &router,
        Method::POST,
        &format!("/api/risk-signals/{}/feedback", signal_id),
        Some("someone-else"),
        Some(json!({"helpful": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Rules
// =============================================================================

#[tokio::test]
async fn created_rule_fires_until_disabled() {
    let (_, router) = services();
    send(
        &router,
        Method::PUT,
        "/api/activity/snapshot",
        Some(USER),
        Some(craving_snapshot()),
    )
    .await;

    let (status, rule) = send(
        &router,
        Method::POST,
        "/api/jitai-rules",
        Some(USER),
        Some(scene_rule(3)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rule["enabled"], true);
    assert_eq!(rule["createdAt"], "2024-03-10T20:00:00Z");
    let rule_id = rule["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&router, Method::GET, "/api/jitai-rules", Some(USER), None).await;
    assert_eq!(listed["rules"].as_array().unwrap().len(), 1);

    let (_, detected) = send(
        &router,
        Method::POST,
        "/api/risk-signals/detect?sort=severity",
        Some(USER),
        None,
    )
    .await;
    let custom: Vec<&Value> = detected["signals"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["type"] == "custom")
        .collect();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0]["inputs"]["ruleName"], "Any scene");

    let (status, toggled) = send(
        &router,
        Method::PUT,
        &format!("/api/jitai-rules/{}/enabled", rule_id),
        Some(USER),
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["enabled"], false);

    let (_, detected) =
        send(&router, Method::POST, "/api/risk-signals/detect", Some(USER), None).await;
    assert!(detected["signals"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["type"] != "custom"));
}

#[tokio::test]
async fn invalid_rule_is_rejected() {
    let (_, router) = services();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/jitai-rules",
        Some(USER),
        Some(scene_rule(11)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn toggling_unknown_rule() {
    let (_, router) = services();

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/jitai-rules/not-a-uuid/enabled",
        Some(USER),
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/jitai-rules/7f1c9d3e-2a4b-4c5d-8e6f-0a1b2c3d4e5f/enabled",
        Some(USER),
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RULE_NOT_FOUND");
}
