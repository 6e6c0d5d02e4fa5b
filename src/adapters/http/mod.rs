//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the API routes with the shared middleware stack.

pub mod jitai;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{FeatureFlags, ServerConfig};

pub use jitai::{jitai_routes, ApiError, AuthenticatedUser, ErrorResponse, JitaiAppState};

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Full application router: API routes, `/health`, CORS, timeout and
/// optional request tracing.
pub fn app_router(state: JitaiAppState, server: &ServerConfig, features: &FeatureFlags) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(jitai_routes(state))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()));

    if features.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(jitai::USER_ID_HEADER),
        ])
}
