//! Axum router configuration for all endpoints

use axum::{middleware::from_fn, routing::get, Router};

use crate::server::handlers::{dashboard, status};
use crate::server::middleware::request_context_middleware;
use crate::server::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoints
    .route("/", get(status::service_info))
    .route("/health", get(status::health))
    // Dashboard views
    .route("/api/dashboard/stats", get(dashboard::stats))
    .route("/api/dashboard/trends", get(dashboard::trends))
    .route("/api/dashboard/recent-clients", get(dashboard::recent_clients))
    .route("/api/dashboard/upcoming-meetings", get(dashboard::upcoming_meetings))
    .route("/api/dashboard/performance", get(dashboard::performance))
    .fallback(status::not_found)
    .method_not_allowed_fallback(status::not_found)
    // Added after the fallback so unmatched routes get a request id too
    .layer(from_fn(request_context_middleware))
    .with_state(state)
}
