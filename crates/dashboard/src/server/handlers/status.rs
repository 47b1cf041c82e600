//! Service information, health and unmatched-route handlers

use axum::{
  extract::{Extension, State},
  response::Json,
};

use crate::server::middleware::RequestContext;
use crate::server::types::{timestamp_now, ApiError, HealthResponse, ServiceInfo, ENDPOINTS};
use crate::server::AppState;

const FEATURES: &[&str] = &[
  "Métricas de interação",
  "Análise de tendências temporais",
  "Monitoramento de agendamentos",
  "Performance de leads",
  "Dados atualizados a cada requisição",
];

/// GET / - Returns service metadata
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
  Json(ServiceInfo {
    status: "success".to_string(),
    message: "API do Dashboard de Leads".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    features: FEATURES.iter().map(|feature| feature.to_string()).collect(),
    endpoints: ENDPOINTS.iter().map(|(route, description)| format!("{route} - {description}")).collect(),
    data_sources: state.data_sources.clone(),
  })
}

/// GET /health - Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "healthy".to_string(),
    timestamp: timestamp_now(),
    uptime: state.started_at.elapsed().as_secs_f64(),
    environment: state.environment.to_string(),
  })
}

/// Fallback for every unmatched method and path
pub async fn not_found(Extension(context): Extension<RequestContext>) -> ApiError {
  tracing::warn!(
    request_id = %context.request_id,
    method = %context.method,
    path = context.uri.path(),
    "No route matched"
  );
  ApiError::not_found(context.method.as_str(), &context.uri.to_string(), context.request_id)
}
