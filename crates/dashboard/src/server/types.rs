//! REST API response types outside the dashboard views themselves

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every route the server answers, with a short description
pub const ENDPOINTS: &[(&str, &str)] = &[
  ("GET /", "Informações da API"),
  ("GET /health", "Status de saúde do serviço"),
  ("GET /api/dashboard/stats", "Estatísticas gerais"),
  ("GET /api/dashboard/trends", "Tendências temporais"),
  ("GET /api/dashboard/recent-clients", "Clientes recentes"),
  ("GET /api/dashboard/upcoming-meetings", "Próximas reuniões"),
  ("GET /api/dashboard/performance", "Análise de performance"),
];

/// Message returned instead of error details outside development
pub const GENERIC_ERROR_MESSAGE: &str = "Algo deu errado";

/// ISO-8601 UTC timestamp with millisecond precision
pub fn timestamp_now() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Status Endpoints
// ================

/// Response for `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
  pub status: String,
  pub message: String,
  pub version: String,
  pub features: Vec<String>,
  pub endpoints: Vec<String>,
  pub data_sources: DataSources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSources {
  pub contacts: String,
  pub meetings: String,
}

/// Response for `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub timestamp: String,
  /// Seconds since the server started
  pub uptime: f64,
  pub environment: String,
}

// Errors
// ======

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
  pub error: String,
  pub message: String,
  pub timestamp: String,
  pub request_id: Uuid,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub available_endpoints: Option<Vec<String>>,
}

/// An error response ready to be returned from a handler
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub envelope: ErrorEnvelope,
}

impl ApiError {
  pub fn internal(message: impl Into<String>, request_id: Uuid) -> Self {
    Self {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      envelope: ErrorEnvelope {
        error: "Erro interno do servidor".to_string(),
        message: message.into(),
        timestamp: timestamp_now(),
        request_id,
        available_endpoints: None,
      },
    }
  }

  pub fn not_found(method: &str, path: &str, request_id: Uuid) -> Self {
    Self {
      status: StatusCode::NOT_FOUND,
      envelope: ErrorEnvelope {
        error: "Endpoint não encontrado".to_string(),
        message: format!("A rota {method} {path} não existe"),
        timestamp: timestamp_now(),
        request_id,
        available_endpoints: Some(ENDPOINTS.iter().map(|(route, _)| route.to_string()).collect()),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(self.envelope)).into_response()
  }
}
