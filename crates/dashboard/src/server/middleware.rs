//! Request context and middleware for the dashboard REST API
//!
//! Every request gets a [`RequestContext`] carrying a fresh request id. The
//! middleware logs start and completion; handlers pull the context from the
//! request extensions to tag their own logs and error responses.

use std::time::Instant;

use axum::{
  extract::Request,
  http::{Method, Uri},
  middleware::Next,
  response::Response,
};
use uuid::Uuid;

/// Request metadata shared with handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  /// User-Agent header, "none" when absent
  pub user_agent: String,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, user_agent: String) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, user_agent }
  }

  /// Log request start
  pub fn log_request_start(&self) {
    tracing::info!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      user_agent = %self.user_agent,
      "Request started"
    );
  }

  /// Log request completion with status
  pub fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    tracing::info!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      status = status_code,
      duration_ms = format_args!("{duration_ms:.2}"),
      "Request completed"
    );
  }

  pub fn log_error(&self, message: &str) {
    tracing::error!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      "{message}"
    );
  }
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let user_agent = request
    .headers()
    .get(axum::http::header::USER_AGENT)
    .and_then(|value| value.to_str().ok())
    .unwrap_or("none")
    .to_string();
  let context = RequestContext::new(request.method().clone(), request.uri().clone(), user_agent);

  let start_time = Instant::now();
  context.log_request_start();

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms);

  response
}
