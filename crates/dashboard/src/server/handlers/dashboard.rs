//! Dashboard view handlers

use axum::{
  extract::{Extension, State},
  response::Json,
};

use crate::aggregation::{OverviewStats, PerformanceStats, RecentClient, TrendStats, UpcomingMeeting};
use crate::error::ProviderError;
use crate::server::middleware::RequestContext;
use crate::server::types::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Log a provider failure and turn it into a 500 envelope. Details only
/// leave the server in development.
fn provider_failure(state: &AppState, context: &RequestContext, error: ProviderError) -> ApiError {
  context.log_error(&format!("Failed to build dashboard view: {error}"));

  let message = if state.environment.exposes_error_details() {
    error.to_string()
  } else {
    GENERIC_ERROR_MESSAGE.to_string()
  };
  ApiError::internal(message, context.request_id)
}

/// GET /api/dashboard/stats
pub async fn stats(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<OverviewStats> {
  match state.service.stats().await {
    Ok(stats) => Ok(Json(stats)),
    Err(e) => Err(provider_failure(&state, &context, e)),
  }
}

/// GET /api/dashboard/trends
pub async fn trends(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<TrendStats> {
  match state.service.trends().await {
    Ok(trends) => Ok(Json(trends)),
    Err(e) => Err(provider_failure(&state, &context, e)),
  }
}

/// GET /api/dashboard/recent-clients
pub async fn recent_clients(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<Vec<RecentClient>> {
  match state.service.recent_clients().await {
    Ok(clients) => Ok(Json(clients)),
    Err(e) => Err(provider_failure(&state, &context, e)),
  }
}

/// GET /api/dashboard/upcoming-meetings
pub async fn upcoming_meetings(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<Vec<UpcomingMeeting>> {
  match state.service.upcoming_meetings().await {
    Ok(meetings) => Ok(Json(meetings)),
    Err(e) => Err(provider_failure(&state, &context, e)),
  }
}

/// GET /api/dashboard/performance
pub async fn performance(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<PerformanceStats> {
  match state.service.performance().await {
    Ok(performance) => Ok(Json(performance)),
    Err(e) => Err(provider_failure(&state, &context, e)),
  }
}
