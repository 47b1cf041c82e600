//! REST server startup and configuration

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
  http::{header, Method},
  serve, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::server::routing::create_router;
use crate::server::types::DataSources;
use crate::server::AppState;
use crate::service::DashboardService;

/// Build the full application (routes, state, tracing and CORS layers)
pub fn build_app(settings: &Settings) -> Result<Router> {
  let clock: Arc<dyn Clock> = Arc::new(SystemClock);
  let provider = settings.data_provider(clock.clone())?;
  let service = DashboardService::new(provider, clock, settings.timezone);
  let state = AppState::new(service, settings.environment, DataSources::from_settings(settings));

  Ok(create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors_layer())))
}

/// Any origin may read the dashboard
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Start the REST server and run until SIGINT or SIGTERM
pub async fn start_server(settings: Settings) -> Result<()> {
  let app = build_app(&settings)?;

  tracing::info!(
    environment = %settings.environment,
    timezone = %settings.timezone,
    "Starting dashboard REST server on {}",
    settings.bind
  );

  let listener = TcpListener::bind(settings.bind)
    .await
    .with_context(|| format!("Failed to bind {}", settings.bind))?;
  tracing::info!("Server listening on {}", settings.bind);

  serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

  tracing::info!("Server shutdown gracefully");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("Failed to listen for Ctrl-C: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to listen for SIGTERM: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }

  tracing::info!("Shutdown signal received");
}
