//! HTTP client for the dashboard REST API
//!
//! A thin reqwest wrapper used by the `dashboard` CLI to read views from a
//! running server.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::aggregation::{OverviewStats, PerformanceStats, RecentClient, TrendStats, UpcomingMeeting};
use crate::server::types::{ErrorEnvelope, HealthResponse};

/// Default dashboard server URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Configuration for the dashboard HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the dashboard server (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: 30 }
  }
}

/// HTTP client for the dashboard REST API
pub struct DashboardClient {
  client: Client,
  config: ClientConfig,
}

impl DashboardClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let url = self.url(path);
    let response = self
      .client
      .get(&url)
      .send()
      .await
      .with_context(|| format!("Failed to reach dashboard server at {}", self.config.base_url))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(anyhow!("{} returned {}: {}", path, status, error_message(&body)));
    }

    response.json().await.with_context(|| format!("Unexpected response body from {path}"))
  }

  pub async fn health(&self) -> Result<HealthResponse> {
    self.get_json("/health").await
  }

  pub async fn stats(&self) -> Result<OverviewStats> {
    self.get_json("/api/dashboard/stats").await
  }

  pub async fn trends(&self) -> Result<TrendStats> {
    self.get_json("/api/dashboard/trends").await
  }

  pub async fn recent_clients(&self) -> Result<Vec<RecentClient>> {
    self.get_json("/api/dashboard/recent-clients").await
  }

  pub async fn upcoming_meetings(&self) -> Result<Vec<UpcomingMeeting>> {
    self.get_json("/api/dashboard/upcoming-meetings").await
  }

  pub async fn performance(&self) -> Result<PerformanceStats> {
    self.get_json("/api/dashboard/performance").await
  }
}

/// The server's error message when the body is an error envelope, the raw
/// body otherwise
fn error_message(body: &str) -> String {
  match serde_json::from_str::<ErrorEnvelope>(body) {
    Ok(envelope) => format!("{} ({}, request {})", envelope.message, envelope.error, envelope.request_id),
    Err(_) => body.to_string(),
  }
}
