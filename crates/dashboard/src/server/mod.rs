//! REST API for the lead dashboard
//!
//! Read-only JSON endpoints over axum. Every dashboard request reads fresh
//! records through the [`DashboardService`] held in [`AppState`].

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod types;

use std::time::Instant;

use crate::config::{Environment, Settings};
use crate::service::DashboardService;
use types::DataSources;

/// Shared, immutable state handed to every handler
#[derive(Clone)]
pub struct AppState {
  pub service: DashboardService,
  pub environment: Environment,
  pub data_sources: DataSources,
  pub started_at: Instant,
}

impl AppState {
  pub fn new(service: DashboardService, environment: Environment, data_sources: DataSources) -> Self {
    Self { service, environment, data_sources, started_at: Instant::now() }
  }
}

impl DataSources {
  /// Describe where the configured records come from
  pub fn from_settings(settings: &Settings) -> Self {
    match &settings.fixtures {
      Some(path) => {
        let label = format!("fixtures ({})", path.display());
        Self { contacts: label.clone(), meetings: label }
      }
      None => Self {
        contacts: format!(
          "Google Sheets {} ({})",
          settings.sources.sheets_id, settings.sources.sheet_range
        ),
        meetings: format!("Google Calendar {}", settings.sources.calendar_id),
      },
    }
  }
}
