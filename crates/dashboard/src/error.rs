//! Error types for configuration and upstream data access

use thiserror::Error;

/// Startup configuration problems. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("GOOGLE_SHEETS_ID is not configured")]
  MissingSheetsId,

  #[error("GOOGLE_CALENDAR_ID is not configured")]
  MissingCalendarId,

  #[error(
    "Google credentials are not configured: set GOOGLE_ACCESS_TOKEN or GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REFRESH_TOKEN"
  )]
  MissingCredentials,

  #[error("Unknown timezone '{name}'")]
  UnknownTimezone { name: String },

  #[error("Unknown environment '{name}' (expected development or production)")]
  UnknownEnvironment { name: String },

  #[error("Failed to load fixtures from {path}: {message}")]
  Fixtures { path: String, message: String },
}

/// Failures while reading contacts or meetings from a data provider
#[derive(Error, Debug)]
pub enum ProviderError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{source_name} responded with status {status}: {message}")]
  Upstream { source_name: &'static str, status: u16, message: String },

  #[error("Failed to obtain an access token: {message}")]
  Auth { message: String },

  #[error("Malformed response from {source_name}: {message}")]
  Malformed { source_name: &'static str, message: String },

  #[error("{0}")]
  Unavailable(String),
}

impl ProviderError {
  pub fn auth(message: impl Into<String>) -> Self {
    Self::Auth { message: message.into() }
  }

  pub fn malformed(source_name: &'static str, message: impl Into<String>) -> Self {
    Self::Malformed { source_name, message: message.into() }
  }
}
