//! Server configuration
//!
//! Command-line flags (with environment fallbacks) are parsed by clap and
//! validated once into [`Settings`], which is then handed to the server.
//! Nothing reads the environment after startup.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use chrono_tz::Tz;
use clap::Parser;
use serde::Serialize;

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::providers::google::{GoogleCredentials, GoogleSources, DEFAULT_TOKEN_URI};
use crate::providers::{DataProvider, FixtureProvider, GoogleProvider};

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard_server")]
#[command(about = "Lead dashboard REST API server")]
#[command(version)]
pub struct ServerArgs {
  /// Server bind address
  #[arg(long, env = "DASHBOARD_BIND", default_value = "0.0.0.0:3000")]
  pub bind: SocketAddr,

  /// Spreadsheet holding the contact rows
  #[arg(long, env = "GOOGLE_SHEETS_ID")]
  pub sheets_id: Option<String>,

  /// Calendar holding the meetings
  #[arg(long, env = "GOOGLE_CALENDAR_ID")]
  pub calendar_id: Option<String>,

  /// Sheet range (A1 notation or sheet name) to read contacts from
  #[arg(long, env = "GOOGLE_SHEETS_RANGE", default_value = "Página1")]
  pub sheet_range: String,

  /// Static OAuth2 access token
  #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
  pub access_token: Option<String>,

  /// OAuth2 client id (refresh-token flow)
  #[arg(long, env = "GOOGLE_CLIENT_ID")]
  pub client_id: Option<String>,

  /// OAuth2 client secret (refresh-token flow)
  #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
  pub client_secret: Option<String>,

  /// OAuth2 refresh token (refresh-token flow)
  #[arg(long, env = "GOOGLE_REFRESH_TOKEN", hide_env_values = true)]
  pub refresh_token: Option<String>,

  /// OAuth2 token endpoint
  #[arg(long, env = "GOOGLE_TOKEN_URI", default_value = DEFAULT_TOKEN_URI)]
  pub token_uri: String,

  /// IANA timezone used for months, days and hours
  #[arg(long, env = "DASHBOARD_TIMEZONE", default_value = "UTC")]
  pub timezone: String,

  /// development or production; production hides error details
  #[arg(long, env = "DASHBOARD_ENV", default_value = "development")]
  pub environment: String,

  /// Serve records from a JSON fixture file instead of Google
  #[arg(long, env = "DASHBOARD_FIXTURES")]
  pub fixtures: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  Development,
  Production,
}

impl Environment {
  /// Whether error responses may carry internal details
  pub fn exposes_error_details(&self) -> bool {
    matches!(self, Environment::Development)
  }
}

impl FromStr for Environment {
  type Err = ConfigError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.trim().to_lowercase().as_str() {
      "development" | "dev" => Ok(Environment::Development),
      "production" | "prod" => Ok(Environment::Production),
      _ => Err(ConfigError::UnknownEnvironment { name: value.to_string() }),
    }
  }
}

impl fmt::Display for Environment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Environment::Development => f.write_str("development"),
      Environment::Production => f.write_str("production"),
    }
  }
}

/// Validated server configuration
#[derive(Debug, Clone)]
pub struct Settings {
  pub bind: SocketAddr,
  pub sources: GoogleSources,
  /// `None` only when serving fixtures
  pub credentials: Option<GoogleCredentials>,
  pub timezone: Tz,
  pub environment: Environment,
  pub fixtures: Option<PathBuf>,
}

impl Settings {
  pub fn from_args(args: ServerArgs) -> Result<Self, ConfigError> {
    let sheets_id = present(args.sheets_id).ok_or(ConfigError::MissingSheetsId)?;
    let calendar_id = present(args.calendar_id).ok_or(ConfigError::MissingCalendarId)?;

    let timezone: Tz = args
      .timezone
      .trim()
      .parse()
      .map_err(|_| ConfigError::UnknownTimezone { name: args.timezone.clone() })?;
    let environment: Environment = args.environment.parse()?;

    let credentials = match (
      present(args.access_token),
      present(args.client_id),
      present(args.client_secret),
      present(args.refresh_token),
    ) {
      (Some(token), _, _, _) => Some(GoogleCredentials::AccessToken(token)),
      (None, Some(client_id), Some(client_secret), Some(refresh_token)) => {
        Some(GoogleCredentials::RefreshToken {
          client_id,
          client_secret,
          refresh_token,
          token_uri: args.token_uri,
        })
      }
      _ => None,
    };
    if credentials.is_none() && args.fixtures.is_none() {
      return Err(ConfigError::MissingCredentials);
    }

    Ok(Self {
      bind: args.bind,
      sources: GoogleSources { sheets_id, sheet_range: args.sheet_range, calendar_id },
      credentials,
      timezone,
      environment,
      fixtures: args.fixtures,
    })
  }

  /// Build the provider these settings describe
  pub fn data_provider(&self, clock: Arc<dyn Clock>) -> Result<Arc<dyn DataProvider>, ConfigError> {
    if let Some(path) = &self.fixtures {
      return Ok(Arc::new(FixtureProvider::from_file(path)?));
    }

    let credentials = self.credentials.clone().ok_or(ConfigError::MissingCredentials)?;
    Ok(Arc::new(GoogleProvider::new(credentials, self.sources.clone(), self.timezone, clock)))
  }
}

fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(extra: &[&str]) -> ServerArgs {
    let mut argv = vec!["dashboard_server"];
    argv.extend_from_slice(extra);
    ServerArgs::try_parse_from(argv).unwrap()
  }

  #[test]
  fn test_environment_parsing() {
    assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
    assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Development);
    assert!("staging".parse::<Environment>().is_err());
    assert!(Environment::Development.exposes_error_details());
    assert!(!Environment::Production.exposes_error_details());
  }

  #[test]
  fn test_blank_identifier_counts_as_missing() {
    let mut parsed = args(&["--calendar-id", "cal", "--access-token", "tok"]);
    parsed.sheets_id = Some("  ".into());
    assert!(matches!(Settings::from_args(parsed), Err(ConfigError::MissingSheetsId)));
  }

  #[test]
  fn test_refresh_token_credentials() {
    let mut parsed = args(&["--timezone", "America/Sao_Paulo"]);
    parsed.sheets_id = Some("sheet".into());
    parsed.calendar_id = Some("cal".into());
    parsed.access_token = None;
    parsed.client_id = Some("id".into());
    parsed.client_secret = Some("secret".into());
    parsed.refresh_token = Some("refresh".into());

    let settings = Settings::from_args(parsed).unwrap();
    assert!(matches!(settings.credentials, Some(GoogleCredentials::RefreshToken { .. })));
    assert_eq!(settings.timezone, chrono_tz::America::Sao_Paulo);
  }

  #[test]
  fn test_unknown_timezone_is_rejected() {
    let mut parsed = args(&["--timezone", "Mars/Olympus"]);
    parsed.sheets_id = Some("sheet".into());
    parsed.calendar_id = Some("cal".into());
    parsed.access_token = Some("tok".into());
    assert!(matches!(Settings::from_args(parsed), Err(ConfigError::UnknownTimezone { .. })));
  }
}
