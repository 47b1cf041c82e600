use clap::Parser;
use dashboard::config::{Environment, ServerArgs, Settings};
use dashboard::error::ConfigError;
use dashboard::providers::google::GoogleCredentials;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
  "DASHBOARD_BIND",
  "GOOGLE_SHEETS_ID",
  "GOOGLE_CALENDAR_ID",
  "GOOGLE_SHEETS_RANGE",
  "GOOGLE_ACCESS_TOKEN",
  "GOOGLE_CLIENT_ID",
  "GOOGLE_CLIENT_SECRET",
  "GOOGLE_REFRESH_TOKEN",
  "GOOGLE_TOKEN_URI",
  "DASHBOARD_TIMEZONE",
  "DASHBOARD_ENV",
  "DASHBOARD_FIXTURES",
];

// Helper to start every test from a clean environment
fn clear_env() {
  for var in VARS {
    env::remove_var(var);
  }
}

fn settings_from_env() -> Result<Settings, ConfigError> {
  Settings::from_args(ServerArgs::try_parse_from(["dashboard_server"]).unwrap())
}

#[test]
#[serial]
fn test_settings_from_environment() {
  clear_env();
  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  env::set_var("GOOGLE_CALENDAR_ID", "team@group.calendar.google.com");
  env::set_var("GOOGLE_ACCESS_TOKEN", "ya29.token");
  env::set_var("DASHBOARD_TIMEZONE", "America/Sao_Paulo");
  env::set_var("DASHBOARD_ENV", "production");
  env::set_var("DASHBOARD_BIND", "127.0.0.1:8080");

  let settings = settings_from_env().unwrap();
  assert_eq!(settings.sources.sheets_id, "sheet-123");
  assert_eq!(settings.sources.sheet_range, "Página1");
  assert_eq!(settings.sources.calendar_id, "team@group.calendar.google.com");
  assert!(matches!(settings.credentials, Some(GoogleCredentials::AccessToken(_))));
  assert_eq!(settings.timezone, chrono_tz::America::Sao_Paulo);
  assert_eq!(settings.environment, Environment::Production);
  assert_eq!(settings.bind.port(), 8080);

  clear_env();
}

#[test]
#[serial]
fn test_defaults() {
  clear_env();
  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  env::set_var("GOOGLE_CALENDAR_ID", "calendar");
  env::set_var("GOOGLE_ACCESS_TOKEN", "ya29.token");

  let settings = settings_from_env().unwrap();
  assert_eq!(settings.timezone, chrono_tz::Tz::UTC);
  assert_eq!(settings.environment, Environment::Development);
  assert_eq!(settings.bind.to_string(), "0.0.0.0:3000");
  assert!(settings.fixtures.is_none());

  clear_env();
}

#[test]
#[serial]
fn test_missing_identifiers_are_fatal() {
  clear_env();
  env::set_var("GOOGLE_ACCESS_TOKEN", "ya29.token");
  assert!(matches!(settings_from_env(), Err(ConfigError::MissingSheetsId)));

  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  assert!(matches!(settings_from_env(), Err(ConfigError::MissingCalendarId)));

  clear_env();
}

#[test]
#[serial]
fn test_incomplete_refresh_credentials_are_rejected() {
  clear_env();
  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  env::set_var("GOOGLE_CALENDAR_ID", "calendar");
  env::set_var("GOOGLE_CLIENT_ID", "client");
  env::set_var("GOOGLE_REFRESH_TOKEN", "refresh");

  assert!(matches!(settings_from_env(), Err(ConfigError::MissingCredentials)));

  clear_env();
}

#[test]
#[serial]
fn test_fixtures_replace_credentials() {
  clear_env();
  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  env::set_var("GOOGLE_CALENDAR_ID", "calendar");
  env::set_var("DASHBOARD_FIXTURES", "tests/fixtures/sample.json");

  let settings = settings_from_env().unwrap();
  assert!(settings.credentials.is_none());
  assert!(settings.fixtures.is_some());

  clear_env();
}

#[test]
#[serial]
fn test_unknown_environment_is_rejected() {
  clear_env();
  env::set_var("GOOGLE_SHEETS_ID", "sheet-123");
  env::set_var("GOOGLE_CALENDAR_ID", "calendar");
  env::set_var("GOOGLE_ACCESS_TOKEN", "ya29.token");
  env::set_var("DASHBOARD_ENV", "staging");

  assert!(matches!(settings_from_env(), Err(ConfigError::UnknownEnvironment { .. })));

  clear_env();
}
