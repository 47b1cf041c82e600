//! In-memory provider backed by fixture records

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DataProvider;
use crate::error::{ConfigError, ProviderError};
use crate::records::{CalendarEvent, Contact, Meeting};

/// Fixture file layout: `{"contacts": [...], "events": [...]}` where events
/// use the calendar API's JSON shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
  pub contacts: Vec<Contact>,
  pub events: Vec<CalendarEvent>,
}

/// Serves the same records on every call
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
  fixtures: Fixtures,
}

impl FixtureProvider {
  pub fn new(contacts: Vec<Contact>, events: Vec<CalendarEvent>) -> Self {
    Self { fixtures: Fixtures { contacts, events } }
  }

  /// Load fixtures from a JSON file
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let fixtures_error = |message: String| ConfigError::Fixtures {
      path: path.display().to_string(),
      message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| fixtures_error(e.to_string()))?;
    let fixtures: Fixtures =
      serde_json::from_str(&content).map_err(|e| fixtures_error(e.to_string()))?;

    Ok(Self { fixtures })
  }
}

#[async_trait]
impl DataProvider for FixtureProvider {
  async fn fetch_contacts(&self) -> Result<Vec<Contact>, ProviderError> {
    Ok(self.fixtures.contacts.clone())
  }

  async fn fetch_meetings(&self) -> Result<Vec<Meeting>, ProviderError> {
    Ok(self.fixtures.events.iter().cloned().map(Meeting::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_fixture_provider_derives_meetings() {
    let event = CalendarEvent {
      id: "evt".into(),
      status: Some("confirmed".into()),
      created: Some("2024-01-01T00:00:00Z".into()),
      updated: Some("2024-01-01T00:01:00Z".into()),
      ..Default::default()
    };
    let provider = FixtureProvider::new(vec![Contact::default()], vec![event]);

    assert_eq!(provider.fetch_contacts().await.unwrap().len(), 1);
    let meetings = provider.fetch_meetings().await.unwrap();
    assert_eq!(meetings.len(), 1);
    assert!(meetings[0].rescheduled);
  }

  #[test]
  fn test_from_missing_file_is_config_error() {
    let result = FixtureProvider::from_file(Path::new("/definitely/not/here.json"));
    assert!(matches!(result, Err(ConfigError::Fixtures { .. })));
  }
}
