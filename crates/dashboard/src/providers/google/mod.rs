//! Google Workspace provider: contacts from Sheets, meetings from Calendar
//!
//! Talks to the REST APIs directly with reqwest. Both sources are read-only;
//! nothing is cached between calls and failures are never retried.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::DataProvider;
use crate::clock::Clock;
use crate::error::ProviderError;
use crate::records::{Contact, Meeting};

pub mod calendar;
pub mod sheets;

/// Default OAuth2 token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// How the provider authenticates against Google
#[derive(Clone)]
pub enum GoogleCredentials {
  /// A ready-to-use bearer token
  AccessToken(String),
  /// OAuth2 refresh token, exchanged for an access token on every call
  RefreshToken { client_id: String, client_secret: String, refresh_token: String, token_uri: String },
}

impl fmt::Debug for GoogleCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GoogleCredentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
      GoogleCredentials::RefreshToken { client_id, token_uri, .. } => f
        .debug_struct("RefreshToken")
        .field("client_id", client_id)
        .field("token_uri", token_uri)
        .finish_non_exhaustive(),
    }
  }
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
}

/// Where to read from
#[derive(Debug, Clone)]
pub struct GoogleSources {
  pub sheets_id: String,
  pub sheet_range: String,
  pub calendar_id: String,
}

pub struct GoogleProvider {
  client: Client,
  credentials: GoogleCredentials,
  sources: GoogleSources,
  timezone: Tz,
  clock: Arc<dyn Clock>,
}

impl GoogleProvider {
  /// `timezone` and `clock` define the calendar window (the current month)
  pub fn new(
    credentials: GoogleCredentials,
    sources: GoogleSources,
    timezone: Tz,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self { client: Client::new(), credentials, sources, timezone, clock }
  }

  async fn access_token(&self) -> Result<String, ProviderError> {
    match &self.credentials {
      GoogleCredentials::AccessToken(token) => Ok(token.clone()),
      GoogleCredentials::RefreshToken { client_id, client_secret, refresh_token, token_uri } => {
        let form = [
          ("client_id", client_id.as_str()),
          ("client_secret", client_secret.as_str()),
          ("refresh_token", refresh_token.as_str()),
          ("grant_type", "refresh_token"),
        ];
        let response = self.client.post(token_uri).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
          let body = response.text().await.unwrap_or_default();
          return Err(ProviderError::auth(format!("token endpoint responded with {status}: {body}")));
        }

        let token: TokenResponse =
          response.json().await.map_err(|e| ProviderError::auth(e.to_string()))?;
        Ok(token.access_token)
      }
    }
  }
}

#[async_trait]
impl DataProvider for GoogleProvider {
  async fn fetch_contacts(&self) -> Result<Vec<Contact>, ProviderError> {
    let token = self.access_token().await?;
    sheets::fetch_contacts(&self.client, &token, &self.sources.sheets_id, &self.sources.sheet_range)
      .await
  }

  async fn fetch_meetings(&self) -> Result<Vec<Meeting>, ProviderError> {
    let token = self.access_token().await?;
    let now = self.clock.now().with_timezone(&self.timezone);
    let events =
      calendar::fetch_events(&self.client, &token, &self.sources.calendar_id, now).await?;

    Ok(events.into_iter().map(Meeting::from).collect())
  }
}

/// Join path segments onto an API base URL, percent-encoding each segment
pub(crate) fn api_url(
  base: &str,
  segments: &[&str],
  source_name: &'static str,
) -> Result<Url, ProviderError> {
  let mut url = Url::parse(base).map_err(|e| ProviderError::malformed(source_name, e.to_string()))?;
  url
    .path_segments_mut()
    .map_err(|_| ProviderError::malformed(source_name, "base URL cannot have a path"))?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}

/// Turn a non-success response into [`ProviderError::Upstream`]
pub(crate) async fn check_status(
  response: reqwest::Response,
  source_name: &'static str,
) -> Result<reqwest::Response, ProviderError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let message = response.text().await.unwrap_or_default();
  Err(ProviderError::Upstream { source_name, status: status.as_u16(), message })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_url_encodes_segments() {
    let url = api_url(
      "https://www.googleapis.com/calendar/v3/",
      &["calendars", "team@group.calendar.google.com", "events"],
      "Google Calendar",
    )
    .unwrap();
    assert_eq!(
      url.as_str(),
      "https://www.googleapis.com/calendar/v3/calendars/team@group.calendar.google.com/events"
    );

    let url = api_url("https://sheets.googleapis.com/v4/", &["values", "Página1!A:G"], "Sheets").unwrap();
    assert!(url.as_str().ends_with("/values/P%C3%A1gina1!A:G"));
  }

  #[test]
  fn test_credentials_debug_redacts_secrets() {
    let credentials = GoogleCredentials::RefreshToken {
      client_id: "client".into(),
      client_secret: "very-secret".into(),
      refresh_token: "refresh-secret".into(),
      token_uri: DEFAULT_TOKEN_URI.into(),
    };
    let rendered = format!("{credentials:?}");
    assert!(rendered.contains("client"));
    assert!(!rendered.contains("very-secret"));
    assert!(!rendered.contains("refresh-secret"));

    let rendered = format!("{:?}", GoogleCredentials::AccessToken("ya29.token".into()));
    assert!(!rendered.contains("ya29"));
  }
}
