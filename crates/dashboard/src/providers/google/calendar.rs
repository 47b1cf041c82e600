//! Google Calendar API v3: events of the current month

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

use super::{api_url, check_status};
use crate::dates::start_of_day;
use crate::error::ProviderError;
use crate::records::CalendarEvent;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/";
const SOURCE_NAME: &str = "Google Calendar";
const MAX_RESULTS: &str = "1000";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
  #[serde(default)]
  items: Vec<CalendarEvent>,
  next_page_token: Option<String>,
}

/// First and last instant (millisecond precision) of the month containing
/// `now`, in `now`'s timezone
pub fn month_window(now: DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
  let tz = now.timezone();
  let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?;
  let next = if now.month() == 12 {
    NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?
  } else {
    NaiveDate::from_ymd_opt(now.year(), now.month() + 1, 1)?
  };

  let start = start_of_day(first, &tz)?;
  let end = start_of_day(next, &tz)? - Duration::milliseconds(1);

  Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Fetch every event instance (recurring series expanded, deleted events
/// included) of the current month, following pagination
pub async fn fetch_events(
  client: &Client,
  access_token: &str,
  calendar_id: &str,
  now: DateTime<Tz>,
) -> Result<Vec<CalendarEvent>, ProviderError> {
  let (time_min, time_max) = month_window(now)
    .ok_or_else(|| ProviderError::Unavailable(format!("No calendar month window for {now}")))?;
  let time_min = time_min.to_rfc3339_opts(SecondsFormat::Millis, true);
  let time_max = time_max.to_rfc3339_opts(SecondsFormat::Millis, true);

  let url = api_url(CALENDAR_API_BASE, &["calendars", calendar_id, "events"], SOURCE_NAME)?;

  let mut events = Vec::new();
  let mut page_token: Option<String> = None;

  loop {
    let mut request = client.get(url.clone()).bearer_auth(access_token).query(&[
      ("timeMin", time_min.as_str()),
      ("timeMax", time_max.as_str()),
      ("maxResults", MAX_RESULTS),
      ("singleEvents", "true"),
      ("orderBy", "startTime"),
      ("showDeleted", "true"),
    ]);
    if let Some(token) = page_token.as_deref() {
      request = request.query(&[("pageToken", token)]);
    }

    let response = check_status(request.send().await?, SOURCE_NAME).await?;
    let page: EventsPage =
      response.json().await.map_err(|e| ProviderError::malformed(SOURCE_NAME, e.to_string()))?;

    events.extend(page.items);
    match page.next_page_token {
      Some(token) if !token.is_empty() => page_token = Some(token),
      _ => break,
    }
  }

  tracing::info!(count = events.len(), "Loaded events from the calendar");
  Ok(events)
}
