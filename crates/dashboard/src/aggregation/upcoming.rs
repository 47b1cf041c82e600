//! Confirmed meetings that have not started yet

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::records::Meeting;

/// How many meetings the list shows
pub const UPCOMING_MEETINGS_LIMIT: usize = 10;

const UNTITLED: &str = "Reunião sem título";

/// One entry of `GET /api/dashboard/upcoming-meetings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingMeeting {
  pub id: String,
  pub title: String,
  /// `DD/MM/YYYY HH:mm` in the dashboard timezone
  pub start_time: String,
  pub attendees: Vec<String>,
  pub is_rescheduled: bool,
  pub location: String,
  pub description: String,
}

/// Confirmed meetings starting strictly after `now`, soonest first
pub fn compute(meetings: &[Meeting], now: DateTime<Tz>) -> Vec<UpcomingMeeting> {
  let tz = now.timezone();

  let mut upcoming: Vec<(DateTime<Tz>, &Meeting)> = meetings
    .iter()
    .filter(|meeting| meeting.is_confirmed())
    .filter_map(|meeting| meeting.start.and_then(|start| start.instant(&tz)).map(|at| (at, meeting)))
    .filter(|(at, _)| *at > now)
    .collect();
  upcoming.sort_by(|a, b| a.0.cmp(&b.0));

  upcoming
    .into_iter()
    .take(UPCOMING_MEETINGS_LIMIT)
    .map(|(at, meeting)| UpcomingMeeting {
      id: meeting.event.id.clone(),
      title: meeting
        .event
        .summary
        .clone()
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string()),
      start_time: at.format("%d/%m/%Y %H:%M").to_string(),
      attendees: meeting.attendee_emails().map(str::to_string).collect(),
      is_rescheduled: meeting.rescheduled,
      location: meeting.event.location.clone().unwrap_or_default(),
      description: meeting.event.description.clone().unwrap_or_default(),
    })
    .collect()
}
