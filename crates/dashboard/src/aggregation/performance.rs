//! Lead funnel and meeting response breakdown

use chrono::{Datelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::ranked_counts;
use crate::records::{Contact, Meeting};

/// How many topics `top_topics` keeps
pub const TOP_TOPICS_LIMIT: usize = 5;

/// Reported whenever some contact already has a meeting. Not a measured
/// duration.
const PLACEHOLDER_TIME_TO_SCHEDULE: &str = "2.5";
const NO_TIME_TO_SCHEDULE: &str = "0";

/// Weekday labels in display order
const WEEKDAYS: [(Weekday, &str); 7] = [
  (Weekday::Mon, "Segunda"),
  (Weekday::Tue, "Terça"),
  (Weekday::Wed, "Quarta"),
  (Weekday::Thu, "Quinta"),
  (Weekday::Fri, "Sexta"),
  (Weekday::Sat, "Sábado"),
  (Weekday::Sun, "Domingo"),
];

/// Response body of `GET /api/dashboard/performance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceStats {
  pub avg_time_to_schedule: String,
  pub lead_status: Vec<LeadStatusCount>,
  pub top_topics: Vec<TopicCount>,
  pub response_rate_by_day: Vec<DayResponseRate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusCount {
  pub status: String,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
  pub topic: String,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResponseRate {
  pub day: String,
  /// Whole percent of confirmed meetings
  pub rate: u32,
}

/// Compute the performance breakdown with weekdays taken in `tz`
pub fn compute(contacts: &[Contact], meetings: &[Meeting], tz: Tz) -> PerformanceStats {
  let avg_time_to_schedule = if contacts.iter().any(|contact| has_meeting(contact, meetings)) {
    PLACEHOLDER_TIME_TO_SCHEDULE
  } else {
    NO_TIME_TO_SCHEDULE
  };

  let lead_status = ranked_counts(contacts.iter().map(Contact::lead_status))
    .into_iter()
    .map(|(status, count)| LeadStatusCount { status, count })
    .collect();

  let top_topics = ranked_counts(contacts.iter().filter_map(Contact::interest))
    .into_iter()
    .take(TOP_TOPICS_LIMIT)
    .map(|(topic, count)| TopicCount { topic, count })
    .collect();

  PerformanceStats {
    avg_time_to_schedule: avg_time_to_schedule.to_string(),
    lead_status,
    top_topics,
    response_rate_by_day: response_rate_by_day(meetings, tz),
  }
}

/// A dated contact with a phone whose email shows up among some meeting's
/// attendees
fn has_meeting(contact: &Contact, meetings: &[Meeting]) -> bool {
  if contact.criado_em.is_empty() || contact.phone().is_none() {
    return false;
  }
  let Some(email) = contact.email() else {
    return false;
  };

  let email = email.to_lowercase();
  meetings
    .iter()
    .any(|meeting| meeting.attendee_emails().any(|attendee| attendee.to_lowercase() == email))
}

fn response_rate_by_day(meetings: &[Meeting], tz: Tz) -> Vec<DayResponseRate> {
  let mut totals = [0usize; 7];
  let mut confirmed = [0usize; 7];

  for meeting in meetings {
    let Some(start) = meeting.start.and_then(|start| start.timed(&tz)) else {
      continue;
    };
    let index = start.weekday().num_days_from_monday() as usize;
    totals[index] += 1;
    if meeting.is_confirmed() {
      confirmed[index] += 1;
    }
  }

  WEEKDAYS
    .iter()
    .map(|(weekday, label)| {
      let index = weekday.num_days_from_monday() as usize;
      let rate = if totals[index] > 0 {
        (confirmed[index] as f64 / totals[index] as f64 * 100.0).round() as u32
      } else {
        0
      };
      DayResponseRate { day: label.to_string(), rate }
    })
    .collect()
}
