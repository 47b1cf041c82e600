//! Overview statistics: client counts, meeting outcomes and interests

use std::collections::HashSet;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::{percentage, ranked_counts, round_one_decimal};
use crate::records::{Contact, Meeting};

/// Response body of `GET /api/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
  pub total_clients: usize,
  pub new_clients: usize,
  pub returning_clients: usize,
  pub avg_messages_per_interaction: f64,
  pub scheduled_meetings: usize,
  pub cancelled_meetings: usize,
  pub rescheduled_meetings: usize,
  pub scheduling_success_rate: f64,
  pub lead_to_meeting_rate: f64,
  pub interests: Vec<InterestCount>,
}

/// How many contacts named a primary interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCount {
  pub name: String,
  pub value: usize,
}

/// Confirmed and never moved
pub(crate) fn is_scheduled(meeting: &Meeting) -> bool {
  meeting.is_confirmed() && !meeting.rescheduled
}

/// Cancelled single events. Cancelled instances of a recurring series are
/// not counted here.
pub(crate) fn is_cancelled(meeting: &Meeting) -> bool {
  meeting.is_cancelled() && !meeting.is_recurring()
}

/// Moved and still on the calendar
pub(crate) fn is_rescheduled(meeting: &Meeting) -> bool {
  meeting.rescheduled && !meeting.is_cancelled()
}

/// Compute the overview for `now` (whose timezone defines the current month)
pub fn compute(contacts: &[Contact], meetings: &[Meeting], now: DateTime<Tz>) -> OverviewStats {
  let phones: HashSet<&str> = contacts.iter().filter_map(Contact::phone).collect();
  let total_clients = phones.len();

  let new_phones: HashSet<&str> = contacts
    .iter()
    .filter(|contact| {
      contact
        .created_on()
        .is_some_and(|created| created.year() == now.year() && created.month() == now.month())
    })
    .filter_map(Contact::phone)
    .collect();
  let new_clients = new_phones.len();
  let returning_clients = total_clients.saturating_sub(new_clients);

  let total_messages =
    contacts.iter().map(Contact::message_count).fold(0i64, i64::saturating_add);
  let avg_messages_per_interaction = if total_clients > 0 {
    round_one_decimal(total_messages as f64 / total_clients as f64)
  } else {
    0.0
  };

  let scheduled_meetings = meetings.iter().filter(|m| is_scheduled(m)).count();
  let cancelled_meetings = meetings.iter().filter(|m| is_cancelled(m)).count();
  let rescheduled_meetings = meetings.iter().filter(|m| is_rescheduled(m)).count();

  let attempts = scheduled_meetings + cancelled_meetings + rescheduled_meetings;
  let scheduling_success_rate = percentage(scheduled_meetings + rescheduled_meetings, attempts);

  let qualified_leads = contacts.iter().filter(|c| c.is_qualified()).count();
  let lead_to_meeting_rate = percentage(scheduled_meetings, qualified_leads).min(100.0);

  let interests = ranked_counts(contacts.iter().filter_map(Contact::interest))
    .into_iter()
    .map(|(name, value)| InterestCount { name, value })
    .collect();

  OverviewStats {
    total_clients,
    new_clients,
    returning_clients,
    avg_messages_per_interaction,
    scheduled_meetings,
    cancelled_meetings,
    rescheduled_meetings,
    scheduling_success_rate,
    lead_to_meeting_rate,
    interests,
  }
}
