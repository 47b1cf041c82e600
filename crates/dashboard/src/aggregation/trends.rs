//! Time series: contacts per day, meeting outcomes per day, peak hours

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::records::{Contact, Meeting};

/// Response body of `GET /api/dashboard/trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
  pub daily_contacts: Vec<DailyContacts>,
  pub meeting_trends: Vec<MeetingTrend>,
  pub peak_hours: Vec<PeakHour>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContacts {
  /// `YYYY-MM-DD`
  pub date: String,
  pub contacts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTrend {
  /// `YYYY-MM-DD`
  pub date: String,
  pub scheduled: usize,
  pub cancelled: usize,
  pub rescheduled: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
  /// `HH:00`
  pub hour: String,
  pub interactions: usize,
}

#[derive(Default)]
struct DayCounters {
  scheduled: usize,
  cancelled: usize,
  rescheduled: usize,
}

/// Compute the trend series with dates and hours taken in `tz`
pub fn compute(contacts: &[Contact], meetings: &[Meeting], tz: Tz) -> TrendStats {
  TrendStats {
    daily_contacts: daily_contacts(contacts),
    meeting_trends: meeting_trends(meetings, tz),
    peak_hours: peak_hours(meetings, tz),
  }
}

fn daily_contacts(contacts: &[Contact]) -> Vec<DailyContacts> {
  let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
  for created in contacts.iter().filter_map(Contact::created_on) {
    *by_date.entry(created).or_default() += 1;
  }

  by_date
    .into_iter()
    .map(|(date, contacts)| DailyContacts { date: date.format("%Y-%m-%d").to_string(), contacts })
    .collect()
}

// Unlike the overview, cancelled instances of recurring series count here.
fn meeting_trends(meetings: &[Meeting], tz: Tz) -> Vec<MeetingTrend> {
  let mut by_date: BTreeMap<NaiveDate, DayCounters> = BTreeMap::new();

  for meeting in meetings {
    let Some(start) = meeting.start else {
      continue;
    };
    let counters = by_date.entry(start.local_date(&tz)).or_default();

    if meeting.is_confirmed() && !meeting.rescheduled {
      counters.scheduled += 1;
    } else if meeting.is_cancelled() {
      counters.cancelled += 1;
    } else if meeting.rescheduled {
      counters.rescheduled += 1;
    }
  }

  by_date
    .into_iter()
    .map(|(date, counters)| MeetingTrend {
      date: date.format("%Y-%m-%d").to_string(),
      scheduled: counters.scheduled,
      cancelled: counters.cancelled,
      rescheduled: counters.rescheduled,
    })
    .collect()
}

fn peak_hours(meetings: &[Meeting], tz: Tz) -> Vec<PeakHour> {
  let mut by_hour: BTreeMap<String, usize> = BTreeMap::new();
  for start in meetings.iter().filter_map(|m| m.start.and_then(|start| start.timed(&tz))) {
    *by_hour.entry(start.format("%H:00").to_string()).or_default() += 1;
  }

  by_hour.into_iter().map(|(hour, interactions)| PeakHour { hour, interactions }).collect()
}
