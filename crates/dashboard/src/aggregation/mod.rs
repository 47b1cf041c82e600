//! Dashboard views derived from contact and meeting records
//!
//! Each submodule computes one view from freshly fetched records. The
//! functions are pure: the current time and timezone are always passed in.

pub mod overview;
pub mod performance;
pub mod recent;
pub mod trends;
pub mod upcoming;

pub use overview::OverviewStats;
pub use performance::PerformanceStats;
pub use recent::RecentClient;
pub use trends::TrendStats;
pub use upcoming::UpcomingMeeting;

use std::collections::HashMap;

/// Count labels and rank them by descending count. Labels with equal counts
/// keep the order in which they were first seen.
pub(crate) fn ranked_counts<'a, I>(labels: I) -> Vec<(String, usize)>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut positions: HashMap<&'a str, usize> = HashMap::new();
  let mut counts: Vec<(String, usize)> = Vec::new();

  for label in labels {
    match positions.get(label) {
      Some(&position) => counts[position].1 += 1,
      None => {
        positions.insert(label, counts.len());
        counts.push((label.to_string(), 1));
      }
    }
  }

  counts.sort_by(|a, b| b.1.cmp(&a.1));
  counts
}

/// Round to one decimal place
pub(crate) fn round_one_decimal(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

/// `numerator / denominator` as a percentage with one decimal, zero when the
/// denominator is zero
pub(crate) fn percentage(numerator: usize, denominator: usize) -> f64 {
  if denominator == 0 {
    return 0.0;
  }
  round_one_decimal(numerator as f64 / denominator as f64 * 100.0)
}

#[cfg(test)]
pub(crate) mod test_support {
  use chrono::{DateTime, TimeZone};
  use chrono_tz::Tz;
  use serde_json::json;

  use crate::records::{CalendarEvent, Contact, Meeting};

  pub fn tz() -> Tz {
    "America/Sao_Paulo".parse().unwrap()
  }

  /// 2024-01-20 12:00 in São Paulo
  pub fn now() -> DateTime<Tz> {
    tz().with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()
  }

  pub fn contact(phone: &str, created: &str, messages: &str) -> Contact {
    Contact {
      telefone_wpp: phone.to_string(),
      criado_em: created.to_string(),
      total_mensagens: messages.to_string(),
      ..Default::default()
    }
  }

  pub fn meeting(value: serde_json::Value) -> Meeting {
    let event: CalendarEvent = serde_json::from_value(value).unwrap();
    Meeting::from(event)
  }

  /// A meeting with the given status, start and reschedule state
  pub fn meeting_at(status: &str, start: &str, rescheduled: bool) -> Meeting {
    let updated = if rescheduled { "2024-01-01T10:00:10Z" } else { "2024-01-01T10:00:00Z" };
    meeting(json!({
      "id": format!("{status}-{start}"),
      "status": status,
      "created": "2024-01-01T10:00:00Z",
      "updated": updated,
      "start": { "dateTime": start },
    }))
  }
}
