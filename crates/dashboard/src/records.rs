//! Contact and meeting records as supplied by the data providers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::{self, MeetingStart};

/// Minimum gap between creation and last update for an event to count as
/// rescheduled
pub const RESCHEDULE_THRESHOLD_MS: i64 = 5000;

/// Lead status assigned to contacts without one
pub const DEFAULT_LEAD_STATUS: &str = "em_qualificacao";

/// Lead status of a qualified lead (compared case-insensitively)
pub const QUALIFIED_LEAD_STATUS: &str = "qualificado";

// Contacts
// ========

/// One lead captured by the intake process (a spreadsheet row).
///
/// Absent cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
  pub nome_completo: String,
  pub telefone_wpp: String,
  pub email_contato: String,
  pub interesse_principal: String,
  pub status_lead: String,
  pub criado_em: String,
  pub total_mensagens: String,
}

impl Contact {
  /// Build a contact from a sheet row keyed by the header row. Unknown
  /// columns are ignored and missing cells become empty strings.
  pub fn from_row(headers: &[String], row: &[Value]) -> Self {
    let mut contact = Contact::default();

    for (index, header) in headers.iter().enumerate() {
      let value = row.get(index).map(cell_text).unwrap_or_default();
      match header.trim() {
        "nome_completo" => contact.nome_completo = value,
        "telefone_wpp" => contact.telefone_wpp = value,
        "email_contato" => contact.email_contato = value,
        "interesse_principal" => contact.interesse_principal = value,
        "status_lead" => contact.status_lead = value,
        "criado_em" => contact.criado_em = value,
        "total_mensagens" => contact.total_mensagens = value,
        _ => {}
      }
    }

    contact
  }

  /// Phone number, if any. Distinct phones identify distinct clients.
  pub fn phone(&self) -> Option<&str> {
    non_empty(&self.telefone_wpp)
  }

  pub fn email(&self) -> Option<&str> {
    non_empty(&self.email_contato)
  }

  /// Parsed creation date, `None` when absent or malformed
  pub fn created_on(&self) -> Option<NaiveDate> {
    dates::parse_contact_date(&self.criado_em)
  }

  /// Whitespace-trimmed primary interest, `None` when blank
  pub fn interest(&self) -> Option<&str> {
    non_empty(self.interesse_principal.trim())
  }

  /// Lead status with the default applied
  pub fn lead_status(&self) -> &str {
    non_empty(&self.status_lead).unwrap_or(DEFAULT_LEAD_STATUS)
  }

  pub fn is_qualified(&self) -> bool {
    self.status_lead.to_lowercase() == QUALIFIED_LEAD_STATUS
  }

  /// Total message count; non-numeric values count as zero
  pub fn message_count(&self) -> i64 {
    parse_count(&self.total_mensagens)
  }
}

/// Parse the leading integer of a free-text count: leading whitespace, an
/// optional sign, then digits. `"12 msgs"` is 12, `"3.9"` is 3, `"n/a"` is 0.
/// Values beyond `i64` saturate.
pub fn parse_count(value: &str) -> i64 {
  let trimmed = value.trim_start();
  let (negative, rest) = match trimmed.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
  };

  let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
  if digits.is_empty() {
    return 0;
  }

  // Only overflow can make an all-digit string fail to parse
  let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
  if negative { -magnitude } else { magnitude }
}

/// Text of a sheet cell; numbers and booleans use their JSON rendering
pub(crate) fn cell_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

fn non_empty(value: &str) -> Option<&str> {
  if value.is_empty() {
    None
  } else {
    Some(value)
  }
}

// Calendar Events
// ===============

/// Raw calendar event as returned by the calendar API (camelCase JSON)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
  pub id: String,
  pub summary: Option<String>,
  pub start: Option<EventTime>,
  pub created: Option<String>,
  pub updated: Option<String>,
  pub status: Option<String>,
  pub recurring_event_id: Option<String>,
  pub attendees: Vec<Attendee>,
  pub location: Option<String>,
  pub description: Option<String>,
}

/// Start (or end) of a calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTime {
  pub date_time: Option<String>,
  pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attendee {
  pub email: Option<String>,
}

/// A calendar event with its derived fields computed.
///
/// Providers hand out `Meeting`s rather than raw events so the rescheduled
/// flag is settled before any aggregation reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
  pub event: CalendarEvent,
  pub start: Option<MeetingStart>,
  pub rescheduled: bool,
}

impl From<CalendarEvent> for Meeting {
  fn from(event: CalendarEvent) -> Self {
    let start = event
      .start
      .as_ref()
      .and_then(|start| MeetingStart::parse(start.date_time.as_deref(), start.date.as_deref()));
    let rescheduled = is_rescheduled(event.created.as_deref(), event.updated.as_deref());

    Self { event, start, rescheduled }
  }
}

impl Meeting {
  pub fn status(&self) -> &str {
    self.event.status.as_deref().unwrap_or_default()
  }

  pub fn is_confirmed(&self) -> bool {
    self.status() == "confirmed"
  }

  pub fn is_cancelled(&self) -> bool {
    self.status() == "cancelled"
  }

  /// Whether the event is an instance of a recurring series
  pub fn is_recurring(&self) -> bool {
    self.event.recurring_event_id.as_deref().is_some_and(|id| !id.is_empty())
  }

  /// Attendee emails with blank entries removed
  pub fn attendee_emails(&self) -> impl Iterator<Item = &str> {
    self.event.attendees.iter().filter_map(|a| a.email.as_deref()).filter(|email| !email.is_empty())
  }
}

/// An event is rescheduled when its update trails its creation by more than
/// [`RESCHEDULE_THRESHOLD_MS`]. Missing or malformed timestamps never count.
pub fn is_rescheduled(created: Option<&str>, updated: Option<&str>) -> bool {
  match (created.and_then(dates::parse_timestamp), updated.and_then(dates::parse_timestamp)) {
    (Some(created), Some(updated)) => {
      (updated - created).num_milliseconds() > RESCHEDULE_THRESHOLD_MS
    }
    _ => false,
  }
}
