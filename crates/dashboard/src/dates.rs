//! Date parsing for spreadsheet and calendar values
//!
//! Contact sheets carry creation dates in one of two textual layouts, while
//! calendar events carry RFC 3339 timestamps or bare all-day dates. Every
//! parser here returns `None` instead of failing so that callers can skip
//! records with bad data.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Layouts accepted for contact creation dates, tried in order
const CONTACT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Layout of all-day calendar dates
const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a contact creation date (`YYYY-MM-DD` or `MM/DD/YYYY`).
///
/// A trailing time component (`2024-01-05T10:00`, `01/05/2024 10:00`) is
/// ignored.
pub fn parse_contact_date(value: &str) -> Option<NaiveDate> {
  let trimmed = value.trim();
  let date_part = trimmed.split(|c: char| c == 'T' || c.is_whitespace()).next()?;
  if date_part.is_empty() {
    return None;
  }

  CONTACT_DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parse an RFC 3339 timestamp as emitted by the calendar API
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_rfc3339(value.trim()).ok()
}

/// When a meeting starts: either at an exact instant or on a whole day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStart {
  /// Timed event (`start.dateTime`)
  At(DateTime<FixedOffset>),
  /// All-day event (`start.date`)
  AllDay(NaiveDate),
}

impl MeetingStart {
  /// Parse a calendar start from its `dateTime` and `date` fields.
  ///
  /// `dateTime` wins when present; a malformed `dateTime` does not fall back
  /// to `date`.
  pub fn parse(date_time: Option<&str>, date: Option<&str>) -> Option<Self> {
    match (date_time.filter(|v| !v.trim().is_empty()), date.filter(|v| !v.trim().is_empty())) {
      (Some(date_time), _) => parse_timestamp(date_time).map(MeetingStart::At),
      (None, Some(date)) => {
        NaiveDate::parse_from_str(date.trim(), CALENDAR_DATE_FORMAT).ok().map(MeetingStart::AllDay)
      }
      (None, None) => None,
    }
  }

  /// The instant the meeting starts, seen from `tz`. All-day meetings start
  /// when the local day does (see [`start_of_day`]).
  pub fn instant(&self, tz: &Tz) -> Option<DateTime<Tz>> {
    match self {
      MeetingStart::At(at) => Some(at.with_timezone(tz)),
      MeetingStart::AllDay(day) => start_of_day(*day, tz),
    }
  }

  /// Calendar date of the start in `tz`
  pub fn local_date(&self, tz: &Tz) -> NaiveDate {
    match self {
      MeetingStart::At(at) => at.with_timezone(tz).date_naive(),
      MeetingStart::AllDay(day) => *day,
    }
  }

  /// Start instant for timed meetings only
  pub fn timed(&self, tz: &Tz) -> Option<DateTime<Tz>> {
    match self {
      MeetingStart::At(at) => Some(at.with_timezone(tz)),
      MeetingStart::AllDay(_) => None,
    }
  }
}

/// First instant of `day` in `tz`: local midnight, or the first whole hour
/// after it when a DST transition skips midnight
pub fn start_of_day(day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
  (0..24).find_map(|hour| tz.from_local_datetime(&day.and_hms_opt(hour, 0, 0)?).earliest())
}
