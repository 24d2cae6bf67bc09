//! Record dates.
//!
//! Writers send either a full timestamp or a bare calendar date, and both
//! shapes are kept as received. Ordering always goes through
//! [`RecordDate::instant`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// When a record happens (events) or was published (news).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordDate {
  /// A specific moment, e.g. `2024-01-10T18:30:00Z`.
  Instant(DateTime<Utc>),
  /// A calendar date without a time component, e.g. `2024-01-10`.
  DateOnly(NaiveDate),
}

impl RecordDate {
  /// The moment used for ordering. Calendar dates map to midnight UTC.
  pub fn instant(&self) -> DateTime<Utc> {
    match self {
      Self::Instant(at) => *at,
      Self::DateOnly(day) => day.and_time(NaiveTime::MIN).and_utc(),
    }
  }

  /// The calendar day, dropping any time component.
  pub fn calendar_date(&self) -> NaiveDate {
    match self {
      Self::Instant(at) => at.date_naive(),
      Self::DateOnly(day) => *day,
    }
  }
}

impl FromStr for RecordDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
      return Ok(Self::Instant(at.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self::DateOnly)
      .map_err(|_| Error::InvalidDate(s.to_owned()))
  }
}

impl TryFrom<String> for RecordDate {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<RecordDate> for String {
  fn from(d: RecordDate) -> Self { d.to_string() }
}

impl fmt::Display for RecordDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Instant(at) => {
        f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
      }
      Self::DateOnly(day) => write!(f, "{}", day.format("%Y-%m-%d")),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn parses_calendar_dates() {
    let d: RecordDate = "2024-03-05".parse().unwrap();
    assert_eq!(
      d,
      RecordDate::DateOnly(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
    );
    assert_eq!(d.instant(), Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
  }

  #[test]
  fn parses_timestamps_with_offsets() {
    let d: RecordDate = "2024-03-05T10:00:00+02:00".parse().unwrap();
    assert_eq!(d.instant(), Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
    assert_eq!(d.to_string(), "2024-03-05T08:00:00Z");
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(
      "next tuesday".parse::<RecordDate>(),
      Err(Error::InvalidDate(s)) if s == "next tuesday"
    ));
  }

  #[test]
  fn keeps_wire_shape_through_json() {
    let day: RecordDate = serde_json::from_str("\"2024-01-10\"").unwrap();
    assert_eq!(serde_json::to_string(&day).unwrap(), "\"2024-01-10\"");

    let at: RecordDate =
      serde_json::from_str("\"2024-01-10T00:00:00.000Z\"").unwrap();
    assert!(matches!(at, RecordDate::Instant(_)));
    assert_eq!(at.calendar_date(), day.calendar_date());
  }
}
