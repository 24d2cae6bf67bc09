//! Record types: the documents the site lists.
//!
//! Each record type has a matching draft type accepted by the write path. The
//! store assigns `id` when a draft is inserted; nothing else is computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator};

use crate::{
  date::RecordDate,
  document::{Document, Staged},
};

// ─── Event status ────────────────────────────────────────────────────────────

/// Where an event sits in its lifecycle. Assigned by whoever writes the
/// event; never derived from its date.
///
/// The declaration order is the tab order of the events page.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  EnumCount,
  EnumIter,
  EnumString,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
  #[default]
  Upcoming,
  Ongoing,
  Past,
}

impl EventStatus {
  /// The status at `index` in tab order, if any.
  pub fn from_index(index: usize) -> Option<Self> { Self::iter().nth(index) }

  /// Position in tab order.
  pub fn index(self) -> usize { self as usize }

  /// Capitalised label for headings and badges.
  pub fn label(self) -> &'static str {
    match self {
      Self::Upcoming => "Upcoming",
      Self::Ongoing => "Ongoing",
      Self::Past => "Past",
    }
  }
}

/// A status as read back from the store.
///
/// Anything other than the three known values is kept rather than failing
/// the whole collection; such records belong to no partition. Strings are
/// kept verbatim, while `null` and non-string values become `Malformed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusValue {
  Known(EventStatus),
  Unrecognized(String),
  /// Serialises back as `null`.
  Malformed,
}

impl StatusValue {
  pub fn recognized(&self) -> Option<EventStatus> {
    match self {
      Self::Known(status) => Some(*status),
      Self::Unrecognized(_) | Self::Malformed => None,
    }
  }
}

impl<'de> Deserialize<'de> for StatusValue {
  fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Text(text) => match text.parse() {
        Ok(status) => Self::Known(status),
        Err(_) => Self::Unrecognized(text),
      },
      Raw::Other(_) => Self::Malformed,
    })
  }
}

impl Default for StatusValue {
  fn default() -> Self { Self::Known(EventStatus::default()) }
}

impl From<EventStatus> for StatusValue {
  fn from(status: EventStatus) -> Self { Self::Known(status) }
}

// ─── Event ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  #[serde(alias = "_id")]
  pub id:          String,
  #[serde(default)]
  pub title:       String,
  pub date:        Option<RecordDate>,
  pub description: Option<String>,
  /// Banner image URL.
  pub image:       Option<String>,
  /// External "learn more" link.
  pub link:        Option<String>,
  #[serde(default)]
  pub status:      StatusValue,
}

/// Input to the event write path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
  pub title:       String,
  pub date:        Option<RecordDate>,
  pub description: Option<String>,
  pub image:       Option<String>,
  pub link:        Option<String>,
  #[serde(default)]
  pub status:      EventStatus,
}

impl Document for Event {
  type Draft = NewEvent;

  const COLLECTION: &'static str = "events";
  const DATE_ORDERED: bool = true;
  const NOUN: &'static str = "Event";

  fn id(&self) -> &str { &self.id }

  fn date(&self) -> Option<DateTime<Utc>> {
    self.date.as_ref().map(RecordDate::instant)
  }

  fn from_draft(id: String, draft: NewEvent) -> Self {
    Self {
      id,
      title: draft.title,
      date: draft.date,
      description: draft.description,
      image: draft.image,
      link: draft.link,
      status: draft.status.into(),
    }
  }
}

impl Staged for Event {
  fn status(&self) -> Option<EventStatus> { self.status.recognized() }
}

// ─── News ────────────────────────────────────────────────────────────────────

/// A news item: an announcement, job or internship posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
  #[serde(alias = "_id")]
  pub id:          String,
  #[serde(default)]
  pub title:       String,
  pub description: Option<String>,
  /// Free-form category, e.g. "job" or "internship".
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub company:     Option<String>,
  pub location:    Option<String>,
  /// Shown as-is; news keeps store order.
  pub date:        Option<RecordDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNews {
  pub title:       String,
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub company:     Option<String>,
  pub location:    Option<String>,
  pub date:        Option<RecordDate>,
}

impl Document for News {
  type Draft = NewNews;

  const COLLECTION: &'static str = "news";
  const NOUN: &'static str = "News item";

  fn id(&self) -> &str { &self.id }

  fn from_draft(id: String, draft: NewNews) -> Self {
    Self {
      id,
      title: draft.title,
      description: draft.description,
      kind: draft.kind,
      company: draft.company,
      location: draft.location,
      date: draft.date,
    }
  }
}

// ─── Team member ─────────────────────────────────────────────────────────────

/// A member of the organising team. Carries no date, so collections of team
/// members keep store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
  #[serde(alias = "_id")]
  pub id:       String,
  #[serde(default)]
  pub name:     String,
  pub role:     Option<String>,
  pub image:    Option<String>,
  #[serde(default, alias = "isLead")]
  pub is_lead:  bool,
  pub linkedin: Option<String>,
  pub twitter:  Option<String>,
  pub github:   Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTeamMember {
  pub name:     String,
  pub role:     Option<String>,
  pub image:    Option<String>,
  #[serde(default, alias = "isLead")]
  pub is_lead:  bool,
  pub linkedin: Option<String>,
  pub twitter:  Option<String>,
  pub github:   Option<String>,
}

impl Document for TeamMember {
  type Draft = NewTeamMember;

  const COLLECTION: &'static str = "team-members";
  const NOUN: &'static str = "Team member";

  fn id(&self) -> &str { &self.id }

  fn from_draft(id: String, draft: NewTeamMember) -> Self {
    Self {
      id,
      name: draft.name,
      role: draft.role,
      image: draft.image,
      is_lead: draft.is_lead,
      linkedin: draft.linkedin,
      twitter: draft.twitter,
      github: draft.github,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn status_tab_order_is_upcoming_ongoing_past() {
    let order: Vec<_> = EventStatus::iter().collect();
    assert_eq!(order, [
      EventStatus::Upcoming,
      EventStatus::Ongoing,
      EventStatus::Past
    ]);
    assert_eq!(EventStatus::COUNT, 3);
    assert_eq!(EventStatus::from_index(2), Some(EventStatus::Past));
    assert_eq!(EventStatus::from_index(3), None);
    assert_eq!(EventStatus::Ongoing.index(), 1);
  }

  #[test]
  fn status_parses_from_lowercase() {
    assert_eq!("past".parse::<EventStatus>().unwrap(), EventStatus::Past);
    assert!("archived".parse::<EventStatus>().is_err());
    assert_eq!(EventStatus::Ongoing.to_string(), "ongoing");
  }

  #[test]
  fn unknown_status_is_kept_not_rejected() {
    let event: Event = serde_json::from_value(json!({
      "id": "x", "title": "Old", "status": "archived"
    }))
    .unwrap();
    assert_eq!(event.status, StatusValue::Unrecognized("archived".into()));
    assert_eq!(event.status(), None);
  }

  #[test]
  fn null_and_non_string_statuses_are_malformed_not_errors() {
    let events: Vec<Event> = serde_json::from_value(json!([
      { "id": "a", "status": null },
      { "id": "b", "status": 7 },
      { "id": "c", "status": { "phase": "past" } },
      { "id": "d", "status": "past" }
    ]))
    .unwrap();
    let statuses: Vec<_> = events.iter().map(|e| e.status.clone()).collect();
    assert_eq!(statuses, [
      StatusValue::Malformed,
      StatusValue::Malformed,
      StatusValue::Malformed,
      StatusValue::Known(EventStatus::Past),
    ]);
    assert_eq!(serde_json::to_value(&events[0]).unwrap()["status"], json!(null));
  }

  #[test]
  fn missing_status_reads_as_upcoming() {
    let event: Event =
      serde_json::from_value(json!({ "id": "x", "title": "New" })).unwrap();
    assert_eq!(event.status(), Some(EventStatus::Upcoming));
  }

  #[test]
  fn event_accepts_store_style_ids_and_sparse_fields() {
    let event: Event = serde_json::from_value(json!({
      "_id": "65a1", "date": "2024-01-10", "status": "past"
    }))
    .unwrap();
    assert_eq!(event.id, "65a1");
    assert_eq!(event.title, "");
    assert_eq!(event.status(), Some(EventStatus::Past));
    assert!(event.description.is_none());
  }

  #[test]
  fn news_type_field_round_trips() {
    let news: News = serde_json::from_value(json!({
      "id": "n1", "title": "Hiring", "type": "job", "company": "Acme"
    }))
    .unwrap();
    assert_eq!(news.kind.as_deref(), Some("job"));
    assert_eq!(serde_json::to_value(&news).unwrap()["type"], "job");
  }

  #[test]
  fn team_member_accepts_camel_case_lead_flag() {
    let member: TeamMember = serde_json::from_value(json!({
      "id": "t1", "name": "Ada", "isLead": true
    }))
    .unwrap();
    assert!(member.is_lead);
    assert_eq!(member.date(), None);
  }

  #[test]
  fn draft_becomes_event_with_given_id() {
    let draft = NewEvent {
      title: "Study Jam".into(),
      date: Some("2024-06-01".parse().unwrap()),
      status: EventStatus::Ongoing,
      ..NewEvent::default()
    };
    let event = Event::from_draft("e1".into(), draft);
    assert_eq!(event.id(), "e1");
    assert_eq!(event.status, StatusValue::Known(EventStatus::Ongoing));
    assert!(event.date().is_some());
  }
}
