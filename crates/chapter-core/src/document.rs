//! The [`Document`] trait binds a record type to the collection it lives in.
//!
//! Stores, the HTTP API and the client are all generic over it, so the three
//! collections share one implementation of every operation.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::record::EventStatus;

/// A record type stored as a JSON document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  /// Write-path input; everything except the store-assigned id.
  type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;

  /// Collection name; also the URL path segment (`/api/{COLLECTION}`).
  const COLLECTION: &'static str;

  /// Human noun used in API messages, e.g. "News item".
  const NOUN: &'static str;

  /// Whether views order this collection by [`Document::date`]. Types with
  /// no date keep store order.
  const DATE_ORDERED: bool = false;

  fn id(&self) -> &str;

  fn date(&self) -> Option<DateTime<Utc>> { None }

  /// Build the stored document once the store has picked an id.
  fn from_draft(id: String, draft: Self::Draft) -> Self;
}

/// A record that belongs to at most one status partition.
pub trait Staged {
  /// `None` when the stored status is not one of the known values.
  fn status(&self) -> Option<EventStatus>;
}
