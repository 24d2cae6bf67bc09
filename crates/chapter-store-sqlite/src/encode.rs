//! Encoding and decoding between documents and the plain-text columns stored
//! in SQLite.
//!
//! The `id` column is authoritative: bodies are stored without an `id` key and
//! it is spliced back in on read. Timestamps are RFC 3339 strings.

use chapter_core::document::Document;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Body ─────────────────────────────────────────────────────────────────────

/// Serialise `doc` to a JSON object string with the `id` key removed.
pub fn encode_body<D: Document>(doc: &D) -> Result<String> {
  let mut value = serde_json::to_value(doc)?;
  let Some(object) = value.as_object_mut() else {
    return Err(Error::Malformed {
      id:     doc.id().to_owned(),
      reason: "document does not serialise to a JSON object",
    });
  };
  object.remove("id");
  Ok(value.to_string())
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub id:   String,
  pub body: String,
}

impl RawDocument {
  pub fn into_document<D: Document>(self) -> Result<D> {
    let mut value: Value = serde_json::from_str(&self.body)?;
    let Some(object) = value.as_object_mut() else {
      return Err(Error::Malformed {
        id:     self.id,
        reason: "stored body is not a JSON object",
      });
    };
    object.insert("id".to_owned(), Value::String(self.id));
    Ok(serde_json::from_value(value)?)
  }
}
