//! Error type for `chapter-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored body that is not a JSON object, or a document that does not
  /// serialise to one.
  #[error("document {id} is malformed: {reason}")]
  Malformed { id: String, reason: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
