//! [`SqliteStore`], the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chapter_core::{document::Document, store::DocumentStore};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawDocument, encode_body, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A chapter document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection {
    &self.conn
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  async fn list<D: Document>(&self) -> Result<Vec<D>> {
    let collection = D::COLLECTION;

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![collection], |row| {
            Ok(RawDocument {
              id:   row.get(0)?,
              body: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document::<D>).collect()
  }

  async fn get<D: Document>(&self, id: String) -> Result<Option<D>> {
    let collection = D::COLLECTION;

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection, id],
            |row| {
              Ok(RawDocument {
                id:   row.get(0)?,
                body: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDocument::into_document::<D>).transpose()
  }

  async fn insert<D: Document>(&self, draft: D::Draft) -> Result<D> {
    let doc = D::from_draft(Uuid::new_v4().to_string(), draft);

    let id_str     = doc.id().to_owned();
    let collection = D::COLLECTION;
    let body       = encode_body(&doc)?;
    let at_str     = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (id, collection, body, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, collection, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(doc)
  }

  async fn remove<D: Document>(&self, id: String) -> Result<bool> {
    let collection = D::COLLECTION;

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection, id],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
