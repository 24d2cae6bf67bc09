//! The `DocumentStore` trait.
//!
//! Implemented by storage backends (e.g. `chapter-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::document::Document;

/// Abstraction over a chapter document store backend.
///
/// Collections are isolated: an id from one collection is never visible
/// through another. There is no update; writes are whole-document inserts
/// and deletes, last write wins.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every document in `D`'s collection, in insertion order.
  fn list<D: Document>(
    &self,
  ) -> impl Future<Output = Result<Vec<D>, Self::Error>> + Send + '_;

  /// A single document by id. Returns `None` if not found.
  fn get<D: Document>(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<D>, Self::Error>> + Send + '_;

  /// Persist a new document built from `draft` under a fresh id.
  fn insert<D: Document>(
    &self,
    draft: D::Draft,
  ) -> impl Future<Output = Result<D, Self::Error>> + Send + '_;

  /// Delete a document by id. Returns `false` if nothing matched.
  fn remove<D: Document>(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
