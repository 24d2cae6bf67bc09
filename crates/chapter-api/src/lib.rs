//! JSON REST API for the chapter site.
//!
//! Exposes an axum [`Router`] backed by any
//! [`chapter_core::store::DocumentStore`]. CORS, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", chapter_api::api_router(store.clone()))
//! ```

pub mod documents;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use chapter_core::{
  document::Document,
  record::{Event, News, TeamMember},
  store::DocumentStore,
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    .merge(collection_routes::<S, Event>())
    .merge(collection_routes::<S, News>())
    .merge(collection_routes::<S, TeamMember>())
    .with_state(store)
}

/// The four routes of one collection, mounted at `/{D::COLLECTION}`.
fn collection_routes<S, D>() -> Router<Arc<S>>
where
  S: DocumentStore + 'static,
  D: Document,
{
  let base = format!("/{}", D::COLLECTION);
  Router::new()
    .route(
      &base,
      get(documents::list::<S, D>).post(documents::create::<S, D>),
    )
    .route(
      &format!("{base}/{{id}}"),
      get(documents::get_one::<S, D>).delete(documents::delete_one::<S, D>),
    )
}

// ─── Tests ────────────────────────────────────────────────────────────────────
