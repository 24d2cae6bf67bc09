//! Handlers shared by every collection.
//!
//! | Method   | Path                 | Notes |
//! |----------|----------------------|-------|
//! | `GET`    | `/{collection}`      | Whole collection, store order |
//! | `GET`    | `/{collection}/{id}` | 404 if not found |
//! | `POST`   | `/{collection}`      | Body: the collection's draft type; returns 201 + stored document |
//! | `DELETE` | `/{collection}/{id}` | 200 + `{"message": ...}`; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chapter_core::{document::Document, store::DocumentStore};
use serde_json::{Value, json};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{collection}`
pub async fn list<S, D>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<D>>, ApiError>
where
  S: DocumentStore,
  D: Document,
{
  let docs = store
    .list::<D>()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(docs))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{collection}/{id}`
pub async fn get_one<S, D>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<D>, ApiError>
where
  S: DocumentStore,
  D: Document,
{
  let doc = store
    .get::<D>(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found::<D>())?;
  Ok(Json(doc))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{collection}` returns 201 with the stored document.
pub async fn create<S, D>(
  State(store): State<Arc<S>>,
  Json(draft): Json<D::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore,
  D: Document,
{
  let doc = store
    .insert::<D>(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(collection = D::COLLECTION, id = doc.id(), "document created");
  Ok((StatusCode::CREATED, Json(doc)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{collection}/{id}`
pub async fn delete_one<S, D>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
  D: Document,
{
  let removed = store
    .remove::<D>(id.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(not_found::<D>());
  }
  tracing::info!(collection = D::COLLECTION, %id, "document deleted");
  Ok(Json(json!({ "message": format!("{} deleted successfully", D::NOUN) })))
}

fn not_found<D: Document>() -> ApiError {
  ApiError::NotFound(format!("{} not found", D::NOUN))
}
