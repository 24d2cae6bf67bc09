//! HTTP front door for the chapter site.
//!
//! Mounts the JSON API from `chapter-api` under `/api` and wraps it with the
//! CORS policy the browser front end needs plus request tracing.

pub mod settings;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
};
use chapter_core::store::DocumentStore;
use serde::Deserialize;
use thiserror::Error;
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration; see [`settings::load`].
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Browser origins allowed to call the API.
  pub allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid CORS origin {0:?}")]
  InvalidOrigin(String),
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Result<Router, Error>
where
  S: DocumentStore + 'static,
{
  Ok(
    Router::new()
      .nest("/api", chapter_api::api_router(store))
      .layer(cors_layer(&config.allowed_origins)?)
      .layer(TraceLayer::new_for_http()),
  )
}

/// CORS policy: the listed origins only, with credentials.
///
/// Requests that carry no `Origin` header (same-origin, curl) are unaffected.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, Error> {
  let origins = origins
    .iter()
    .map(|o| {
      // A wildcard cannot be combined with credentials.
      if o.trim() == "*" {
        return Err(Error::InvalidOrigin(o.clone()));
      }
      HeaderValue::from_str(o.trim()).map_err(|_| Error::InvalidOrigin(o.clone()))
    })
    .collect::<Result<Vec<_>, _>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
      .allow_headers([header::CONTENT_TYPE])
      .allow_credentials(true),
  )
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
  };
  use chapter_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  const ALLOWED: &str = "http://localhost:5173";

  fn test_config() -> ServerConfig {
    ServerConfig {
      host:            "127.0.0.1".into(),
      port:            0,
      store_path:      ":memory:".into(),
      allowed_origins: vec![ALLOWED.into(), "http://localhost:5000".into()],
    }
  }

  async fn oneshot(req: Request<Body>) -> Response {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    router(store, &test_config())
      .unwrap()
      .oneshot(req)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn api_is_mounted_under_api_prefix() {
    let resp = oneshot(
      Request::get("/api/events").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp =
      oneshot(Request::get("/events").body(Body::empty()).unwrap()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn allowed_origin_gets_cors_headers() {
    let resp = oneshot(
      Request::get("/api/news")
        .header(header::ORIGIN, ALLOWED)
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
      ALLOWED
    );
    assert_eq!(
      resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
      "true"
    );
  }

  #[tokio::test]
  async fn preflight_for_allowed_origin_lists_delete() {
    let resp = oneshot(
      Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/events/abc")
        .header(header::ORIGIN, ALLOWED)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert!(resp.status().is_success());
    let methods = resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
      .to_str()
      .unwrap()
      .to_owned();
    assert!(methods.contains("DELETE"));
  }

  #[tokio::test]
  async fn unknown_origin_gets_no_cors_headers() {
    let resp = oneshot(
      Request::get("/api/events")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert!(
      !resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
  }

  #[test]
  fn wildcard_and_garbage_origins_are_rejected() {
    assert!(matches!(
      cors_layer(&["*".into()]),
      Err(Error::InvalidOrigin(o)) if o == "*"
    ));
    assert!(cors_layer(&["http://bad\norigin".into()]).is_err());
    assert!(cors_layer(&[ALLOWED.into()]).is_ok());
  }
}
