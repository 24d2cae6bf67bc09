//! Async HTTP client wrapping the chapter JSON API.

use std::{future::Future, time::Duration};

use anyhow::{Context, Result, anyhow};
use chapter_core::document::Document;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Connection settings for the chapter API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Applied to every request, connect through body.
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:5000".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

// ─── Gateway ──────────────────────────────────────────────────────────────────

/// Why a collection could not be fetched.
///
/// An empty collection is never an error.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("GET {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("GET {url} → {status}")]
  Status { url: String, status: StatusCode },

  #[error("GET {url} returned an unreadable body: {message}")]
  Parse { url: String, message: String },

  #[error("fetch ended without a result")]
  Interrupted,
}

/// Read side of a collection: one round trip, the whole collection, in
/// store order. No retries.
pub trait Gateway<R>: Send + Sync {
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<R>, FetchError>> + Send + '_;
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the chapter JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn collection_url<D: Document>(&self) -> String {
    self.url(&format!("/{}", D::COLLECTION))
  }

  fn transport_error(&self, url: &str, e: &reqwest::Error) -> FetchError {
    let message = if e.is_timeout() {
      format!("timed out after {:?}", self.config.timeout)
    } else if e.is_connect() {
      "could not connect".to_string()
    } else {
      e.to_string()
    };
    FetchError::Transport { url: url.to_owned(), message }
  }

  // ── Write path ────────────────────────────────────────────────────────────

  /// `POST /api/{collection}` returns the stored document with its new id.
  pub async fn create<D: Document>(&self, draft: &D::Draft) -> Result<D> {
    let url = self.collection_url::<D>();
    let resp = self
      .client
      .post(&url)
      .json(draft)
      .send()
      .await
      .with_context(|| format!("POST {url} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST {url} → {}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising created {}", D::NOUN))
  }

  /// `DELETE /api/{collection}/{id}`
  pub async fn delete<D: Document>(&self, id: &str) -> Result<()> {
    let url = format!("{}/{id}", self.collection_url::<D>());
    let resp = self
      .client
      .delete(&url)
      .send()
      .await
      .with_context(|| format!("DELETE {url} failed"))?;

    match resp.status() {
      s if s.is_success() => Ok(()),
      StatusCode::NOT_FOUND => Err(anyhow!("{} {id} not found", D::NOUN)),
      s => Err(anyhow!("DELETE {url} → {s}")),
    }
  }
}

impl<D: Document> Gateway<D> for ApiClient {
  /// `GET /api/{collection}`
  async fn fetch_all(&self) -> Result<Vec<D>, FetchError> {
    let url = self.collection_url::<D>();
    tracing::debug!(%url, "fetching collection");

    let resp = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|e| self.transport_error(&url, &e))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status { url, status });
    }

    let body = resp
      .bytes()
      .await
      .map_err(|e| self.transport_error(&url, &e))?;
    serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
      url,
      message: e.to_string(),
    })
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
