//! View controller: fetch state, date ordering and status partitions for one
//! display session.
//!
//! A session fetches its collection exactly once. The fetch runs on its own
//! task and hands the result back over a oneshot channel; dropping the
//! controller closes the channel, which abandons the request and guarantees
//! a late result is never applied.

use std::{cmp::Ordering, sync::Arc};

use chapter_core::{
  document::{Document, Staged},
  record::EventStatus,
};
use strum::EnumCount;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::client::{FetchError, Gateway};

type FetchResult<R> = Result<Vec<R>, FetchError>;

// ─── State ────────────────────────────────────────────────────────────────────

/// What the rendering surface can observe about a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<R> {
  /// Initial state; the fetch has not settled yet.
  Loading,
  /// The fetched collection, ordered for display. May be empty.
  Ready(Vec<R>),
  /// The fetch failed; carries the error message. Terminal for the session.
  Failed(String),
}

impl<R> ViewState<R> {
  pub fn is_loading(&self) -> bool { matches!(self, Self::Loading) }

  pub fn is_ready(&self) -> bool { matches!(self, Self::Ready(_)) }

  pub fn error(&self) -> Option<&str> {
    match self {
      Self::Failed(message) => Some(message),
      _ => None,
    }
  }
}

// ─── Controller ───────────────────────────────────────────────────────────────

/// Owns one collection snapshot and the active status tab.
pub struct ViewController<R> {
  state:        ViewState<R>,
  /// Index into [`EventStatus`] tab order; always `< EventStatus::COUNT`.
  active_index: usize,
  /// Set by the first `initialize`; later calls are ignored.
  started:      bool,
  pending:      Option<oneshot::Receiver<FetchResult<R>>>,
}

impl<R: Document> Default for ViewController<R> {
  fn default() -> Self { Self::new() }
}

impl<R: Document> ViewController<R> {
  pub fn new() -> Self {
    Self {
      state:        ViewState::Loading,
      active_index: 0,
      started:      false,
      pending:      None,
    }
  }

  pub fn state(&self) -> &ViewState<R> { &self.state }

  /// Whether a fetch is outstanding.
  pub fn is_fetching(&self) -> bool { self.pending.is_some() }

  // ── Fetch lifecycle ───────────────────────────────────────────────────────

  /// Start the session's single fetch on a new task.
  ///
  /// Returns `false`, doing nothing, if the session was already started.
  /// Must be called from within a tokio runtime.
  pub fn initialize<G>(&mut self, gateway: Arc<G>) -> bool
  where
    G: Gateway<R> + 'static,
  {
    if self.started {
      tracing::debug!(collection = R::COLLECTION, "session already started");
      return false;
    }
    self.started = true;

    let (mut tx, rx) = oneshot::channel::<FetchResult<R>>();
    self.pending = Some(rx);

    tokio::spawn(async move {
      let result = tokio::select! {
        biased;
        result = gateway.fetch_all() => result,
        () = tx.closed() => {
          tracing::debug!(collection = R::COLLECTION, "view closed; fetch abandoned");
          return;
        }
      };
      if tx.send(result).is_err() {
        tracing::debug!(collection = R::COLLECTION, "view closed; fetch result discarded");
      }
    });
    true
  }

  /// Apply the fetch result if it has arrived. Never blocks.
  ///
  /// Returns `true` when this call moved the session out of `Loading`.
  pub fn poll(&mut self) -> bool {
    let Some(rx) = self.pending.as_mut() else {
      return false;
    };
    let result = match rx.try_recv() {
      Ok(result) => result,
      Err(TryRecvError::Empty) => return false,
      Err(TryRecvError::Closed) => Err(FetchError::Interrupted),
    };
    self.pending = None;
    self.settle(result);
    true
  }

  /// Wait for the outstanding fetch, if any, and apply it.
  pub async fn settled(&mut self) {
    if let Some(rx) = self.pending.take() {
      let result = rx.await.unwrap_or(Err(FetchError::Interrupted));
      self.settle(result);
    }
  }

  fn settle(&mut self, result: FetchResult<R>) {
    self.state = match result {
      Ok(mut records) => {
        if R::DATE_ORDERED {
          sort_by_date(&mut records);
        }
        tracing::debug!(
          collection = R::COLLECTION,
          count = records.len(),
          "collection loaded"
        );
        ViewState::Ready(records)
      }
      Err(e) => {
        tracing::warn!(collection = R::COLLECTION, error = %e, "fetch failed");
        ViewState::Failed(e.to_string())
      }
    };
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The ordered collection; empty unless `Ready`.
  pub fn records(&self) -> &[R] {
    match &self.state {
      ViewState::Ready(records) => records,
      _ => &[],
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  pub fn active_index(&self) -> usize { self.active_index }

  /// Move the active tab by `delta`. Moves that would leave the tab range
  /// are ignored; there is no wraparound. Returns whether the tab changed.
  pub fn navigate(&mut self, delta: isize) -> bool {
    match self.active_index.checked_add_signed(delta) {
      Some(next) if next < EventStatus::COUNT && next != self.active_index => {
        self.active_index = next;
        true
      }
      _ => false,
    }
  }
}

impl<R: Document + Staged> ViewController<R> {
  /// Records whose recognized status is `status`, in display order. Empty
  /// unless `Ready`.
  pub fn partition(&self, status: EventStatus) -> Vec<&R> {
    let matched: Vec<&R> = self
      .records()
      .iter()
      .filter(|r| r.status() == Some(status))
      .collect();
    tracing::trace!(%status, matched = matched.len(), "partitioned");
    matched
  }

  pub fn active_status(&self) -> EventStatus {
    EventStatus::from_index(self.active_index).unwrap_or_default()
  }

  pub fn active_partition(&self) -> Vec<&R> {
    self.partition(self.active_status())
  }
}

/// Stable ascending sort by date; undated records go last.
fn sort_by_date<R: Document>(records: &mut [R]) {
  records.sort_by(|a, b| match (a.date(), b.date()) {
    (Some(x), Some(y)) => x.cmp(&y),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  });
}

// ─── Tests ────────────────────────────────────────────────────────────────────
