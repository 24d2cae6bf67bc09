//! Application state and key dispatch.

use std::sync::Arc;

use chapter_cli::{client::ApiClient, view::ViewController};
use chapter_core::record::{Event, News, TeamMember};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::{EnumCount, EnumIter};

// ─── Page ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount, EnumIter)]
pub enum Page {
  Events,
  News,
  Team,
}

impl Page {
  pub fn title(self) -> &'static str {
    match self {
      Self::Events => "Events",
      Self::News => "News",
      Self::Team => "Team",
    }
  }

  fn index(self) -> usize { self as usize }

  /// Page at `index`, wrapping past the last page.
  fn from_index(index: usize) -> Self {
    match index % Self::COUNT {
      0 => Self::Events,
      1 => Self::News,
      _ => Self::Team,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state: one view controller per page.
pub struct App {
  pub page:   Page,
  pub events: ViewController<Event>,
  pub news:   ViewController<News>,
  pub team:   ViewController<TeamMember>,

  /// First visible record on the current page or tab.
  pub scroll: usize,

  client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      page:   Page::Events,
      events: ViewController::new(),
      news:   ViewController::new(),
      team:   ViewController::new(),
      scroll: 0,
      client: Arc::new(client),
    }
  }

  pub fn base_url(&self) -> &str { self.client.base_url() }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Kick off every page's fetch. Must run inside the tokio runtime.
  pub fn start(&mut self) {
    self.events.initialize(self.client.clone());
    self.news.initialize(self.client.clone());
    self.team.initialize(self.client.clone());
  }

  /// Apply any fetch results that have arrived. Returns whether anything
  /// changed.
  pub fn poll(&mut self) -> bool {
    // No short-circuit: every controller gets polled.
    let events = self.events.poll();
    let news = self.news.poll();
    let team = self.team.poll();
    events || news || team
  }

  /// Number of records listed on the current page (or events tab).
  pub fn visible_len(&self) -> usize {
    match self.page {
      Page::Events => self.events.active_partition().len(),
      Page::News => self.news.records().len(),
      Page::Team => self.team.records().len(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Char('q') => return false,

      // Pages
      KeyCode::Char(c @ '1'..='3') => {
        self.switch_page(Page::from_index(c as usize - '1' as usize));
      }
      KeyCode::Tab => self.switch_page(Page::from_index(self.page.index() + 1)),
      KeyCode::BackTab => {
        self.switch_page(Page::from_index(self.page.index() + Page::COUNT - 1));
      }

      // Status tabs
      KeyCode::Left | KeyCode::Char('h') if self.page == Page::Events => {
        if self.events.navigate(-1) {
          self.scroll = 0;
        }
      }
      KeyCode::Right | KeyCode::Char('l') if self.page == Page::Events => {
        if self.events.navigate(1) {
          self.scroll = 0;
        }
      }

      // Scroll
      KeyCode::Down | KeyCode::Char('j') => {
        if self.scroll + 1 < self.visible_len() {
          self.scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.scroll = self.scroll.saturating_sub(1);
      }

      _ => {}
    }
    true
  }

  fn switch_page(&mut self, page: Page) {
    if page != self.page {
      self.page = page;
      self.scroll = 0;
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chapter_cli::client::ApiConfig;
  use chapter_core::record::EventStatus;
  use crossterm::event::KeyEventKind;

  use super::*;

  fn app() -> App { App::new(ApiClient::new(ApiConfig::default()).unwrap()) }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
  }

  #[test]
  fn q_and_ctrl_c_quit() {
    let mut app = app();
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert!(!app.handle_key(KeyEvent::new(
      KeyCode::Char('c'),
      KeyModifiers::CONTROL
    )));
    assert!(app.handle_key(key(KeyCode::Char('c'))));
  }

  #[test]
  fn number_keys_and_tab_switch_pages() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('2')));
    assert_eq!(app.page, Page::News);
    app.handle_key(key(KeyCode::Char('3')));
    assert_eq!(app.page, Page::Team);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.page, Page::Events);
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.page, Page::Team);
    app.handle_key(key(KeyCode::Char('1')));
    assert_eq!(app.page, Page::Events);
  }

  #[test]
  fn page_index_wraps_in_both_directions() {
    for page in [Page::Events, Page::News, Page::Team] {
      assert_eq!(Page::from_index(page.index()), page);
      assert_eq!(Page::from_index(page.index() + Page::COUNT), page);
    }
    assert_eq!(Page::from_index(Page::Events.index() + Page::COUNT - 1), Page::Team);
  }

  #[test]
  fn arrows_move_status_tab_with_clamping() {
    let mut app = app();
    app.handle_key(key(KeyCode::Left));
    assert_eq!(app.events.active_status(), EventStatus::Upcoming);

    for _ in 0..5 {
      app.handle_key(key(KeyCode::Char('l')));
    }
    assert_eq!(app.events.active_status(), EventStatus::Past);

    app.handle_key(key(KeyCode::Char('h')));
    assert_eq!(app.events.active_status(), EventStatus::Ongoing);
  }

  #[test]
  fn status_keys_do_nothing_off_the_events_page() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('2')));
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.events.active_index(), 0);
  }

  #[test]
  fn scroll_is_bounded_by_an_empty_list() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.scroll, 0);
    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.scroll, 0);
  }

  #[test]
  fn poll_before_start_changes_nothing() {
    let mut app = app();
    assert!(!app.poll());
    assert!(app.events.state().is_loading());
  }
}
