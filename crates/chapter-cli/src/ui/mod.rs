//! TUI rendering: header with page tabs, the current page, status bar.

pub mod events;
pub mod news;
pub mod team;

use chapter_cli::view::ViewState;
use chapter_core::date::RecordDate;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;

use crate::app::{App, Page};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.page {
    Page::Events => events::draw(f, rows[1], app),
    Page::News => news::draw(f, rows[1], app),
    Page::Team => team::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(10), Constraint::Min(0)])
    .split(area);

  let bar = Style::default().bg(Color::DarkGray);
  f.render_widget(
    Paragraph::new(Span::styled(
      " chapter",
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ))
    .style(bar),
    cols[0],
  );

  let titles = Page::iter()
    .enumerate()
    .map(|(i, page)| format!("{} {}", i + 1, page.title()));
  let selected = Page::iter().position(|p| p == app.page).unwrap_or(0);
  f.render_widget(
    Tabs::new(titles)
      .select(selected)
      .style(bar.fg(Color::Gray))
      .highlight_style(
        Style::default()
          .fg(Color::Black)
          .bg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
    cols[1],
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let hints = match app.page {
    Page::Events => "←→/hl status  ↑↓/jk scroll  1-3/Tab page  q quit",
    _ => "↑↓/jk scroll  1-3/Tab page  q quit",
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {} ", app.base_url()),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {hints}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared pieces ────────────────────────────────────────────────────────────

/// Bordered pane with `title`; returns the inner area.
fn pane(f: &mut Frame, area: Rect, title: &str) -> Rect {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  inner
}

/// Render the loading or failure message for `state`.
///
/// Returns `true` if something was drawn, i.e. the state is not `Ready`.
fn draw_unready<R>(f: &mut Frame, area: Rect, state: &ViewState<R>, noun: &str) -> bool {
  let (text, color) = match state {
    ViewState::Ready(_) => return false,
    ViewState::Loading => (format!("Loading {noun}…"), Color::DarkGray),
    ViewState::Failed(e) => (format!("Could not load {noun}: {e}"), Color::Red),
  };
  f.render_widget(
    Paragraph::new(text)
      .style(Style::default().fg(color))
      .wrap(Wrap { trim: true }),
    area,
  );
  true
}

fn draw_empty(f: &mut Frame, area: Rect, text: &str) {
  f.render_widget(
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
    area,
  );
}

/// Render pre-built record cards, skipping the first `scroll` of them.
fn draw_cards(f: &mut Frame, area: Rect, cards: Vec<Vec<Line<'static>>>, scroll: usize) {
  let mut lines = Vec::new();
  for card in cards.into_iter().skip(scroll) {
    lines.extend(card);
    lines.push(Line::default());
  }
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// "March 5, 2024"
fn format_date(date: &RecordDate) -> String {
  date.calendar_date().format("%B %-d, %Y").to_string()
}

fn dim(text: impl Into<String>) -> Span<'static> {
  Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

fn heading(text: impl Into<String>, color: Color) -> Span<'static> {
  Span::styled(
    text.into(),
    Style::default().fg(color).add_modifier(Modifier::BOLD),
  )
}
