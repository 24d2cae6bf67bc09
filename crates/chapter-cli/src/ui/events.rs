//! Events page: status tabs over the active partition.

use chapter_core::record::{Event, EventStatus};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::Tabs,
};
use strum::IntoEnumIterator;

use super::{dim, draw_cards, draw_empty, draw_unready, format_date, heading, pane};
use crate::app::App;

fn status_color(status: EventStatus) -> Color {
  match status {
    EventStatus::Upcoming => Color::Blue,
    EventStatus::Ongoing => Color::Green,
    EventStatus::Past => Color::Magenta,
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = &app.events;
  let inner = pane(f, area, "Events");

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(2), Constraint::Min(0)])
    .split(inner);

  // Counts only once the collection is in.
  let titles = EventStatus::iter().map(|status| {
    if view.state().is_ready() {
      format!("{} ({})", status.label(), view.partition(status).len())
    } else {
      status.label().to_string()
    }
  });
  let active = view.active_status();
  f.render_widget(
    Tabs::new(titles)
      .select(view.active_index())
      .style(Style::default().fg(Color::Gray))
      .highlight_style(
        Style::default()
          .fg(Color::Black)
          .bg(status_color(active))
          .add_modifier(Modifier::BOLD),
      ),
    rows[0],
  );

  if draw_unready(f, rows[1], view.state(), "events") {
    return;
  }

  let partition = view.active_partition();
  if partition.is_empty() {
    draw_empty(f, rows[1], &format!("No {active} events."));
    return;
  }

  let cards = partition.into_iter().map(|e| card(e, active)).collect();
  draw_cards(f, rows[1], cards, app.scroll);
}

fn card(event: &Event, status: EventStatus) -> Vec<Line<'static>> {
  let title = if event.title.is_empty() { "(untitled)" } else { event.title.as_str() };
  let mut lines = vec![Line::from(heading(title, status_color(status)))];

  if let Some(date) = &event.date {
    lines.push(Line::from(dim(format_date(date))));
  }
  if let Some(description) = &event.description {
    lines.push(Line::from(description.clone()));
  }
  if let Some(link) = &event.link {
    lines.push(Line::from(dim(format!("→ {link}"))));
  }
  lines
}
