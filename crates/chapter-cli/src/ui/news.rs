//! News page.

use chapter_core::record::News;
use ratatui::{Frame, layout::Rect, style::Color, text::{Line, Span}};

use super::{dim, draw_cards, draw_empty, draw_unready, format_date, heading, pane};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = &app.news;
  let inner = pane(f, area, "News");

  if draw_unready(f, inner, view.state(), "news") {
    return;
  }
  if view.records().is_empty() {
    draw_empty(f, inner, "No news yet.");
    return;
  }

  let cards = view.records().iter().map(card).collect();
  draw_cards(f, inner, cards, app.scroll);
}

fn card(item: &News) -> Vec<Line<'static>> {
  let mut title = vec![heading(item.title.clone(), Color::Yellow)];
  if let Some(kind) = &item.kind {
    title.push(dim(format!("  [{kind}]")));
  }
  let mut lines = vec![Line::from(title)];

  // "Acme · Remote · March 5, 2024", skipping whatever is missing.
  let meta: Vec<String> = [
    item.company.clone(),
    item.location.clone(),
    item.date.as_ref().map(format_date),
  ]
  .into_iter()
  .flatten()
  .collect();
  if !meta.is_empty() {
    lines.push(Line::from(dim(meta.join(" · "))));
  }
  if let Some(description) = &item.description {
    lines.push(Line::from(Span::raw(description.clone())));
  }
  lines
}
