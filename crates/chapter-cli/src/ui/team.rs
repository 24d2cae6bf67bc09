//! Team page.

use chapter_core::record::TeamMember;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span},
};

use super::{dim, draw_cards, draw_empty, draw_unready, heading, pane};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = &app.team;
  let inner = pane(f, area, "Team");

  if draw_unready(f, inner, view.state(), "team members") {
    return;
  }
  if view.records().is_empty() {
    draw_empty(f, inner, "No team members yet.");
    return;
  }

  let cards = view.records().iter().map(card).collect();
  draw_cards(f, inner, cards, app.scroll);
}

fn card(member: &TeamMember) -> Vec<Line<'static>> {
  let mut name = vec![heading(member.name.clone(), Color::Cyan)];
  if member.is_lead {
    name.push(Span::styled("  ★ lead", Style::default().fg(Color::Yellow)));
  }
  let mut lines = vec![Line::from(name)];

  if let Some(role) = &member.role {
    lines.push(Line::from(role.clone()));
  }
  let profiles = [
    ("linkedin", &member.linkedin),
    ("twitter", &member.twitter),
    ("github", &member.github),
  ];
  for (label, url) in profiles {
    if let Some(url) = url {
      lines.push(Line::from(dim(format!("{label:<9}{url}"))));
    }
  }
  lines
}
