//! TUI rendering: orchestrates all panes.

pub mod dialog;
pub mod grid;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App<'_>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // grid
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_tabs(f, rows[0], app);
  grid::draw(f, rows[1], app.tabs.active());
  draw_status(f, rows[2], app);
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App<'_>) {
  let tabs = Tabs::new(app.tabs.titles())
    .select(app.tabs.active_index())
    .style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD))
    .divider("│");
  f.render_widget(tabs, area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App<'_>) {
  let hints = "a add  e edit  d delete  Space select  r refresh  Tab switch  q quit";
  let status = if app.status_msg.is_empty() { hints.to_owned() } else { app.status_msg.clone() };

  let line = Line::from(vec![
    Span::styled(
      " BISTRO ",
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}
