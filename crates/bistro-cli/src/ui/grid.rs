//! The data grid of the active tab.

use bistro_editor::TableController;
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Row, Table, TableState},
};

/// Render `controller`'s grid into `area`.
pub fn draw(f: &mut Frame, area: Rect, controller: &TableController<'_>) {
  let grid = controller.grid();
  let selected = grid.selected_rows().len();

  let title = if selected > 0 {
    format!(" {} ({} rows, {selected} selected) ", controller.title(), grid.len())
  } else {
    format!(" {} ({} rows) ", controller.title(), grid.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let header = Row::new(
    std::iter::once(Cell::from(" "))
      .chain(grid.head().iter().map(|h| Cell::from(h.clone()))),
  )
  .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

  let columns = grid.head().len();
  let rows: Vec<Row> = (0..grid.len())
    .map(|r| {
      let mark = if grid.is_selected(r) { "●" } else { " " };
      let style = if grid.is_selected(r) {
        Style::default().fg(Color::Yellow)
      } else {
        Style::default()
      };
      Row::new(
        std::iter::once(Cell::from(mark)).chain((0..columns).map(|c| Cell::from(grid.cell_text(r, c)))),
      )
      .style(style)
    })
    .collect();

  // Narrow marker and id columns; the rest share the remaining width.
  let mut widths = vec![Constraint::Length(1), Constraint::Length(6)];
  widths.extend((1..columns).map(|_| Constraint::Fill(1)));

  let mut state = TableState::default();
  state.select((!grid.is_empty()).then_some(grid.cursor()));

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .block(block)
      .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)),
    area,
    &mut state,
  );
}
