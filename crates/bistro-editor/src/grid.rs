//! The state behind one editable grid: header, rows, cursor and selection.

use std::collections::BTreeSet;

use bistro_core::{ResultSet, Row, Value, adapter::heading};

#[derive(Debug, Default)]
pub struct GridView {
  head:     Vec<String>,
  rows:     Vec<Row>,
  cursor:   usize,
  selected: BTreeSet<usize>,
}

impl GridView {
  /// Replace the contents with a fresh result. Selection is cleared; the
  /// cursor stays where it was if the row still exists.
  pub fn load(&mut self, result: ResultSet) {
    self.head = result.head.iter().map(|h| heading(h)).collect();
    self.rows = result.rows;
    self.selected.clear();
    self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
  }

  pub fn head(&self) -> &[String] { &self.head }

  pub fn rows(&self) -> &[Row] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Text shown for a cell. Text values get a capitalized first letter.
  pub fn cell_text(&self, row: usize, col: usize) -> String {
    match self.rows.get(row).and_then(|r| r.values().get(col)) {
      Some(Value::Null) | None => String::new(),
      Some(Value::Text(s)) => capitalize_first(s),
      Some(other) => other.to_string(),
    }
  }

  // ── Cursor ────────────────────────────────────────────────────────────────

  pub fn cursor(&self) -> usize { self.cursor }

  /// Move the cursor and make its row the only selected one.
  pub fn move_to(&mut self, row: usize) {
    if row < self.rows.len() {
      self.cursor = row;
      self.select_only(row);
    }
  }

  pub fn move_down(&mut self) {
    if self.cursor + 1 < self.rows.len() {
      self.move_to(self.cursor + 1);
    }
  }

  pub fn move_up(&mut self) {
    if self.cursor > 0 {
      self.move_to(self.cursor - 1);
    }
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  pub fn select_only(&mut self, row: usize) {
    self.selected.clear();
    if row < self.rows.len() {
      self.selected.insert(row);
    }
  }

  pub fn toggle(&mut self, row: usize) {
    if row < self.rows.len() && !self.selected.remove(&row) {
      self.selected.insert(row);
    }
  }

  pub fn clear_selection(&mut self) { self.selected.clear(); }

  pub fn is_selected(&self, row: usize) -> bool { self.selected.contains(&row) }

  /// Selected rows with their indices, top to bottom.
  pub fn selected_rows(&self) -> Vec<(usize, &Row)> {
    self.selected.iter().filter_map(|&i| self.rows.get(i).map(|r| (i, r))).collect()
  }
}

fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grid() -> GridView {
    let mut grid = GridView::default();
    grid.load(ResultSet {
      head: vec!["id".into(), "main_ingredient".into()],
      rows: vec![
        Row(vec![Value::Integer(1), "beet".into()]),
        Row(vec![Value::Integer(2), Value::Null]),
        Row(vec![Value::Integer(3), "éclair".into()]),
      ],
    });
    grid
  }

  #[test]
  fn load_capitalizes_head_and_text_cells() {
    let grid = grid();
    assert_eq!(grid.head(), ["Id", "Main ingredient"]);
    assert_eq!(grid.cell_text(0, 1), "Beet");
    assert_eq!(grid.cell_text(1, 1), "");
    assert_eq!(grid.cell_text(2, 1), "Éclair");
    assert_eq!(grid.cell_text(0, 0), "1");
  }

  #[test]
  fn moving_selects_the_cursor_row() {
    let mut grid = grid();
    assert!(grid.selected_rows().is_empty());
    grid.move_down();
    grid.move_down();
    grid.move_down();
    assert_eq!(grid.cursor(), 2);
    let selected: Vec<_> = grid.selected_rows().iter().map(|(i, _)| *i).collect();
    assert_eq!(selected, [2]);
  }

  #[test]
  fn toggle_extends_selection() {
    let mut grid = grid();
    grid.move_to(0);
    grid.toggle(2);
    assert_eq!(grid.selected_rows().len(), 2);
    grid.toggle(0);
    assert_eq!(grid.selected_rows()[0].1.id(), Some(3));
  }

  #[test]
  fn reload_clears_selection_and_clamps_cursor() {
    let mut grid = grid();
    grid.move_to(2);
    grid.load(ResultSet { head: vec!["id".into()], rows: vec![Row(vec![Value::Integer(1)])] });
    assert_eq!(grid.cursor(), 0);
    assert!(grid.selected_rows().is_empty());
  }
}
