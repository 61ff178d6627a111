//! [`TableController`]: add/edit/delete/refresh for one entity type.

use std::collections::BTreeSet;

use bistro_core::{Adapter, ChoiceSet, EntityAdapter, FieldSpec, ResultSet, Value};
use bistro_store_sqlite::Database;
use tracing::{debug, info, warn};

use crate::{
  Result,
  grid::GridView,
  presenter::{DELETE_WARNING, NO_SELECTION, Presenter, Severity, delete_question},
  repair::repair,
};

/// What a user action did to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Nothing was written (cancelled, declined, or the target vanished).
  Unchanged,
  /// Nothing was attempted because no row was selected.
  NoSelection,
  Inserted(i64),
  Updated(i64),
  /// Rows were deleted; other tables may now hold dangling references.
  Deleted(usize),
}

/// Owns one grid and the adapter for its entity type. Borrows the shared
/// database for its whole life.
pub struct TableController<'db> {
  db:      &'db Database,
  adapter: Adapter,
  grid:    GridView,
}

impl<'db> TableController<'db> {
  pub fn new(db: &'db Database, adapter: Adapter) -> Self {
    Self { db, adapter, grid: GridView::default() }
  }

  pub fn adapter(&self) -> &Adapter { &self.adapter }

  pub fn title(&self) -> &'static str { self.adapter.descriptor().title }

  pub fn grid(&self) -> &GridView { &self.grid }

  pub fn grid_mut(&mut self) -> &mut GridView { &mut self.grid }

  // ── Refresh ───────────────────────────────────────────────────────────────

  /// Re-query the table, purge orphans and reload the grid.
  ///
  /// This is the only place rows are fetched. A missing table shows as an
  /// empty grid. Any other failure also empties the grid before the error is
  /// returned, so rows that could not be checked are never left on screen.
  pub fn refresh(&mut self) -> Result<()> {
    let result = match self.db.query(&self.adapter.build_select()) {
      Ok(result) => repair(self.db, &self.adapter, result).map(|r| r.result),
      Err(e) if e.is_missing_table() => {
        warn!(table = self.adapter.table_name().as_str(), error = %e, "table unavailable");
        Ok(self.empty_result())
      }
      Err(e) => Err(e.into()),
    };
    match result {
      Ok(result) => {
        debug!(table = self.adapter.table_name().as_str(), rows = result.rows.len(), "refreshed");
        self.grid.load(result);
        Ok(())
      }
      Err(e) => {
        self.grid.load(self.empty_result());
        Err(e)
      }
    }
  }

  fn empty_result(&self) -> ResultSet {
    let columns = self.adapter.descriptor().columns;
    let head = std::iter::once("id")
      .chain(columns.iter().map(|c| c.display_name()))
      .map(str::to_owned)
      .collect();
    ResultSet { head, rows: Vec::new() }
  }

  // ── Add ───────────────────────────────────────────────────────────────────

  pub fn add(&mut self, ui: &mut dyn Presenter) -> Result<Outcome> {
    self.grid.clear_selection();
    let fields = self.adapter.dialog_fields(None, &self.choices()?);

    let outcome = match self.collect(ui, "Add item", fields) {
      Some(values) => {
        let id = self.db.insert(&self.adapter.build_insert(&values)?)?;
        info!(table = self.adapter.table_name().as_str(), id, "inserted row");
        Outcome::Inserted(id)
      }
      None => Outcome::Unchanged,
    };

    self.refresh()?;
    Ok(outcome)
  }

  // ── Edit ──────────────────────────────────────────────────────────────────

  /// Edit the first selected row.
  pub fn edit(&mut self, ui: &mut dyn Presenter) -> Result<Outcome> {
    let Some((index, id)) = self.grid.selected_rows().first().and_then(|(i, r)| Some((*i, r.id()?)))
    else {
      ui.info("Information", NO_SELECTION);
      return Ok(Outcome::NoSelection);
    };
    self.grid.select_only(index);

    let record = self.db.query(&self.adapter.build_fetch(id))?;
    let Some(existing) = record.rows.first() else {
      debug!(table = self.adapter.table_name().as_str(), id, "row vanished before edit");
      self.refresh()?;
      return Ok(Outcome::Unchanged);
    };
    let fields = self.adapter.dialog_fields(Some(existing), &self.choices()?);

    let outcome = match self.collect(ui, "Edit item", fields) {
      Some(values) => {
        let mut values = values;
        values.insert(0, Value::Integer(id));
        let changed = self.db.execute(&self.adapter.build_update(&values)?)?;
        if changed == 0 {
          debug!(table = self.adapter.table_name().as_str(), id, "update matched no row");
          Outcome::Unchanged
        } else {
          info!(table = self.adapter.table_name().as_str(), id, "updated row");
          Outcome::Updated(id)
        }
      }
      None => Outcome::Unchanged,
    };

    self.refresh()?;
    Ok(outcome)
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Delete every selected row after two confirmations.
  ///
  /// Does not refresh: deleting may orphan rows in other tables, so the
  /// caller refreshes every controller on [`Outcome::Deleted`].
  pub fn delete(&mut self, ui: &mut dyn Presenter) -> Result<Outcome> {
    let ids: BTreeSet<i64> = self.grid.selected_rows().iter().filter_map(|(_, r)| r.id()).collect();
    if ids.is_empty() {
      ui.info("Information", NO_SELECTION);
      return Ok(Outcome::NoSelection);
    }

    if !ui.confirm(Severity::Question, "Question", &delete_question(ids.len())) {
      return Ok(Outcome::Unchanged);
    }
    if !ui.confirm(Severity::Warning, "Warning", DELETE_WARNING) {
      return Ok(Outcome::Unchanged);
    }

    let removed = self.db.execute(&self.adapter.build_delete(&ids))?;
    info!(table = self.adapter.table_name().as_str(), removed, ids = ?ids, "deleted rows");
    Ok(Outcome::Deleted(removed))
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  /// Show the form until the input validates or the user cancels.
  fn collect(
    &self,
    ui: &mut dyn Presenter,
    title: &str,
    mut fields: Vec<FieldSpec>,
  ) -> Option<Vec<Value>> {
    let title = format!("{title} ({})", self.title());
    loop {
      let raw = ui.form(&title, &fields)?;
      match self.adapter.parse_values(&fields, &raw) {
        Ok(values) => return Some(values),
        Err(e) => {
          ui.error(&e.to_string());
          for (field, text) in fields.iter_mut().zip(raw) {
            field.value = text;
          }
        }
      }
    }
  }

  /// Live choices for every foreign key. A missing target table offers none.
  fn choices(&self) -> Result<ChoiceSet> {
    let mut choices = ChoiceSet::default();
    for (column, stmt) in self.adapter.choice_queries() {
      match self.db.query(&stmt) {
        Ok(result) => choices.insert(column, result),
        Err(e) if e.is_missing_table() => {
          warn!(column, error = %e, "no choices available");
          choices.insert(column, ResultSet::default());
        }
        Err(e) => return Err(e.into()),
      }
    }
    Ok(choices)
  }
}
