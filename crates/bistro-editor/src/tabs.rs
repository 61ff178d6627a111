//! [`TabCoordinator`]: one controller per entity type, in tab order.

use bistro_core::{Adapter, Catalog, REGISTRY};
use bistro_store_sqlite::Database;
use tracing::{error, info};

use crate::{
  Error, Result,
  controller::{Outcome, TableController},
  presenter::Presenter,
};

/// A user action routed to the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Add,
  Edit,
  Delete,
  Refresh,
}

pub struct TabCoordinator<'db> {
  controllers: Vec<TableController<'db>>,
  active:      usize,
  /// Startup failures not yet shown to the user.
  pending:     Vec<Error>,
}

impl<'db> TabCoordinator<'db> {
  /// Resolve the registry against `db`'s tables and build every controller.
  /// Only the first tab is refreshed; the rest load when first shown.
  pub fn open(db: &'db Database) -> Result<Self> {
    let live = db.table_names()?;
    let catalog = Catalog::resolve(&REGISTRY, &live);
    info!(
      tables = live.len(),
      resolved = catalog.tables().iter().filter(|t| t.present).count(),
      "resolved entity tables"
    );
    Ok(Self::with_catalog(db, &catalog))
  }

  /// Build one controller per resolved table. A first tab that fails to
  /// load starts empty; the failure waits in [`report_pending`](Self::report_pending).
  pub fn with_catalog(db: &'db Database, catalog: &Catalog) -> Self {
    let controllers: Vec<_> = Adapter::bind_all(catalog)
      .into_iter()
      .map(|adapter| TableController::new(db, adapter))
      .collect();
    let mut tabs = Self { controllers, active: 0, pending: Vec::new() };
    if let Some(first) = tabs.controllers.first_mut() {
      if let Err(e) = first.refresh() {
        error!(table = first.title(), error = %e, "initial refresh failed");
        tabs.pending.push(e);
      }
    }
    tabs
  }

  /// Show failures that happened before a presenter was available.
  pub fn report_pending(&mut self, ui: &mut dyn Presenter) {
    for e in self.pending.drain(..) {
      ui.error(&e.to_string());
    }
  }

  pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.controllers.iter().map(TableController::title)
  }

  pub fn len(&self) -> usize { self.controllers.len() }

  pub fn is_empty(&self) -> bool { self.controllers.is_empty() }

  pub fn controllers(&self) -> &[TableController<'db>] { &self.controllers }

  pub fn active_index(&self) -> usize { self.active }

  pub fn active(&self) -> &TableController<'db> { &self.controllers[self.active] }

  pub fn active_mut(&mut self) -> &mut TableController<'db> { &mut self.controllers[self.active] }

  // ── Tab switching ─────────────────────────────────────────────────────────

  /// Show tab `index`, refreshing it. Selecting the current tab or an
  /// out-of-range index does nothing.
  pub fn activate(&mut self, index: usize, ui: &mut dyn Presenter) {
    if index == self.active || index >= self.controllers.len() {
      return;
    }
    self.active = index;
    if let Err(e) = self.controllers[index].refresh() {
      report(ui, "refresh failed", &e);
    }
  }

  pub fn next(&mut self, ui: &mut dyn Presenter) {
    if !self.controllers.is_empty() {
      self.activate((self.active + 1) % self.controllers.len(), ui);
    }
  }

  pub fn prev(&mut self, ui: &mut dyn Presenter) {
    let n = self.controllers.len();
    if n > 0 {
      self.activate((self.active + n - 1) % n, ui);
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Run `action` on the active tab. Failures are shown through `ui` and
  /// logged; they never end the session.
  pub fn dispatch(&mut self, action: Action, ui: &mut dyn Presenter) -> Option<Outcome> {
    let controller = &mut self.controllers[self.active];
    let result = match action {
      Action::Add => controller.add(ui),
      Action::Edit => controller.edit(ui),
      Action::Delete => controller.delete(ui),
      Action::Refresh => controller.refresh().map(|()| Outcome::Unchanged),
    };

    match result {
      Ok(Outcome::Deleted(n)) => {
        for e in self.refresh_all() {
          report(ui, "refresh failed", &e);
        }
        Some(Outcome::Deleted(n))
      }
      Ok(outcome) => Some(outcome),
      Err(e) => {
        report(ui, "action failed", &e);
        None
      }
    }
  }

  /// Refresh every tab, visited or not. A failing tab does not stop the
  /// others; every failure is returned.
  pub fn refresh_all(&mut self) -> Vec<Error> {
    self.controllers.iter_mut().filter_map(|c| c.refresh().err()).collect()
  }
}

fn report(ui: &mut dyn Presenter, what: &str, e: &Error) {
  error!(error = %e, "{what}");
  ui.error(&e.to_string());
}
