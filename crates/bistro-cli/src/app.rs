//! Application state and key dispatch.

use bistro_editor::{Action, Outcome, Presenter, TabCoordinator};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level application state.
pub struct App<'db> {
  /// One tab per entity type.
  pub tabs: TabCoordinator<'db>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl<'db> App<'db> {
  pub fn new(tabs: TabCoordinator<'db>) -> Self { Self { tabs, status_msg: String::new() } }

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent, ui: &mut dyn Presenter) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Char('q') => return false,

      // Tabs
      KeyCode::Tab | KeyCode::Right => self.tabs.next(ui),
      KeyCode::BackTab | KeyCode::Left => self.tabs.prev(ui),
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        self.tabs.activate(index, ui);
      }
      KeyCode::Char('0') => self.tabs.activate(9, ui),

      // Cursor and selection
      KeyCode::Down | KeyCode::Char('j') => self.tabs.active_mut().grid_mut().move_down(),
      KeyCode::Up | KeyCode::Char('k') => self.tabs.active_mut().grid_mut().move_up(),
      KeyCode::Home | KeyCode::Char('g') => self.tabs.active_mut().grid_mut().move_to(0),
      KeyCode::End | KeyCode::Char('G') => {
        let grid = self.tabs.active_mut().grid_mut();
        grid.move_to(grid.len().saturating_sub(1));
      }
      KeyCode::Char(' ') => {
        let grid = self.tabs.active_mut().grid_mut();
        grid.toggle(grid.cursor());
      }
      KeyCode::Esc => self.tabs.active_mut().grid_mut().clear_selection(),

      // Actions
      KeyCode::Char('a') => self.run(Action::Add, ui),
      KeyCode::Char('e') => self.run(Action::Edit, ui),
      KeyCode::Enter => {
        // Like a double click: edit the row under the cursor.
        let grid = self.tabs.active_mut().grid_mut();
        grid.move_to(grid.cursor());
        self.run(Action::Edit, ui);
      }
      KeyCode::Char('d') | KeyCode::Delete => self.run(Action::Delete, ui),
      KeyCode::Char('r') => self.run(Action::Refresh, ui),

      _ => return true,
    }

    if !matches!(key.code, KeyCode::Char('a' | 'e' | 'd' | 'r') | KeyCode::Enter | KeyCode::Delete) {
      self.status_msg.clear();
    }
    true
  }

  fn run(&mut self, action: Action, ui: &mut dyn Presenter) {
    self.status_msg = match self.tabs.dispatch(action, ui) {
      Some(Outcome::Inserted(id)) => format!("Added row {id}"),
      Some(Outcome::Updated(id)) => format!("Saved row {id}"),
      Some(Outcome::Deleted(n)) => format!("Deleted {n} row{}", if n == 1 { "" } else { "s" }),
      Some(Outcome::Unchanged | Outcome::NoSelection) => String::new(),
      None => "Last action failed; see log".into(),
    };
  }
}
