//! [`TerminalPresenter`]: modal dialogs as nested event loops.
//!
//! Each call takes over the terminal until the user answers, which gives the
//! controllers the blocking semantics they expect.

use std::io;

use bistro_core::FieldSpec;
use bistro_editor::{Presenter, Severity};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, buffer::Buffer};
use tracing::warn;

use crate::ui::dialog::{self, FormEvent, FormState, Tone};

pub type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub struct TerminalPresenter<'t> {
  terminal: &'t mut Term,
  /// The last main-screen frame, shown dimmed behind every dialog.
  backdrop: Buffer,
}

impl<'t> TerminalPresenter<'t> {
  pub fn new(terminal: &'t mut Term, backdrop: Buffer) -> Self { Self { terminal, backdrop } }

  /// Block until a key press arrives. A broken terminal reads as `Esc`.
  fn next_key(&mut self) -> KeyEvent {
    loop {
      match event::read() {
        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return key,
        Ok(_) => {}
        Err(e) => {
          warn!(error = %e, "failed to read terminal event");
          return KeyEvent::from(KeyCode::Esc);
        }
      }
    }
  }

  fn show(&mut self, render: impl Fn(&mut Frame)) {
    let backdrop = &self.backdrop;
    let drawn = self.terminal.draw(|f| {
      dialog::draw_backdrop(f, backdrop);
      render(f);
    });
    if let Err(e) = drawn {
      warn!(error = %e, "failed to draw dialog");
    }
  }

  fn message(&mut self, tone: Tone, title: &str, message: &str) {
    self.show(|f| dialog::draw_message(f, tone, title, message, "Enter/Esc close"));
    loop {
      if matches!(self.next_key().code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        return;
      }
    }
  }
}

impl Presenter for TerminalPresenter<'_> {
  fn info(&mut self, title: &str, message: &str) { self.message(Tone::Info, title, message); }

  fn confirm(&mut self, severity: Severity, title: &str, message: &str) -> bool {
    let tone = match severity {
      Severity::Question => Tone::Question,
      Severity::Warning => Tone::Warning,
    };
    self.show(|f| dialog::draw_message(f, tone, title, message, "[y] Yes  [n] No"));
    loop {
      match self.next_key().code {
        KeyCode::Char('y') | KeyCode::Char('Y') => return true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
        _ => {}
      }
    }
  }

  fn form(&mut self, title: &str, fields: &[FieldSpec]) -> Option<Vec<String>> {
    let mut form = FormState::new(fields);
    loop {
      self.show(|f| dialog::draw_form(f, title, &form));
      match form.handle_key(self.next_key()) {
        FormEvent::Continue => {}
        FormEvent::Submit => return Some(form.into_values()),
        FormEvent::Cancel => return None,
      }
    }
  }

  fn error(&mut self, message: &str) { self.message(Tone::Error, "Error", message); }
}
