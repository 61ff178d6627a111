//! `bistro`: terminal editor for the restaurant database.
//!
//! # Usage
//!
//! ```text
//! bistro --db restaurant_db.sqlite
//! bistro --db new.sqlite --init-schema
//! bistro --config ~/.config/bistro/config.toml
//! ```

mod app;
mod presenter;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use app::App;
use bistro_editor::TabCoordinator;
use bistro_store_sqlite::Database;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use presenter::{Term, TerminalPresenter};
use ratatui::{Terminal, backend::CrosstermBackend, buffer::Buffer};
use settings::{Args, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(&args)?;
  init_tracing(&settings.log_file)?;

  let db = Database::open(&settings.database)
    .with_context(|| format!("failed to open database at {:?}", settings.database))?;
  if settings.init_schema {
    db.init_schema().context("failed to create schema")?;
  }

  let run_result = run(&db);

  // Close regardless of how the session ended.
  let close_result = db.close().context("failed to close database");
  run_result.and(close_result)
}

fn init_tracing(log_file: &Path) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| format!("failed to open log file {}", log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

fn run(db: &Database) -> Result<()> {
  let tabs = TabCoordinator::open(db).context("failed to load tables")?;
  let mut app = App::new(tabs);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(terminal: &mut Term, app: &mut App<'_>) -> Result<()> {
  let backdrop = draw(terminal, app)?;
  app.tabs.report_pending(&mut TerminalPresenter::new(terminal, backdrop));

  loop {
    let backdrop = draw(terminal, app)?;

    match event::read().context("reading event")? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        let mut presenter = TerminalPresenter::new(terminal, backdrop);
        if !app.handle_key(key, &mut presenter) {
          break;
        }
      }
      // Terminal will redraw on next iteration.
      _ => {}
    }
  }

  Ok(())
}

/// Draw one frame and keep a copy for dialogs to render over.
fn draw(terminal: &mut Term, app: &App<'_>) -> Result<Buffer> {
  let frame = terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
  Ok(frame.buffer.clone())
}
