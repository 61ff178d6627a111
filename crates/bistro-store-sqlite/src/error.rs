//! Error type for `bistro-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] bistro_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),
}

impl Error {
  /// The statement referenced a table that does not exist.
  pub fn is_missing_table(&self) -> bool {
    matches!(
      self,
      Error::Database(rusqlite::Error::SqliteFailure(_, Some(msg)))
        if msg.starts_with("no such table")
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
