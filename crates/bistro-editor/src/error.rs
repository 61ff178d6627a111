//! Error type for `bistro-editor`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] bistro_core::Error),

  #[error(transparent)]
  Store(#[from] bistro_store_sqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
