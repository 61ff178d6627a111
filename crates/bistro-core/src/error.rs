//! Error types for `bistro-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An identifier outside the allowed `[A-Za-z_][A-Za-z0-9_]*` alphabet.
  #[error("invalid SQL identifier: {0:?}")]
  InvalidIdentifier(String),

  #[error("{entity}: expected {expected} values, got {got}")]
  Arity {
    entity:   &'static str,
    expected: usize,
    got:      usize,
  },

  #[error("{field}: {reason}")]
  InvalidField { field: String, reason: String },

  #[error("{0} is required")]
  MissingField(String),

  #[error("{field}: {value:?} is not one of the offered choices")]
  UnknownChoice { field: String, value: String },

  #[error("update requires a target id")]
  MissingId,
}

impl Error {
  pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
    Error::InvalidField { field: field.to_owned(), reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
