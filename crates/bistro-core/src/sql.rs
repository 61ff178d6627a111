//! Parameterized statements and allow-listed identifiers.
//!
//! Values always travel as bound parameters. Table and column names cannot
//! be bound, so they pass through [`Ident`], which only admits plain ASCII
//! identifiers and always renders double-quoted.

use std::fmt;

use crate::{Error, Result, value::Value};

/// A validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
  pub fn new(name: impl Into<String>) -> Result<Self> {
    let name = name.into();
    if is_plain_identifier(&name) {
      Ok(Self(name))
    } else {
      Err(Error::InvalidIdentifier(name))
    }
  }

  /// Registry names are checked by the registry tests rather than at runtime.
  pub(crate) fn from_static(name: &'static str) -> Self { Self(name.to_owned()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Ident {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"{}\"", self.0)
  }
}

fn is_plain_identifier(s: &str) -> bool {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// SQL text plus its positional parameters (`?1`, `?2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl Statement {
  pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
    Self { sql: sql.into(), params }
  }

  pub fn bare(sql: impl Into<String>) -> Self { Self::new(sql, Vec::new()) }
}

/// `?1, ?2, ..., ?n` starting at `first`.
pub(crate) fn placeholders(first: usize, n: usize) -> String {
  (first..first + n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ident_accepts_plain_names() {
    assert_eq!(Ident::new("Dish").unwrap().to_string(), "\"Dish\"");
    assert!(Ident::new("dish_type_id").is_ok());
    assert!(Ident::new("_x1").is_ok());
  }

  #[test]
  fn ident_rejects_everything_else() {
    for bad in ["", "1abc", "Dish; DROP TABLE Unit", "a\"b", "naïve", "a b"] {
      assert!(
        matches!(Ident::new(bad), Err(Error::InvalidIdentifier(_))),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn placeholders_are_numbered() {
    assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
    assert_eq!(placeholders(2, 1), "?2");
    assert_eq!(placeholders(1, 0), "");
  }
}
