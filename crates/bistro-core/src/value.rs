//! Cell values, rows and result sets.
//!
//! These are storage-agnostic; the SQLite crate converts to and from its own
//! value types at the boundary.

use std::fmt;

/// A single cell, as read from or bound into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl Value {
  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  pub fn as_integer(&self) -> Option<i64> {
    match self {
      Value::Integer(i) => Some(*i),
      _ => None,
    }
  }

  /// Text shown in a form field for this value; `Null` is the empty string.
  pub fn to_field_text(&self) -> String {
    match self {
      Value::Null => String::new(),
      other => other.to_string(),
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(r) => write!(f, "{r}"),
      Value::Text(s) => f.write_str(s),
    }
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self { Value::Integer(v) }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self { Value::Real(v) }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self { Value::Text(v.to_owned()) }
}

impl From<String> for Value {
  fn from(v: String) -> Self { Value::Text(v) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

/// One result row. By convention the first cell is the record id.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(pub Vec<Value>);

impl Row {
  pub fn id(&self) -> Option<i64> { self.0.first().and_then(Value::as_integer) }

  /// Every cell after the id.
  pub fn fields(&self) -> &[Value] { self.0.get(1..).unwrap_or_default() }

  pub fn values(&self) -> &[Value] { &self.0 }

  pub fn has_null_at(&self, positions: &[usize]) -> bool {
    positions
      .iter()
      .any(|&p| self.0.get(p).is_none_or(Value::is_null))
  }
}

/// Column names from statement metadata plus the fetched rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
  pub head: Vec<String>,
  pub rows: Vec<Row>,
}

impl ResultSet {
  pub fn ids(&self) -> Vec<i64> { self.rows.iter().filter_map(Row::id).collect() }
}
