//! [`Database`]: the single SQLite handle shared by every table controller.

use std::path::Path;

use bistro_core::{ResultSet, Row, Statement};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info};

use crate::{
  Result,
  encode::{decode_value, encode_value},
  schema::SCHEMA,
};

/// A restaurant database backed by one SQLite file.
///
/// Not `Sync`: the editor runs every query on its UI thread and lends the
/// handle out by shared reference.
pub struct Database {
  conn: Connection,
}

impl Database {
  /// Open (or create) the database file at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    info!(path = %path.display(), "opened database");
    Self::configure(conn)
  }

  /// Open an in-memory database, mostly for tests.
  pub fn open_in_memory() -> Result<Self> { Self::configure(Connection::open_in_memory()?) }

  fn configure(conn: Connection) -> Result<Self> {
    // Dangling references are repaired by the editor, not rejected here.
    conn.pragma_update(None, "foreign_keys", false)?;
    Ok(Self { conn })
  }

  /// Create any missing restaurant tables.
  pub fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    info!("schema initialised");
    Ok(())
  }

  /// User tables in creation order, SQLite bookkeeping tables excluded.
  pub fn table_names(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare(
      "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' ORDER BY rowid",
    )?;
    let names = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
  }

  /// Run a query and collect its column names and rows.
  pub fn query(&self, statement: &Statement) -> Result<ResultSet> {
    debug!(sql = %statement.sql, params = statement.params.len(), "query");
    let mut stmt = self.conn.prepare(&statement.sql)?;
    let head: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let width = head.len();

    let mut rows = stmt.query(params_from_iter(statement.params.iter().map(encode_value)))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
      let cells = (0..width)
        .map(|i| row.get_ref(i).map(decode_value))
        .collect::<rusqlite::Result<Vec<_>>>()?;
      out.push(Row(cells));
    }

    Ok(ResultSet { head, rows: out })
  }

  /// Execute a mutation and return the number of affected rows.
  ///
  /// The connection is in autocommit mode, so the change is committed when
  /// this returns.
  pub fn execute(&self, statement: &Statement) -> Result<usize> {
    debug!(sql = %statement.sql, params = statement.params.len(), "execute");
    let changed = self
      .conn
      .execute(&statement.sql, params_from_iter(statement.params.iter().map(encode_value)))?;
    Ok(changed)
  }

  /// Execute an insert and return the new row's id.
  pub fn insert(&self, statement: &Statement) -> Result<i64> {
    self.execute(statement)?;
    Ok(self.conn.last_insert_rowid())
  }

  /// Execute every statement in one transaction; nothing is committed if any
  /// of them fails.
  pub fn execute_all(&self, statements: &[Statement]) -> Result<usize> {
    let tx = self.conn.unchecked_transaction()?;
    let mut changed = 0;
    for statement in statements {
      debug!(sql = %statement.sql, params = statement.params.len(), "execute (tx)");
      changed += tx.execute(&statement.sql, params_from_iter(statement.params.iter().map(encode_value)))?;
    }
    tx.commit()?;
    Ok(changed)
  }

  /// Close the connection, reporting any error SQLite raises on close.
  pub fn close(self) -> Result<()> {
    self.conn.close().map_err(|(_, e)| e)?;
    info!("closed database");
    Ok(())
  }
}
