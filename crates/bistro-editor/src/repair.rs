//! Integrity repair: purge rows whose foreign-key targets have vanished.
//!
//! A NULL in a joined display column means the referenced record was deleted
//! without cascading. Those rows are deleted from the adapter's own table and
//! the display query is run once more. Rows orphaned by this purge in other
//! tables are left for their own next refresh.

use std::collections::BTreeSet;

use bistro_core::{EntityAdapter, ResultSet};
use bistro_store_sqlite::Database;
use tracing::info;

use crate::Result;

#[derive(Debug)]
pub struct Repaired {
  pub result: ResultSet,
  /// Number of orphaned rows deleted.
  pub purged: usize,
}

/// Ids of rows in `result` with a NULL in any joined position.
pub fn orphans(adapter: &impl EntityAdapter, result: &ResultSet) -> BTreeSet<i64> {
  let joined = adapter.joined_positions();
  if joined.is_empty() {
    return BTreeSet::new();
  }
  result
    .rows
    .iter()
    .filter(|row| row.has_null_at(&joined))
    .filter_map(|row| row.id())
    .collect()
}

pub fn repair(db: &Database, adapter: &impl EntityAdapter, result: ResultSet) -> Result<Repaired> {
  let ids = orphans(adapter, &result);
  if ids.is_empty() {
    return Ok(Repaired { result, purged: 0 });
  }

  let purged = db.execute_all(&[adapter.build_delete(&ids)])?;
  info!(
    table = adapter.table_name().as_str(),
    purged,
    ids = ?ids,
    "removed rows with dangling references"
  );

  let result = db.query(&adapter.build_select())?;
  Ok(Repaired { result, purged })
}
