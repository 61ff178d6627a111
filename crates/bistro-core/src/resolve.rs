//! Maps canonical entity names onto the table names present in a live
//! database.

use tracing::{debug, warn};

use crate::{
  schema::{EntityDescriptor, EntityKind},
  sql::Ident,
};

#[derive(Debug, Clone)]
pub struct ResolvedTable {
  pub descriptor:    &'static EntityDescriptor,
  pub physical_name: Ident,
  /// Whether a live table matched; `false` means the canonical name is used
  /// as a fallback.
  pub present:       bool,
}

/// Resolved tables in registry order. Built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
  tables: Vec<ResolvedTable>,
}

impl Catalog {
  /// Match each descriptor against `live` case-insensitively.
  ///
  /// Descriptors with no match keep their canonical name. Live names that
  /// are not plain identifiers are ignored.
  pub fn resolve(descriptors: &[&'static EntityDescriptor], live: &[String]) -> Self {
    let candidates: Vec<Ident> = live
      .iter()
      .filter_map(|name| match Ident::new(name.as_str()) {
        Ok(ident) => Some(ident),
        Err(_) => {
          warn!(table = %name, "ignoring table with unsupported name");
          None
        }
      })
      .collect();

    let tables = descriptors
      .iter()
      .map(|&descriptor| {
        let found = candidates
          .iter()
          .find(|c| c.as_str().eq_ignore_ascii_case(descriptor.canonical_name));
        match found {
          Some(ident) => {
            debug!(entity = descriptor.canonical_name, table = ident.as_str(), "resolved table");
            ResolvedTable { descriptor, physical_name: ident.clone(), present: true }
          }
          None => {
            warn!(entity = descriptor.canonical_name, "no matching table; using canonical name");
            ResolvedTable {
              descriptor,
              physical_name: canonical_ident(descriptor),
              present: false,
            }
          }
        }
      })
      .collect();

    Self { tables }
  }

  pub fn tables(&self) -> &[ResolvedTable] { &self.tables }

  pub fn get(&self, kind: EntityKind) -> Option<&ResolvedTable> {
    self.tables.iter().find(|t| t.descriptor.kind == kind)
  }

  /// Physical name for `descriptor`, falling back to the canonical name for
  /// entities outside this catalog.
  pub fn physical_name(&self, descriptor: &'static EntityDescriptor) -> Ident {
    self
      .get(descriptor.kind)
      .map(|t| t.physical_name.clone())
      .unwrap_or_else(|| canonical_ident(descriptor))
  }
}

fn canonical_ident(descriptor: &'static EntityDescriptor) -> Ident {
  Ident::from_static(descriptor.canonical_name)
}
