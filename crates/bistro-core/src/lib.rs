//! Core types for the Bistro restaurant database editor.
//!
//! Holds the static entity registry, the table-name resolver and the
//! per-entity SQL adapters. Nothing here touches a database: adapters only
//! build [`Statement`](sql::Statement)s, and executing them is the caller's
//! job.

pub mod adapter;
pub mod entities;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod sql;
pub mod value;

pub use adapter::{Adapter, ChoiceSet, EntityAdapter, FieldSpec};
pub use error::{Error, Result};
pub use resolve::{Catalog, ResolvedTable};
pub use schema::{EntityDescriptor, EntityKind, REGISTRY};
pub use sql::{Ident, Statement};
pub use value::{ResultSet, Row, Value};

#[cfg(test)]
mod tests;
