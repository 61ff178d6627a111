//! SQLite backend for the Bistro editor.
//!
//! [`Database`] owns the single connection the editor uses. It executes the
//! [`Statement`](bistro_core::Statement)s built by entity adapters and knows
//! nothing about entities itself.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::SCHEMA;
pub use store::Database;
