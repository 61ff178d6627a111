//! Table-editing controllers for the Bistro editor.
//!
//! One [`TableController`] per entity type turns user actions into adapter
//! statements, runs them against the shared [`Database`](bistro_store_sqlite::Database)
//! and reloads its [`GridView`]. [`TabCoordinator`] owns the controllers in
//! tab order. Anything visual sits behind the [`Presenter`] trait.

pub mod controller;
pub mod error;
pub mod grid;
pub mod presenter;
pub mod repair;
pub mod tabs;

pub use controller::{Outcome, TableController};
pub use error::{Error, Result};
pub use grid::GridView;
pub use presenter::{Presenter, Severity};
pub use tabs::{Action, TabCoordinator};
