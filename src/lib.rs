//! Core library surface for the book catalog application.
//!
//! The catalog and its file-backed store are usable on their own; the `ui`
//! module layers the interactive terminal front-end on top.
pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;

/// Persistence boundary for the flat catalog file.
pub use store::StoreError;

/// Domain types that other layers manipulate.
pub use catalog::{Catalog, CatalogError, LendOutcome};
pub use models::Book;

/// Scoped owner of a catalog that saves on close or drop.
pub use session::CatalogSession;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
