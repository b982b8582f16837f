//! Ratatui front-end for the book catalog. It is deliberately thin: every
//! change goes through the `Catalog` API and the screen is re-queried after
//! each mutation.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
