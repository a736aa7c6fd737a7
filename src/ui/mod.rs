//! Ratatui shell around a single [`Account`](crate::models::Account). The
//! shell owns the account for the life of the session and turns menu choices
//! into account operations, rendering whatever the account reports back.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
