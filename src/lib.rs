//! Core library surface for the library account manager.
//!
//! The account model and its borrowing rules live in [`models`]; everything
//! else is plumbing around it: configuration, logging, and the terminal shell
//! the binary runs.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Typed failures raised by the account.
pub use error::{AccountError, LoanError};

/// The account entity, its read-only snapshot, and the loan limit.
pub use models::{Account, AccountSnapshot, MAX_BOOKS};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
