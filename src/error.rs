//! Error types for the account core. Construction failures are hard errors
//! that prevent an [`Account`](crate::models::Account) from existing at all;
//! loan failures are soft and leave the account untouched.

use thiserror::Error;

/// Raised when an account cannot be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Account number must be positive (got {0})")]
    InvalidAccountNumber(i64),
}

/// Reasons an issue or return request was rejected. The `Display` text is the
/// advisory message shown to the patron.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("Maximum number of books ({max}) already issued.")]
    LimitReached { max: usize },
    #[error("Book name cannot be empty.")]
    EmptyTitle,
    #[error("This book is already issued to you.")]
    AlreadyIssued(String),
    #[error("This book is not issued to you.")]
    NotIssued(String),
}
