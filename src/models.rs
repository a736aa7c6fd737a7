//! Domain model for a single patron account. The account tracks which titles
//! are out on loan and which have come back, and it is the only place the
//! borrowing rules live: the shell merely forwards requests and renders the
//! outcome. Everything here is in-memory and synchronous.

use std::fmt;

use tracing::{info, warn};

use crate::error::{AccountError, LoanError};

/// Maximum number of titles a patron may hold at once.
pub const MAX_BOOKS: usize = 5;

/// Placeholder shown for identity fields once an account is closed (or was
/// never opened).
pub const CLOSED_SENTINEL: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Identity of the patron behind an open account. The account number is
/// validated on construction so it is always strictly positive here.
struct Patron {
    name: String,
    address: String,
    account_number: i64,
}

/// A library patron account.
///
/// Presence of a patron is modelled explicitly: `holder` is `None` for the
/// default placeholder and after [`Account::close_account`]. The getters still
/// report `"N/A"` and `0` in that state so callers see the familiar sentinels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    holder: Option<Patron>,
    /// Titles currently on loan, in the order they were issued. Never holds
    /// duplicates and never grows past [`MAX_BOOKS`].
    issued: Vec<String>,
    /// Every title ever returned, oldest first. Repeats are expected when a
    /// title goes through several loan cycles.
    returned: Vec<String>,
}

impl Account {
    /// Open an account for a patron.
    ///
    /// Fails with [`AccountError::InvalidAccountNumber`] unless
    /// `account_number` is strictly positive.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        account_number: i64,
    ) -> Result<Self, AccountError> {
        if account_number <= 0 {
            return Err(AccountError::InvalidAccountNumber(account_number));
        }

        Ok(Self {
            holder: Some(Patron {
                name: name.into(),
                address: address.into(),
                account_number,
            }),
            issued: Vec::new(),
            returned: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.holder
            .as_ref()
            .map_or(CLOSED_SENTINEL, |patron| patron.name.as_str())
    }

    pub fn address(&self) -> &str {
        self.holder
            .as_ref()
            .map_or(CLOSED_SENTINEL, |patron| patron.address.as_str())
    }

    /// Account number, or `0` when the account is closed.
    pub fn account_number(&self) -> i64 {
        self.holder
            .as_ref()
            .map_or(0, |patron| patron.account_number)
    }

    /// Number of titles currently on loan. Derived from the issued list so it
    /// can never drift from it.
    pub fn books_issued(&self) -> usize {
        self.issued.len()
    }

    /// Number of entries in the return history.
    pub fn books_returned(&self) -> usize {
        self.returned.len()
    }

    /// Titles on loan in issue order.
    pub fn issued_titles(&self) -> &[String] {
        &self.issued
    }

    /// Return history in the order the returns happened.
    pub fn returned_titles(&self) -> &[String] {
        &self.returned
    }

    /// An account is active when it has a positive number and a real name. A
    /// patron literally named "N/A" therefore reads as inactive.
    pub fn is_active(&self) -> bool {
        self.account_number() > 0 && self.name() != CLOSED_SENTINEL
    }

    /// Check every issue rule and, if all pass, put `title` on loan.
    ///
    /// Rules are evaluated in a fixed order and the first failure wins: the
    /// loan limit, then an empty title, then a duplicate. A rejected request
    /// leaves the account unchanged.
    pub fn try_issue_book(&mut self, title: &str) -> Result<(), LoanError> {
        let outcome = self.check_issue(title);
        match &outcome {
            Ok(()) => {
                self.issued.push(title.to_string());
                info!(title, issued = self.issued.len(), "Successfully issued book");
            }
            Err(err) => warn!(title, %err, "issue rejected"),
        }
        outcome
    }

    /// Boolean form of [`Account::try_issue_book`]; the reason for a rejection
    /// is only reported through the log.
    pub fn issue_book(&mut self, title: &str) -> bool {
        self.try_issue_book(title).is_ok()
    }

    /// Move `title` from the loan list into the return history.
    pub fn try_return_book(&mut self, title: &str) -> Result<(), LoanError> {
        let Some(position) = self.issued.iter().position(|held| held == title) else {
            let err = LoanError::NotIssued(title.to_string());
            warn!(title, %err, "return rejected");
            return Err(err);
        };

        let book = self.issued.remove(position);
        self.returned.push(book);
        info!(
            title,
            issued = self.issued.len(),
            returned = self.returned.len(),
            "Successfully returned book"
        );
        Ok(())
    }

    /// Boolean form of [`Account::try_return_book`].
    pub fn return_book(&mut self, title: &str) -> bool {
        self.try_return_book(title).is_ok()
    }

    /// Reset the account to the closed placeholder, forgetting the patron and
    /// both title lists. The only way back is constructing a new account.
    pub fn close_account(&mut self) {
        let account_number = self.account_number();
        *self = Self::default();
        info!(account_number, "Account closed successfully");
    }

    /// Drop every outstanding loan without recording returns. Identity and
    /// return history are kept.
    pub fn clear_issued_books(&mut self) {
        let cleared = self.issued.len();
        self.issued.clear();
        info!(cleared, "cleared issued books");
    }

    /// Capture a read-only view of the account for presentation.
    pub fn display(&self) -> AccountSnapshot {
        AccountSnapshot {
            name: self.name().to_string(),
            address: self.address().to_string(),
            account_number: self.account_number(),
            books_issued: self.books_issued(),
            books_returned: self.books_returned(),
            issued_titles: sorted(&self.issued),
            returned_titles: sorted(&self.returned),
        }
    }

    fn check_issue(&self, title: &str) -> Result<(), LoanError> {
        if self.issued.len() >= MAX_BOOKS {
            return Err(LoanError::LimitReached { max: MAX_BOOKS });
        }
        if title.is_empty() {
            return Err(LoanError::EmptyTitle);
        }
        if self.issued.iter().any(|held| held == title) {
            return Err(LoanError::AlreadyIssued(title.to_string()));
        }
        Ok(())
    }
}

fn sorted(titles: &[String]) -> Vec<String> {
    let mut titles = titles.to_vec();
    titles.sort();
    titles
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Point-in-time copy of an account. Both title lists are sorted
/// lexicographically, independently of each other, so listings read
/// alphabetically regardless of loan order.
pub struct AccountSnapshot {
    pub name: String,
    pub address: String,
    pub account_number: i64,
    pub books_issued: usize,
    pub books_returned: usize,
    pub issued_titles: Vec<String>,
    pub returned_titles: Vec<String>,
}

impl AccountSnapshot {
    /// Lines of the details block, one entry per rendered row. The shell and
    /// the `Display` impl both build on this so they never disagree.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "----- ACCOUNT DETAILS -----".to_string(),
            format!("Name: {}", self.name),
            format!("Address: {}", self.address),
            format!("Account Number: {}", self.account_number),
            format!("Number of Books Issued: {}", self.books_issued),
            format!("Number of Books Returned: {}", self.books_returned),
        ];
        if !self.issued_titles.is_empty() {
            lines.push(format!(
                "Books Currently Issued: {}",
                self.issued_titles.join(", ")
            ));
        }
        if !self.returned_titles.is_empty() {
            lines.push(format!("Books Returned: {}", self.returned_titles.join(", ")));
        }
        lines
    }
}

impl fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
