//! Ledger error types.

use ptaledger_core::{AccountError, IncompleteTransaction};
use std::fmt;
use thiserror::Error;

pub use ptaledger_booking::InterpolationError as BalanceErrorKind;

/// Any failure to turn ledger text into a [`Ledger`](crate::Ledger).
///
/// The first malformed block aborts the parse; no partial ledger is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A header or posting line is malformed.
    #[error(transparent)]
    Syntax(#[from] LedgerSyntaxError),
    /// A transaction does not satisfy the zero-sum rule.
    #[error(transparent)]
    Balance(#[from] LedgerBalanceError),
}

impl LedgerError {
    /// The 1-based line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Syntax(e) => e.line,
            Self::Balance(e) => e.line,
        }
    }

    /// The 1-based column, where one is known.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::Syntax(e) => Some(e.column),
            Self::Balance(_) => None,
        }
    }
}

/// A malformed line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LedgerSyntaxError {
    /// What is wrong.
    pub kind: SyntaxErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column (in characters) within the line.
    pub column: usize,
    /// The offending source line, without its line ending.
    pub text: String,
}

impl LedgerSyntaxError {
    /// Create a new syntax error.
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, line: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            text: text.into(),
        }
    }
}

/// Kinds of syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The block starts with an indented line, or there is no block at all.
    MissingHeader,
    /// The header does not start with a `YYYY-MM-DD` date.
    InvalidHeader(String),
    /// The date is shaped right but is not a calendar date (e.g. `2023-02-30`).
    InvalidDate(String),
    /// The date is not followed by a double-quoted description.
    MissingDescription,
    /// A posting line inside a block has no leading whitespace.
    UnindentedPosting,
    /// The account path is not valid.
    InvalidAccount(AccountError),
    /// The amount token is not `<number><currency>`.
    InvalidAmount(String),
    /// The number has no currency.
    MissingCurrency(String),
    /// The number and the currency are separated by whitespace.
    SpaceBeforeCurrency {
        /// The number as written.
        number: String,
        /// The currency as written.
        currency: String,
    },
    /// Text after the amount.
    UnexpectedText(String),
    /// A transaction needs at least two postings.
    TooFewPostings(usize),
    /// More than one block where a single transaction was expected.
    UnexpectedBlock,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => {
                write!(f, "expected a transaction header `YYYY-MM-DD \"description\"`")
            }
            Self::InvalidHeader(found) => {
                write!(f, "expected a date `YYYY-MM-DD` at the start of the header, found '{found}'")
            }
            Self::InvalidDate(s) => write!(f, "invalid date '{s}'"),
            Self::MissingDescription => {
                write!(f, "expected a double-quoted description after the date")
            }
            Self::UnindentedPosting => {
                write!(f, "posting lines must be indented; separate transactions with a blank line")
            }
            Self::InvalidAccount(e) => write!(f, "invalid account: {e}"),
            Self::InvalidAmount(s) => write!(f, "invalid amount '{s}'"),
            Self::MissingCurrency(s) => write!(f, "amount '{s}' has no currency"),
            Self::SpaceBeforeCurrency { number, currency } => write!(
                f,
                "no whitespace allowed between number and currency: write '{number}{currency}'"
            ),
            Self::UnexpectedText(s) => write!(f, "unexpected text '{s}' after the amount"),
            Self::TooFewPostings(n) => {
                write!(f, "a transaction needs at least two postings, found {n}")
            }
            Self::UnexpectedBlock => write!(f, "expected a single transaction"),
        }
    }
}

/// A transaction that violates the zero-sum rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct LedgerBalanceError {
    /// What is wrong.
    pub kind: BalanceErrorKind,
    /// 1-based line of the transaction header.
    pub line: usize,
    /// The transaction as written.
    pub transaction: IncompleteTransaction,
    /// The source block.
    pub block: String,
}
