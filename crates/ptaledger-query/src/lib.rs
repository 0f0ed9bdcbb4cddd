//! Balance query engine.
//!
//! Queries are short strings embedded in documents:
//!
//! ```text
//! balance Assets:Banking
//! bal from:2023-08-11 to:2023-08-31 Expenses
//! ```
//!
//! A query is one command (`balance`, or `bal`) followed by clauses in any
//! order: `from:YYYY-MM-DD` and `to:YYYY-MM-DD` bound the dates aggregated
//! (inclusive), and a bare account path restricts the report to that account
//! and its descendants. A lowercase `word:value` token other than `from:`
//! or `to:` is read as a clause only when `value` starts with a digit, so
//! `since:2023-08-11` is rejected as an unknown clause while `expenses:food`
//! filters by account. [`parse`] turns the text into a [`Query`];
//! [`Executor`] evaluates it against an account index into a [`Report`].
//!
//! # Example
//!
//! ```
//! use ptaledger_core::AccountIndex;
//! use ptaledger_query::{parse, Executor};
//!
//! let query = parse("balance from:2023-08-11 Expenses").unwrap();
//! let index = AccountIndex::default();
//! let report = Executor::new(&index).execute(&query);
//! assert!(report.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod executor;
pub mod parser;
pub mod report;

pub use ast::{BalanceQuery, DateRange, Query};
pub use error::{
    QueryError, QuerySemanticError, QuerySyntaxError, SemanticErrorKind, SyntaxErrorKind,
};
pub use executor::Executor;
pub use parser::parse;
pub use report::{Report, ReportRow};
