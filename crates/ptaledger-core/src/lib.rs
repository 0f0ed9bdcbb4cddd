//! Core types for ptaledger
//!
//! This crate provides the data model shared by the rest of the workspace:
//!
//! - [`Amount`] - A decimal number with a currency
//! - [`Account`] - A validated, colon-delimited account path
//! - [`Posting`] / [`IncompletePosting`] - One leg of a transaction
//! - [`Transaction`] / [`IncompleteTransaction`] - A dated, described set of postings
//! - [`Balance`] - Per-currency sums
//! - [`AccountIndex`] - Own and rolled-up balances for every account in a ledger
//!
//! # Example
//!
//! ```
//! use ptaledger_core::{Account, AccountIndex, Amount, Posting, Transaction};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let hdfc: Account = "Assets:Banking:HDFC".parse().unwrap();
//! let salary: Account = "Income:Salary".parse().unwrap();
//!
//! let txn = Transaction::new(NaiveDate::from_ymd_opt(2023, 8, 8).unwrap(), "Salary")
//!     .with_posting(Posting::new(hdfc.clone(), Amount::new(dec!(1000.00), "INR")))
//!     .with_posting(Posting::new(salary, Amount::new(dec!(-1000.00), "INR")));
//!
//! let index = AccountIndex::build(vec![txn]);
//! let assets: Account = "Assets".parse().unwrap();
//! assert_eq!(index.balance(&assets).get("INR"), dec!(1000.00));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod amount;
pub mod balance;
pub mod directive;
pub mod index;

pub use account::{Account, AccountError};
pub use amount::Amount;
pub use balance::Balance;
pub use directive::{IncompletePosting, IncompleteTransaction, Posting, Transaction};
pub use index::{AccountIndex, AccountTree};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
