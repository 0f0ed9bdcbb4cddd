//! Transactions and their postings.
//!
//! A ledger block is first read into an [`IncompleteTransaction`], where a
//! posting may leave its amount out. Elision resolution turns it into a
//! [`Transaction`] whose postings all carry an amount and net to zero per
//! currency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::Account;
use crate::amount::Amount;

/// One leg of a balanced transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Posting {
    /// The account for this posting
    pub account: Account,
    /// The units moved into (positive) or out of (negative) the account
    pub units: Amount,
}

impl Posting {
    /// Create a new posting.
    #[must_use]
    pub const fn new(account: Account, units: Amount) -> Self {
        Self { account, units }
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    {}  {}", self.account, self.units)
    }
}

/// A posting as written, whose amount may be elided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncompletePosting {
    /// The account for this posting
    pub account: Account,
    /// The units, or `None` when the amount is left to be inferred
    pub units: Option<Amount>,
}

impl IncompletePosting {
    /// Create a posting with a written amount.
    #[must_use]
    pub const fn new(account: Account, units: Amount) -> Self {
        Self {
            account,
            units: Some(units),
        }
    }

    /// Create a posting whose amount is elided.
    #[must_use]
    pub const fn elided(account: Account) -> Self {
        Self {
            account,
            units: None,
        }
    }

    /// Check if the amount was left out.
    #[must_use]
    pub const fn is_elided(&self) -> bool {
        self.units.is_none()
    }
}

impl From<Posting> for IncompletePosting {
    fn from(posting: Posting) -> Self {
        Self::new(posting.account, posting.units)
    }
}

impl fmt::Display for IncompletePosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    {}", self.account)?;
        if let Some(units) = &self.units {
            write!(f, "  {units}")?;
        }
        Ok(())
    }
}

/// A balanced, dated transaction.
///
/// # Examples
///
/// ```
/// use ptaledger_core::{Amount, Posting, Transaction};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2023, 8, 10).unwrap();
/// let txn = Transaction::new(date, "Groceries")
///     .with_posting(Posting::new("Expenses:Food".parse().unwrap(), Amount::new(dec!(110.00), "INR")))
///     .with_posting(Posting::new("Assets:Cash".parse().unwrap(), Amount::new(dec!(-110.00), "INR")));
/// assert_eq!(txn.postings.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,
    /// Free-form description from the header line
    pub description: String,
    /// Postings, in the order they were written
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Create a transaction without postings.
    #[must_use]
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
            postings: Vec::new(),
        }
    }

    /// Add a posting.
    #[must_use]
    pub fn with_posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Iterate over the accounts this transaction touches, in posting order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.postings.iter().map(|p| &p.account)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, self.date, &self.description)?;
        for posting in &self.postings {
            write!(f, "\n{posting}")?;
        }
        Ok(())
    }
}

/// A transaction as written in the ledger, before elision is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncompleteTransaction {
    /// Transaction date
    pub date: NaiveDate,
    /// Free-form description from the header line
    pub description: String,
    /// Postings as written
    pub postings: Vec<IncompletePosting>,
}

impl IncompleteTransaction {
    /// Create a transaction without postings.
    #[must_use]
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
            postings: Vec::new(),
        }
    }

    /// Add a posting.
    #[must_use]
    pub fn with_posting(mut self, posting: IncompletePosting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Number of postings with an elided amount.
    #[must_use]
    pub fn elided_count(&self) -> usize {
        self.postings.iter().filter(|p| p.is_elided()).count()
    }
}

impl From<Transaction> for IncompleteTransaction {
    fn from(txn: Transaction) -> Self {
        Self {
            date: txn.date,
            description: txn.description,
            postings: txn.postings.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for IncompleteTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, self.date, &self.description)?;
        for posting in &self.postings {
            write!(f, "\n{posting}")?;
        }
        Ok(())
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, date: NaiveDate, description: &str) -> fmt::Result {
    write!(f, "{} \"", date.format("%Y-%m-%d"))?;
    for c in description.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn acct(s: &str) -> Account {
        s.parse().unwrap()
    }

    #[test]
    fn test_transaction_display() {
        let txn = Transaction::new(date(2023, 8, 10), "Lunch \"out\"")
            .with_posting(Posting::new(
                acct("Expenses:Food"),
                Amount::new(dec!(150.00), "INR"),
            ))
            .with_posting(Posting::new(
                acct("Assets:Cash"),
                Amount::new(dec!(-150.00), "INR"),
            ));
        assert_eq!(
            txn.to_string(),
            "2023-08-10 \"Lunch \\\"out\\\"\"\n    Expenses:Food  150.00INR\n    Assets:Cash  -150.00INR"
        );
    }

    #[test]
    fn test_incomplete_display_omits_elided_amount() {
        let txn = IncompleteTransaction::new(date(2023, 8, 10), "Salary")
            .with_posting(IncompletePosting::new(
                acct("Assets:Bank"),
                Amount::new(dec!(1000), "INR"),
            ))
            .with_posting(IncompletePosting::elided(acct("Income:Salary")));
        assert_eq!(
            txn.to_string(),
            "2023-08-10 \"Salary\"\n    Assets:Bank  1000INR\n    Income:Salary"
        );
        assert_eq!(txn.elided_count(), 1);
    }

    #[test]
    fn test_from_complete() {
        let txn = Transaction::new(date(2023, 1, 1), "x").with_posting(Posting::new(
            acct("Assets"),
            Amount::new(dec!(1), "INR"),
        ));
        let incomplete = IncompleteTransaction::from(txn);
        assert_eq!(incomplete.elided_count(), 0);
        assert_eq!(incomplete.postings[0].units, Some(Amount::new(dec!(1), "INR")));
    }
}
