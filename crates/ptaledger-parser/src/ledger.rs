//! The parsed ledger.

use ptaledger_core::{AccountIndex, Transaction};
use serde::{Deserialize, Serialize};

use crate::span::Spanned;

/// Balanced transactions in source order, each with its source location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<Spanned<Transaction>>,
}

impl Ledger {
    /// Create a ledger from parsed entries.
    #[must_use]
    pub const fn new(entries: Vec<Spanned<Transaction>>) -> Self {
        Self { entries }
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the ledger has no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries with their source locations.
    pub fn iter(&self) -> std::slice::Iter<'_, Spanned<Transaction>> {
        self.entries.iter()
    }

    /// Iterate over the transactions.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().map(Spanned::inner)
    }

    /// Drop the source locations.
    #[must_use]
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.entries.into_iter().map(Spanned::into_inner).collect()
    }

    /// Build the account index over this ledger.
    #[must_use]
    pub fn into_index(self) -> AccountIndex {
        AccountIndex::build(self.into_transactions())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Spanned<Transaction>;
    type IntoIter = std::slice::Iter<'a, Spanned<Transaction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Ledger> for AccountIndex {
    fn from(ledger: Ledger) -> Self {
        ledger.into_index()
    }
}
