//! Query results.

use std::collections::BTreeMap;

use ptaledger_core::{Account, Balance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The result of executing a query: one row per account, ancestors first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Result rows.
    pub rows: Vec<ReportRow>,
}

/// One account and its non-zero balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Full account path.
    pub account_path: String,
    /// Amount per currency, currencies in string order.
    pub balances: BTreeMap<String, Decimal>,
}

impl ReportRow {
    /// Build a row from a balance, dropping zero currencies.
    ///
    /// Returns `None` if nothing non-zero remains.
    #[must_use]
    pub fn from_balance(account: &Account, balance: &Balance) -> Option<Self> {
        let balances = balance.non_zero().into_map();
        if balances.is_empty() {
            return None;
        }
        Some(Self {
            account_path: account.to_string(),
            balances,
        })
    }

    /// Amount held in `currency`, zero if absent.
    #[must_use]
    pub fn get(&self, currency: &str) -> Decimal {
        self.balances.get(currency).copied().unwrap_or_default()
    }
}

impl Report {
    /// Create a report from rows.
    #[must_use]
    pub const fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, ReportRow> {
        self.rows.iter()
    }

    /// The row for `account_path`, if any.
    #[must_use]
    pub fn row(&self, account_path: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.account_path == account_path)
    }

    /// Account paths in row order.
    pub fn account_paths(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.account_path.as_str())
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ReportRow;
    type IntoIter = std::slice::Iter<'a, ReportRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<ReportRow> for Report {
    fn from_iter<T: IntoIterator<Item = ReportRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
