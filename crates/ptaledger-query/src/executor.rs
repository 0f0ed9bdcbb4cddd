//! Query executor.
//!
//! Executes parsed queries against an [`AccountIndex`]. Execution is
//! read-only and infallible: every error a query can carry is caught by the
//! parser.

use ptaledger_core::{AccountIndex, AccountTree};
use tracing::debug;

use crate::ast::{BalanceQuery, Query};
use crate::report::{Report, ReportRow};

/// Query executor over a built index.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    index: &'a AccountIndex,
}

impl<'a> Executor<'a> {
    /// Create an executor over `index`.
    #[must_use]
    pub const fn new(index: &'a AccountIndex) -> Self {
        Self { index }
    }

    /// Execute a query, producing a fresh report.
    #[must_use]
    pub fn execute(&self, query: &Query) -> Report {
        let report = match query {
            Query::Balance(balance) => self.execute_balance(balance),
        };
        debug!(%query, rows = report.len(), "executed query");
        report
    }

    fn execute_balance(&self, query: &BalanceQuery) -> Report {
        if query.range.is_unbounded() {
            return rows(self.index.tree(), query);
        }

        let filtered = AccountTree::from_transactions(
            self.index
                .transactions()
                .iter()
                .filter(|txn| query.range.contains(txn.date)),
        );
        rows(&filtered, query)
    }
}

fn rows(tree: &AccountTree, query: &BalanceQuery) -> Report {
    match &query.account {
        Some(root) => tree
            .subtree(root)
            .filter_map(|(account, balance)| ReportRow::from_balance(account, balance))
            .collect(),
        None => tree
            .balances()
            .filter_map(|(account, balance)| ReportRow::from_balance(account, balance))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DateRange;
    use ptaledger_core::{Account, Amount, NaiveDate, Posting, Transaction};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, day).unwrap()
    }

    fn acct(s: &str) -> Account {
        s.parse().unwrap()
    }

    fn txn(day: u32, debit: &str, credit: &str, number: Decimal) -> Transaction {
        Transaction::new(date(day), "t")
            .with_posting(Posting::new(acct(debit), Amount::new(number, "INR")))
            .with_posting(Posting::new(acct(credit), Amount::new(-number, "INR")))
    }

    fn index() -> AccountIndex {
        AccountIndex::build(vec![
            txn(10, "Assets:Banking:HDFC", "Equity:Opening", dec!(1000.00)),
            txn(10, "Expenses:Food:Lunch", "Assets:Banking:HDFC", dec!(110.00)),
            txn(11, "Expenses:Cigg", "Assets:Banking:HDFC", dec!(150)),
            txn(12, "Assets:Cash", "Assets:Banking:HDFC", dec!(0)),
        ])
    }

    fn paths(report: &Report) -> Vec<&str> {
        report.account_paths().collect()
    }

    #[test]
    fn test_all_accounts() {
        let index = index();
        let report = Executor::new(&index).execute(&Query::Balance(BalanceQuery::new()));
        assert_eq!(
            paths(&report),
            [
                "Assets",
                "Assets:Banking",
                "Assets:Banking:HDFC",
                "Equity",
                "Equity:Opening",
                "Expenses",
                "Expenses:Cigg",
                "Expenses:Food",
                "Expenses:Food:Lunch",
            ]
        );
        assert_eq!(report.row("Assets").unwrap().get("INR"), dec!(740.00));
    }

    #[test]
    fn test_zero_accounts_are_dropped() {
        let index = index();
        assert!(index.contains(&acct("Assets:Cash")));
        let report = Executor::new(&index).execute(&Query::Balance(BalanceQuery::new()));
        assert!(report.row("Assets:Cash").is_none());
    }

    #[test]
    fn test_account_filter() {
        let index = index();
        let query = Query::Balance(BalanceQuery::new().with_account(acct("Expenses")));
        let report = Executor::new(&index).execute(&query);
        assert_eq!(
            paths(&report),
            ["Expenses", "Expenses:Cigg", "Expenses:Food", "Expenses:Food:Lunch"]
        );
        assert_eq!(report.row("Expenses").unwrap().get("INR"), dec!(260.00));
    }

    #[test]
    fn test_unknown_account_is_empty() {
        let index = index();
        let query = Query::Balance(BalanceQuery::new().with_account(acct("Income")));
        assert!(Executor::new(&index).execute(&query).is_empty());
    }

    #[test]
    fn test_date_range_recomputes() {
        let index = index();
        let query = Query::Balance(
            BalanceQuery::new().with_range(DateRange::new(Some(date(11)), Some(date(11)))),
        );
        let report = Executor::new(&index).execute(&query);
        assert_eq!(
            paths(&report),
            [
                "Assets",
                "Assets:Banking",
                "Assets:Banking:HDFC",
                "Expenses",
                "Expenses:Cigg",
            ]
        );
        assert_eq!(report.row("Assets").unwrap().get("INR"), dec!(-150));
    }

    #[test]
    fn test_range_and_filter() {
        let index = index();
        let query = Query::Balance(
            BalanceQuery::new()
                .with_account(acct("Expenses:Food"))
                .with_range(DateRange::new(None, Some(date(10)))),
        );
        let report = Executor::new(&index).execute(&query);
        assert_eq!(paths(&report), ["Expenses:Food", "Expenses:Food:Lunch"]);
    }

    #[test]
    fn test_range_outside_ledger() {
        let index = index();
        let query =
            Query::Balance(BalanceQuery::new().with_range(DateRange::new(Some(date(20)), None)));
        assert!(Executor::new(&index).execute(&query).is_empty());
    }

    #[test]
    fn test_execution_is_repeatable() {
        let index = index();
        let executor = Executor::new(&index);
        let query = Query::Balance(BalanceQuery::new());
        assert_eq!(executor.execute(&query), executor.execute(&query));
    }
}
