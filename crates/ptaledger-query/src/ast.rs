//! Query abstract syntax tree.
//!
//! A query is one command plus its clauses. Only the balance command exists
//! today; the enum leaves room for others so the executor can dispatch with
//! an exhaustive `match`.

use std::fmt;

use ptaledger_core::{Account, NaiveDate};

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `balance` / `bal`: balances per account.
    Balance(BalanceQuery),
}

/// A balance query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceQuery {
    /// Restrict the report to this account and its descendants.
    pub account: Option<Account>,
    /// Only aggregate transactions dated within this range.
    pub range: DateRange,
}

impl BalanceQuery {
    /// A query over every account and every date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to `account` and its descendants.
    #[must_use]
    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Restrict to the given date range.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}

/// An inclusive date range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First date included.
    pub from: Option<NaiveDate>,
    /// Last date included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// True if `date` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| from <= date) && self.to.map_or(true, |to| date <= to)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balance(query) => {
                write!(f, "balance")?;
                if let Some(from) = query.range.from {
                    write!(f, " from:{from}")?;
                }
                if let Some(to) = query.range.to {
                    write!(f, " to:{to}")?;
                }
                if let Some(account) = &query.account {
                    write!(f, " {account}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_range_contains_bounds() {
        let range = DateRange::new(Some(date(2023, 8, 10)), Some(date(2023, 8, 11)));
        assert!(range.contains(date(2023, 8, 10)));
        assert!(range.contains(date(2023, 8, 11)));
        assert!(!range.contains(date(2023, 8, 9)));
        assert!(!range.contains(date(2023, 8, 12)));
    }

    #[test]
    fn test_open_range() {
        let range = DateRange::default();
        assert!(range.is_unbounded());
        assert!(range.contains(date(1970, 1, 1)));

        let from = DateRange::new(Some(date(2023, 8, 11)), None);
        assert!(!from.is_unbounded());
        assert!(from.contains(date(2099, 1, 1)));
        assert!(!from.contains(date(2023, 8, 10)));
    }

    #[test]
    fn test_display() {
        let query = Query::Balance(
            BalanceQuery::new()
                .with_account("Assets:Banking".parse().unwrap())
                .with_range(DateRange::new(Some(date(2023, 8, 11)), None)),
        );
        assert_eq!(query.to_string(), "balance from:2023-08-11 Assets:Banking");
        assert_eq!(Query::Balance(BalanceQuery::new()).to_string(), "balance");
    }
}
