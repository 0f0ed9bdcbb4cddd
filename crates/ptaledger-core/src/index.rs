//! The account index built over a ledger.
//!
//! [`AccountTree`] is the aggregation: for every account path referenced by a
//! posting (and every ancestor of one) it keeps the account's own balance and
//! the rolled-up balance of the account plus all descendants. Both are flat
//! maps keyed by [`Account`], whose segment-wise ordering makes iteration
//! ancestors-first.
//!
//! [`AccountIndex`] owns the transactions, a tree over all of them, and the
//! posting references for each account. It is built once and is read-only.
//!
//! # Examples
//!
//! ```
//! use ptaledger_core::{Account, AccountIndex, Amount, Posting, Transaction};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let acct = |s: &str| s.parse::<Account>().unwrap();
//! let txn = Transaction::new(NaiveDate::from_ymd_opt(2023, 8, 10).unwrap(), "Lunch")
//!     .with_posting(Posting::new(acct("Expenses:Food"), Amount::new(dec!(150), "INR")))
//!     .with_posting(Posting::new(acct("Assets:Bank:HDFC"), Amount::new(dec!(-150), "INR")));
//!
//! let index = AccountIndex::build(vec![txn]);
//! assert_eq!(index.balance(&acct("Assets")).get("INR"), dec!(-150));
//! assert!(index.own_balance(&acct("Assets")).is_empty());
//! ```

use std::collections::BTreeMap;

use crate::account::Account;
use crate::balance::Balance;
use crate::directive::{Posting, Transaction};

/// Own and rolled-up balances for a set of accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountTree {
    own: BTreeMap<Account, Balance>,
    rolled: BTreeMap<Account, Balance>,
}

impl AccountTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            own: BTreeMap::new(),
            rolled: BTreeMap::new(),
        }
    }

    /// Aggregate the postings of `transactions`.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut tree = Self::new();
        for txn in transactions {
            for posting in &txn.postings {
                tree.add_posting(posting);
            }
        }
        tree
    }

    /// Register the posting's account and ancestors and attribute its amount.
    ///
    /// The amount lands in the exact account's own balance and in the
    /// rolled-up balance of the account and every ancestor.
    pub fn add_posting(&mut self, posting: &Posting) {
        for ancestor in posting.account.ancestors() {
            self.own.entry(ancestor.clone()).or_default();
            self.rolled.entry(ancestor).or_default().add(&posting.units);
        }
        self.own
            .entry(posting.account.clone())
            .or_default()
            .add(&posting.units);
    }

    /// Rolled-up balance of `account`; empty if the account is unknown.
    #[must_use]
    pub fn balance(&self, account: &Account) -> Balance {
        self.rolled.get(account).cloned().unwrap_or_default()
    }

    /// Balance of postings made directly to `account`.
    #[must_use]
    pub fn own_balance(&self, account: &Account) -> Balance {
        self.own.get(account).cloned().unwrap_or_default()
    }

    /// True if the account (or a descendant) was posted to.
    #[must_use]
    pub fn contains(&self, account: &Account) -> bool {
        self.rolled.contains_key(account)
    }

    /// All known accounts, ancestors first.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.rolled.keys()
    }

    /// Accounts with their rolled-up balances, ancestors first.
    pub fn balances(&self) -> impl Iterator<Item = (&Account, &Balance)> {
        self.rolled.iter()
    }

    /// `root` and its descendants with rolled-up balances, ancestors first.
    pub fn subtree<'a>(
        &'a self,
        root: &'a Account,
    ) -> impl Iterator<Item = (&'a Account, &'a Balance)> + 'a {
        self.rolled
            .range(root..)
            .take_while(move |(account, _)| root.contains(account))
    }

    /// Immediate children of `account`.
    pub fn children<'a>(&'a self, account: &'a Account) -> impl Iterator<Item = &'a Account> + 'a {
        self.subtree(account)
            .map(|(child, _)| child)
            .filter(move |child| account.is_parent_of(child))
    }

    /// Number of known accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rolled.len()
    }

    /// True if no posting was aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rolled.is_empty()
    }
}

/// The queryable index over a parsed ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountIndex {
    transactions: Vec<Transaction>,
    tree: AccountTree,
    /// `(transaction, posting)` positions per exact account.
    postings: BTreeMap<Account, Vec<(usize, usize)>>,
}

impl AccountIndex {
    /// Build the index over `transactions`, kept in the given order.
    ///
    /// # Panics
    ///
    /// Panics if a balance leaves the decimal range. `ptaledger_parser::parse`
    /// rejects any ledger where that could happen.
    #[must_use]
    pub fn build(transactions: Vec<Transaction>) -> Self {
        let tree = AccountTree::from_transactions(&transactions);
        let mut postings: BTreeMap<Account, Vec<(usize, usize)>> = BTreeMap::new();
        for (t, txn) in transactions.iter().enumerate() {
            for (p, posting) in txn.postings.iter().enumerate() {
                postings
                    .entry(posting.account.clone())
                    .or_default()
                    .push((t, p));
            }
        }
        Self {
            transactions,
            tree,
            postings,
        }
    }

    /// All transactions, in ledger order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The aggregation over every transaction.
    #[must_use]
    pub const fn tree(&self) -> &AccountTree {
        &self.tree
    }

    /// Rolled-up balance of `account`; empty if the account is unknown.
    #[must_use]
    pub fn balance(&self, account: &Account) -> Balance {
        self.tree.balance(account)
    }

    /// Balance of postings made directly to `account`.
    #[must_use]
    pub fn own_balance(&self, account: &Account) -> Balance {
        self.tree.own_balance(account)
    }

    /// Postings made directly to `account`, in ledger order.
    pub fn postings<'a>(
        &'a self,
        account: &Account,
    ) -> impl Iterator<Item = (&'a Transaction, &'a Posting)> + 'a {
        self.postings
            .get(account)
            .into_iter()
            .flatten()
            .map(|&(t, p)| {
                let txn = &self.transactions[t];
                (txn, &txn.postings[p])
            })
    }

    /// All known accounts, ancestors first.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.tree.accounts()
    }

    /// Immediate children of `account`.
    pub fn children<'a>(&'a self, account: &'a Account) -> impl Iterator<Item = &'a Account> + 'a {
        self.tree.children(account)
    }

    /// True if the account (or a descendant) was posted to.
    #[must_use]
    pub fn contains(&self, account: &Account) -> bool {
        self.tree.contains(account)
    }
}

impl From<Vec<Transaction>> for AccountIndex {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self::build(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn acct(s: &str) -> Account {
        s.parse().unwrap()
    }

    fn txn(day: u32, legs: &[(&str, rust_decimal::Decimal)]) -> Transaction {
        legs.iter().fold(
            Transaction::new(NaiveDate::from_ymd_opt(2023, 8, day).unwrap(), "t"),
            |t, (account, number)| {
                t.with_posting(Posting::new(acct(account), Amount::new(*number, "INR")))
            },
        )
    }

    fn sample() -> AccountIndex {
        AccountIndex::build(vec![
            txn(
                8,
                &[
                    ("Assets:Banking:HDFC", dec!(1000.00)),
                    ("Income:Salary", dec!(-1000.00)),
                ],
            ),
            txn(
                9,
                &[
                    ("Expenses:Food", dec!(110.00)),
                    ("Assets:Banking:HDFC", dec!(-110.00)),
                ],
            ),
            txn(
                10,
                &[
                    ("Expenses:Food", dec!(150.00)),
                    ("Assets:Banking:HDFC", dec!(-150.00)),
                    ("Assets:Banking:Axis", dec!(20)),
                    ("Income:Interest", dec!(-20)),
                ],
            ),
        ])
    }

    #[test]
    fn test_balances() {
        let index = sample();
        assert_eq!(
            index.balance(&acct("Assets:Banking:HDFC")).to_string(),
            "740.00INR"
        );
        assert_eq!(
            index.balance(&acct("Expenses:Food")).to_string(),
            "260.00INR"
        );
        assert_eq!(index.balance(&acct("Assets")).get("INR"), dec!(760.00));
        assert!(index.balance(&acct("Liabilities")).is_empty());
    }

    #[test]
    fn test_own_balance_excludes_descendants() {
        let index = sample();
        assert!(index.own_balance(&acct("Assets:Banking")).is_empty());
        assert_eq!(
            index.own_balance(&acct("Assets:Banking:Axis")).get("INR"),
            dec!(20)
        );
    }

    #[test]
    fn test_accounts_order() {
        let index = sample();
        let names: Vec<&str> = index.accounts().map(Account::as_str).collect();
        assert_eq!(
            names,
            [
                "Assets",
                "Assets:Banking",
                "Assets:Banking:Axis",
                "Assets:Banking:HDFC",
                "Expenses",
                "Expenses:Food",
                "Income",
                "Income:Interest",
                "Income:Salary",
            ]
        );
    }

    #[test]
    fn test_children() {
        let index = sample();
        let banking = acct("Assets:Banking");
        let children: Vec<&str> = index.children(&banking).map(Account::as_str).collect();
        assert_eq!(children, ["Assets:Banking:Axis", "Assets:Banking:HDFC"]);

        let assets = acct("Assets");
        let children: Vec<&str> = index.children(&assets).map(Account::as_str).collect();
        assert_eq!(children, ["Assets:Banking"]);
    }

    #[test]
    fn test_postings_in_ledger_order() {
        let index = sample();
        let hdfc = acct("Assets:Banking:HDFC");
        let numbers: Vec<_> = index
            .postings(&hdfc)
            .map(|(_, posting)| posting.units.number)
            .collect();
        assert_eq!(numbers, [dec!(1000.00), dec!(-110.00), dec!(-150.00)]);
        assert_eq!(index.postings(&acct("Assets")).count(), 0);
    }

    #[test]
    fn test_contains() {
        let index = sample();
        assert!(index.contains(&acct("Assets")));
        assert!(index.contains(&acct("Assets:Banking:Axis")));
        assert!(!index.contains(&acct("Liabilities")));
    }

    #[test]
    fn test_empty_index() {
        let index = AccountIndex::build(Vec::new());
        assert!(index.transactions().is_empty());
        assert_eq!(index.accounts().count(), 0);
        assert!(index.balance(&acct("Assets")).is_empty());
    }

    #[test]
    fn test_subtree_stops_at_sibling() {
        let index = sample();
        let banking = acct("Assets:Banking");
        let names: Vec<&str> = index
            .tree()
            .subtree(&banking)
            .map(|(a, _)| a.as_str())
            .collect();
        assert_eq!(
            names,
            ["Assets:Banking", "Assets:Banking:Axis", "Assets:Banking:HDFC"]
        );
    }
}
