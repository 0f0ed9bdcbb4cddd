//! Hierarchical account paths.
//!
//! An [`Account`] is a colon-delimited path such as `Assets:Banking:HDFC`.
//! Accounts are never declared; they exist because a posting names them or
//! one of their descendants.
//!
//! Ordering is segment-wise, so sorting a set of accounts puts every ancestor
//! directly before its descendants and orders siblings lexicographically:
//!
//! ```
//! use ptaledger_core::Account;
//!
//! let mut accounts: Vec<Account> = ["Assets:Banking-Old", "Assets:Banking:HDFC", "Assets"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! accounts.sort();
//! let names: Vec<&str> = accounts.iter().map(Account::as_str).collect();
//! assert_eq!(names, ["Assets", "Assets:Banking:HDFC", "Assets:Banking-Old"]);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between account path segments.
pub const SEPARATOR: char = ':';

/// Reasons an account path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The path was empty.
    #[error("account path is empty")]
    Empty,
    /// A segment between separators was empty (e.g. `Assets::Bank`).
    #[error("account path `{0}` has an empty segment")]
    EmptySegment(String),
    /// A segment contained whitespace.
    #[error("account path `{0}` contains whitespace")]
    Whitespace(String),
}

/// A validated, colon-delimited account path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Account(String);

impl Account {
    /// Validate and create an account path.
    pub fn new(path: impl Into<String>) -> Result<Self, AccountError> {
        let path = path.into();
        if path.is_empty() {
            return Err(AccountError::Empty);
        }
        if path.chars().any(char::is_whitespace) {
            return Err(AccountError::Whitespace(path));
        }
        if path.split(SEPARATOR).any(str::is_empty) {
            return Err(AccountError::EmptySegment(path));
        }
        Ok(Self(path))
    }

    /// The full path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(SEPARATOR)
    }

    /// Number of segments (`Assets` is 1, `Assets:Banking` is 2).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The last segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// The immediate parent, or `None` for a top-level account.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(SEPARATOR)
            .map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Every ancestor and the account itself, root first, self last.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        self.0
            .match_indices(SEPARATOR)
            .map(|(idx, _)| Self(self.0[..idx].to_string()))
            .chain(std::iter::once(self.clone()))
            .collect()
    }

    /// True if `other` is this account or one of its descendants.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.0.len() >= self.0.len()
            && other.0.starts_with(&self.0)
            && (other.0.len() == self.0.len()
                || other.0[self.0.len()..].starts_with(SEPARATOR))
    }

    /// True if this account is the immediate parent of `other`.
    #[must_use]
    pub fn is_parent_of(&self, other: &Self) -> bool {
        other.depth() == self.depth() + 1 && self.contains(other)
    }
}

impl Ord for Account {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PartialOrd for Account {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Account {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Account {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Account> for String {
    fn from(account: Account) -> Self {
        account.0
    }
}

impl AsRef<str> for Account {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
