//! Per-currency balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use crate::amount::Amount;

/// A per-currency sum of amounts.
///
/// Currencies are kept in natural string order. An entry may be zero (money
/// moved in and back out); use [`Balance::non_zero`] to drop those.
///
/// # Examples
///
/// ```
/// use ptaledger_core::{Amount, Balance};
/// use rust_decimal_macros::dec;
///
/// let mut balance = Balance::new();
/// balance.add(&Amount::new(dec!(1000.00), "INR"));
/// balance.add(&Amount::new(dec!(-260.00), "INR"));
/// assert_eq!(balance.get("INR"), dec!(740.00));
/// assert_eq!(balance.to_string(), "740.00INR");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance {
    amounts: BTreeMap<String, Decimal>,
}

impl Balance {
    /// Create an empty balance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            amounts: BTreeMap::new(),
        }
    }

    /// Add an amount to the entry for its currency.
    pub fn add(&mut self, amount: &Amount) {
        self.add_number(&amount.currency, amount.number);
    }

    /// Add a bare number to the entry for `currency`.
    pub fn add_number(&mut self, currency: &str, number: Decimal) {
        match self.amounts.get_mut(currency) {
            Some(existing) => *existing += number,
            None => {
                self.amounts.insert(currency.to_string(), number);
            }
        }
    }

    /// Add every entry of `other` into this balance.
    pub fn merge(&mut self, other: &Self) {
        for (currency, number) in &other.amounts {
            self.add_number(currency, *number);
        }
    }

    /// The sum for `currency`, zero if it never appeared.
    #[must_use]
    pub fn get(&self, currency: &str) -> Decimal {
        self.amounts.get(currency).copied().unwrap_or(Decimal::ZERO)
    }

    /// True if every entry is zero (including when there are none).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amounts.values().all(Decimal::is_zero)
    }

    /// True if no currency was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// A copy without the zero entries.
    #[must_use]
    pub fn non_zero(&self) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .filter(|(_, n)| !n.is_zero())
                .map(|(c, n)| (c.clone(), *n))
                .collect(),
        }
    }

    /// Iterate over `(currency, number)` in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(c, n)| (c.as_str(), *n))
    }

    /// Iterate over the entries as [`Amount`]s.
    pub fn amounts(&self) -> impl Iterator<Item = Amount> + '_ {
        self.amounts.iter().map(|(c, n)| Amount::new(*n, c.clone()))
    }

    /// The underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, Decimal> {
        &self.amounts
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Decimal> {
        self.amounts
    }
}

impl AddAssign<&Amount> for Balance {
    fn add_assign(&mut self, amount: &Amount) {
        self.add(amount);
    }
}

impl AddAssign<&Self> for Balance {
    fn add_assign(&mut self, other: &Self) {
        self.merge(other);
    }
}

impl<'a> FromIterator<&'a Amount> for Balance {
    fn from_iter<I: IntoIterator<Item = &'a Amount>>(iter: I) -> Self {
        let mut balance = Self::new();
        for amount in iter {
            balance.add(amount);
        }
        balance
    }
}

impl From<BTreeMap<String, Decimal>> for Balance {
    fn from(amounts: BTreeMap<String, Decimal>) -> Self {
        Self { amounts }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (currency, number)) in self.amounts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{number}{currency}")?;
        }
        Ok(())
    }
}
