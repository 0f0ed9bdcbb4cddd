//! Amount type representing a decimal number with a currency.
//!
//! An [`Amount`] is the unit of value carried by every posting. Numbers are
//! exact decimals, so `150INR` and `150.00INR` compare equal while each keeps
//! the scale it was written with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// An amount is a quantity paired with a currency.
///
/// # Examples
///
/// ```
/// use ptaledger_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let spent = Amount::new(dec!(260.00), "INR");
/// assert_eq!(spent.to_string(), "260.00INR");
/// assert_eq!((-&spent).number, dec!(-260.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// The decimal quantity
    pub number: Decimal,
    /// The currency code (e.g., "INR", "USD")
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number,
            currency: currency.into(),
        }
    }
}

/// Ledger form: the number immediately followed by the currency.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.currency)
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount {
            number: -self.number,
            currency: self.currency.clone(),
        }
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
