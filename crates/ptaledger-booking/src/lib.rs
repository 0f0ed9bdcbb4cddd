//! Elision resolution and zero-sum validation.
//!
//! This crate provides:
//! - Transaction interpolation (filling in an elided amount)
//! - Residual calculation per currency
//! - Balance verification
//!
//! # Interpolation
//!
//! When exactly one posting leaves its amount out, that amount is the
//! negation of what the other postings sum to.
//!
//! ```text
//! 2023-08-09 "Groceries"
//!     Expenses:Food        110.00INR
//!     Assets:Banking:HDFC              <- amount inferred as -110.00INR
//! ```
//!
//! Arithmetic is exact: there is no tolerance, every currency must sum to
//! precisely zero.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod interpolate;

pub use interpolate::{interpolate, InterpolationError, InterpolationResult};

use ptaledger_core::{IncompleteTransaction, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Calculate the residual (imbalance) of a transaction.
///
/// Returns a map of currency -> sum of the postings that carry an amount.
/// Elided postings contribute nothing. A currency that appears and nets out
/// is present with a zero entry.
///
/// # Errors
///
/// Returns [`InterpolationError::Overflow`] if a currency's sum leaves the
/// decimal range.
pub fn calculate_residual(
    transaction: &IncompleteTransaction,
) -> Result<BTreeMap<String, Decimal>, InterpolationError> {
    let mut residuals: BTreeMap<String, Decimal> = BTreeMap::new();

    for units in transaction.postings.iter().filter_map(|p| p.units.as_ref()) {
        let residual = residuals.entry(units.currency.clone()).or_default();
        *residual = residual
            .checked_add(units.number)
            .ok_or_else(|| InterpolationError::Overflow {
                currency: units.currency.clone(),
            })?;
    }

    Ok(residuals)
}

/// Check that every currency of a transaction sums to exactly zero.
///
/// A currency whose running sum leaves the decimal range counts as
/// unbalanced.
#[must_use]
pub fn is_balanced(transaction: &Transaction) -> bool {
    let mut residuals: BTreeMap<&str, Decimal> = BTreeMap::new();

    for posting in &transaction.postings {
        let residual = residuals.entry(posting.units.currency.as_str()).or_default();
        match residual.checked_add(posting.units.number) {
            Some(sum) => *residual = sum,
            None => return false,
        }
    }

    residuals.values().all(Decimal::is_zero)
}
