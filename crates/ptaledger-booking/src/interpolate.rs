//! Transaction interpolation.
//!
//! Fills in an elided posting amount so the transaction balances.

use ptaledger_core::{Account, Amount, IncompleteTransaction, Posting, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculate_residual;

/// Errors that can occur during interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// Written amounts do not net to zero and nothing absorbs the difference.
    #[error("transaction does not balance: residual {residual}{currency}")]
    Unbalanced {
        /// The first unbalanced currency.
        currency: String,
        /// The sum of that currency's postings.
        residual: Decimal,
    },

    /// More than one posting omits its amount.
    #[error("{count} postings omit their amount; at most one may be elided")]
    MultipleElided {
        /// Number of elided postings.
        count: usize,
    },

    /// The elided posting has nothing to offset.
    #[error("posting to {account} omits its amount but the other postings already balance")]
    NothingToBalance {
        /// The account of the elided posting.
        account: Account,
    },

    /// A sum of amounts in one currency leaves the decimal range.
    #[error("amounts in {currency} exceed the representable range")]
    Overflow {
        /// The overflowing currency.
        currency: String,
    },
}

/// Result of interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationResult {
    /// The balanced transaction.
    pub transaction: Transaction,
    /// Indices into `transaction.postings` of the inferred postings.
    pub filled_indices: Vec<usize>,
}

/// Resolve the elided amount of a transaction and verify it balances.
///
/// # Rules
///
/// - At most one posting may omit its amount.
/// - The elided posting takes the negated residual of the others. When the
///   residual is non-zero in several currencies it expands into one posting
///   per currency, ordered by currency code, in place of the elided one.
/// - Without an elided posting every currency must sum to exactly zero.
/// - A currency whose sum leaves the decimal range is an
///   [`InterpolationError::Overflow`].
///
/// The input is left untouched; a new posting list is built.
///
/// # Example
///
/// ```
/// use ptaledger_booking::interpolate;
/// use ptaledger_core::{Amount, IncompletePosting, IncompleteTransaction, NaiveDate};
/// use rust_decimal_macros::dec;
///
/// let txn = IncompleteTransaction::new(NaiveDate::from_ymd_opt(2023, 8, 9).unwrap(), "Groceries")
///     .with_posting(IncompletePosting::new("Expenses:Food".parse().unwrap(), Amount::new(dec!(110.00), "INR")))
///     .with_posting(IncompletePosting::elided("Assets:Banking:HDFC".parse().unwrap()));
///
/// let result = interpolate(&txn).unwrap();
/// assert_eq!(result.filled_indices, vec![1]);
/// assert_eq!(result.transaction.postings[1].units, Amount::new(dec!(-110.00), "INR"));
/// ```
pub fn interpolate(
    transaction: &IncompleteTransaction,
) -> Result<InterpolationResult, InterpolationError> {
    let residuals = calculate_residual(transaction)?;

    let elided: Vec<usize> = transaction
        .postings
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_elided())
        .map(|(i, _)| i)
        .collect();

    if elided.len() > 1 {
        return Err(InterpolationError::MultipleElided {
            count: elided.len(),
        });
    }

    let unbalanced: Vec<(&String, &Decimal)> =
        residuals.iter().filter(|(_, n)| !n.is_zero()).collect();

    let mut postings = Vec::with_capacity(transaction.postings.len() + unbalanced.len());
    let mut filled_indices = Vec::new();

    for posting in &transaction.postings {
        match &posting.units {
            Some(units) => postings.push(Posting::new(posting.account.clone(), units.clone())),
            None => {
                if unbalanced.is_empty() {
                    return Err(InterpolationError::NothingToBalance {
                        account: posting.account.clone(),
                    });
                }
                for (currency, residual) in &unbalanced {
                    filled_indices.push(postings.len());
                    postings.push(Posting::new(
                        posting.account.clone(),
                        Amount::new(-**residual, currency.as_str()),
                    ));
                }
            }
        }
    }

    if elided.is_empty() {
        if let Some((currency, residual)) = unbalanced.first() {
            return Err(InterpolationError::Unbalanced {
                currency: (*currency).clone(),
                residual: **residual,
            });
        }
    }

    Ok(InterpolationResult {
        transaction: Transaction {
            date: transaction.date,
            description: transaction.description.clone(),
            postings,
        },
        filled_indices,
    })
}
