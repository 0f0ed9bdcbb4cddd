//! Ledger parser using chumsky parser combinators.
//!
//! This crate turns plain-text ledger source into a [`Ledger`] of balanced
//! transactions. The format is line-oriented:
//!
//! ```text
//! 2023-08-10 "Lunch"
//!     Expenses:Food:Lunch  110.00INR
//!     Assets:Banking:HDFC
//! ```
//!
//! - blocks are separated by blank lines;
//! - the first line of a block is `YYYY-MM-DD "description"`;
//! - every other line is an indented account path, optionally followed by an
//!   amount written directly against its currency (`110.00INR`);
//! - at most one posting per transaction may leave its amount out.
//!
//! The first malformed block aborts the parse: either every transaction is
//! returned or none is.
//!
//! For each currency, the absolute amounts across the whole ledger must sum
//! to a representable decimal. Every balance the index or a date-filtered
//! query computes is bounded by that sum, so none of them can overflow. A
//! ledger past the limit fails with [`BalanceErrorKind::Overflow`] at the
//! transaction that crossed it.
//!
//! # Example
//!
//! ```
//! use ptaledger_parser::parse;
//!
//! let source = "\
//! 2023-08-10 \"Lunch\"
//!  Expenses:Food:Lunch 110.00INR
//!  Assets:Banking:HDFC
//! ";
//!
//! let ledger = parse(source).unwrap();
//! assert_eq!(ledger.len(), 1);
//! let index = ledger.into_index();
//! assert_eq!(index.balance(&"Assets".parse().unwrap()).to_string(), "-110.00INR");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod ledger;
pub mod parser;
mod span;

pub use error::{
    BalanceErrorKind, LedgerBalanceError, LedgerError, LedgerSyntaxError, SyntaxErrorKind,
};
pub use ledger::Ledger;
pub use span::{Span, Spanned};

use std::collections::BTreeMap;

use ptaledger_booking::{interpolate, InterpolationError};
use ptaledger_core::{IncompleteTransaction, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

use crate::parser::Block;

/// Parse ledger source text.
///
/// Returns every transaction in source order, or the first error.
pub fn parse(source: &str) -> Result<Ledger, LedgerError> {
    let blocks = parser::blocks(source);
    let mut entries = Vec::with_capacity(blocks.len());
    let mut totals = CurrencyTotals::default();

    for block in &blocks {
        let txn = match parse_entry(source, block, &mut totals) {
            Ok(txn) => txn,
            Err(e) => {
                debug!(line = e.line(), error = %e, "ledger parse failed");
                return Err(e);
            }
        };
        entries.push(Spanned::new(txn, block.span, block.first_line()));
    }

    debug!(transactions = entries.len(), "parsed ledger");
    Ok(Ledger::new(entries))
}

/// Parse source text holding exactly one transaction block.
pub fn parse_transaction(source: &str) -> Result<Transaction, LedgerError> {
    let blocks = parser::blocks(source);
    match blocks.as_slice() {
        [] => Err(LedgerSyntaxError::new(SyntaxErrorKind::MissingHeader, 1, 1, "").into()),
        [block] => parse_entry(source, block, &mut CurrencyTotals::default()),
        [_, extra, ..] => {
            let line = extra.lines[0];
            Err(
                LedgerSyntaxError::new(SyntaxErrorKind::UnexpectedBlock, line.number, 1, line.text)
                    .into(),
            )
        }
    }
}

fn parse_entry(
    source: &str,
    block: &Block<'_>,
    totals: &mut CurrencyTotals,
) -> Result<Transaction, LedgerError> {
    let incomplete = parser::parse_block(block)?;
    Ok(balance(source, block, incomplete, totals)?)
}

fn balance(
    source: &str,
    block: &Block<'_>,
    transaction: IncompleteTransaction,
    totals: &mut CurrencyTotals,
) -> Result<Transaction, LedgerBalanceError> {
    let result = interpolate(&transaction).and_then(|result| {
        totals.record(&result.transaction)?;
        Ok(result.transaction)
    });
    result.map_err(|kind| LedgerBalanceError {
        kind,
        line: block.first_line(),
        transaction,
        block: block.span.text(source).to_string(),
    })
}

/// Per-currency sum of absolute posting amounts seen so far.
#[derive(Debug, Default)]
struct CurrencyTotals(BTreeMap<String, Decimal>);

impl CurrencyTotals {
    fn record(&mut self, transaction: &Transaction) -> Result<(), InterpolationError> {
        for posting in &transaction.postings {
            let units = &posting.units;
            let total = self.0.entry(units.currency.clone()).or_default();
            *total = total
                .checked_add(units.number.abs())
                .ok_or_else(|| InterpolationError::Overflow {
                    currency: units.currency.clone(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptaledger_core::Amount;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_empty() {
        let ledger = parse("").unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.into_index().accounts().count(), 0);
    }

    #[test]
    fn test_parse_records_lines() {
        let source = "\n2023-08-10 \"A\"\n x 1INR\n y\n\n\n2023-08-11 \"B\"\n x 2INR\n y\n";
        let ledger = parse(source).unwrap();
        let lines: Vec<usize> = ledger.iter().map(|e| e.line).collect();
        assert_eq!(lines, [2, 7]);
        assert_eq!(ledger.iter().next().unwrap().span.text(source).lines().count(), 3);
    }

    #[test]
    fn test_parse_fills_elided_posting() {
        let ledger = parse("2023-08-10 \"Lunch\"\n Expenses:Food 110.00INR\n Assets:Cash\n").unwrap();
        let txn = ledger.transactions().next().unwrap();
        assert_eq!(txn.postings[1].units, Amount::new(dec!(-110.00), "INR"));
    }

    #[test]
    fn test_balance_error_keeps_block() {
        let source = "2023-08-10 \"A\"\n x 1INR\n y 1INR\n\n2023-08-11 \"B\"\n x 2INR\n y\n z\n";
        let LedgerError::Balance(err) = parse(source).unwrap_err() else {
            panic!("expected a balance error");
        };
        assert_eq!(err.line, 1);
        assert_eq!(err.block, "2023-08-10 \"A\"\n x 1INR\n y 1INR");
        assert_eq!(
            err.kind,
            BalanceErrorKind::Unbalanced {
                currency: "INR".to_string(),
                residual: dec!(2),
            }
        );
    }

    #[test]
    fn test_first_error_aborts() {
        let source = "2023-08-10 \"A\"\n x 1INR\n y\n\n2023-08-11 B\n x 2INR\n y\n";
        let err = parse(source).unwrap_err();
        assert_eq!(err.line(), 5);
        assert!(matches!(
            err,
            LedgerError::Syntax(LedgerSyntaxError {
                kind: SyntaxErrorKind::MissingDescription,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_transaction() {
        let txn = parse_transaction("2023-08-10 \"A\"\n x 1INR\n y\n").unwrap();
        assert_eq!(txn.postings.len(), 2);

        let err = parse_transaction("  \n").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Syntax(LedgerSyntaxError {
                kind: SyntaxErrorKind::MissingHeader,
                ..
            })
        ));

        let err = parse_transaction("2023-08-10 \"A\"\n x 1INR\n y\n\n2023-08-11 \"B\"\n x 1INR\n y\n")
            .unwrap_err();
        assert_eq!(err.line(), 5);
    }
}
