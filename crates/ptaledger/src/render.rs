//! Report rendering.
//!
//! Reports are written either as an aligned text table or as JSON. Errors
//! from a query block are rendered in place of its report.

use std::io::Write;

use anyhow::Result;
use ptaledger_query::{QueryError, Report, ReportRow};
use serde::Serialize;

use crate::config::OutputFormat;

/// The outcome of one query block, as written in JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock<'a> {
    /// 1-based line of the block in its document.
    pub line: usize,
    /// The query text.
    pub query: &'a str,
    /// The report, if the query ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a Report>,
    /// The error, if the query failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorView>,
}

/// A query error in JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorView {
    /// Error message.
    pub message: String,
    /// Byte offset in the query text.
    pub position: usize,
}

impl From<&QueryError> for ErrorView {
    fn from(err: &QueryError) -> Self {
        Self {
            message: err.to_string(),
            position: err.position(),
        }
    }
}

/// Balances of a row as `740.00INR, 10USD`.
#[must_use]
pub fn format_balances(row: &ReportRow) -> String {
    row.balances
        .iter()
        .map(|(currency, number)| format!("{number}{currency}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write `report` in the given format.
pub fn write_report<W: Write>(report: &Report, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, writer),
        OutputFormat::Json => write_json(report, writer),
    }
}

/// Write `report` as a two-column table: account, balances.
pub fn write_text<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let width = report
        .iter()
        .map(|row| row.account_path.chars().count())
        .max()
        .unwrap_or(0);

    for row in report {
        writeln!(
            writer,
            "{:width$}  {}",
            row.account_path,
            format_balances(row),
            width = width
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "{} row(s)", report.len())?;
    Ok(())
}

/// Write `report` as pretty-printed JSON.
pub fn write_json<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

/// Write a failed query block in text form.
pub fn write_query_error<W: Write>(line: usize, err: &QueryError, writer: &mut W) -> Result<()> {
    writeln!(writer, "error: query block at line {line}: {err}")?;
    Ok(())
}
