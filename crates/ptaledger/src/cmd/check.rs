//! pta-check - Validate a ledger.
//!
//! Parses the ledger, resolves elided amounts and checks that every
//! transaction balances. Prints a one-line summary on success, or the first
//! error with its location.
//!
//! # Usage
//!
//! ```bash
//! pta-check Ledger.md
//! pta-check -f json Ledger.md
//! PTA_LEDGER=~/notes/Ledger.md pta-check
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use ptaledger_parser::{parse, LedgerError};
use serde::Serialize;
use tracing::info;

use crate::cmd::read_file;
use crate::config::{Config, LedgerArgs, OutputFormat};
use crate::logging;

/// Validate a ledger file.
#[derive(Parser, Debug)]
#[command(name = "pta-check")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The ledger file to check (overrides --ledger)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: LedgerArgs,
}

impl Args {
    /// Resolve the arguments into a configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        let config = Config::from_args(&self.common);
        match &self.file {
            Some(file) => config.with_ledger(file),
            None => config,
        }
    }
}

/// Summary of a valid ledger.
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    /// Number of transactions.
    pub transactions: usize,
    /// Number of accounts, including implied parents.
    pub accounts: usize,
}

/// A diagnostic message in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Source file path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based), for syntax errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Error message
    pub message: String,
    /// The offending line or transaction block
    pub context: String,
}

/// JSON output structure for a failed check.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// List of diagnostics
    pub diagnostics: Vec<JsonDiagnostic>,
    /// Total error count
    pub error_count: usize,
}

impl JsonDiagnostic {
    fn new(path: &Path, err: &LedgerError) -> Self {
        let (message, context) = match err {
            LedgerError::Syntax(e) => (e.kind.to_string(), e.text.clone()),
            LedgerError::Balance(e) => (e.kind.to_string(), e.block.clone()),
        };
        Self {
            file: path.display().to_string(),
            line: err.line(),
            column: err.column(),
            message,
            context,
        }
    }
}

/// Check the configured ledger, writing the outcome to `writer`.
///
/// Returns `Ok(false)` if the ledger is malformed; `Err` only if it cannot
/// be read or the output cannot be written.
pub fn run<W: Write>(config: &Config, writer: &mut W) -> Result<bool> {
    let source = read_file(&config.ledger, "ledger")?;
    let start = Instant::now();

    match parse(&source) {
        Ok(ledger) => {
            let transactions = ledger.len();
            let accounts = ledger.into_index().accounts().count();
            info!(
                transactions,
                accounts,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "ledger is valid"
            );

            match config.format {
                OutputFormat::Text => {
                    writeln!(writer, "✓ {transactions} transactions, {accounts} accounts")?;
                }
                OutputFormat::Json => {
                    let summary = CheckSummary {
                        transactions,
                        accounts,
                    };
                    writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
                }
            }
            Ok(true)
        }
        Err(err) => {
            info!(line = err.line(), "ledger is invalid");
            let diagnostic = JsonDiagnostic::new(&config.ledger, &err);
            match config.format {
                OutputFormat::Text => write_diagnostic(&diagnostic, writer)?,
                OutputFormat::Json => {
                    let output = JsonOutput {
                        diagnostics: vec![diagnostic],
                        error_count: 1,
                    };
                    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
                }
            }
            Ok(false)
        }
    }
}

/// Write `file:line[:column]: error: message` followed by the source.
fn write_diagnostic<W: Write>(diagnostic: &JsonDiagnostic, writer: &mut W) -> Result<()> {
    write!(writer, "{}:{}", diagnostic.file, diagnostic.line)?;
    if let Some(column) = diagnostic.column {
        write!(writer, ":{column}")?;
    }
    writeln!(writer, ": error: {}", diagnostic.message)?;
    for line in diagnostic.context.lines() {
        writeln!(writer, "  | {line}")?;
    }
    Ok(())
}

/// Main entry point for the check command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();
    logging::init(config.verbose);

    match run(&config, &mut io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
