//! pta-query - Run one balance query against a ledger.
//!
//! # Usage
//!
//! ```bash
//! pta-query balance Assets
//! pta-query --ledger Ledger.md -f json "bal from:2023-08-11"
//! pta-query -F query.pta
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ptaledger_core::AccountIndex;
use ptaledger_query::{parse as parse_query, Executor, Report};
use tracing::info;

use crate::cmd::{load_index, read_file};
use crate::config::{Config, LedgerArgs};
use crate::logging;
use crate::render::write_report;

/// Run a balance query against a ledger.
#[derive(Parser, Debug)]
#[command(name = "pta-query")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub common: LedgerArgs,

    /// Read the query from a file
    #[arg(short = 'F', long = "query-file", value_name = "QUERY_FILE")]
    pub query_file: Option<PathBuf>,

    /// Query to execute, e.g. `balance from:2023-08-11 Expenses`
    #[arg(value_name = "QUERY", trailing_var_arg = true, num_args = 0..)]
    pub query: Vec<String>,
}

impl Args {
    /// The query text, from the arguments or the query file.
    pub fn query_text(&self) -> Result<String> {
        if !self.query.is_empty() {
            Ok(self.query.join(" "))
        } else if let Some(query_file) = &self.query_file {
            read_file(query_file, "query file")
        } else {
            bail!("no query given: pass QUERY or --query-file")
        }
    }
}

/// Parse and execute `query_text` against `index`.
pub fn execute_query(query_text: &str, index: &AccountIndex) -> Result<Report> {
    let query = parse_query(query_text).context("failed to parse query")?;
    Ok(Executor::new(index).execute(&query))
}

/// Load the configured ledger, run the query, and write the report.
pub fn run<W: Write>(config: &Config, query_text: &str, writer: &mut W) -> Result<()> {
    let index = load_index(&config.ledger)?;
    let report = execute_query(query_text, &index)?;
    info!(rows = report.len(), "query complete");
    write_report(&report, config.format, writer)
}

/// Main entry point for the query command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from_args(&args.common);
    logging::init(config.verbose);

    let result = args
        .query_text()
        .and_then(|query| run(&config, &query, &mut io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
