//! pta-render - Run every query block in a Markdown document.
//!
//! The ledger is parsed once; each fenced block tagged with the query
//! language is then executed against it. A block whose query fails shows
//! its error in place of a report and the remaining blocks still run. A
//! malformed ledger aborts before any block runs.
//!
//! # Usage
//!
//! ```bash
//! pta-render notes/Budget.md
//! pta-render --ledger Ledger.md --language pta -f json notes/Budget.md
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ptaledger_query::{parse as parse_query, Executor, QueryError, Report};
use tracing::{info, warn};

use crate::cmd::{load_index, read_file};
use crate::config::{Config, LedgerArgs, OutputFormat, DEFAULT_LANGUAGE, LANGUAGE_ENV};
use crate::document::{query_blocks, QueryBlock};
use crate::logging;
use crate::render::{write_query_error, write_text, ErrorView, RenderedBlock};

/// Run the query blocks of a Markdown document against a ledger.
#[derive(Parser, Debug)]
#[command(name = "pta-render")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub common: LedgerArgs,

    /// Info string of the fenced blocks holding queries
    #[arg(long, value_name = "LANGUAGE", env = LANGUAGE_ENV, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// The Markdown document
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

impl Args {
    /// Resolve the arguments into a configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::from_args(&self.common).with_language(&self.language)
    }
}

/// Render every query block of `document` against the configured ledger.
///
/// Returns `Ok(false)` if at least one block failed.
pub fn run<W: Write>(config: &Config, document: &str, writer: &mut W) -> Result<bool> {
    let index = load_index(&config.ledger)?;
    let executor = Executor::new(&index);

    let blocks = query_blocks(document, &config.language);
    info!(blocks = blocks.len(), language = %config.language, "found query blocks");

    let results: Vec<(QueryBlock<'_>, Result<Report, QueryError>)> = blocks
        .into_iter()
        .map(|block| {
            let result = parse_query(block.body).map(|query| executor.execute(&query));
            if let Err(err) = &result {
                warn!(line = block.line, error = %err, "query block failed");
            }
            (block, result)
        })
        .collect();

    match config.format {
        OutputFormat::Text => write_blocks_text(&results, writer)?,
        OutputFormat::Json => write_blocks_json(&results, writer)?,
    }

    Ok(results.iter().all(|(_, result)| result.is_ok()))
}

fn write_blocks_text<W: Write>(
    results: &[(QueryBlock<'_>, Result<Report, QueryError>)],
    writer: &mut W,
) -> Result<()> {
    for (i, (block, result)) in results.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        let query = block.body.split_whitespace().collect::<Vec<_>>().join(" ");
        writeln!(writer, "# line {}: {query}", block.line)?;
        match result {
            Ok(report) => write_text(report, writer)?,
            Err(err) => write_query_error(block.line, err, writer)?,
        }
    }
    Ok(())
}

fn write_blocks_json<W: Write>(
    results: &[(QueryBlock<'_>, Result<Report, QueryError>)],
    writer: &mut W,
) -> Result<()> {
    let rendered: Vec<RenderedBlock<'_>> = results
        .iter()
        .map(|(block, result)| RenderedBlock {
            line: block.line,
            query: block.body,
            report: result.as_ref().ok(),
            error: result.as_ref().err().map(ErrorView::from),
        })
        .collect();
    writeln!(writer, "{}", serde_json::to_string_pretty(&rendered)?)?;
    Ok(())
}

/// Main entry point for the render command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();
    logging::init(config.verbose);

    let result = read_file(&args.document, "document")
        .and_then(|document| run(&config, &document, &mut io::stdout().lock()));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
