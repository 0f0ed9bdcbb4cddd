//! Command implementations for CLI tools.
//!
//! Each module contains the full implementation for a command,
//! which can be invoked by thin wrapper binaries.

pub mod check;
pub mod query;
pub mod render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ptaledger_core::AccountIndex;
use tracing::info;

/// Read a UTF-8 file, naming it in the error.
pub fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {what} {}", path.display()))
}

/// Read and parse a ledger, then build its index.
///
/// Any syntax or balance error aborts with the error's location.
pub fn load_index(path: &Path) -> Result<AccountIndex> {
    let source = read_file(path, "ledger")?;
    let ledger = ptaledger_parser::parse(&source)
        .with_context(|| format!("failed to parse ledger {}", path.display()))?;
    info!(path = %path.display(), transactions = ledger.len(), "loaded ledger");
    Ok(ledger.into_index())
}
