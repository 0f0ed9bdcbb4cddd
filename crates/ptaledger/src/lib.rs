//! Command-line tools for ptaledger.
//!
//! This crate provides command-line tools for working with ledgers:
//!
//! - `pta-check`: Validate a ledger
//! - `pta-query`: Run one balance query
//! - `pta-render`: Run every `pta` query block of a Markdown document
//!
//! The ledger path defaults to `Ledger.md` and can be set with `--ledger` or
//! the `PTA_LEDGER` environment variable.
//!
//! # Example Usage
//!
//! ```bash
//! pta-check Ledger.md
//! pta-query --ledger Ledger.md balance Assets
//! pta-render --ledger Ledger.md notes/Budget.md
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod document;
pub mod logging;
pub mod render;
