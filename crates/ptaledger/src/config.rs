//! Command-line configuration shared by the binaries.
//!
//! Every binary flattens [`LedgerArgs`] into its own argument struct and
//! resolves the result into a [`Config`]. Environment variables fill in
//! options that are not given on the command line.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// Ledger read when no path is given.
pub const DEFAULT_LEDGER: &str = "Ledger.md";

/// Info string of the fenced blocks holding queries.
pub const DEFAULT_LANGUAGE: &str = "pta";

/// Environment variable naming the ledger file.
pub const LEDGER_ENV: &str = "PTA_LEDGER";

/// Environment variable naming the query block language.
pub const LANGUAGE_ENV: &str = "PTA_LANGUAGE";

/// Output format for reports and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Options common to every binary.
#[derive(clap::Args, Debug, Clone)]
pub struct LedgerArgs {
    /// The ledger file
    #[arg(
        short = 'l',
        long = "ledger",
        value_name = "LEDGER",
        env = LEDGER_ENV,
        default_value = DEFAULT_LEDGER
    )]
    pub ledger: PathBuf,

    /// Output format (text or json)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ledger file to read.
    pub ledger: PathBuf,
    /// Info string of query blocks in documents.
    pub language: String,
    /// Output format.
    pub format: OutputFormat,
    /// Log at `info` instead of `warn`.
    pub verbose: bool,
}

impl Config {
    /// Resolve the common arguments.
    #[must_use]
    pub fn from_args(args: &LedgerArgs) -> Self {
        Self {
            ledger: args.ledger.clone(),
            language: DEFAULT_LANGUAGE.to_string(),
            format: args.format,
            verbose: args.verbose,
        }
    }

    /// Use `ledger` instead of the configured file.
    #[must_use]
    pub fn with_ledger(mut self, ledger: impl Into<PathBuf>) -> Self {
        self.ledger = ledger.into();
        self
    }

    /// Look for query blocks tagged `language`.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Use the given output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: PathBuf::from(DEFAULT_LEDGER),
            language: DEFAULT_LANGUAGE.to_string(),
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}
