//! Query error types.

use ptaledger_core::NaiveDate;
use thiserror::Error;

/// Error returned when a query cannot be turned into a [`crate::Query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query text does not follow the grammar.
    #[error(transparent)]
    Syntax(#[from] QuerySyntaxError),
    /// The query is well formed but its values are not acceptable.
    #[error(transparent)]
    Semantic(#[from] QuerySemanticError),
}

impl QueryError {
    /// Byte offset in the query text where the error occurred.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Syntax(e) => e.position,
            Self::Semantic(e) => e.position,
        }
    }
}

/// A grammar violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {kind}")]
pub struct QuerySyntaxError {
    /// The kind of error.
    pub kind: SyntaxErrorKind,
    /// Byte offset in the query text.
    pub position: usize,
}

impl QuerySyntaxError {
    /// Create a new syntax error.
    pub const fn new(kind: SyntaxErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The query is empty.
    #[error("unexpected end of input, expected a command")]
    UnexpectedEof,
    /// The first token is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A `keyword:value` token with an unknown keyword.
    #[error("unknown clause `{0}:`")]
    UnknownClause(String),
    /// The same clause appears twice.
    #[error("duplicate `{0}` clause")]
    DuplicateClause(String),
    /// A value has the wrong shape.
    #[error("expected {expected}, found `{found}`")]
    Expected {
        /// What the grammar allows here.
        expected: String,
        /// What the query contains.
        found: String,
    },
}

/// A well-formed query with an unacceptable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid query at position {position}: {kind}")]
pub struct QuerySemanticError {
    /// The kind of error.
    pub kind: SemanticErrorKind,
    /// Byte offset in the query text.
    pub position: usize,
}

impl QuerySemanticError {
    /// Create a new semantic error.
    pub const fn new(kind: SemanticErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The kind of semantic error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    /// Shaped like `YYYY-MM-DD` but not a calendar date.
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    /// Not a valid account path.
    #[error("invalid account `{0}`")]
    InvalidAccount(String),
    /// `from` is after `to`.
    #[error("empty date range: {from} is after {to}")]
    EmptyRange {
        /// Start of the range.
        from: NaiveDate,
        /// End of the range.
        to: NaiveDate,
    },
}
