//! Query parser implementation.
//!
//! Uses chumsky for parser combinators. The query is first split into
//! whitespace-separated tokens; the command and each clause are then parsed
//! on their own so every failure can name the token and its position.

use chumsky::prelude::*;
use ptaledger_core::{Account, NaiveDate};
use tracing::debug;

use crate::ast::{BalanceQuery, DateRange, Query};
use crate::error::{
    QueryError, QuerySemanticError, QuerySyntaxError, SemanticErrorKind, SyntaxErrorKind,
};

type ParserInput<'a> = &'a str;
type ParserExtra<'a> = extra::Err<Rich<'a, char>>;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Balance,
}

#[derive(Debug)]
enum Clause {
    From(NaiveDate),
    To(NaiveDate),
    Account(Account),
}

/// Parse a query string.
///
/// # Errors
///
/// Returns a [`QueryError`] naming the offending token's byte position if
/// the query is malformed or carries an unacceptable value.
pub fn parse(source: &str) -> Result<Query, QueryError> {
    let tokens = tokens().parse(source).into_output().unwrap_or_default();

    let Some((&(at, command), clauses)) = tokens.split_first() else {
        return Err(syntax(SyntaxErrorKind::UnexpectedEof, source.len()));
    };

    let query = match command_parser().parse(command).into_result() {
        Ok(Command::Balance) => Query::Balance(balance_query(clauses)?),
        Err(_) => {
            return Err(syntax(
                SyntaxErrorKind::UnknownCommand(command.to_string()),
                at,
            ))
        }
    };

    debug!(%query, "parsed query");
    Ok(query)
}

fn balance_query(clauses: &[(usize, &str)]) -> Result<BalanceQuery, QueryError> {
    let mut from = None;
    let mut to = None;
    let mut account = None;

    for &(at, token) in clauses {
        match clause(at, token)? {
            Clause::From(date) => set_once(&mut from, date, "from", at)?,
            Clause::To(date) => set_once(&mut to, date, "to", at)?,
            Clause::Account(path) => set_once(&mut account, path, "account", at)?,
        }
    }

    if let (Some((from, from_at)), Some((to, to_at))) = (from, to) {
        if from > to {
            return Err(semantic(
                SemanticErrorKind::EmptyRange { from, to },
                from_at.max(to_at),
            ));
        }
    }

    Ok(BalanceQuery {
        account: account.map(|(path, _)| path),
        range: DateRange::new(from.map(|(d, _)| d), to.map(|(d, _)| d)),
    })
}

fn set_once<T>(
    slot: &mut Option<(T, usize)>,
    value: T,
    name: &str,
    at: usize,
) -> Result<(), QueryError> {
    if slot.is_some() {
        return Err(syntax(
            SyntaxErrorKind::DuplicateClause(name.to_string()),
            at,
        ));
    }
    *slot = Some((value, at));
    Ok(())
}

/// Classify one clause token.
///
/// Keyword clauses are recognized by [`keyword_clause`]; anything else is an
/// account path.
fn clause(at: usize, token: &str) -> Result<Clause, QueryError> {
    if let Ok((keyword, value)) = keyword_clause().parse(token).into_result() {
        let value_at = at + keyword.len() + 1;
        return match keyword {
            "from" => date_value(value, value_at).map(Clause::From),
            "to" => date_value(value, value_at).map(Clause::To),
            _ => Err(syntax(
                SyntaxErrorKind::UnknownClause(keyword.to_string()),
                at,
            )),
        };
    }
    account_value(token, at).map(Clause::Account)
}

fn date_value(value: &str, at: usize) -> Result<NaiveDate, QueryError> {
    if date_literal().parse(value).into_result().is_err() {
        let found = if value.is_empty() { "nothing" } else { value };
        return Err(syntax(
            SyntaxErrorKind::Expected {
                expected: "a date (YYYY-MM-DD)".to_string(),
                found: found.to_string(),
            },
            at,
        ));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| semantic(SemanticErrorKind::InvalidDate(value.to_string()), at))
}

fn account_value(token: &str, at: usize) -> Result<Account, QueryError> {
    let path = token.strip_suffix(':').unwrap_or(token);
    Account::new(path)
        .map_err(|_| semantic(SemanticErrorKind::InvalidAccount(token.to_string()), at))
}

fn syntax(kind: SyntaxErrorKind, position: usize) -> QueryError {
    QuerySyntaxError::new(kind, position).into()
}

fn semantic(kind: SemanticErrorKind, position: usize) -> QueryError {
    QuerySemanticError::new(kind, position).into()
}

/// Parse whitespace (spaces, tabs, newlines).
fn ws<'a>() -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> + Clone {
    one_of(" \t\r\n").repeated().ignored()
}

/// A maximal run of non-whitespace with its byte offset.
fn token<'a>() -> impl Parser<'a, ParserInput<'a>, (usize, &'a str), ParserExtra<'a>> + Clone {
    none_of(" \t\r\n")
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|text: &'a str, e| {
            let span: SimpleSpan = e.span();
            (span.start, text)
        })
}

/// Split the query into tokens.
fn tokens<'a>() -> impl Parser<'a, ParserInput<'a>, Vec<(usize, &'a str)>, ParserExtra<'a>> {
    ws().ignore_then(token().then_ignore(ws()).repeated().collect())
        .then_ignore(end())
}

/// Parse the command word.
fn command_parser<'a>() -> impl Parser<'a, ParserInput<'a>, Command, ParserExtra<'a>> {
    choice((just("balance"), just("bal")))
        .then_ignore(end())
        .to(Command::Balance)
}

/// Parse `keyword:value`.
///
/// `from` and `to` take any value. Another all-lowercase word is a keyword
/// only when its value starts with a digit: `since:2023-08-11` is an unknown
/// clause while `expenses:food` is an account path.
fn keyword_clause<'a>() -> impl Parser<'a, ParserInput<'a>, (&'a str, &'a str), ParserExtra<'a>> {
    let known = choice((just("from"), just("to")))
        .then_ignore(just(':'))
        .then(any().repeated().to_slice());

    let dated = any()
        .filter(char::is_ascii_lowercase)
        .repeated()
        .at_least(1)
        .to_slice()
        .then_ignore(just(':'))
        .then(
            any()
                .filter(char::is_ascii_digit)
                .then(any().repeated())
                .to_slice(),
        );

    known.or(dated)
}

/// Parse exactly `n` ASCII digits.
fn fixed_digits<'a>(n: usize) -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> + Clone {
    any().filter(char::is_ascii_digit).repeated().exactly(n)
}

/// Parse a `YYYY-MM-DD` shaped literal.
fn date_literal<'a>() -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> {
    fixed_digits(4)
        .then_ignore(just('-'))
        .then_ignore(fixed_digits(2))
        .then_ignore(just('-'))
        .then_ignore(fixed_digits(2))
        .then_ignore(end())
}
