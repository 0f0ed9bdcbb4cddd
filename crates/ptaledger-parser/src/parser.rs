//! Parser implementation for ledger text.
//!
//! The source is split into blocks of consecutive non-blank lines. The first
//! line of a block is the header, every following line is a posting. Lines
//! are parsed with chumsky combinators; the staged functions below turn a
//! failure at each stage into a precise [`SyntaxErrorKind`].

use chumsky::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use chrono::NaiveDate;
use ptaledger_core::{Account, Amount, IncompletePosting, IncompleteTransaction};

use crate::error::{LedgerSyntaxError, SyntaxErrorKind};
use crate::span::Span;

type ParserInput<'a> = &'a str;
type ParserExtra<'a> = extra::Err<Rich<'a, char>>;

/// One source line, without its line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The line text.
    pub text: &'a str,
}

/// A run of consecutive non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// The lines, header first.
    pub lines: Vec<Line<'a>>,
    /// Byte range of the block in the source.
    pub span: Span,
}

impl Block<'_> {
    /// Line number of the header.
    #[must_use]
    pub fn first_line(&self) -> usize {
        self.lines.first().map_or(1, |l| l.number)
    }
}

/// Split source text into blocks separated by blank (whitespace-only) lines.
///
/// Both `\n` and `\r\n` line endings are accepted.
#[must_use]
pub fn blocks(source: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;
    let mut offset = 0;

    for (idx, raw) in source.split('\n').enumerate() {
        let start = offset;
        offset += raw.len() + 1;
        let text = raw.strip_suffix('\r').unwrap_or(raw);

        if text.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        let line = Line {
            number: idx + 1,
            text,
        };
        let end = start + text.len();
        match &mut current {
            Some(block) => {
                block.lines.push(line);
                block.span.end = end;
            }
            None => {
                current = Some(Block {
                    lines: vec![line],
                    span: Span::new(start, end),
                });
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

/// Parse one block into a transaction whose elided amounts are still open.
pub fn parse_block(block: &Block<'_>) -> Result<IncompleteTransaction, LedgerSyntaxError> {
    let Some((header, posting_lines)) = block.lines.split_first() else {
        return Err(LedgerSyntaxError::new(
            SyntaxErrorKind::MissingHeader,
            1,
            1,
            "",
        ));
    };

    let (date, description) = parse_header(*header)?;
    let postings = posting_lines
        .iter()
        .map(|line| parse_posting(*line))
        .collect::<Result<Vec<_>, _>>()?;

    if postings.len() < 2 {
        return Err(error_at(
            SyntaxErrorKind::TooFewPostings(postings.len()),
            *header,
            0,
        ));
    }

    Ok(IncompleteTransaction {
        date,
        description,
        postings,
    })
}

/// Parse a header line: `YYYY-MM-DD "description"`.
fn parse_header(line: Line<'_>) -> Result<(NaiveDate, String), LedgerSyntaxError> {
    let text = line.text;
    if text.starts_with([' ', '\t']) {
        return Err(error_at(SyntaxErrorKind::MissingHeader, line, 0));
    }

    let token_end = text.find([' ', '\t']).unwrap_or(text.len());
    let token = &text[..token_end];

    let (year, month, day) = date_shape()
        .then_ignore(end())
        .parse(token)
        .into_result()
        .map_err(|_| error_at(SyntaxErrorKind::InvalidHeader(token.to_string()), line, 0))?;
    let date = calendar_date(year, month, day)
        .ok_or_else(|| error_at(SyntaxErrorKind::InvalidDate(token.to_string()), line, 0))?;

    let description = description()
        .parse(&text[token_end..])
        .into_result()
        .map_err(|errs| {
            let at = errs.first().map_or(0, |e| e.span().start);
            error_at(SyntaxErrorKind::MissingDescription, line, token_end + at)
        })?;

    Ok((date, description))
}

/// Parse a posting line: `<indent><account>[ <number><currency>]`.
fn parse_posting(line: Line<'_>) -> Result<IncompletePosting, LedgerSyntaxError> {
    let text = line.text;
    if !text.starts_with([' ', '\t']) {
        return Err(error_at(SyntaxErrorKind::UnindentedPosting, line, 0));
    }

    let tokens = line_tokens()
        .parse(text)
        .into_result()
        .map_err(|_| error_at(SyntaxErrorKind::UnexpectedText(text.trim().to_string()), line, 0))?;
    let mut tokens = tokens.into_iter();

    let Some((account_at, account_text)) = tokens.next() else {
        return Err(error_at(
            SyntaxErrorKind::InvalidAccount(ptaledger_core::AccountError::Empty),
            line,
            0,
        ));
    };
    let account = Account::new(account_text)
        .map_err(|e| error_at(SyntaxErrorKind::InvalidAccount(e), line, account_at))?;

    let Some((amount_at, amount_text)) = tokens.next() else {
        return Ok(IncompletePosting::elided(account));
    };

    let units = match amount().then_ignore(end()).parse(amount_text).into_result() {
        Ok(units) => units,
        Err(_) => {
            return Err(amount_error(line, amount_at, amount_text, tokens.next()));
        }
    };

    if let Some((extra_at, _)) = tokens.next() {
        return Err(error_at(
            SyntaxErrorKind::UnexpectedText(text[extra_at..].trim_end().to_string()),
            line,
            extra_at,
        ));
    }

    Ok(IncompletePosting::new(account, units))
}

/// Work out why an amount token did not parse.
fn amount_error(
    line: Line<'_>,
    at: usize,
    token: &str,
    next: Option<(usize, &str)>,
) -> LedgerSyntaxError {
    if number().then_ignore(end()).parse(token).into_result().is_err() {
        return error_at(SyntaxErrorKind::InvalidAmount(token.to_string()), line, at);
    }

    match next {
        Some((_, word)) if currency().then_ignore(end()).parse(word).into_result().is_ok() => error_at(
            SyntaxErrorKind::SpaceBeforeCurrency {
                number: token.to_string(),
                currency: word.to_string(),
            },
            line,
            at + token.len(),
        ),
        _ => error_at(
            SyntaxErrorKind::MissingCurrency(token.to_string()),
            line,
            at + token.len(),
        ),
    }
}

fn error_at(kind: SyntaxErrorKind, line: Line<'_>, offset: usize) -> LedgerSyntaxError {
    let column = line
        .text
        .get(..offset)
        .map_or(offset, |prefix| prefix.chars().count())
        + 1;
    LedgerSyntaxError::new(kind, line.number, column, line.text)
}

fn calendar_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

// ============================================================================
// Primitives
// ============================================================================

/// Parse whitespace (spaces and tabs).
fn ws<'a>() -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse required whitespace.
fn ws1<'a>() -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse digits.
fn digits<'a>() -> impl Parser<'a, ParserInput<'a>, &'a str, ParserExtra<'a>> + Clone {
    one_of("0123456789").repeated().at_least(1).to_slice()
}

/// Parse exactly `count` digits.
fn fixed_digits<'a>(count: usize) -> impl Parser<'a, ParserInput<'a>, &'a str, ParserExtra<'a>> + Clone {
    one_of("0123456789").repeated().exactly(count).to_slice()
}

/// Parse the `YYYY-MM-DD` shape, without checking the calendar.
fn date_shape<'a>(
) -> impl Parser<'a, ParserInput<'a>, (&'a str, &'a str, &'a str), ParserExtra<'a>> + Clone {
    fixed_digits(4)
        .then_ignore(just('-'))
        .then(fixed_digits(2))
        .then_ignore(just('-'))
        .then(fixed_digits(2))
        .map(|((year, month), day)| (year, month, day))
}

/// Parse a double-quoted string; a backslash escapes the next character.
fn string_literal<'a>() -> impl Parser<'a, ParserInput<'a>, String, ParserExtra<'a>> + Clone {
    just('"')
        .ignore_then(
            none_of("\"\\")
                .or(just('\\').ignore_then(any()))
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just('"'))
}

/// Parse the remainder of a header after the date.
fn description<'a>() -> impl Parser<'a, ParserInput<'a>, String, ParserExtra<'a>> {
    ws1()
        .ignore_then(string_literal())
        .then_ignore(ws())
        .then_ignore(end())
}

/// Parse a signed decimal number: `[+-]digits[.digits]`.
fn number<'a>() -> impl Parser<'a, ParserInput<'a>, Decimal, ParserExtra<'a>> + Clone {
    one_of("+-")
        .or_not()
        .then(digits())
        .then(just('.').then(digits()).or_not())
        .to_slice()
        .try_map(|s: &str, span| {
            Decimal::from_str(s.trim_start_matches('+'))
                .map_err(|_| Rich::custom(span, "invalid number"))
        })
}

/// Parse an alphabetic currency code.
fn currency<'a>() -> impl Parser<'a, ParserInput<'a>, String, ParserExtra<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_alphabetic())
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

/// Parse an amount: a number immediately followed by its currency.
fn amount<'a>() -> impl Parser<'a, ParserInput<'a>, Amount, ParserExtra<'a>> + Clone {
    number()
        .then(currency())
        .map(|(number, currency)| Amount::new(number, currency))
}

/// Split a line into whitespace-separated tokens with their byte offsets.
fn line_tokens<'a>() -> impl Parser<'a, ParserInput<'a>, Vec<(usize, &'a str)>, ParserExtra<'a>> {
    none_of(" \t")
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|token: &'a str, e| {
            let span: SimpleSpan = e.span();
            (span.start, token)
        })
        .separated_by(ws1())
        .allow_leading()
        .allow_trailing()
        .collect::<Vec<_>>()
        .then_ignore(end())
}
