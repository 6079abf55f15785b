//! Error types for the Sprig tokenizer and parser

use crate::ast::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for tokenizing and parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Stable numeric error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ErrorCode {
    UnexpectedClosingDelimiter = 1,
    UnclosedDelimiter = 2,
    DelimMismatch = 4,
    UnterminatedString = 8,
    UnterminatedMultiLineComment = 16,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Tokenizer or parser failure.
///
/// `Display` yields the rendered diagnostic, source excerpt included.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Stray `|#`, or a list close with no open list. `nesting_level` is `None`
    /// when raised by the tokenizer.
    #[error("{message}")]
    UnexpectedClosingDelimiter {
        at: Position,
        nesting_level: Option<usize>,
        message: String,
    },

    #[error("{message}")]
    UnclosedDelimiter {
        open: Position,
        nesting_level: usize,
        message: String,
    },

    #[error("{message}")]
    DelimMismatch {
        open: Position,
        close: Position,
        expected: char,
        found: char,
        nesting_level: usize,
        message: String,
    },

    #[error("{message}")]
    UnterminatedString {
        start: Position,
        quote: char,
        message: String,
    },

    #[error("{message}")]
    UnterminatedMultiLineComment {
        start: Position,
        depth: usize,
        message: String,
    },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnexpectedClosingDelimiter { .. } => ErrorCode::UnexpectedClosingDelimiter,
            ParseError::UnclosedDelimiter { .. } => ErrorCode::UnclosedDelimiter,
            ParseError::DelimMismatch { .. } => ErrorCode::DelimMismatch,
            ParseError::UnterminatedString { .. } => ErrorCode::UnterminatedString,
            ParseError::UnterminatedMultiLineComment { .. } => {
                ErrorCode::UnterminatedMultiLineComment
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::UnexpectedClosingDelimiter { message, .. }
            | ParseError::UnclosedDelimiter { message, .. }
            | ParseError::DelimMismatch { message, .. }
            | ParseError::UnterminatedString { message, .. }
            | ParseError::UnterminatedMultiLineComment { message, .. } => message,
        }
    }

    /// Open list delimiters at the point of failure (parser errors only)
    pub fn nesting_level(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedClosingDelimiter { nesting_level, .. } => *nesting_level,
            ParseError::UnclosedDelimiter { nesting_level, .. }
            | ParseError::DelimMismatch { nesting_level, .. } => Some(*nesting_level),
            ParseError::UnterminatedString { .. }
            | ParseError::UnterminatedMultiLineComment { .. } => None,
        }
    }

    /// Where the offending construct begins
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedClosingDelimiter { at, .. } => *at,
            ParseError::UnclosedDelimiter { open, .. } | ParseError::DelimMismatch { open, .. } => {
                *open
            }
            ParseError::UnterminatedString { start, .. }
            | ParseError::UnterminatedMultiLineComment { start, .. } => *start,
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Config, Label, Report, ReportKind, Source};

    let start = error.position().offset.min(source.len());
    let end = match error {
        ParseError::DelimMismatch { close, .. } => close.offset + 1,
        ParseError::UnexpectedClosingDelimiter { at, .. } => at.offset + 1,
        _ => source.len(),
    }
    .clamp(start, source.len());

    let label = match error {
        ParseError::UnexpectedClosingDelimiter { .. } => "no matching opening delimiter".to_string(),
        ParseError::UnclosedDelimiter { .. } => "this delimiter is never closed".to_string(),
        ParseError::DelimMismatch {
            expected, found, ..
        } => format!("expected `{}` but found `{}`", expected, found),
        ParseError::UnterminatedString { quote, .. } => {
            format!("missing closing `{}`", quote)
        }
        ParseError::UnterminatedMultiLineComment { depth, .. } => {
            format!("missing {} closing `|#`", depth)
        }
    };

    let headline = error.message().lines().next().unwrap_or_default().to_string();

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, start)
        .with_config(Config::default().with_color(false))
        .with_code(error.code().as_u32())
        .with_message(headline)
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(label),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.message().to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.message().to_string())
}
