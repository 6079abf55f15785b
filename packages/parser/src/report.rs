//! `{ "ok": ... }` envelopes for handing results to hosts as JSON

use crate::ast::{ParseNode, Token};
use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub nesting_level: usize,
}

/// Failure half of an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error_code: u32,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<ErrorData>,
}

impl From<&ParseError> for ErrorReport {
    fn from(error: &ParseError) -> Self {
        Self {
            error_code: error.code().as_u32(),
            error_message: error.message().to_string(),
            data: error
                .nesting_level()
                .map(|nesting_level| ErrorData { nesting_level }),
        }
    }
}

/// Outcome of `tokenize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenizationResult {
    Ok { ok: bool, tokens: Vec<Token> },
    Err {
        ok: bool,
        #[serde(flatten)]
        error: ErrorReport,
    },
}

impl TokenizationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, TokenizationResult::Ok { .. })
    }
}

impl From<ParseResult<Vec<Token>>> for TokenizationResult {
    fn from(result: ParseResult<Vec<Token>>) -> Self {
        match result {
            Ok(tokens) => TokenizationResult::Ok { ok: true, tokens },
            Err(error) => TokenizationResult::Err {
                ok: false,
                error: ErrorReport::from(&error),
            },
        }
    }
}

/// Outcome of `parse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParseOutcome {
    Ok {
        ok: bool,
        parse_trees: Vec<ParseNode>,
    },
    Err {
        ok: bool,
        #[serde(flatten)]
        error: ErrorReport,
    },
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseOutcome::Ok { .. })
    }
}

impl From<ParseResult<Vec<ParseNode>>> for ParseOutcome {
    fn from(result: ParseResult<Vec<ParseNode>>) -> Self {
        match result {
            Ok(parse_trees) => ParseOutcome::Ok {
                ok: true,
                parse_trees,
            },
            Err(error) => ParseOutcome::Err {
                ok: false,
                error: ErrorReport::from(&error),
            },
        }
    }
}
