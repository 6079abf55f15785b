use crate::ast::{ListNode, ParseNode, Position, Token, TokenKind};
use crate::diagnostics::Diagnostic;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Which token categories are kept as tree children.
///
/// Excluded tokens still count toward their enclosing list's `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub include_comments: bool,
    pub include_whitespace: bool,
    pub include_list_delimiters: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            include_whitespace: true,
            include_list_delimiters: true,
        }
    }
}

/// Matching close character for an opening delimiter
fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        other => unreachable!("{:?} is not an opening delimiter", other),
    }
}

/// Position of the final character of a non-empty source
fn last_char_position(source: &str) -> Position {
    let mut last = Position::default();
    let (mut line, mut column) = (0, 0);
    for (offset, c) in source.char_indices() {
        last = Position::new(offset, line, column);
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    last
}

/// Builds parse trees from the token stream using a delimiter stack and a
/// stack of lists under construction
pub struct Parser<'src> {
    source: &'src str,
    options: ParseOptions,
    delimiters: Vec<Token>,
    lists: Vec<ListNode>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            delimiters: Vec::new(),
            // synthetic root at offset/line/column 0
            lists: vec![ListNode::default()],
        }
    }

    /// Parse the whole source into top-level trees
    pub fn parse_trees(self) -> ParseResult<Vec<ParseNode>> {
        let root = self.parse_root()?;
        debug!(trees = root.children.len(), "parsed");
        Ok(root.children)
    }

    /// Parse the whole source, returning the synthetic root list.
    ///
    /// The root's `length` always equals the source length.
    pub fn parse_root(mut self) -> ParseResult<ListNode> {
        let tokens = tokenize(self.source)?;
        for token in tokens {
            self.accept(token)?;
        }
        self.finish()
    }

    fn accept(&mut self, token: Token) -> ParseResult<()> {
        match token.kind {
            TokenKind::Whitespace => self.push_token(token, self.options.include_whitespace),
            TokenKind::SingleLineComment | TokenKind::MultiLineComment => {
                self.push_token(token, self.options.include_comments)
            }
            TokenKind::Word | TokenKind::DoubleQuoteString | TokenKind::SingleQuoteString => {
                self.push_token(token, true)
            }
            TokenKind::ListDelimiterOpen => {
                self.delimiters.push(token);
                self.lists.push(ListNode::opened_by(&token));
                self.push_token(token, self.options.include_list_delimiters);
            }
            TokenKind::ListDelimiterClose => {
                self.push_token(token, self.options.include_list_delimiters);

                let Some(open) = self.delimiters.pop() else {
                    return Err(self.unexpected_close(&token));
                };

                let expected = closing_for(self.delimiter_char(&open));
                let found = self.delimiter_char(&token);
                if expected != found {
                    return Err(self.mismatch(&open, &token, expected, found));
                }

                self.close_list();
            }
        }
        Ok(())
    }

    fn finish(mut self) -> ParseResult<ListNode> {
        if let Some(open) = self.delimiters.last() {
            return Err(self.unclosed(open));
        }

        match self.lists.pop() {
            Some(root) if self.lists.is_empty() => Ok(root),
            _ => unreachable!("list stack out of step with delimiter stack"),
        }
    }

    fn top(&mut self) -> &mut ListNode {
        match self.lists.last_mut() {
            Some(list) => list,
            None => unreachable!("root list popped before end of input"),
        }
    }

    /// Account for `token` in the current list, keeping it as a child when `keep`
    fn push_token(&mut self, token: Token, keep: bool) {
        let top = self.top();
        top.length += token.length;
        if keep {
            top.children.push(ParseNode::Leaf(token));
        }
    }

    /// Move the completed innermost list into its parent
    fn close_list(&mut self) {
        let list = match self.lists.pop() {
            Some(list) => list,
            None => unreachable!("no open list to close"),
        };
        trace!(offset = list.offset, length = list.length, "closed list");
        let parent = self.top();
        parent.length += list.length;
        parent.children.push(ParseNode::List(list));
    }

    fn delimiter_char(&self, token: &Token) -> char {
        match token.lexeme(self.source).chars().next() {
            Some(c) => c,
            None => unreachable!("empty delimiter token at {}", token.offset),
        }
    }

    fn unexpected_close(&self, close: &Token) -> ParseError {
        let found = self.delimiter_char(close);
        let message = Diagnostic::new(
            self.source,
            &format!("Unexpected closing delimiter `{}`", found),
            close.position(),
            "no matching opening delimiter",
        )
        .render();
        ParseError::UnexpectedClosingDelimiter {
            at: close.position(),
            nesting_level: Some(self.delimiters.len()),
            message,
        }
    }

    fn mismatch(&self, open: &Token, close: &Token, expected: char, found: char) -> ParseError {
        let message = Diagnostic::new(
            self.source,
            "Mismatched delimiter",
            close.position(),
            format!("expected `{}` but found `{}`", expected, found),
        )
        .with_start(open.position(), "opening delimiter")
        .render();
        ParseError::DelimMismatch {
            open: open.position(),
            close: close.position(),
            expected,
            found,
            nesting_level: self.delimiters.len(),
            message,
        }
    }

    fn unclosed(&self, open: &Token) -> ParseError {
        let expected = closing_for(self.delimiter_char(open));
        let message = Diagnostic::new(
            self.source,
            "Unclosed delimiter",
            last_char_position(self.source),
            format!("unclosed delimiter: expected `{}` before end of input", expected),
        )
        .with_start(open.position(), "opening delimiter")
        .render();
        ParseError::UnclosedDelimiter {
            open: open.position(),
            nesting_level: self.delimiters.len(),
            message,
        }
    }
}

/// Parse a source string keeping every token
pub fn parse(source: &str) -> ParseResult<Vec<ParseNode>> {
    parse_with_options(source, ParseOptions::default())
}

/// Parse a source string with explicit options
#[instrument(skip_all, fields(len = source.len()))]
pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseResult<Vec<ParseNode>> {
    Parser::new(source, options).parse_trees()
}

/// Parse a source string into the synthetic root list that holds the top-level trees
#[instrument(skip_all, fields(len = source.len()))]
pub fn parse_root(source: &str, options: ParseOptions) -> ParseResult<ListNode> {
    Parser::new(source, options).parse_root()
}
