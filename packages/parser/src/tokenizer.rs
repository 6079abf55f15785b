//! Character-level tokenizer
//!
//! A single left-to-right pass drives an explicit state machine. Every input
//! byte ends up in exactly one token, so concatenating the lexemes of the
//! returned tokens gives back the source.

use crate::ast::{Position, Token, TokenKind};
use crate::diagnostics::Diagnostic;
use crate::error::{ParseError, ParseResult};
use tracing::{debug, instrument};

/// A state either consumes the current character or hands it back to
/// `Undetermined`, which always consumes. Two decisions per character suffice.
const MAX_DECISIONS: usize = 2;

/// Scanner state between characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Between tokens
    Undetermined,
    Whitespace,
    Word,
    DoubleQuoteString,
    SingleQuoteString,
    SingleLineComment,
    MultiLineComment,
    /// `#` consumed, `|` pending
    MultiLineCommentStart,
    /// `|` consumed, `#` pending
    MultiLineCommentEnd,
}

#[derive(Debug, Clone, Copy)]
struct PendingToken {
    kind: TokenKind,
    start: Position,
    length: usize,
}

impl PendingToken {
    fn new(kind: TokenKind, start: Position) -> Self {
        Self {
            kind,
            start,
            length: 0,
        }
    }

    fn extend(&mut self, c: char) {
        self.length += c.len_utf8();
    }

    fn finish(self) -> Token {
        Token {
            kind: self.kind,
            offset: self.start.offset,
            length: self.length,
            line: self.start.line,
            column: self.start.column,
        }
    }
}

fn is_open_delimiter(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_close_delimiter(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

fn starts_comment(c: char, next: Option<char>) -> bool {
    c == '#' && next == Some('|')
}

fn ends_comment(c: char, next: Option<char>) -> bool {
    c == '|' && next == Some('#')
}

/// Whether `c` may continue a word
fn continues_word(c: char, next: Option<char>) -> bool {
    !(c.is_whitespace()
        || c == ';'
        || c == '"'
        || c == '\''
        || is_open_delimiter(c)
        || is_close_delimiter(c)
        || starts_comment(c, next)
        || ends_comment(c, next))
}

/// Tokenizer state machine over one source text
pub struct Scanner<'src> {
    source: &'src str,
    state: ScanState,
    pending: Option<PendingToken>,
    comment_depth: usize,
    line: usize,
    column: usize,
    previous: Option<char>,
    last: Position,
    tokens: Vec<Token>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            state: ScanState::Undetermined,
            pending: None,
            comment_depth: 0,
            line: 0,
            column: 0,
            previous: None,
            last: Position::default(),
            tokens: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Open `#|` blocks not yet closed
    pub fn comment_depth(&self) -> usize {
        self.comment_depth
    }

    /// Tokens emitted so far
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Scan the whole source
    pub fn run(mut self) -> ParseResult<Vec<Token>> {
        let mut chars = self.source.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            let next = chars.peek().map(|&(_, next)| next);
            self.step(offset, c, next)?;
        }
        self.finish()
    }

    /// Feed one character at byte `offset`, with one character of lookahead
    pub fn step(&mut self, offset: usize, c: char, next: Option<char>) -> ParseResult<()> {
        let here = Position::new(offset, self.line, self.column);

        let mut consumed = false;
        for _ in 0..MAX_DECISIONS {
            if self.decide(here, c, next)? {
                consumed = true;
                break;
            }
        }
        if !consumed {
            unreachable!(
                "scanner did not consume {:?} at {:?} (state {:?})",
                c, here, self.state
            );
        }

        self.previous = Some(c);
        self.last = here;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Ok(())
    }

    /// Close out the scan at end of input
    pub fn finish(mut self) -> ParseResult<Vec<Token>> {
        match self.state {
            ScanState::Undetermined => {}
            ScanState::Whitespace | ScanState::Word | ScanState::SingleLineComment => self.emit(),
            ScanState::DoubleQuoteString | ScanState::SingleQuoteString => {
                return Err(self.unterminated_string());
            }
            ScanState::MultiLineComment
            | ScanState::MultiLineCommentStart
            | ScanState::MultiLineCommentEnd => {
                return Err(self.unterminated_comment());
            }
        }
        Ok(self.tokens)
    }

    /// Returns whether `c` was consumed
    fn decide(&mut self, here: Position, c: char, next: Option<char>) -> ParseResult<bool> {
        match self.state {
            ScanState::Undetermined => {
                self.begin(here, c, next)?;
                Ok(true)
            }
            ScanState::Whitespace => {
                if c.is_whitespace() {
                    self.extend(c);
                    Ok(true)
                } else {
                    self.emit();
                    Ok(false)
                }
            }
            ScanState::Word => {
                if continues_word(c, next) {
                    self.extend(c);
                    Ok(true)
                } else {
                    self.emit();
                    Ok(false)
                }
            }
            ScanState::DoubleQuoteString | ScanState::SingleQuoteString => {
                let quote = if self.state == ScanState::DoubleQuoteString {
                    '"'
                } else {
                    '\''
                };
                self.extend(c);
                // look-back of one: `\\"` still counts as an escaped quote
                if c == quote && self.previous != Some('\\') {
                    self.emit();
                }
                Ok(true)
            }
            ScanState::SingleLineComment => {
                self.extend(c);
                if c == '\n' {
                    self.emit();
                }
                Ok(true)
            }
            ScanState::MultiLineCommentStart => {
                assert_eq!(c, '|', "multi-line comment opener must be `#|`");
                self.extend(c);
                self.state = ScanState::MultiLineComment;
                Ok(true)
            }
            ScanState::MultiLineComment => {
                self.extend(c);
                if starts_comment(c, next) {
                    self.comment_depth += 1;
                    self.state = ScanState::MultiLineCommentStart;
                } else if ends_comment(c, next) {
                    self.state = ScanState::MultiLineCommentEnd;
                }
                Ok(true)
            }
            ScanState::MultiLineCommentEnd => {
                assert_eq!(c, '#', "multi-line comment closer must be `|#`");
                self.extend(c);
                self.comment_depth -= 1;
                if self.comment_depth == 0 {
                    self.emit();
                } else {
                    self.state = ScanState::MultiLineComment;
                }
                Ok(true)
            }
        }
    }

    /// Start a new token with `c`
    fn begin(&mut self, here: Position, c: char, next: Option<char>) -> ParseResult<()> {
        let (kind, state) = match c {
            _ if is_open_delimiter(c) => (TokenKind::ListDelimiterOpen, ScanState::Undetermined),
            _ if is_close_delimiter(c) => (TokenKind::ListDelimiterClose, ScanState::Undetermined),
            _ if c.is_whitespace() => (TokenKind::Whitespace, ScanState::Whitespace),
            ';' => (TokenKind::SingleLineComment, ScanState::SingleLineComment),
            '#' if starts_comment(c, next) => {
                self.comment_depth = 1;
                (TokenKind::MultiLineComment, ScanState::MultiLineCommentStart)
            }
            '|' if ends_comment(c, next) => return Err(self.stray_comment_close(here)),
            '"' => (TokenKind::DoubleQuoteString, ScanState::DoubleQuoteString),
            '\'' => (TokenKind::SingleQuoteString, ScanState::SingleQuoteString),
            _ => (TokenKind::Word, ScanState::Word),
        };

        let mut pending = PendingToken::new(kind, here);
        pending.extend(c);
        self.pending = Some(pending);
        self.state = state;

        // delimiters are complete as soon as they start
        if kind.is_delimiter() {
            self.emit();
        }
        Ok(())
    }

    fn extend(&mut self, c: char) {
        match self.pending.as_mut() {
            Some(pending) => pending.extend(c),
            None => unreachable!("no pending token in state {:?}", self.state),
        }
    }

    fn emit(&mut self) {
        match self.pending.take() {
            Some(pending) => self.tokens.push(pending.finish()),
            None => unreachable!("no pending token to emit in state {:?}", self.state),
        }
        self.state = ScanState::Undetermined;
    }

    fn pending_start(&self) -> Position {
        self.pending.map(|pending| pending.start).unwrap_or_default()
    }

    fn stray_comment_close(&self, here: Position) -> ParseError {
        let message = Diagnostic::new(
            self.source,
            "Unexpected closing delimiter `|#`",
            here,
            "no multi-line comment is open",
        )
        .render();
        ParseError::UnexpectedClosingDelimiter {
            at: here,
            nesting_level: None,
            message,
        }
    }

    fn unterminated_string(&self) -> ParseError {
        let start = self.pending_start();
        let (quote, name) = if self.state == ScanState::DoubleQuoteString {
            ('"', "double-quote string")
        } else {
            ('\'', "single-quote string")
        };
        let message = Diagnostic::new(
            self.source,
            &format!("Unterminated {}", name),
            self.last,
            format!("unterminated string: expected closing `{}`", quote),
        )
        .with_start(start, format!("start of {}", name))
        .render();
        ParseError::UnterminatedString {
            start,
            quote,
            message,
        }
    }

    fn unterminated_comment(&self) -> ParseError {
        let start = self.pending_start();
        let depth = self.comment_depth;
        let message = Diagnostic::new(
            self.source,
            "Unterminated multi-line comment",
            self.last,
            format!(
                "unterminated multi-line comment: missing {} closing delimiter{} `|#`",
                depth,
                if depth == 1 { "" } else { "s" }
            ),
        )
        .with_start(start, "start of multi-line comment")
        .render();
        ParseError::UnterminatedMultiLineComment {
            start,
            depth,
            message,
        }
    }
}

/// Tokenize a source string
#[instrument(skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let tokens = Scanner::new(source).run()?;
    debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
