use serde::{Deserialize, Serialize};

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Whitespace,
    Word,
    DoubleQuoteString,
    SingleQuoteString,
    ListDelimiterOpen,
    ListDelimiterClose,
    SingleLineComment,
    MultiLineComment,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::SingleLineComment | TokenKind::MultiLineComment
        )
    }

    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::ListDelimiterOpen | TokenKind::ListDelimiterClose
        )
    }

    /// Human readable name used in CLI output
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Word => "word",
            TokenKind::DoubleQuoteString => "double-quote string",
            TokenKind::SingleQuoteString => "single-quote string",
            TokenKind::ListDelimiterOpen => "open delimiter",
            TokenKind::ListDelimiterClose => "close delimiter",
            TokenKind::SingleLineComment => "single-line comment",
            TokenKind::MultiLineComment => "multi-line comment",
        }
    }
}

/// Source position: byte offset plus zero-based line and column.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// A token spanning `length` bytes of the source starting at `offset`.
///
/// The lexeme is not stored; slice it out of the source with [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        &source[self.offset..self.end()]
    }

    /// Byte offset one past the last byte of the token
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        self.kind.is_whitespace() || self.kind.is_comment()
    }
}

/// List node: everything between (and including) a matching pair of delimiters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListNode {
    pub children: Vec<ParseNode>,
    pub offset: usize,
    /// Bytes spanned, counting tokens left out of `children` by the parse options
    pub length: usize,
    pub line: usize,
    pub column: usize,
}

impl ListNode {
    pub(crate) fn opened_by(token: &Token) -> Self {
        Self {
            children: Vec::new(),
            offset: token.offset,
            length: 0,
            line: token.line,
            column: token.column,
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        &self.children
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Node of a parse tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParseNode {
    Leaf(Token),
    List(ListNode),
}

impl ParseNode {
    pub fn offset(&self) -> usize {
        match self {
            ParseNode::Leaf(token) => token.offset,
            ParseNode::List(list) => list.offset,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            ParseNode::Leaf(token) => token.length,
            ParseNode::List(list) => list.length,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseNode::Leaf(token) => token.line,
            ParseNode::List(list) => list.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseNode::Leaf(token) => token.column,
            ParseNode::List(list) => list.column,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ParseNode::List(_))
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ParseNode::Leaf(token) => Some(token),
            ParseNode::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            ParseNode::List(list) => Some(list),
            ParseNode::Leaf(_) => None,
        }
    }

    /// Source text covered by this node
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        &source[self.offset()..self.offset() + self.length()]
    }
}
