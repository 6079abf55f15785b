pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod report;
pub mod simplify;
pub mod tokenizer;

#[cfg(test)]
mod tests_comprehensive;

pub use ast::{ListNode, ParseNode, Position, Token, TokenKind};
#[cfg(feature = "pretty-errors")]
pub use error::format_error;
pub use error::{ErrorCode, ParseError, ParseResult};
pub use parser::{parse, parse_root, parse_with_options, ParseOptions, Parser};
pub use report::{ErrorReport, ParseOutcome, TokenizationResult};
pub use simplify::{to_simplified_parse_trees, SimplifiedTree, SimplifyOptions};
pub use tokenizer::{tokenize, ScanState, Scanner};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let source = "(say hello)";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_results_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseResult<Vec<ParseNode>>>();
        assert_send_sync::<TokenizationResult>();
    }
}
