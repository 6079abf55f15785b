/// Comprehensive test suite for tokenizer and parser
/// Tests edge cases, error conditions, nested structures
use crate::*;

#[cfg(test)]
mod parser_comprehensive_tests {
    use super::*;

    fn reconstruct(source: &str) -> String {
        tokenize(source)
            .unwrap()
            .iter()
            .map(|token| token.lexeme(source))
            .collect()
    }

    #[test]
    fn test_reconstruct_mixed_document() {
        let sources = [
            "",
            " ",
            "\n\n",
            "word",
            "(a b c)",
            "; comment only",
            "#| block |#",
            "(let ([x 1] {y 'two'}) ; trailing\n  \"three\" #| nested #| deeper |# |#)\n",
            "\t(\ta\t)\r\n",
            "(quote #t #f |x| a#b)",
            "\"multi\nline\nstring\"",
            "(é \"ü\" 'ß')",
        ];

        for source in sources {
            assert_eq!(reconstruct(source), source);
        }
    }

    #[test]
    fn test_nine_bracket_pairs() {
        let pairs = [
            ("()", true),
            ("(]", false),
            ("(}", false),
            ("[)", false),
            ("[]", true),
            ("[}", false),
            ("{)", false),
            ("{]", false),
            ("{}", true),
        ];

        for (source, ok) in pairs {
            let result = parse(source);
            assert_eq!(result.is_ok(), ok, "{}", source);
            if let Err(error) = result {
                assert_eq!(error.code(), ErrorCode::DelimMismatch);
                assert_eq!(error.nesting_level(), Some(0));
            }
        }
    }

    #[test]
    fn test_balanced_nesting() {
        let source = "(()(()(((((()))))())())((())(())())(())()()()())";
        let trees = parse(source).unwrap();
        assert_eq!(trees.len(), 1);

        fn depth(node: &ParseNode) -> usize {
            match node {
                ParseNode::Leaf(_) => 0,
                ParseNode::List(list) => 1 + list.children().iter().map(depth).max().unwrap_or(0),
            }
        }
        assert_eq!(depth(&trees[0]), 8);
    }

    #[test]
    fn test_unbalanced_single_delimiters() {
        for source in ["(", "[", "{", ")", "]", "}"] {
            assert!(parse(source).is_err(), "{}", source);
        }
    }

    #[test]
    fn test_multi_line_comment_nesting() {
        assert!(parse("#|a#|b|#c|#").is_ok());

        for source in ["#|", "#|#", "#||", "#|#|", "#|#||", "#|#||#", "#|#||#|"] {
            let error = parse(source).unwrap_err();
            assert_eq!(
                error.code(),
                ErrorCode::UnterminatedMultiLineComment,
                "{}",
                source
            );
        }
    }

    #[test]
    fn test_comment_inside_list() {
        let source = "(a #| (not a list) |# b)";
        let trees = parse(source).unwrap();
        let list = trees[0].as_list().unwrap();
        assert!(list.children().iter().all(|child| !child.is_list()));
        assert!(list
            .children()
            .iter()
            .any(|child| child.as_token().map(|t| t.kind) == Some(TokenKind::MultiLineComment)));
    }

    #[test]
    fn test_delimiters_inside_strings_are_ignored() {
        let source = "(print \")]}\" '([{')";
        let trees = parse(source).unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].length(), source.len());
    }

    #[test]
    fn test_escaped_quotes() {
        let source = "\"\\\"\"";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::DoubleQuoteString);

        let error = tokenize("\"").unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnterminatedString);

        let source = "'it\\'s'";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::SingleQuoteString);
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(parse("").unwrap().len(), 0);
        assert_eq!(parse(" ").unwrap().len(), 1);
        assert_eq!(parse(" \n\t ").unwrap().len(), 1);
    }

    #[test]
    fn test_simplify_end_to_end() {
        let source = "; Hello\n(say (name [x 1 \"y\"]))";
        let trees = parse(source).unwrap();
        let simplified = to_simplified_parse_trees(source, &trees, SimplifyOptions::default());
        let json = serde_json::to_value(&simplified).unwrap();
        let expected = serde_json::json!([
            "; Hello\n",
            ["(", "say", " ", ["(", "name", " ", ["[", "x", " ", "1", " ", "\"y\"", "]"], ")"], ")"]
        ]);
        assert_eq!(json, expected);
    }

    #[test]
    fn test_long_unterminated_string_is_elided() {
        let source = format!("(a \"{}", "line\n".repeat(20));
        let error = parse(&source).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnterminatedString);
        let message = error.message();
        assert!(message.contains("... |"));
        assert!(message.contains(" 1 | (a \"line"));
        assert!(message.contains("start of double-quote string"));
        // first two and last two source lines plus markers and headline
        assert_eq!(message.lines().count(), 8);
    }

    #[test]
    fn test_mismatch_across_lines() {
        let source = "(define (f x)\n  [g x\n  )\n";
        let error = parse(source).unwrap_err();
        assert_eq!(error.code(), ErrorCode::DelimMismatch);
        assert_eq!(error.nesting_level(), Some(1));
        let message = error.message();
        assert!(message.starts_with("Mismatched delimiter at line 3, column 3"));
        assert!(message.contains("2 |   [g x"));
        assert!(message.contains("3 |   )"));
        assert!(!message.contains("1 | (define"));
    }

    #[test]
    fn test_concurrent_parsing() {
        let sources = ["(a)", "[b c]", "{d {e}}", "(f"];
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let source = source.to_string();
                std::thread::spawn(move || parse(&source).is_ok())
            })
            .collect();
        let results: Vec<bool> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(results, vec![true, true, true, false]);
    }
}
