//! Lossy rendering of parse trees as nested arrays of lexemes

use crate::ast::ParseNode;
use serde::{Deserialize, Serialize};

/// A lexeme, or a list of simplified children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimplifiedTree {
    Atom(String),
    List(Vec<SimplifiedTree>),
}

impl SimplifiedTree {
    pub fn atom(lexeme: impl Into<String>) -> Self {
        SimplifiedTree::Atom(lexeme.into())
    }
}

impl From<&str> for SimplifiedTree {
    fn from(lexeme: &str) -> Self {
        SimplifiedTree::Atom(lexeme.to_string())
    }
}

impl From<Vec<SimplifiedTree>> for SimplifiedTree {
    fn from(children: Vec<SimplifiedTree>) -> Self {
        SimplifiedTree::List(children)
    }
}

/// Leaves to keep while simplifying; independent of the options used to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifyOptions {
    pub include_comments: bool,
    pub include_whitespace: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            include_whitespace: true,
        }
    }
}

/// Replace every list with the array of its kept children and every leaf with its lexeme
pub fn to_simplified_parse_trees(
    source: &str,
    trees: &[ParseNode],
    options: SimplifyOptions,
) -> Vec<SimplifiedTree> {
    trees
        .iter()
        .filter_map(|tree| simplify_node(source, tree, options))
        .collect()
}

fn simplify_node(source: &str, node: &ParseNode, options: SimplifyOptions) -> Option<SimplifiedTree> {
    match node {
        ParseNode::Leaf(token) => {
            if token.kind.is_whitespace() && !options.include_whitespace {
                return None;
            }
            if token.kind.is_comment() && !options.include_comments {
                return None;
            }
            Some(SimplifiedTree::atom(token.lexeme(source)))
        }
        ParseNode::List(list) => Some(SimplifiedTree::List(to_simplified_parse_trees(
            source,
            list.children(),
            options,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_with_options, ParseOptions};

    fn list(children: Vec<SimplifiedTree>) -> SimplifiedTree {
        SimplifiedTree::List(children)
    }

    fn atom(lexeme: &str) -> SimplifiedTree {
        SimplifiedTree::from(lexeme)
    }

    #[test]
    fn test_simplify_keeps_everything_by_default() {
        let source = "; Hello\n(say (name [x 1 \"y\"]))";
        let trees = parse(source).unwrap();
        let simplified = to_simplified_parse_trees(source, &trees, SimplifyOptions::default());

        let expected = vec![
            atom("; Hello\n"),
            list(vec![
                atom("("),
                atom("say"),
                atom(" "),
                list(vec![
                    atom("("),
                    atom("name"),
                    atom(" "),
                    list(vec![
                        atom("["),
                        atom("x"),
                        atom(" "),
                        atom("1"),
                        atom(" "),
                        atom("\"y\""),
                        atom("]"),
                    ]),
                    atom(")"),
                ]),
                atom(")"),
            ]),
        ];
        assert_eq!(simplified, expected);
    }

    #[test]
    fn test_simplify_serializes_as_nested_arrays() {
        let source = "(a [b])";
        let trees = parse(source).unwrap();
        let simplified = to_simplified_parse_trees(source, &trees, SimplifyOptions::default());
        let json = serde_json::to_string(&simplified).unwrap();
        assert_eq!(json, r#"[["(","a"," ",["[","b","]"],")"]]"#);
    }

    #[test]
    fn test_simplify_filters_independently_of_parse() {
        let source = "(a ; c\n b)";
        let trees = parse(source).unwrap();
        let options = SimplifyOptions {
            include_comments: false,
            include_whitespace: false,
        };
        let simplified = to_simplified_parse_trees(source, &trees, options);
        assert_eq!(
            simplified,
            vec![list(vec![atom("("), atom("a"), atom("b"), atom(")")])]
        );
    }

    #[test]
    fn test_simplify_cannot_restore_what_parse_dropped() {
        let source = "(a b)";
        let parse_options = ParseOptions {
            include_whitespace: false,
            include_list_delimiters: false,
            ..ParseOptions::default()
        };
        let trees = parse_with_options(source, parse_options).unwrap();
        let simplified = to_simplified_parse_trees(source, &trees, SimplifyOptions::default());
        assert_eq!(simplified, vec![list(vec![atom("a"), atom("b")])]);
    }
}
