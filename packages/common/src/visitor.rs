use serde::Serialize;
use sprig_parser::{ListNode, ParseNode, Token};
use std::collections::BTreeMap;

/// Visitor pattern for traversing parse trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, node: &ParseNode) {
        walk_tree(self, node);
    }

    fn visit_list(&mut self, list: &ListNode) {
        walk_list(self, list);
    }

    fn visit_token(&mut self, _token: &Token) {
        // Leaf node, no children to walk
    }
}

pub fn walk_trees<V: Visitor>(visitor: &mut V, trees: &[ParseNode]) {
    for tree in trees {
        visitor.visit_tree(tree);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, node: &ParseNode) {
    match node {
        ParseNode::Leaf(token) => visitor.visit_token(token),
        ParseNode::List(list) => visitor.visit_list(list),
    }
}

pub fn walk_list<V: Visitor>(visitor: &mut V, list: &ListNode) {
    for child in list.children() {
        visitor.visit_tree(child);
    }
}

/// Summary of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Retained tokens by kind name
    pub tokens: BTreeMap<String, usize>,
    pub lists: usize,
    pub max_depth: usize,
    #[serde(skip)]
    depth: usize,
}

impl TreeStats {
    pub fn collect(trees: &[ParseNode]) -> Self {
        let mut stats = TreeStats::default();
        walk_trees(&mut stats, trees);
        stats
    }

    pub fn token_count(&self) -> usize {
        self.tokens.values().sum()
    }
}

impl Visitor for TreeStats {
    fn visit_list(&mut self, list: &ListNode) {
        self.lists += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_list(self, list);
        self.depth -= 1;
    }

    fn visit_token(&mut self, token: &Token) {
        *self
            .tokens
            .entry(token.kind.name().to_string())
            .or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_parser::{parse, parse_with_options, ParseOptions};

    #[test]
    fn test_stats_counts_tokens_and_depth() {
        let trees = parse("(a [b {c}]) ; done").unwrap();
        let stats = TreeStats::collect(&trees);

        assert_eq!(stats.lists, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.tokens["word"], 3);
        assert_eq!(stats.tokens["open delimiter"], 3);
        assert_eq!(stats.tokens["close delimiter"], 3);
        assert_eq!(stats.tokens["single-line comment"], 1);
        assert_eq!(stats.token_count(), 13);
    }

    #[test]
    fn test_stats_only_see_retained_tokens() {
        let options = ParseOptions {
            include_comments: false,
            include_whitespace: false,
            include_list_delimiters: false,
        };
        let trees = parse_with_options("(a b) ; done", options).unwrap();
        let stats = TreeStats::collect(&trees);
        assert_eq!(stats.token_count(), 2);
        assert_eq!(stats.lists, 1);
    }

    #[test]
    fn test_custom_visitor() {
        struct WordCollector<'src> {
            source: &'src str,
            words: Vec<String>,
        }

        impl Visitor for WordCollector<'_> {
            fn visit_token(&mut self, token: &Token) {
                if token.kind == sprig_parser::TokenKind::Word {
                    self.words.push(token.lexeme(self.source).to_string());
                }
            }
        }

        let source = "(define (sq x) (* x x))";
        let trees = parse(source).unwrap();
        let mut collector = WordCollector {
            source,
            words: Vec::new(),
        };
        walk_trees(&mut collector, &trees);
        assert_eq!(collector.words, vec!["define", "sq", "x", "*", "x", "x"]);
    }
}
