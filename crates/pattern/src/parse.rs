//! Syntactic front end: pattern source to tree-sitter syntax tree.
//!
//! Patterns are JavaScript expressions, so the front end is the
//! `tree-sitter-javascript` grammar. tree-sitter recovers from errors by
//! inserting ERROR and MISSING nodes; any such node makes the whole source a
//! [`PatternError::Syntax`], since a partially understood pattern would yield
//! a partial DNA.

use std::fmt;

use tree_sitter::{Node, Parser, Tree};

use crate::error::PatternError;

/// A successfully parsed pattern: the source text plus its syntax tree.
pub struct PatternTree {
    source: String,
    tree: Tree,
}

impl PatternTree {
    /// The source text the tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node (`program`) of the syntax tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text spanned by `node`.
    pub fn text<'a>(&'a self, node: &Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// S-expression rendering of the tree, for diagnostics.
    pub fn to_sexp(&self) -> String {
        self.tree.root_node().to_sexp()
    }
}

impl fmt::Debug for PatternTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternTree")
            .field("source", &self.source)
            .field("root", &self.tree.root_node().kind())
            .finish()
    }
}

/// Parses `source` as a pattern expression.
///
/// ```rust
/// use pattern::{parse_pattern, PatternError};
///
/// let tree = parse_pattern("s(\"bd sd\").fast(2)").unwrap();
/// assert_eq!(tree.root().kind(), "program");
///
/// assert!(matches!(parse_pattern("{ invalid"), Err(PatternError::Syntax { .. })));
/// ```
pub fn parse_pattern(source: &str) -> Result<PatternTree, PatternError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|err| PatternError::ParserUnavailable(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| PatternError::ParserUnavailable("parser returned no tree".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root, source.as_bytes()));
    }

    Ok(PatternTree {
        source: source.to_owned(),
        tree,
    })
}

fn syntax_error(root: Node<'_>, source: &[u8]) -> PatternError {
    let Some(node) = Preorder::new(root).find(|n| n.is_error() || n.is_missing()) else {
        // has_error() without a locatable node: report the whole program.
        return PatternError::Syntax {
            line: 1,
            column: 1,
            message: "malformed pattern".into(),
        };
    };

    let position = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source).unwrap_or("");
        let snippet: String = text.chars().take(24).collect();
        format!("unexpected `{snippet}`")
    };

    PatternError::Syntax {
        line: position.row + 1,
        column: position.column + 1,
        message,
    }
}

/// Iterative pre-order walk over every node (named and anonymous).
///
/// Parents are yielded before children, children left to right. Each node is
/// visited exactly once.
pub(crate) struct Preorder<'tree> {
    stack: Vec<Node<'tree>>,
}

impl<'tree> Preorder<'tree> {
    pub(crate) fn new(root: Node<'tree>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_pattern_parses() {
        let tree = parse_pattern(r#"s("bass").slow(2).distort(5).lpf(500)"#).unwrap();
        assert!(!tree.root().has_error());
        assert!(tree.to_sexp().contains("call_expression"));
    }

    #[test]
    fn unclosed_block_reports_location() {
        let err = parse_pattern("{ invalid").unwrap_err();
        match err {
            PatternError::Syntax { line, .. } => assert_eq!(line, 1),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_call_rejected() {
        assert!(matches!(
            parse_pattern(r#"s("bd").fast(2"#),
            Err(PatternError::Syntax { .. })
        ));
        assert!(matches!(
            parse_pattern("note(\"c e g\"))"),
            Err(PatternError::Syntax { .. })
        ));
    }

    #[test]
    fn preorder_visits_parent_first() {
        let tree = parse_pattern("a(b(1))").unwrap();
        let calls: Vec<&str> = Preorder::new(tree.root())
            .filter(|n| n.kind() == "call_expression")
            .map(|n| tree.text(&n))
            .collect();
        assert_eq!(calls, vec!["a(b(1))", "b(1)"]);
    }

    #[test]
    fn preorder_terminates_on_deep_nesting() {
        let depth = 300;
        let source = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
        let tree = parse_pattern(&source).unwrap();
        let calls = Preorder::new(tree.root())
            .filter(|n| n.kind() == "call_expression")
            .count();
        assert_eq!(calls, depth);
    }
}
