//! Feature extraction: every resolvable call expression becomes a
//! [`FeatureCall`].
//!
//! The walk is pre-order over the whole tree, so a chain such as
//! `s("bd").fast(2)` yields the outer `fast` call before the inner `s` call.
//! Downstream canonicalization sorts, so nothing relies on this order beyond
//! it being deterministic.

use tracing::trace;
use tree_sitter::Node;

use crate::feature::{Argument, FeatureCall};
use crate::literal::{decode_string_literal, first_template_segment, parse_number_literal};
use crate::parse::{PatternTree, Preorder};

/// Collects one [`FeatureCall`] per call expression with a resolvable callee.
///
/// Callees resolve from a plain identifier (`foo(...)`) or from the property
/// of a member expression (`x.foo(...)`, `x?.foo(...)`). Calls whose callee is
/// anything else (`f()()`, `(a || b)()`) are skipped, but their subtrees are
/// still searched. Arguments without a literal value are dropped.
///
/// ```rust
/// use pattern::{extract_features, parse_pattern, Argument};
///
/// let tree = parse_pattern(r#"note("c e g").gain(0.8)"#).unwrap();
/// let calls = extract_features(&tree);
///
/// assert_eq!(calls.len(), 2);
/// assert_eq!(calls[0].name, "gain");
/// assert_eq!(calls[0].args, vec![Argument::Number(0.8)]);
/// assert_eq!(calls[1].name, "note");
/// ```
pub fn extract_features(tree: &PatternTree) -> Vec<FeatureCall> {
    let source = tree.source().as_bytes();
    let mut features = Vec::new();

    for node in Preorder::new(tree.root()) {
        if node.kind() != "call_expression" {
            continue;
        }
        let Some(name) = callee_name(node, source) else {
            continue;
        };
        let args = node
            .child_by_field_name("arguments")
            .map(|args| collect_arguments(args, source))
            .unwrap_or_default();
        features.push(FeatureCall { name, args });
    }

    trace!(feature_count = features.len(), "features_extracted");
    features
}

fn callee_name(call: Node<'_>, source: &[u8]) -> Option<String> {
    let callee = call.child_by_field_name("function")?;
    let name_node = match callee.kind() {
        "identifier" => callee,
        "member_expression" => callee.child_by_field_name("property")?,
        _ => return None,
    };
    let name = name_node.utf8_text(source).ok()?;
    (!name.is_empty()).then(|| name.to_owned())
}

fn collect_arguments(args: Node<'_>, source: &[u8]) -> Vec<Argument> {
    // Tagged templates (s`bd sd`) put the template where the argument list goes.
    if args.kind() == "template_string" {
        return literal_only(vec![classify_argument(args, source)]);
    }

    let mut cursor = args.walk();
    let classified = args
        .named_children(&mut cursor)
        .filter(|arg| arg.kind() != "comment")
        .map(|arg| classify_argument(arg, source))
        .collect();
    literal_only(classified)
}

fn literal_only(args: Vec<Argument>) -> Vec<Argument> {
    args.into_iter().filter(Argument::is_literal).collect()
}

/// Resolves one argument node to its [`Argument`] variant.
pub(crate) fn classify_argument(node: Node<'_>, source: &[u8]) -> Argument {
    let text = node.utf8_text(source).unwrap_or("");
    match node.kind() {
        "number" => parse_number_literal(text).map_or(Argument::Unsupported, Argument::Number),
        "unary_expression" => {
            signed_number(node, source).map_or(Argument::Unsupported, Argument::Number)
        }
        "string" => Argument::Text(decode_string_literal(text)),
        "template_string" => Argument::Text(first_template_segment(text)),
        "true" => Argument::Bool(true),
        "false" => Argument::Bool(false),
        _ => Argument::Unsupported,
    }
}

/// `-0.5` and `+3` are unary expressions over a number token.
fn signed_number(node: Node<'_>, source: &[u8]) -> Option<f64> {
    let operator = node.child_by_field_name("operator")?.kind();
    let operand = node.child_by_field_name("argument")?;
    if operand.kind() != "number" {
        return None;
    }
    let value = parse_number_literal(operand.utf8_text(source).ok()?)?;
    match operator {
        "-" => Some(-value),
        "+" => Some(value),
        _ => None,
    }
}
