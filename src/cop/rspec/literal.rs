//! Recursive literal classification over Prism nodes.
//!
//! A node is literal when it is written entirely as constant data: either a
//! simple literal (`5`, `:foo`, `nil`, `/bar/`, ...) or a composite built
//! from nothing but other literals (`[1, [2, 3]]`, `{ a: 1 }`, `1..5`).
//! A single non-literal child anywhere disqualifies the whole composite.

/// Whether `node` denotes a literal value.
///
/// Total over every node kind: anything unrecognized (identifiers, calls,
/// interpolated strings, splats, future node kinds) is non-literal.
pub fn is_literal(node: &ruby_prism::Node<'_>) -> bool {
    is_simple_literal(node) || is_composite_literal(node)
}

/// Atomic literal kinds. Prism gives interpolated strings, symbols and
/// regexps distinct node kinds, so `StringNode` and friends are already
/// interpolation-free, and a plain regexp is a leaf rather than a
/// composite with option children.
fn is_simple_literal(node: &ruby_prism::Node<'_>) -> bool {
    node.as_true_node().is_some()
        || node.as_false_node().is_some()
        || node.as_nil_node().is_some()
        || node.as_integer_node().is_some()
        || node.as_float_node().is_some()
        || node.as_string_node().is_some()
        || node.as_symbol_node().is_some()
        || node.as_imaginary_node().is_some()
        || node.as_rational_node().is_some()
        || node.as_regular_expression_node().is_some()
}

/// Composite literal kinds: literal iff every child is literal. The
/// iterators short-circuit on the first non-literal child. Empty arrays
/// and hashes are literal by vacuous truth — all data, no computation.
fn is_composite_literal(node: &ruby_prism::Node<'_>) -> bool {
    if let Some(array) = node.as_array_node() {
        return array.elements().iter().all(|e| is_literal(&e));
    }
    // Hash elements are assoc or assoc-splat nodes; a splat never
    // classifies as literal, so `{ **opts }` is rejected below.
    if let Some(hash) = node.as_hash_node() {
        return hash.elements().iter().all(|e| is_literal(&e));
    }
    if let Some(hash) = node.as_keyword_hash_node() {
        return hash.elements().iter().all(|e| is_literal(&e));
    }
    if let Some(pair) = node.as_assoc_node() {
        return is_literal(&pair.key()) && is_literal(&pair.value());
    }
    if let Some(range) = node.as_range_node() {
        // Beginless/endless ranges have a missing endpoint, which passes
        // vacuously. Covers both `..` and `...` forms.
        let left_ok = range.left().is_none_or(|l| is_literal(&l));
        let right_ok = range.right().is_none_or(|r| is_literal(&r));
        return left_ok && right_ok;
    }
    false
}
