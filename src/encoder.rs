//! Text renderings of a document payload.
//!
//! Two forms, both of which round-trip through `Doc::parse` to a
//! structurally equal document:
//!
//! - **Compact**: no inter-token whitespace — also the canonical form that
//!   equality, ordering, and hashing are defined over.
//! - **Pretty**: two-space indent per level, `": "` key separator, one entry
//!   per line. Empty containers render `{ }` and `[ ]` — the space marks
//!   empty-but-set as visibly different from a zero-width fragment.
//!
//! Scalar tokens are delegated to `serde_json` so escaping and number
//! formatting stay byte-identical between the two forms.

use serde_json::Value;

/// Canonical compact rendering of a payload node.
pub(crate) fn compact(node: &Value) -> Option<String> {
    serde_json::to_string(node).ok()
}

/// Canonical-text structural equality. Key order is part of identity, since
/// insertion order is part of the serialization contract.
pub(crate) fn nodes_equal(a: &Value, b: &Value) -> bool {
    match (compact(a), compact(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Pretty rendering of a payload node.
pub(crate) fn pretty(node: &Value) -> String {
    let mut out = String::new();
    render(node, 0, &mut out);
    out
}

/// Recursive pretty printer. Containers open on the current line, indent
/// their entries one level, and close at the parent indent.
fn render(node: &Value, depth: usize, out: &mut String) {
    match node {
        Value::Object(map) if map.is_empty() => out.push_str("{ }"),
        Value::Array(items) if items.is_empty() => out.push_str("[ ]"),
        Value::Object(map) => {
            out.push_str("{\n");
            let entry_indent = indent(depth + 1);
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&entry_indent);
                out.push_str(&scalar_token(&Value::String(key.clone())));
                out.push_str(": ");
                render(value, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&indent(depth));
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            let entry_indent = indent(depth + 1);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&entry_indent);
                render(item, depth + 1, out);
            }
            out.push('\n');
            out.push_str(&indent(depth));
            out.push(']');
        }
        leaf => out.push_str(&scalar_token(leaf)),
    }
}

/// Emit one scalar leaf (null, bool, number, string) as its JSON token.
/// `serde_json` cannot fail on a leaf value; the fallback keeps the output
/// parseable regardless.
fn scalar_token(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Generate a 2-space-per-level indentation string.
fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
