//! Path evaluation: `Doc::read`.
//!
//! The query engine composes the two value types with the standard `Result`:
//! the outer `Option` is the tri-state short-circuit (either operand unset),
//! the inner `Result` carries either the addressed value or a [`ReadError`]
//! naming the attempted path.
//!
//! Evaluation runs the RFC 9535 query the path compiled when its body was
//! validated, so reading never re-parses the grammar. The node list it
//! returns is classified by the *shape* of the path:
//!
//! - A **singular** path (name and index selectors only) addresses at most
//!   one value: a hit wraps a deep copy in `Ok`, a miss — missing key,
//!   out-of-range index, array operation on a scalar — is the error side.
//! - A **non-singular** path (wildcard, slice, filter, recursive descent)
//!   always evaluates to `Ok` wrapping an array of every match. A wildcard
//!   over an empty array is degenerate but not failing: it yields an empty
//!   *set* array, which callers substitute away with `unwrap_or` if needed.

use serde_json::Value;

use crate::doc::Doc;
use crate::error::ReadError;
use crate::path::{PathExpr, PATH_SIGIL};

impl Doc {
    /// Evaluate a path against this document.
    ///
    /// Returns `None` when either operand is unset. Otherwise the body is
    /// evaluated and classified as described in the module docs.
    pub fn read(&self, path: &PathExpr) -> Option<Result<Doc, ReadError>> {
        let node = self.node.as_ref()?;
        let body = path.body()?;
        let matches: Vec<&Value> = path.compiled()?.query(node).all();

        if is_singular(body) {
            Some(match matches.first() {
                Some(found) => Ok(Doc::from_value((*found).clone())),
                None => Err(ReadError::not_found(format!("{PATH_SIGIL}{body}"))),
            })
        } else {
            let collected: Vec<Value> = matches.into_iter().cloned().collect();
            Some(Ok(Doc::from_value(Value::Array(collected))))
        }
    }
}

/// A body is singular when it contains no wildcard, filter, slice, or
/// recursive-descent form outside of quoted keys.
fn is_singular(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => i = skip_quoted(bytes, i),
            b'*' | b'?' | b':' => return false,
            b'.' if bytes.get(i + 1) == Some(&b'.') => return false,
            _ => i += 1,
        }
    }
    true
}

/// Advance past a quoted key, honoring backslash escapes. Returns the index
/// just after the closing quote (or the end of input if unterminated, which
/// a validated body never is).
fn skip_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}
