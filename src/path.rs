//! The path expression: a canonical textual address into a document.
//!
//! A [`PathExpr`] is the fixed two-character sigil `$?` plus an RFC 9535
//! JSONPath body. The sigil is *not* stored with the body — it is reattached
//! on rendering — so the concatenation algebra never duplicates or misplaces
//! it. A path is either unset or its body is valid; every constructor and
//! every combining operation re-validates and collapses to unset on failure.
//!
//! # Key design decisions
//!
//! - **Grammar delegation**: validation is delegated to `serde_json_path`
//!   (RFC 9535) rather than hand-rolled — the grammar's recursive-descent,
//!   wildcard, slice, and filter forms are already solved there. A body is
//!   valid iff `"$" + body` parses, and validation produces the compiled
//!   query, which the path stores so evaluation never re-parses it.
//! - **Dashed identifiers**: bare identifiers admit `-` alongside letters,
//!   digits, and `_`, but RFC 9535 shorthand names do not. The adapter
//!   bridges the two before delegation: a dotted segment containing `-` is
//!   rewritten into the bracket-quoted form the grammar accepts
//!   (`.foo-bar` becomes `['foo-bar']`), and the rewritten body is the
//!   stored and rendered one.
//! - **Two joining modes**: joining two paths concatenates their bodies and
//!   re-validates — a set body is empty or already begins its own segment,
//!   so no separator is ever missing. Joining raw text or a single
//!   character appends with no separator either, which is how bracketed
//!   indices and compound identifiers are built.
//! - **Flattening**: piping a document fragment appends its scalar texts
//!   depth-first with no separator; a segment whose addition would
//!   invalidate the path is skipped, not fatal.

use std::ops::{Add, AddAssign};

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::doc::Doc;

/// The fixed prefix every rendered path carries. Never stored in the body.
pub const PATH_SIGIL: &str = "$?";

/// A validated address into a [`Doc`], or unset.
///
/// A set path holds its normalized body and the query compiled from it;
/// both come from the same validation step, so they cannot disagree.
#[derive(Debug, Clone, Default)]
pub struct PathExpr {
    body: Option<String>,
    compiled: Option<JsonPath>,
}

impl PathExpr {
    /// The unset path: no body, absorbs the value-returning operators.
    pub fn unset() -> Self {
        PathExpr {
            body: None,
            compiled: None,
        }
    }

    /// The root form: the only valid path with an empty body. Renders as
    /// the sigil alone and addresses the whole document.
    pub fn root() -> Self {
        checked(String::new())
    }

    /// Parse path text, with or without the leading sigil. An invalid body
    /// yields the unset path, never an error.
    pub fn parse(text: &str) -> Self {
        let body = text.strip_prefix(PATH_SIGIL).unwrap_or(text);
        checked(body.to_string())
    }

    pub fn is_set(&self) -> bool {
        self.body.is_some()
    }

    /// The validated, normalized body without its sigil.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The query compiled when the body was validated.
    pub(crate) fn compiled(&self) -> Option<&JsonPath> {
        self.compiled.as_ref()
    }

    /// The full textual form: sigil plus body. Unset renders to `None`.
    pub fn render(&self) -> Option<String> {
        self.body.as_ref().map(|b| format!("{PATH_SIGIL}{b}"))
    }

    /// Flatten a document fragment onto this path, in place.
    ///
    /// A scalar fragment contributes one segment: its text content for a
    /// text scalar, its compact token otherwise. Array and object fragments
    /// contribute their children depth-first in order, with no separator
    /// between segments. A segment that would leave the body invalid is
    /// skipped. An unset fragment is ignored; piping into an unset path
    /// starts accumulating from the root form.
    pub fn pipe(&mut self, fragment: &Doc) {
        let Some(node) = fragment.node.as_ref() else {
            return;
        };
        let mut body = self.body.take().unwrap_or_default();
        append_fragment(&mut body, node);
        *self = checked(body);
    }
}

/// A body is valid iff `"$" + body` is an RFC 9535 query. The empty body
/// is the root form: `"$"` alone parses.
fn valid_body(body: &str) -> bool {
    JsonPath::parse(&format!("${body}")).is_ok()
}

/// Normalize and validate a candidate body into a path, collapsing to
/// unset on failure. The compiled query is kept alongside the body.
fn checked(candidate: String) -> PathExpr {
    let body = normalize_body(&candidate);
    match JsonPath::parse(&format!("${body}")).ok() {
        Some(compiled) => PathExpr {
            body: Some(body),
            compiled: Some(compiled),
        },
        None => PathExpr::unset(),
    }
}

/// Rewrite dashed bare identifiers into the bracket-quoted selector form
/// the RFC grammar accepts: `.foo-bar` becomes `['foo-bar']`, and
/// `..foo-bar` becomes `..['foo-bar']`. Everything inside brackets or
/// quotes passes through untouched, so the rewrite is idempotent.
fn normalize_body(body: &str) -> String {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                let end = end_of_quoted(bytes, i);
                out.push_str(&body[i..end]);
                i = end;
            }
            b'[' => {
                depth += 1;
                out.push('[');
                i += 1;
            }
            b']' => {
                depth = depth.saturating_sub(1);
                out.push(']');
                i += 1;
            }
            b'.' => {
                if depth > 0 {
                    out.push('.');
                    i += 1;
                    continue;
                }
                let descent = bytes.get(i + 1) == Some(&b'.');
                let start = if descent { i + 2 } else { i + 1 };
                let mut j = start;
                while j < bytes.len() && is_identifier_byte(bytes[j]) {
                    j += 1;
                }
                let name = &body[start..j];
                if name.contains('-') {
                    if descent {
                        out.push_str("..");
                    }
                    out.push_str("['");
                    out.push_str(name);
                    out.push_str("']");
                } else {
                    out.push_str(&body[i..j]);
                }
                i = j;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b'\'' | b'"' | b'[' | b']' | b'.') {
                    i += 1;
                }
                out.push_str(&body[start..i]);
            }
        }
    }
    out
}

/// The bare-identifier charset: letters, digits, `_`, and `-`.
fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Advance past a quoted section, honoring backslash escapes. Returns the
/// index just after the closing quote, or the end of input if unterminated.
fn end_of_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i = (i + 2).min(bytes.len()),
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Recursive flattening engine: scalars append one segment, containers
/// recurse over children in order.
fn append_fragment(body: &mut String, node: &Value) {
    match node {
        Value::Array(items) => {
            for item in items {
                append_fragment(body, item);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                append_fragment(body, value);
            }
        }
        scalar => {
            let candidate = normalize_body(&format!("{body}{}", segment_text(scalar)));
            if valid_body(&candidate) {
                *body = candidate;
            }
        }
    }
}

/// The path text one scalar fragment contributes.
fn segment_text(scalar: &Value) -> String {
    match scalar {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

impl Add for &PathExpr {
    type Output = PathExpr;

    /// Concatenation; either side unset yields unset. A set body is empty
    /// or begins its own segment, so the bodies join without a separator
    /// and re-validate.
    fn add(self, rhs: &PathExpr) -> PathExpr {
        match (&self.body, &rhs.body) {
            (Some(l), Some(r)) => checked(format!("{l}{r}")),
            _ => PathExpr::unset(),
        }
    }
}

impl Add for PathExpr {
    type Output = PathExpr;

    fn add(self, rhs: PathExpr) -> PathExpr {
        &self + &rhs
    }
}

impl Add<&str> for &PathExpr {
    type Output = PathExpr;

    /// Raw-text append with no separator, for bracketed indices and
    /// compound identifiers. An unset receiver stays unset.
    fn add(self, rhs: &str) -> PathExpr {
        match &self.body {
            Some(l) => checked(format!("{l}{rhs}")),
            None => PathExpr::unset(),
        }
    }
}

impl Add<&str> for PathExpr {
    type Output = PathExpr;

    fn add(self, rhs: &str) -> PathExpr {
        &self + rhs
    }
}

impl Add<char> for &PathExpr {
    type Output = PathExpr;

    fn add(self, rhs: char) -> PathExpr {
        let mut text = [0u8; 4];
        self + &*rhs.encode_utf8(&mut text)
    }
}

impl Add<char> for PathExpr {
    type Output = PathExpr;

    fn add(self, rhs: char) -> PathExpr {
        &self + rhs
    }
}

impl AddAssign<&PathExpr> for PathExpr {
    /// Mutating concatenation: an unset rhs is a no-op; an unset receiver
    /// assumes the rhs (the structural-constructor rule); otherwise the
    /// joined body is re-validated and may collapse to unset.
    fn add_assign(&mut self, rhs: &PathExpr) {
        if !rhs.is_set() {
            return;
        }
        if !self.is_set() {
            *self = rhs.clone();
            return;
        }
        *self = &*self + rhs;
    }
}

impl AddAssign<&str> for PathExpr {
    /// Mutating raw-text append. An unset receiver assumes the text when it
    /// stands alone as a valid body.
    fn add_assign(&mut self, rhs: &str) {
        if !self.is_set() {
            *self = checked(rhs.to_string());
            return;
        }
        *self = &*self + rhs;
    }
}

impl AddAssign<char> for PathExpr {
    fn add_assign(&mut self, rhs: char) {
        let mut text = [0u8; 4];
        *self += &*rhs.encode_utf8(&mut text);
    }
}
