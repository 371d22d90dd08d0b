//! The tri-state document value.
//!
//! A [`Doc`] wraps an `Option<serde_json::Value>`: `None` is the Absent
//! nature, `Some` carries a scalar, array, or object payload. Objects keep
//! insertion order because `serde_json` is compiled with `preserve_order`
//! (IndexMap-backed `Map`), and that order is part of the serialization
//! contract.
//!
//! # Key design decisions
//!
//! - **Canonical-text identity**: equality, ordering, and hashing all go
//!   through the compact rendering, so they agree with each other and with
//!   the round-trip guarantee. Two objects with the same entries in a
//!   different order render differently and are therefore distinct.
//! - **Unset never compares equal**: every comparison involving an unset
//!   operand yields `None`, including unset-vs-unset.
//! - **Snapshot iteration**: [`Doc::iter`] clones the children it will
//!   yield, so a traversal never observes mutation of the receiver.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use crate::encoder;

/// The nature of a document value: which side of the tagged union it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nature {
    /// Unset: no value, no nature beyond absence itself.
    Absent,
    /// One primitive: text, integer, real, boolean, or null.
    Scalar,
    /// Ordered, zero-indexed sequence of documents.
    Array,
    /// Ordered mapping of unique text keys to documents.
    Object,
}

/// A JSON-like structural document value with tri-state semantics.
///
/// Created by parsing text ([`Doc::parse`]), typed construction (the `From`
/// impls, [`Doc::entry`]), or the algebra in the crate root. Mutated only by
/// the named mutators (`merge`, `replace`, `copy_from`, `pipe`, `+=`); every
/// other operation returns a new value and leaves its operands untouched.
/// A document exclusively owns its children — no shared subtrees, no cycles.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    pub(crate) node: Option<Value>,
}

impl Doc {
    /// The unset document: no nature, absorbs most binary operators.
    pub fn unset() -> Self {
        Doc { node: None }
    }

    /// Wrap an already-built `serde_json::Value`.
    pub fn from_value(value: Value) -> Self {
        Doc { node: Some(value) }
    }

    /// Parse document text. Malformed input yields the unset document, never
    /// an error — callers wanting a hard failure must check [`Doc::is_set`].
    ///
    /// The parser is whitespace-insensitive, accepts top-level scalars, and
    /// infers the nature from the leading token.
    pub fn parse(text: &str) -> Self {
        Doc {
            node: serde_json::from_str(text).ok(),
        }
    }

    /// Build a one-property object from a name and a value — the seed for
    /// typed object construction. An unset value yields an unset document.
    pub fn entry(key: &str, value: &Doc) -> Self {
        match &value.node {
            Some(v) => {
                let mut map = Map::new();
                map.insert(key.to_string(), v.clone());
                Doc::from_value(Value::Object(map))
            }
            None => Doc::unset(),
        }
    }

    /// Cast the receiver to Array nature. An unset receiver yields an empty
    /// but *set* array (distinct from unset); an Array receiver yields a
    /// clone; any other nature is a mismatch and yields unset.
    pub fn array(&self) -> Doc {
        match &self.node {
            None => Doc::from_value(Value::Array(Vec::new())),
            Some(Value::Array(_)) => self.clone(),
            Some(_) => Doc::unset(),
        }
    }

    /// Cast the receiver to Object nature. Mirrors [`Doc::array`].
    pub fn object(&self) -> Doc {
        match &self.node {
            None => Doc::from_value(Value::Object(Map::new())),
            Some(Value::Object(_)) => self.clone(),
            Some(_) => Doc::unset(),
        }
    }

    /// Which nature the document currently holds.
    pub fn nature(&self) -> Nature {
        match &self.node {
            None => Nature::Absent,
            Some(Value::Array(_)) => Nature::Array,
            Some(Value::Object(_)) => Nature::Object,
            Some(_) => Nature::Scalar,
        }
    }

    pub fn is_set(&self) -> bool {
        self.node.is_some()
    }

    pub fn is_scalar(&self) -> bool {
        self.nature() == Nature::Scalar
    }

    pub fn is_array(&self) -> bool {
        self.nature() == Nature::Array
    }

    pub fn is_object(&self) -> bool {
        self.nature() == Nature::Object
    }

    /// Object property lookup. Unset for a missing key or a non-object
    /// receiver — absence is not an error.
    pub fn get(&self, key: &str) -> Doc {
        match &self.node {
            Some(Value::Object(map)) => Doc { node: map.get(key).cloned() },
            _ => Doc::unset(),
        }
    }

    /// Array element lookup by zero-based index. Negative or out-of-range
    /// indices, and non-array receivers, yield unset.
    pub fn at(&self, index: i64) -> Doc {
        match &self.node {
            Some(Value::Array(items)) if index >= 0 => Doc {
                node: items.get(index as usize).cloned(),
            },
            _ => Doc::unset(),
        }
    }

    /// Element count, defined only for Array nature.
    pub fn array_length(&self) -> Option<usize> {
        match &self.node {
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    /// Structural membership test.
    ///
    /// Array: true iff any element equals the argument. Object: true iff any
    /// property value equals the argument, or the argument is a text scalar
    /// equal to one of the keys. Scalar: true iff the argument equals the
    /// receiver itself. Either side unset yields unset.
    pub fn contains(&self, other: &Doc) -> Option<bool> {
        let receiver = self.node.as_ref()?;
        let needle = other.node.as_ref()?;
        Some(match receiver {
            Value::Array(items) => items.iter().any(|v| encoder::nodes_equal(v, needle)),
            Value::Object(map) => map.iter().any(|(key, value)| {
                encoder::nodes_equal(value, needle)
                    || matches!(needle, Value::String(s) if s == key)
            }),
            scalar => encoder::nodes_equal(scalar, needle),
        })
    }

    /// Structural equality. Cross-nature comparison is `Some(false)`, never
    /// unset; either operand unset yields `None` — two unset documents are
    /// never equal to each other.
    pub fn structural_eq(&self, other: &Doc) -> Option<bool> {
        let a = self.node.as_ref()?;
        let b = other.node.as_ref()?;
        Some(encoder::nodes_equal(a, b))
    }

    /// Total order over set documents via canonical serialized text. Equal
    /// documents compare `Equal` regardless of nature; either operand unset
    /// yields `None`.
    pub fn compare(&self, other: &Doc) -> Option<Ordering> {
        let a = encoder::compact(self.node.as_ref()?)?;
        let b = encoder::compact(other.node.as_ref()?)?;
        Some(a.cmp(&b))
    }

    /// Hash over the canonical serialized form: stable for structurally
    /// equal documents regardless of how they were constructed.
    pub fn stable_hash(&self) -> Option<u64> {
        let text = self.serialize_compact()?;
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        Some(hasher.finish())
    }

    /// Lazy, finite, restartable-per-call traversal.
    ///
    /// Array: elements in order. Object: one single-property object per
    /// entry, in insertion order. Scalar: the receiver once. Absent and
    /// *empty* containers yield `None` — a non-iterable sequence, not an
    /// empty one — so callers must check before iterating.
    ///
    /// The iterator snapshots its items on creation; mutating the receiver
    /// mid-traversal is never observed.
    pub fn iter(&self) -> Option<DocIter> {
        let items: Vec<Doc> = match self.node.as_ref()? {
            Value::Array(elems) => {
                if elems.is_empty() {
                    return None;
                }
                elems.iter().cloned().map(Doc::from_value).collect()
            }
            Value::Object(map) => {
                if map.is_empty() {
                    return None;
                }
                map.iter()
                    .map(|(key, value)| {
                        let mut single = Map::new();
                        single.insert(key.clone(), value.clone());
                        Doc::from_value(Value::Object(single))
                    })
                    .collect()
            }
            _scalar => vec![self.clone()],
        };
        Some(DocIter {
            items: items.into_iter(),
        })
    }

    /// Compact rendering: no inter-token whitespace. Unset yields `None`.
    /// Round-trips through [`Doc::parse`] to a structurally equal document.
    pub fn serialize_compact(&self) -> Option<String> {
        self.node.as_ref().and_then(encoder::compact)
    }

    /// Pretty rendering: two-space indent, `": "` separator, one entry per
    /// line. Empty containers render `{ }` / `[ ]` — empty-but-set, not
    /// zero-width. Unset yields `None`. Round-trips through [`Doc::parse`].
    pub fn serialize_pretty(&self) -> Option<String> {
        self.node.as_ref().map(encoder::pretty)
    }
}

impl From<&str> for Doc {
    fn from(text: &str) -> Self {
        Doc::from_value(Value::String(text.to_string()))
    }
}

impl From<String> for Doc {
    fn from(text: String) -> Self {
        Doc::from_value(Value::String(text))
    }
}

impl From<i64> for Doc {
    fn from(n: i64) -> Self {
        Doc::from_value(Value::Number(n.into()))
    }
}

impl From<f64> for Doc {
    /// Non-finite reals carry no representable value, so they come in unset.
    fn from(f: f64) -> Self {
        Doc {
            node: serde_json::Number::from_f64(f).map(Value::Number),
        }
    }
}

impl From<bool> for Doc {
    fn from(b: bool) -> Self {
        Doc::from_value(Value::Bool(b))
    }
}

/// Snapshot iterator over a document's children. See [`Doc::iter`].
#[derive(Debug)]
pub struct DocIter {
    items: std::vec::IntoIter<Doc>,
}

impl Iterator for DocIter {
    type Item = Doc;

    fn next(&mut self) -> Option<Doc> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for DocIter {}
