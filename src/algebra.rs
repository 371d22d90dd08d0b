//! The document combination algebra: add (`+`), merge, replace, copy, pipe.
//!
//! Each operator behaves differently depending on the nature of *both*
//! operands. `+` and `+=` are value-deriving (the assignment form rebinds the
//! receiver to the derived value); merge/replace/copy/pipe mutate the
//! receiver in place and are deliberately distinct named operations so that
//! in-place mutation is always visible at the call site.
//!
//! Tri-state propagation: `+`/`+=` absorb unset (either operand unset makes
//! the result unset). The mutators are structural constructors — merging or
//! piping into an unset receiver assigns a deep copy of the source instead.

use std::ops::{Add, AddAssign};

use serde_json::Value;

use crate::doc::Doc;

/// The cross-nature `+` table.
///
/// | left \ right | Scalar            | Array              | Object            |
/// |--------------|-------------------|--------------------|-------------------|
/// | Scalar       | `[left, right]`   | `[left] ++ right`  | `[left, right]`   |
/// | Array        | append right      | concatenate        | append right      |
/// | Object       | `[left, right]`   | `[left, right]`    | merge, right wins |
pub(crate) fn add_nodes(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            let mut items = a.clone();
            items.extend(b.iter().cloned());
            Value::Array(items)
        }
        (Value::Array(a), other) => {
            let mut items = a.clone();
            items.push(other.clone());
            Value::Array(items)
        }
        (Value::Object(a), Value::Object(b)) => {
            let mut map = a.clone();
            for (key, value) in b {
                map.insert(key.clone(), value.clone());
            }
            Value::Object(map)
        }
        (scalar, Value::Array(b)) if !scalar.is_object() => {
            let mut items = vec![scalar.clone()];
            items.extend(b.iter().cloned());
            Value::Array(items)
        }
        (l, r) => Value::Array(vec![l.clone(), r.clone()]),
    }
}

impl Add for &Doc {
    type Output = Doc;

    fn add(self, rhs: &Doc) -> Doc {
        match (&self.node, &rhs.node) {
            (Some(l), Some(r)) => Doc::from_value(add_nodes(l, r)),
            _ => Doc::unset(),
        }
    }
}

impl Add for Doc {
    type Output = Doc;

    fn add(self, rhs: Doc) -> Doc {
        &self + &rhs
    }
}

impl AddAssign<&Doc> for Doc {
    /// Assignment form of `+`: the receiver becomes the derived value,
    /// including becoming unset when either operand is unset.
    fn add_assign(&mut self, rhs: &Doc) {
        *self = &*self + rhs;
    }
}

impl Doc {
    /// Conservative structural combination, in place.
    ///
    /// Object receiver with object source: add-missing-only — keys already
    /// present are left untouched, only source-only keys are copied in.
    /// Array receiver: appends all source elements (or the whole source as
    /// one element if it is not an array). An unset receiver becomes a deep
    /// copy of the source; an unset source is a no-op. Any other pairing
    /// falls back to the `+` table in place, so merging a scalar into a
    /// scalar leaves a two-element array behind.
    pub fn merge(&mut self, source: &Doc) {
        let Some(src) = source.node.as_ref() else {
            return;
        };
        let Some(dst) = self.node.as_mut() else {
            self.node = Some(src.clone());
            return;
        };
        match (dst, src) {
            (Value::Object(dst_map), Value::Object(src_map)) => {
                for (key, value) in src_map {
                    if !dst_map.contains_key(key) {
                        dst_map.insert(key.clone(), value.clone());
                    }
                }
            }
            (Value::Array(dst_items), Value::Array(src_items)) => {
                dst_items.extend(src_items.iter().cloned());
            }
            (Value::Array(dst_items), other) => {
                dst_items.push(other.clone());
            }
            (dst_other, src_other) => {
                let derived = add_nodes(dst_other, src_other);
                *dst_other = derived;
            }
        }
    }

    /// The object mirror of [`Doc::merge`], in place: update-existing-only.
    ///
    /// Object receiver with object source: only keys already present in the
    /// receiver are overwritten from the source; source-only keys are
    /// ignored. Any other pairing of set operands is a full overwrite.
    /// Replacing with an unset source, or replacing an unset receiver, is a
    /// no-op — unlike [`Doc::copy_from`].
    pub fn replace(&mut self, source: &Doc) {
        let Some(src) = source.node.as_ref() else {
            return;
        };
        let Some(dst) = self.node.as_mut() else {
            return;
        };
        match (dst, src) {
            (Value::Object(dst_map), Value::Object(src_map)) => {
                for (key, value) in src_map {
                    if let Some(slot) = dst_map.get_mut(key) {
                        *slot = value.clone();
                    }
                }
            }
            (dst_other, src_other) => *dst_other = src_other.clone(),
        }
    }

    /// Unconditional full overwrite, including becoming unset when the
    /// source is unset.
    pub fn copy_from(&mut self, source: &Doc) {
        self.node = source.node.clone();
    }

    /// Accumulating combination: [`Doc::merge`], except an unset source is
    /// silently ignored — a pipe accumulates and never resets its target.
    pub fn pipe(&mut self, source: &Doc) {
        if source.is_set() {
            self.merge(source);
        }
    }
}
