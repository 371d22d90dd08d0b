//! Error types for path queries.
//!
//! This is the only error type in the crate: malformed document or path text
//! and unset propagation are handled locally as unset values and never
//! surface as errors. Only a genuine structural miss at query time — a
//! missing key, an out-of-range index, an array operation on a scalar —
//! reaches the error side of `Doc::read`.

use thiserror::Error;

/// A syntactically applicable path that found no value in the document.
/// The message names the attempted path, rendered with its sigil.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no value found at {path}")]
pub struct ReadError {
    path: String,
}

impl ReadError {
    pub(crate) fn not_found(path: String) -> Self {
        ReadError { path }
    }

    /// The rendered path expression the query attempted.
    pub fn path(&self) -> &str {
        &self.path
    }
}
