//! # tridoc
//!
//! Tri-state, JSON-like document values with a merge/replace/add algebra and
//! textual path addressing.
//!
//! Every value in this crate is either **unset** (no information) or **set**
//! (carries a value). Unset is first-class, not exceptional: parsing malformed
//! text, reading a missing key, or combining with an unset operand yields an
//! unset value — never a panic and never an error. In Rust terms the tri-state
//! contract is carried by `Option`: `None` means unset wherever an operation
//! can absorb absence.
//!
//! A [`Doc`] has exactly one *nature* at a time — absent, scalar, array, or
//! object — and an object preserves property insertion order (via
//! `serde_json`'s `preserve_order` feature). A [`PathExpr`] is a canonical
//! address into a document: the fixed `$?` sigil plus an RFC 9535 JSONPath
//! body, validated by the `serde_json_path` crate.
//!
//! ## Quick start
//!
//! ```rust
//! use tridoc::{Doc, PathExpr};
//!
//! let doc = Doc::parse(r#"{"store":{"books":["Dune","Emma"]}}"#);
//! let path = PathExpr::parse("$?.store.books[0]");
//!
//! let found = doc.read(&path).expect("both operands set").unwrap();
//! assert_eq!(found.serialize_compact().as_deref(), Some("\"Dune\""));
//!
//! // A missing target is the error side of the Result, naming the path.
//! let missing = doc.read(&PathExpr::parse("$?.store.books[9]")).unwrap();
//! assert!(missing.unwrap_err().to_string().contains("books[9]"));
//! ```
//!
//! ## Modules
//!
//! - [`doc`] — the [`Doc`] value: construction, natures, lookup, iteration
//! - [`path`] — the [`PathExpr`] address: validation, concatenation, flattening
//! - [`error`] — [`ReadError`], the error side of [`Doc::read`]
//! - `algebra` — add (`+`), merge, replace, copy, pipe
//! - `encoder` — compact and pretty text renderings
//! - `query` — [`Doc::read`] path evaluation

pub mod doc;
pub mod error;
pub mod path;

mod algebra;
mod encoder;
mod query;

pub use doc::{Doc, DocIter, Nature};
pub use error::ReadError;
pub use path::{PathExpr, PATH_SIGIL};
