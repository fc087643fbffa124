//! Field path subsystem
//!
//! Turns a field path such as `personal.values[].values[2].tags` into
//! segments and walks a `serde_json::Value` with them, reporting every
//! located value under its concrete path (fan-out markers replaced by the
//! index actually visited).
//!
//! # Segment forms
//!
//! - `name` plain property
//! - `items[]` every element of an array
//! - `items[*]` same as `items[]`
//! - `items[3]` one fixed element
//!
//! A missing property, a non-array where an index marker was used, or an
//! out-of-range fixed index is reported as unresolved. An empty path or a
//! null root resolves nothing and reports nothing.

mod resolver;
mod tokenizer;

pub use resolver::{resolve, resolve_values, PathVisitor, Resolution};
pub use tokenizer::{tokenize, IndexKind, PathError, Segment};
