//! # expect-diff
//!
//! Structural diff highlighting for Jasmine-style assertion failure messages.
//!
//! A failing `expect(a).toEqual(b)` reports both values through the test
//! framework's pretty-printer, e.g.
//! `Expected Object({ foo: 'bar' }) to equal Object({ baz: 'qux' }).` followed
//! by a stack trace. This crate parses both printed values back into trees,
//! diffs them by path, and rewrites the message so only the differing parts
//! are highlighted. Prose and stack trace are left as they were, and messages
//! it does not recognize pass through untouched.
//!
//! ## Quick start
//!
//! ```rust
//! use expect_diff::format;
//!
//! let formatter = (
//!     |s: &str| format!("[-{s}-]"),
//!     |s: &str| format!("{{+{s}+}}"),
//!     |s: &str| format!("<~{s}~>"),
//! );
//!
//! let message = "Expected Object({ a: 1, b: 2 }) to equal Object({ a: 1, b: 3 }).";
//! assert_eq!(
//!     format(message, &formatter),
//!     "Expected Object({ a: 1, b: {+2+} }) to equal Object({ a: 1, b: [-3-] })."
//! );
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: printed value to [`ValueTree`]
//! - [`value`]: the tree model, paths and path lookup
//! - [`traverse`]: depth-first walk with skip control
//! - [`formatter`]: structural and word-level diff rendering
//! - [`word_diff`]: word-level text diff
//! - [`highlight`]: the [`Formatter`] trait and stock styles
//! - [`matchers`]: registry of recognized assertion messages
//! - [`options`]: caller configuration
//! - [`rewriter`]: message splitting and operand replacement
//! - [`marker`]: zero-width quote markers
//! - [`error`]: configuration errors

pub mod error;
pub mod formatter;
pub mod highlight;
pub mod marker;
pub mod matchers;
pub mod options;
pub mod parser;
pub mod rewriter;
pub mod traverse;
pub mod value;
pub mod word_diff;

pub use error::DiffError;
pub use formatter::{diff, diff_primitives, format_object, Comparison, Diff};
pub use highlight::{Ansi, Formatter, Plain, Side};
pub use matchers::{Matcher, MatcherConfig, MatcherRegistry};
pub use options::Options;
pub use parser::parse;
pub use rewriter::{format, format_with, Rewriter};
pub use traverse::{traverse, Visit, Visitor};
pub use value::{Key, Kind, NodeId, Path, Value, ValueTree};
