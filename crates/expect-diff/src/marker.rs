//! Zero-width markers around string quotes.
//!
//! The host pretty-printer wraps the quotes of every string literal in a
//! zero-width non-joiner so `'a, b'` can be told apart from two unquoted
//! tokens. The markers are invisible but must not leak into the final
//! message.

/// Zero-width non-joiner used to delimit quotes.
pub const MARKER: char = '\u{200C}';

/// A marked single quote: `MARKER ' MARKER`.
pub const QUOTE: &str = "\u{200C}'\u{200C}";

/// Remove every marker from `text`.
pub fn strip(text: &str) -> String {
    text.chars().filter(|&c| c != MARKER).collect()
}

/// Wrap `text` in marked quotes, the way the host prints a string value.
///
/// ```
/// use expect_diff::marker;
///
/// let quoted = marker::quote("bar");
/// assert_eq!(marker::strip(&quoted), "'bar'");
/// ```
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + QUOTE.len() * 2);
    out.push_str(QUOTE);
    out.push_str(text);
    out.push_str(QUOTE);
    out
}

/// Whether `text` is a complete marked string literal.
pub(crate) fn is_quoted(text: &str) -> bool {
    text.len() >= QUOTE.len() * 2 && text.starts_with(QUOTE) && text.ends_with(QUOTE)
}
