//! Message rewriting: find the operands in a failure message, diff them, and
//! splice the highlighted versions back in.
//!
//! Everything the diff does not own is left alone. The stack trace after the
//! last `".\n"` is reattached byte for byte, and a message no matcher
//! recognizes is returned unchanged.

use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::error::Result;
use crate::formatter;
use crate::highlight::Formatter;
use crate::marker;
use crate::matchers::{MatcherRegistry, Operand};
use crate::options::Options;
use crate::parser::parse;

static DEFAULT: LazyLock<Rewriter> = LazyLock::new(Rewriter::default);

/// Rewrite `message` with the built-in matchers.
///
/// ```
/// use expect_diff::{format, Plain};
///
/// let message = "Expected 1 to be 2.\n    at spec.js:3:5";
/// assert_eq!(format(message, &Plain), message);
/// ```
pub fn format<F>(message: &str, formatter: &F) -> String
where
    F: Formatter + ?Sized,
{
    DEFAULT.format(message, formatter)
}

/// Rewrite `message` with the built-in matchers extended by `options`.
///
/// Fails only when an option's matcher pattern is invalid.
pub fn format_with<F>(message: &str, formatter: &F, options: &Options) -> Result<String>
where
    F: Formatter + ?Sized,
{
    Ok(Rewriter::new(options)?.format(message, formatter))
}

/// A compiled matcher registry plus rewriting options. Build one once and
/// reuse it for every message of a test run.
#[derive(Debug, Clone)]
pub struct Rewriter {
    registry: MatcherRegistry,
    multiline: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::with_registry(MatcherRegistry::jasmine())
    }
}

impl Rewriter {
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self {
            registry: options.registry()?,
            multiline: options.multiline,
        })
    }

    pub fn with_registry(registry: MatcherRegistry) -> Self {
        Self {
            registry,
            multiline: false,
        }
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn registry(&self) -> &MatcherRegistry {
        &self.registry
    }

    /// Rewrite one failure message.
    pub fn format<F>(&self, message: &str, formatter: &F) -> String
    where
        F: Formatter + ?Sized,
    {
        let (matcher_message, stack_message) = split_stack(message);

        let Some(detection) = self.registry.detect(matcher_message) else {
            debug!("no matcher recognized the message, passing it through");
            return message.to_string();
        };

        let expected = parse(detection.expected.text);
        let actual = parse(detection.actual.text);
        debug!(
            matcher = detection.matcher.name(),
            expected = ?expected.root().kind(),
            actual = ?actual.root().kind(),
            "rewriting message"
        );

        let diff = formatter::diff(
            &expected,
            &actual,
            detection.matcher.comparison(),
            formatter,
        );

        let mut replacements = [
            Replacement::new(detection.expected, diff.expected),
            Replacement::new(detection.actual, diff.actual),
        ];
        replacements.sort_by_key(|r| r.start);

        let mut rewritten = strict_replace(matcher_message, &replacements, self.multiline);
        rewritten.push_str(stack_message);
        marker::strip(&rewritten)
    }
}

/// Split at the last `".\n"`: the period stays with the matcher message, the
/// newline starts the stack message. Without that boundary the whole message
/// is the matcher message.
pub fn split_stack(message: &str) -> (&str, &str) {
    match message.rfind(".\n") {
        Some(index) => message.split_at(index + 1),
        None => (message, ""),
    }
}

/// Replace `needle`, found at or after byte `start` of the input text,
/// with `with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement<'a> {
    pub start: usize,
    pub needle: &'a str,
    pub with: String,
}

impl<'a> Replacement<'a> {
    pub fn new(operand: Operand<'a>, with: String) -> Self {
        Self {
            start: operand.start,
            needle: operand.text,
            with,
        }
    }
}

/// Apply `replacements` left to right.
///
/// Each needle is searched from the later of the scan cursor and its own
/// start offset (shifted by earlier edits); the cursor then moves past the
/// inserted text, so replacements never overlap and an inserted span is never
/// matched again. A needle that cannot be found stops the remaining
/// replacements.
///
/// With `multiline`, whitespace and punctuation on both sides of each
/// replaced span are removed, without reaching back into an earlier
/// replacement.
pub fn strict_replace(text: &str, replacements: &[Replacement<'_>], multiline: bool) -> String {
    let mut out = text.to_string();
    let mut cursor = 0;

    for replacement in replacements {
        let shift = out.len() as isize - text.len() as isize;
        let from = cursor
            .max(replacement.start.saturating_add_signed(shift))
            .min(out.len());

        let Some(index) = out
            .get(from..)
            .and_then(|rest| rest.find(replacement.needle))
            .map(|found| from + found)
        else {
            warn!(
                needle = replacement.needle,
                from, "operand not found, leaving the rest of the message as is"
            );
            break;
        };

        let mut lhs = &out[..index];
        let mut rhs = &out[index + replacement.needle.len()..];
        if multiline {
            let kept = lhs[cursor..].trim_end_matches(is_space_or_punctuation).len();
            lhs = &lhs[..cursor + kept];
            rhs = rhs.trim_start_matches(is_space_or_punctuation);
        }

        cursor = lhs.len() + replacement.with.len();
        out = format!("{lhs}{}{rhs}", replacement.with);
    }

    out
}

fn is_space_or_punctuation(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacement<'a>(start: usize, needle: &'a str, with: &str) -> Replacement<'a> {
        Replacement {
            start,
            needle,
            with: with.to_string(),
        }
    }

    #[test]
    fn split_at_last_period_newline() {
        let (matcher, stack) = split_stack("Expected a.\nb to be c.\n    at x.js:1");
        assert_eq!(matcher, "Expected a.\nb to be c.");
        assert_eq!(stack, "\n    at x.js:1");
    }

    #[test]
    fn split_without_stack() {
        assert_eq!(split_stack("Expected 1 to be 2."), ("Expected 1 to be 2.", ""));
    }

    #[test]
    fn replaces_in_order_from_offsets() {
        // The second needle also occurs inside the prose before it.
        let text = "Expected e to be be.";
        let out = strict_replace(
            text,
            &[replacement(9, "e", "<E>"), replacement(17, "be", "<BE>")],
            false,
        );
        assert_eq!(out, "Expected <E> to be <BE>.");
    }

    #[test]
    fn replaced_text_is_never_rematched() {
        let text = "a b";
        let out = strict_replace(
            text,
            &[replacement(0, "a", "b b"), replacement(0, "b", "c")],
            false,
        );
        assert_eq!(out, "b b c");
    }

    #[test]
    fn missing_needle_stops() {
        let out = strict_replace(
            "x y",
            &[replacement(0, "q", "Q"), replacement(2, "y", "Y")],
            false,
        );
        assert_eq!(out, "x y");
    }

    #[test]
    fn multiline_trims_around_spans() {
        let text = "Expected: [1] , to equal: [2].";
        let out = strict_replace(
            text,
            &[replacement(10, "[1]", "\nA\n"), replacement(26, "[2]", "\nB\n")],
            true,
        );
        assert_eq!(out, "Expected\nA\nto equal\nB\n");
    }

    #[test]
    fn multiline_never_trims_into_previous_replacement() {
        let out = strict_replace(
            "a b",
            &[replacement(0, "a", "A."), replacement(2, "b", "B")],
            true,
        );
        assert_eq!(out, "A.B");
    }
}
