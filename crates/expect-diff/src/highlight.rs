//! Highlighting callbacks.
//!
//! The diff never decides how a difference looks. It hands each span to a
//! [`Formatter`], which may wrap it in ANSI colors, HTML tags, or anything
//! else the reporter understands.

use owo_colors::OwoColorize;

/// Which operand a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

/// Styles for the three kinds of highlighted span.
pub trait Formatter {
    /// Style a span present only on the expected side.
    fn expected(&self, text: &str) -> String;

    /// Style a span present only on the actual side.
    fn actual(&self, text: &str) -> String;

    /// Neutral style for values that can only be compared by reference, so
    /// equality cannot be decided from their text.
    fn reference(&self, text: &str) -> String;

    /// Style `text` for `side`.
    fn highlight(&self, side: Side, text: &str) -> String {
        match side {
            Side::Expected => self.expected(text),
            Side::Actual => self.actual(text),
        }
    }
}

impl<F: Formatter + ?Sized> Formatter for &F {
    fn expected(&self, text: &str) -> String {
        (**self).expected(text)
    }

    fn actual(&self, text: &str) -> String {
        (**self).actual(text)
    }

    fn reference(&self, text: &str) -> String {
        (**self).reference(text)
    }
}

/// Three functions `(expected, actual, reference)`.
impl<E, A, R> Formatter for (E, A, R)
where
    E: Fn(&str) -> String,
    A: Fn(&str) -> String,
    R: Fn(&str) -> String,
{
    fn expected(&self, text: &str) -> String {
        (self.0)(text)
    }

    fn actual(&self, text: &str) -> String {
        (self.1)(text)
    }

    fn reference(&self, text: &str) -> String {
        (self.2)(text)
    }
}

/// Leaves every span unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Formatter for Plain {
    fn expected(&self, text: &str) -> String {
        text.to_string()
    }

    fn actual(&self, text: &str) -> String {
        text.to_string()
    }

    fn reference(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Terminal colors: expected in red, actual in green, references in yellow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Formatter for Ansi {
    fn expected(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn actual(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn reference(&self, text: &str) -> String {
        text.yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_triple_dispatches_by_side() {
        let formatter = (
            |s: &str| format!("-{s}-"),
            |s: &str| format!("+{s}+"),
            |s: &str| format!("~{s}~"),
        );
        assert_eq!(formatter.highlight(Side::Expected, "a"), "-a-");
        assert_eq!(formatter.highlight(Side::Actual, "a"), "+a+");
        assert_eq!(formatter.reference("a"), "~a~");
    }

    #[test]
    fn ansi_wraps_and_keeps_text() {
        let styled = Ansi.expected("foo");
        assert!(styled.contains("foo"));
        assert_ne!(styled, "foo");
        assert!(styled.starts_with('\u{1b}'));
    }
}
