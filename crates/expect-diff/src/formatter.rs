//! Structural diff of two value trees.
//!
//! Each side is rendered by its own traversal. At every node the renderer
//! looks up the node with the same [`Path`](crate::Path) in the opposite
//! tree and decides whether to print it plainly, highlight it, or hand it to
//! the reference style. Paths are looked up, not zipped, so the trees may
//! have different shapes: a key that exists on one side only is highlighted
//! there and simply absent on the other.
//!
//! Output mirrors the host printer: `Object({ a: 1, b: [1, 2] })`,
//! `Foo({ a: 1 })`.

use tracing::trace;

use crate::highlight::{Formatter, Side};
use crate::traverse::{traverse, Visit, Visitor};
use crate::value::{Kind, Value, ValueTree};
use crate::word_diff::{diff_words, SegmentKind};

/// How the assertion compared its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// `===`-style (`toBe`): composites are compared by reference.
    Identity,
    /// Deep equality (`toEqual`): composites are compared member by member.
    #[default]
    Equality,
}

/// Rendered operands, ready to be spliced back into the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub expected: String,
    pub actual: String,
}

/// Render both operands according to the comparison policy:
///
/// 1. Different kinds: each operand is highlighted as a whole.
/// 2. Same complex kind compared by identity, or a kind that cannot nest
///    (functions): both sides get the reference style, since equality of
///    references cannot be judged from text.
/// 3. Same nestable kind: structural diff of the two trees.
/// 4. Same primitive kind: word-level diff of the two texts.
pub fn diff<F>(expected: &ValueTree, actual: &ValueTree, comparison: Comparison, formatter: &F) -> Diff
where
    F: Formatter + ?Sized,
{
    let expected = expected.root();
    let actual = actual.root();

    if expected.kind() != actual.kind() {
        trace!(expected = ?expected.kind(), actual = ?actual.kind(), "kind mismatch");
        return Diff {
            expected: formatter.expected(expected.text()),
            actual: formatter.actual(actual.text()),
        };
    }

    if expected.is_complex() && (comparison == Comparison::Identity || !expected.can_nest()) {
        trace!(kind = ?expected.kind(), ?comparison, "reference comparison");
        return Diff {
            expected: formatter.reference(expected.text()),
            actual: formatter.reference(actual.text()),
        };
    }

    if expected.is_complex() {
        trace!(kind = ?expected.kind(), "structural diff");
        return Diff {
            expected: format_object(expected, actual, Side::Expected, formatter),
            actual: format_object(actual, expected, Side::Actual, formatter),
        };
    }

    trace!(kind = ?expected.kind(), "primitive diff");
    diff_primitives(expected, actual, formatter)
}

/// Word-diff two primitive values. Removed words are styled on the expected
/// side, added words on the actual side, shared words appear unstyled on
/// both.
pub fn diff_primitives<F>(expected: Value<'_>, actual: Value<'_>, formatter: &F) -> Diff
where
    F: Formatter + ?Sized,
{
    let mut result = Diff::default();

    for segment in diff_words(expected.text(), actual.text()) {
        match segment.kind {
            SegmentKind::Added => result.actual.push_str(&formatter.actual(&segment.text)),
            SegmentKind::Removed => result.expected.push_str(&formatter.expected(&segment.text)),
            SegmentKind::Unchanged => {
                result.expected.push_str(&segment.text);
                result.actual.push_str(&segment.text);
            }
        }
    }

    result
}

/// Render `value`'s tree, highlighting for `side` whatever does not match the
/// node at the same path under `opposite`.
pub fn format_object<F>(value: Value<'_>, opposite: Value<'_>, side: Side, formatter: &F) -> String
where
    F: Formatter + ?Sized,
{
    let mut renderer = Renderer {
        opposite,
        side,
        formatter,
        out: String::new(),
        open: Vec::new(),
    };
    traverse(value, &mut renderer);
    renderer.out
}

struct Renderer<'o, 'f, F: ?Sized> {
    opposite: Value<'o>,
    side: Side,
    formatter: &'f F,
    out: String,
    /// One entry per entered node: whether it printed an opening bracket
    /// that `leave` has to close.
    open: Vec<bool>,
}

impl<'o, F: Formatter + ?Sized> Renderer<'o, '_, F> {
    fn counterpart(&self, value: Value<'_>) -> Option<Value<'o>> {
        self.opposite.by_path(&value.path())
    }

    /// `key: ` for named members; array elements and the root have none.
    fn key_prefix(value: Value<'_>) -> String {
        match value.key() {
            Some(key) if !value.is_root() && !value.in_array() => format!("{key}: "),
            _ => String::new(),
        }
    }

    fn highlight(&self, text: &str) -> String {
        self.formatter.highlight(self.side, text)
    }

    /// A node with no counterpart is highlighted together with its key.
    fn one_sided(&mut self, value: Value<'_>) {
        let styled = self.highlight(&format!("{}{}", Self::key_prefix(value), value.text()));
        self.out.push_str(&styled);
    }

    fn enter_instance(&mut self, value: Value<'_>) -> Visit {
        let Some(opposite) = self.counterpart(value) else {
            self.one_sided(value);
            return Visit::Skip;
        };

        self.out.push_str(&Self::key_prefix(value));
        if value.instance() != opposite.instance() {
            // Different constructors: a field-by-field diff would be
            // misleading, so the whole instance is one highlighted leaf.
            let styled = self.highlight(value.text());
            self.out.push_str(&styled);
            return Visit::Skip;
        }

        self.out.push_str(value.instance().unwrap_or_default());
        self.out.push_str("({ ");
        Visit::Descend
    }

    fn enter_leaf(&mut self, value: Value<'_>) {
        let Some(opposite) = self.counterpart(value) else {
            self.one_sided(value);
            return;
        };

        self.out.push_str(&Self::key_prefix(value));
        if value.token() != opposite.token() {
            let styled = self.highlight(value.text());
            self.out.push_str(&styled);
            return;
        }

        if value.kind() == Kind::Function && opposite.kind() == Kind::Function {
            if value.is_any() || opposite.is_any() {
                // A wildcard on either side matched; print this side as is.
                self.out.push_str(value.text());
            } else {
                let styled = self.formatter.reference(value.text());
                self.out.push_str(&styled);
            }
        } else {
            self.out.push_str(value.text());
        }
    }
}

impl<'t, F: Formatter + ?Sized> Visitor<'t> for Renderer<'_, '_, F> {
    fn enter(&mut self, value: Value<'t>) -> Visit {
        let visit = match value.kind() {
            Kind::Object => {
                self.out.push_str(&Self::key_prefix(value));
                self.out.push_str("Object({ ");
                Visit::Descend
            }
            Kind::Array => {
                self.out.push_str(&Self::key_prefix(value));
                self.out.push('[');
                Visit::Descend
            }
            Kind::Instance if !value.is_any() => self.enter_instance(value),
            _ => {
                self.enter_leaf(value);
                Visit::Skip
            }
        };
        self.open.push(visit == Visit::Descend);
        visit
    }

    fn leave(&mut self, value: Value<'t>) {
        if self.open.pop().unwrap_or(false) {
            match value.kind() {
                Kind::Array => self.out.push(']'),
                _ => self.out.push_str(" })"),
            }
        }
        if !value.is_last() {
            self.out.push_str(", ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    struct Tags;

    impl Formatter for Tags {
        fn expected(&self, text: &str) -> String {
            format!("[-{text}-]")
        }

        fn actual(&self, text: &str) -> String {
            format!("{{+{text}+}}")
        }

        fn reference(&self, text: &str) -> String {
            format!("<~{text}~>")
        }
    }

    fn render(value: &str, opposite: &str) -> String {
        let value = parse(value);
        let opposite = parse(opposite);
        format_object(value.root(), opposite.root(), Side::Expected, &Tags)
    }

    #[test]
    fn identical_objects_render_plainly() {
        let text = "Object({ a: 1, b: [1, 2], c: Object({  }) })";
        assert_eq!(render(text, text), "Object({ a: 1, b: [1, 2], c: Object({  }) })");
    }

    #[test]
    fn separators_follow_composite_members() {
        let text = "Object({ a: Object({ x: 1 }), b: [Foo({ y: 2 }), 3] })";
        assert_eq!(render(text, text), text);
    }

    #[test]
    fn changed_leaf_keeps_key_plain() {
        assert_eq!(
            render("Object({ a: 1, b: 2 })", "Object({ a: 1, b: 3 })"),
            "Object({ a: 1, b: [-2-] })"
        );
    }

    #[test]
    fn missing_leaf_highlights_key_too() {
        assert_eq!(
            render("Object({ a: 1, b: 2 })", "Object({ a: 1 })"),
            "Object({ a: 1, [-b: 2-] })"
        );
    }

    #[test]
    fn array_elements_have_no_key() {
        assert_eq!(render("[1, 2, 3]", "[1, 5]"), "[1, [-2-], [-3-]]");
    }

    #[test]
    fn instance_name_mismatch_collapses_subtree() {
        assert_eq!(
            render("Object({ a: Foo({ x: 1 }) })", "Object({ a: Bar({ x: 1 }) })"),
            "Object({ a: [-Foo({ x: 1 })-] })"
        );
    }

    #[test]
    fn matching_instances_diff_fields() {
        assert_eq!(
            render("Foo({ x: 1, y: 2 })", "Foo({ x: 1, y: 3 })"),
            "Foo({ x: 1, y: [-2-] })"
        );
    }

    #[test]
    fn functions_use_reference_style() {
        assert_eq!(
            render("Object({ f: Function })", "Object({ f: Function })"),
            "Object({ f: <~Function~> })"
        );
    }

    #[test]
    fn function_wildcards_render_plainly() {
        assert_eq!(
            render("Object({ f: <jasmine.any(Function)> })", "Object({ f: Function })"),
            "Object({ f: <jasmine.any(Function)> })"
        );
        assert_eq!(
            render("Object({ f: Function })", "Object({ f: <jasmine.any(Function)> })"),
            "Object({ f: Function })"
        );
    }

    #[test]
    fn primitive_diff_conserves_text() {
        let expected = parse("hello big world");
        let actual = parse("hello small world");
        let result = diff_primitives(expected.root(), actual.root(), &Tags);
        assert_eq!(result.expected, "hello [-big-] world");
        assert_eq!(result.actual, "hello {+small+} world");
    }

    #[test]
    fn identity_comparison_references_composites() {
        let expected = parse("Object({ a: 1 })");
        let actual = parse("Object({ a: 1 })");
        let result = diff(&expected, &actual, Comparison::Identity, &Tags);
        assert_eq!(result.expected, "<~Object({ a: 1 })~>");
        assert_eq!(result.actual, "<~Object({ a: 1 })~>");
    }
}
