/// Property-based tests for message rewriting.
///
/// Strategies print random values the way the Jasmine pretty-printer does
/// (`Object({ a: 1 })`, `[1, 2]`, `Foo({ ... })`, marker-quoted strings,
/// wildcards) and check properties that hold for any input:
/// - an unstyled rewrite only strips markers
/// - identical operands are never highlighted
/// - unrecognized messages pass through untouched
/// - word diffs conserve both texts
/// - parsing and rewriting never panic, whatever the input
///
/// Bare `Function` is left out of the identical-operand property: it is
/// always rendered in the reference style.
use proptest::prelude::*;

use expect_diff::marker;
use expect_diff::word_diff::{diff_words, SegmentKind};
use expect_diff::{format, parse, Formatter, Plain};

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

fn has_tags(text: &str) -> bool {
    ["[-", "{+", "<~"].iter().any(|tag| text.contains(tag))
}

// ============================================================================
// Strategies for printed values
// ============================================================================

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
        Just("undefined".to_string()),
        Just("<jasmine.any(Function)>".to_string()),
        Just("<jasmine.any(Boolean)>".to_string()),
        Just("<jasmine.any(Date)>".to_string()),
        "[a-z,:\\[\\]{}]{0,8}".prop_map(|s| marker::quote(&s)),
    ]
}

fn print_members(members: &[(String, String)]) -> String {
    members
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn arb_value() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            prop::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..4).prop_map(|map| {
                let members: Vec<(String, String)> = map.into_iter().collect();
                format!("Object({{ {} }})", print_members(&members))
            }),
            (
                prop_oneof![Just("Foo"), Just("Bar")],
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4),
            )
                .prop_map(|(name, map)| {
                    let members: Vec<(String, String)> = map.into_iter().collect();
                    format!("{name}({{ {} }})", print_members(&members))
                }),
        ]
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// With an unstyled formatter the rewrite reproduces the message, minus
    /// the quote markers.
    #[test]
    fn plain_rewrite_only_strips_markers(actual in arb_value(), expected in arb_value()) {
        let message = format!("Expected {actual} to equal {expected}.");
        prop_assert_eq!(format(&message, &Plain), marker::strip(&message));
    }

    /// Same property with a stack trace attached.
    #[test]
    fn plain_rewrite_keeps_stack(actual in arb_value(), expected in arb_value()) {
        let message = format!("Expected {actual} to equal {expected}.\n    at spec.js:1:2");
        prop_assert_eq!(format(&message, &Plain), marker::strip(&message));
    }

    /// Deep-equal operands are never highlighted.
    #[test]
    fn identical_operands_are_plain(value in arb_value()) {
        let wrapped = format!("Object({{ v: {value} }})");
        let message = format!("Expected {wrapped} to equal {wrapped}.");
        let out = format(&message, &Tags);
        prop_assert!(!has_tags(&out), "highlighted: {}", out);
        prop_assert_eq!(out, marker::strip(&message));
    }

    /// Messages no matcher recognizes come back unchanged.
    #[test]
    fn unrecognized_messages_pass_through(message in "[a-zA-Z0-9 ,.'\n]{0,80}") {
        prop_assume!(!message.contains("Expected"));
        prop_assert_eq!(format(&message, &Tags), message);
    }

    /// Unchanged plus removed segments rebuild the old text; unchanged plus
    /// added segments rebuild the new one.
    #[test]
    fn word_diff_conserves_text(old in "[a-z ,.]{0,30}", new in "[a-z ,.]{0,30}") {
        let segments = diff_words(&old, &new);
        let rebuild = |skip: SegmentKind| -> String {
            segments
                .iter()
                .filter(|s| s.kind != skip)
                .map(|s| s.text.as_str())
                .collect()
        };
        prop_assert_eq!(rebuild(SegmentKind::Added), old);
        prop_assert_eq!(rebuild(SegmentKind::Removed), new);
    }

    #[test]
    fn parse_never_panics(text in any::<String>()) {
        let tree = parse(&text);
        prop_assert!(!tree.is_empty());
    }

    #[test]
    fn rewrite_never_panics(actual in any::<String>(), expected in any::<String>()) {
        let message = format!("Expected {actual} to equal {expected}.");
        let _ = format(&message, &Tags);
    }

    #[test]
    fn parse_never_panics_on_bracket_soup(text in "[\\[\\]{}(),: a-zO]{0,40}") {
        let _ = parse(&format!("Object({{ {text} }})"));
        let _ = parse(&format!("[{text}]"));
    }
}
