//! Word-level text diff used for mismatched primitives.
//!
//! Built on `similar`'s Unicode word tokenizer: words, whitespace runs and
//! punctuation are separate tokens, so `'foo bar'` against `'foo baz'` only
//! flags the last word. Runs of equal tags are merged into one segment.

use similar::{ChangeTag, TextDiff};

/// How a segment relates the old text to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Removed,
    Added,
}

/// One run of the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Diff `old` against `new` word by word.
///
/// Concatenating the `Unchanged` and `Removed` segments yields `old`;
/// `Unchanged` and `Added` yield `new`.
pub fn diff_words(old: &str, new: &str) -> Vec<Segment> {
    let diff = TextDiff::from_unicode_words(old, new);
    let mut segments: Vec<Segment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Insert => SegmentKind::Added,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(Segment {
                kind,
                text: change.value().to_string(),
            }),
        }
    }

    segments
}
