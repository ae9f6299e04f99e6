//! Parser for the host's stringified values.
//!
//! Jasmine prints values with its own pretty-printer: objects as
//! `Object({ a: 1 })`, class instances as `Foo({ a: 1 })`, arrays as `[1, 2]`,
//! strings between marked quotes, and matchers as sentinel phrases such as
//! `<jasmine.any(Function)>` or `close to 3`. The parser rebuilds a
//! [`ValueTree`] from that text.
//!
//! # Key design decisions
//!
//! - **Ordered classification**: `classify` tries each literal kind in a
//!   fixed priority order and returns the first [`Shape`] that matches; a
//!   single constructor switch in `build` turns the shape into nodes.
//! - **Never fails**: anything that is not recognized becomes
//!   [`Kind::Unknown`] with its text kept verbatim.
//! - **Depth-tracking split**: composite bodies are split on top-level commas
//!   only, counting `[`/`{` against `]`/`}`. Marked string literals are
//!   skipped whole, so commas, colons and brackets inside a string never
//!   split it or shift the depth.

use crate::marker;
use crate::value::{Key, Kind, Node, NodeId, ValueTree};

pub(crate) const ANY_OPEN: &str = "<jasmine.any(";
pub(crate) const ANY_CLOSE: &str = ")>";

const OBJECT_OPEN: &str = "Object({";
const BODY_OPEN: &str = "({";
const BODY_CLOSE: &str = "})";

/// Parse a stringified value into a tree. Surrounding whitespace is ignored.
///
/// ```
/// use expect_diff::{parse, Kind};
///
/// let tree = parse("Object({ foo: [1, 2], bar: null })");
/// let root = tree.root();
/// assert_eq!(root.kind(), Kind::Object);
/// assert_eq!(root.children().len(), 2);
/// ```
pub fn parse(text: &str) -> ValueTree {
    let mut tree = ValueTree::new();
    build(&mut tree, text, None, None);
    tree
}

/// Type name of a `<jasmine.any(Type)>` wildcard.
pub(crate) fn wildcard_type(text: &str) -> Option<&str> {
    text.strip_prefix(ANY_OPEN)?.strip_suffix(ANY_CLOSE)
}

/// What a trimmed fragment looks like, before any nodes are built.
#[derive(Debug, PartialEq)]
enum Shape<'a> {
    Wildcard(&'a str),
    Leaf(Kind),
    Array(&'a str),
    Object(&'a str),
    Instance { name: &'a str, body: &'a str },
}

/// Classify a trimmed fragment. First match wins.
fn classify(text: &str) -> Shape<'_> {
    if let Some(type_name) = wildcard_type(text) {
        return Shape::Wildcard(type_name);
    }
    if let Some(kind) = classify_leaf(text) {
        return Shape::Leaf(kind);
    }
    if let Some(body) = array_body(text) {
        return Shape::Array(body);
    }
    if let Some(body) = object_body(text) {
        return Shape::Object(body);
    }
    if let Some((name, body)) = instance_parts(text) {
        return Shape::Instance { name, body };
    }
    Shape::Leaf(Kind::Unknown)
}

fn classify_leaf(text: &str) -> Option<Kind> {
    let kind = match text {
        "true" | "false" => Kind::Boolean,
        _ if marker::is_quoted(text) => Kind::String,
        _ if is_integer(text) => Kind::Number,
        "Function" => Kind::Function,
        "null" => Kind::Null,
        "undefined" => Kind::Undefined,
        "defined" => Kind::Defined,
        "truthy" => Kind::Truthy,
        "falsy" => Kind::Falsy,
        _ if has_numeric_suffix(text, "close to ") => Kind::CloseTo,
        _ if has_numeric_suffix(text, "greater than ") => Kind::GreaterThan,
        _ if has_numeric_suffix(text, "less than ") => Kind::LessThan,
        _ => return None,
    };
    Some(kind)
}

fn is_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn has_numeric_suffix(text: &str, prefix: &str) -> bool {
    text.strip_prefix(prefix).is_some_and(is_integer)
}

fn array_body(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

fn object_body(text: &str) -> Option<&str> {
    text.strip_prefix(OBJECT_OPEN)?.strip_suffix(BODY_CLOSE)
}

/// Split `Name({ ... })` into the constructor name and the body.
fn instance_parts(text: &str) -> Option<(&str, &str)> {
    let open = text.find(BODY_OPEN).filter(|&index| index > 0)?;
    let body = text[open + BODY_OPEN.len()..].strip_suffix(BODY_CLOSE)?;
    Some((&text[..open], body))
}

/// Parse `text` into a node under `parent`, returning its id.
fn build(tree: &mut ValueTree, text: &str, key: Option<Key>, parent: Option<NodeId>) -> NodeId {
    let text = text.trim();

    match classify(text) {
        Shape::Wildcard(type_name) => {
            let kind = match type_name {
                "Boolean" => Kind::Boolean,
                "Function" => Kind::Function,
                _ => Kind::Instance,
            };
            let mut node = Node::new(kind, text, key, parent);
            node.any = true;
            tree.push(node)
        }
        Shape::Leaf(kind) => tree.push(Node::new(kind, text, key, parent)),
        Shape::Array(body) => {
            let id = tree.push(Node::new(Kind::Array, text, key, parent));
            for (index, member) in split_members(body).into_iter().enumerate() {
                build(tree, member, Some(Key::Index(index)), Some(id));
            }
            id
        }
        Shape::Object(body) => {
            let id = tree.push(Node::new(Kind::Object, text, key, parent));
            build_members(tree, body, id);
            id
        }
        Shape::Instance { name, body } => {
            let mut node = Node::new(Kind::Instance, text, key, parent);
            node.instance = Some(name.to_string());
            let id = tree.push(node);
            build_members(tree, body, id);
            id
        }
    }
}

fn build_members(tree: &mut ValueTree, body: &str, parent: NodeId) {
    for member in split_members(body) {
        let (key, value) = split_key_value(member);
        build(tree, value, Some(Key::Name(key.to_string())), Some(parent));
    }
}

/// Split a composite body on commas at nesting depth zero. An empty body has
/// no members.
fn split_members(body: &str) -> Vec<&str> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let bytes = body.as_bytes();
    let mut members = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(end) = string_end(body, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth -= 1,
            b',' if depth == 0 => {
                members.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    members.push(body[start..].trim());

    members
}

/// When a marked string literal opens at byte `at`, the byte offset just past
/// its closing quote. An unterminated literal is not a string.
fn string_end(text: &str, at: usize) -> Option<usize> {
    if !text.as_bytes()[at..].starts_with(marker::QUOTE.as_bytes()) {
        return None;
    }
    let content = at + marker::QUOTE.len();
    let close = text[content..].find(marker::QUOTE)?;
    Some(content + close + marker::QUOTE.len())
}

/// Split `key: value` on the first colon after the key. A marked string key
/// may contain colons. A member without a colon has an empty key.
fn split_key_value(member: &str) -> (&str, &str) {
    let key_end = string_end(member, 0).unwrap_or(0);
    match member[key_end..].find(':') {
        Some(colon) => {
            let colon = key_end + colon;
            (member[..colon].trim(), member[colon + 1..].trim())
        }
        None => ("", member.trim()),
    }
}
