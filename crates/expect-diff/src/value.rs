//! Parsed value trees.
//!
//! A [`ValueTree`] is an arena of nodes built once by [`crate::parse`]. Nodes
//! refer to their parent and children by [`NodeId`], so there is no
//! ownership cycle and the tree is immutable after construction. Borrowed
//! [`Value`] handles are the public way to inspect a node.

use std::fmt;

/// The kind of literal a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Object,
    Array,
    Instance,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Defined,
    Truthy,
    Falsy,
    Function,
    CloseTo,
    GreaterThan,
    LessThan,
    Unknown,
}

impl Kind {
    /// Composite or reference kinds, compared by structure or by identity
    /// rather than by their text.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            Kind::Object | Kind::Array | Kind::Instance | Kind::Function
        )
    }

    /// Kinds whose children can be diffed one by one. A bare function is
    /// complex but can only be compared by reference.
    pub fn can_nest(self) -> bool {
        matches!(self, Kind::Object | Kind::Array | Kind::Instance)
    }
}

/// The name or position under which a node sits in its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Property name of an object or instance member.
    Name(String),
    /// Zero-based position of an array element.
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// Keys from a tree's root down to one node. The root's path is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Key>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn segments(&self) -> &[Key] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Index of a node inside its [`ValueTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: Kind,
    pub(crate) text: String,
    pub(crate) key: Option<Key>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) instance: Option<String>,
    pub(crate) any: bool,
    pub(crate) level: usize,
}

impl Node {
    pub(crate) fn new(kind: Kind, text: &str, key: Option<Key>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            text: text.to_string(),
            key,
            parent,
            children: Vec::new(),
            instance: None,
            any: false,
            level: 0,
        }
    }
}

/// One parsed operand. The root is always the first node.
#[derive(Debug, Clone)]
pub struct ValueTree {
    nodes: Vec<Node>,
}

impl ValueTree {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node, linking it into its parent's children.
    pub(crate) fn push(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            node.level = self.nodes[parent.0].level + 1;
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> Value<'_> {
        Value {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Value<'_>> {
        (id.0 < self.nodes.len()).then_some(Value { tree: self, id })
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve `path` from the root.
    pub fn by_path(&self, path: &Path) -> Option<Value<'_>> {
        self.root().by_path(path)
    }
}

/// A borrowed view of one node in a [`ValueTree`].
#[derive(Clone, Copy)]
pub struct Value<'t> {
    tree: &'t ValueTree,
    id: NodeId,
}

impl<'t> Value<'t> {
    fn node(&self) -> &'t Node {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Value<'t> {
        Value {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.node().kind
    }

    /// The literal span this value was parsed from.
    pub fn text(&self) -> &'t str {
        &self.node().text
    }

    /// The text used to decide whether two leaves are equal. For a wildcard
    /// this is the type name inside `<jasmine.any(...)>`, so a wildcard for
    /// `Function` compares equal to a literal `Function`.
    pub fn token(&self) -> &'t str {
        let text = self.text();
        if self.is_any() {
            crate::parser::wildcard_type(text).unwrap_or(text)
        } else {
            text
        }
    }

    pub fn key(&self) -> Option<&'t Key> {
        self.node().key.as_ref()
    }

    /// Constructor name of an instance, e.g. `Foo` for `Foo({ ... })`.
    pub fn instance(&self) -> Option<&'t str> {
        self.node().instance.as_deref()
    }

    /// Whether this node is a wildcard matcher rather than a literal.
    pub fn is_any(&self) -> bool {
        self.node().any
    }

    /// Depth from the root, which is level 0. Set when the parser adds the
    /// node, so it is available before any traversal.
    pub fn level(&self) -> usize {
        self.node().level
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn parent(&self) -> Option<Value<'t>> {
        self.node().parent.map(|id| self.at(id))
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = Value<'t>> + 't {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Value { tree, id })
    }

    pub fn child(&self, key: &Key) -> Option<Value<'t>> {
        self.children().find(|child| child.key() == Some(key))
    }

    pub fn is_complex(&self) -> bool {
        self.kind().is_complex()
    }

    pub fn can_nest(&self) -> bool {
        self.kind().can_nest()
    }

    /// Whether this node is an element of an array. Array elements are
    /// positional and render without a `key: ` prefix.
    pub fn in_array(&self) -> bool {
        self.parent()
            .is_some_and(|parent| parent.kind() == Kind::Array)
    }

    /// Whether this node is the final child of its parent. The root counts
    /// as last.
    pub fn is_last(&self) -> bool {
        match self.node().parent {
            Some(parent) => self.tree.nodes[parent.0].children.last() == Some(&self.id),
            None => true,
        }
    }

    /// Keys from the root down to this node.
    pub fn path(&self) -> Path {
        let mut keys = Vec::with_capacity(self.level());
        let mut current = *self;
        while let Some(parent) = current.parent() {
            if let Some(key) = current.key() {
                keys.push(key.clone());
            }
            current = parent;
        }
        keys.into_iter().rev().collect()
    }

    /// Resolve `path` relative to this node.
    pub fn by_path(&self, path: &Path) -> Option<Value<'t>> {
        path.segments()
            .iter()
            .try_fold(*self, |node, key| node.child(key))
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("key", &self.key())
            .field("any", &self.is_any())
            .finish()
    }
}
