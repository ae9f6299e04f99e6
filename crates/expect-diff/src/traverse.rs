//! Depth-first walk over a [`ValueTree`](crate::ValueTree).

use crate::value::Value;

/// What to do after entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Walk the node's children.
    Descend,
    /// Treat the node as an opaque leaf; its children are not visited.
    Skip,
}

/// Callbacks for [`traverse`].
pub trait Visitor<'t> {
    /// Called before a node's children. The return value decides whether the
    /// children are visited.
    fn enter(&mut self, value: Value<'t>) -> Visit;

    /// Called after a node's children, or right after `enter` for skipped
    /// nodes and leaves.
    fn leave(&mut self, value: Value<'t>);
}

/// Walk `root` depth-first, calling `enter` and `leave` once per visited node.
/// Children are visited in source order.
pub fn traverse<'t, V>(root: Value<'t>, visitor: &mut V)
where
    V: Visitor<'t> + ?Sized,
{
    if visitor.enter(root) == Visit::Descend {
        for child in root.children() {
            traverse(child, visitor);
        }
    }
    visitor.leave(root);
}
