//! The `visitor` module provides the trait that describes the functionality an object must have
//! to traverse a syntax tree, together with the value a visitor uses to steer the traversal.

use crate::node::NodeRef;
use crate::traverser::Ancestry;

/// The traversal-control value returned by a visitor for each node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisitResult {
    /// Descend into the children of the node and carry on.
    #[default]
    Continue,

    /// Do not descend into the children of the node, but carry on with its next sibling.
    SkipChildren,

    /// Abandon the remainder of the traversal.
    Stop,
}

/// Trait that describes the behavior required from objects that traverse a syntax tree without
/// mutating it.
///
/// The trait provides three visitation methods to enable the visitor to process the node with
/// more precision:
///
/// * `on_enter` - called as the visitor starts to examine the node.
/// * `visit` - called when the visitor should fully handle the node.
/// * `on_exit` - called when the visitor stops examining the node, after its children.
///
/// Every method receives the [`Ancestry`] of the node: the chain of enclosing nodes, nearest
/// first, and the path from the root to the node.  The ancestry is owned by the traversal
/// algorithm and only lives for the duration of the call.
///
/// The `'ast` lifetime is the lifetime of the tree being traversed, so visitors may keep the
/// node references they are handed.
pub trait Visitor<'ast> {
    /// The traversal algorithm calls this function when the visitor enters a node.
    ///
    /// # Arguments
    ///
    /// * `node` - The node that the visitor has started visiting.
    /// * `ancestry` - The enclosing nodes and the path of `node`.
    fn on_enter(&mut self, _node: NodeRef<'ast>, _ancestry: &Ancestry<'ast>) {}

    /// The traversal algorithm calls this function when the visitor should fully process `node`.
    /// The return value decides whether the algorithm descends into the children of `node`,
    /// skips them, or stops the traversal altogether.
    ///
    /// # Arguments
    ///
    /// * `node` - The node that the visitor should process.
    /// * `ancestry` - The enclosing nodes and the path of `node`.
    fn visit(&mut self, node: NodeRef<'ast>, ancestry: &Ancestry<'ast>) -> VisitResult;

    /// The traversal algorithm calls this function just after processing the children of `node`
    /// and before moving on to the next node in the syntax tree.  The algorithm also calls the
    /// function on every node still open when a traversal stops.
    ///
    /// # Arguments
    ///
    /// * `node` - The current node.
    /// * `ancestry` - The enclosing nodes and the path of `node`.
    fn on_exit(&mut self, _node: NodeRef<'ast>, _ancestry: &Ancestry<'ast>) {}
}
