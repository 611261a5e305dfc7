//! The `traverser` module contains [`AstTraverser`], the depth-first traversal algorithm, and
//! [`Ancestry`], the record of enclosing nodes the algorithm hands to each visitor call.

use crate::node::{NodeKind, NodeRef};
use crate::path::NodePath;
use crate::visitor::{VisitResult, Visitor};

/// The enclosing nodes of the node being visited and the path that leads to it.
///
/// The traverser keeps the chain as an explicit stack, root first, and pushes and pops it as it
/// moves through the tree.  Accessors present the chain nearest first.
#[derive(Debug, Default)]
pub struct Ancestry<'ast> {
    stack: Vec<NodeRef<'ast>>,
    path: NodePath,
}

impl<'ast> Ancestry<'ast> {
    pub fn new() -> Ancestry<'ast> {
        Ancestry {
            stack: Vec::new(),
            path: NodePath::root(),
        }
    }

    /// Return the direct parent of the visited node, or `None` at the root.
    pub fn parent(&self) -> Option<NodeRef<'ast>> {
        self.stack.last().copied()
    }

    /// Return the `n`th ancestor, nearest first, so `get(0)` is the parent.
    pub fn get(&self, n: usize) -> Option<NodeRef<'ast>> {
        self.stack.iter().rev().nth(n).copied()
    }

    /// Iterate the ancestors nearest first.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'ast>> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Return the ancestors as an owned list, nearest first.
    pub fn nearest_first(&self) -> Vec<NodeRef<'ast>> {
        self.iter().collect()
    }

    /// Return the nearest ancestor of `kind` and its distance, where 0 is the parent.
    pub fn nearest(&self, kind: NodeKind) -> Option<(usize, NodeRef<'ast>)> {
        self.iter().enumerate().find(|(_, n)| n.kind() == kind)
    }

    /// The number of ancestors, zero at the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_empty()
    }

    /// The path from the root to the visited node.
    pub fn path(&self) -> &NodePath {
        &self.path
    }
}

/// Type used to traverse a syntax tree.
pub struct AstTraverser {}

impl AstTraverser {
    /// Traverse the syntax tree below `root` in pre-order.  Children are visited in the slot
    /// order of the node schema and absent optional slots are skipped.  Return
    /// [`VisitResult::Stop`] if the visitor stopped the traversal, otherwise
    /// [`VisitResult::Continue`].
    ///
    /// # Arguments
    ///
    /// * `root` - The node of the syntax tree to traverse.
    /// * `visitor` - The visitor object that implements the algorithm needed to produce the
    /// desired result from traversing the syntax tree.
    pub fn traverse<'ast, V: Visitor<'ast> + ?Sized>(
        root: NodeRef<'ast>,
        visitor: &mut V,
    ) -> VisitResult {
        let mut ancestry = Ancestry::new();
        AstTraverser::traverse_node(root, &mut ancestry, visitor)
    }

    fn traverse_node<'ast, V: Visitor<'ast> + ?Sized>(
        node: NodeRef<'ast>,
        ancestry: &mut Ancestry<'ast>,
        visitor: &mut V,
    ) -> VisitResult {
        visitor.on_enter(node, ancestry);

        match visitor.visit(node, ancestry) {
            VisitResult::Stop => {
                visitor.on_exit(node, ancestry);
                return VisitResult::Stop;
            }
            VisitResult::SkipChildren => {
                visitor.on_exit(node, ancestry);
                return VisitResult::Continue;
            }
            VisitResult::Continue => (),
        }

        let mut result = VisitResult::Continue;
        ancestry.stack.push(node);
        for child in node.children() {
            ancestry.path.push(child.step);
            result = AstTraverser::traverse_node(child.node, ancestry, visitor);
            ancestry.path.pop();
            if result == VisitResult::Stop {
                break;
            }
        }
        ancestry.stack.pop();

        visitor.on_exit(node, ancestry);
        result
    }
}

/// Adapts a closure into a [`Visitor`] that visits every node.
struct WalkVisitor<F> {
    callback: F,
}

impl<'ast, F> Visitor<'ast> for WalkVisitor<F>
where
    F: FnMut(NodeRef<'ast>, &Ancestry<'ast>),
{
    fn visit(&mut self, node: NodeRef<'ast>, ancestry: &Ancestry<'ast>) -> VisitResult {
        (self.callback)(node, ancestry);
        VisitResult::Continue
    }
}

/// Call `callback` for every node below `root`, in traversal order.
///
/// # Arguments
///
/// * `root` - The node of the syntax tree to walk.
/// * `callback` - The function to call with each node and its ancestry.
pub fn walk<'ast, F>(root: NodeRef<'ast>, callback: &mut F)
where
    F: FnMut(NodeRef<'ast>, &Ancestry<'ast>),
{
    let mut visitor = WalkVisitor { callback };
    AstTraverser::traverse(root, &mut visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    struct Recorder {
        events: Vec<String>,
        stop_at: Option<NodeKind>,
        skip_at: Option<NodeKind>,
    }

    impl Recorder {
        fn new() -> Recorder {
            Recorder {
                events: Vec::new(),
                stop_at: None,
                skip_at: None,
            }
        }
    }

    impl<'ast> Visitor<'ast> for Recorder {
        fn visit(&mut self, node: NodeRef<'ast>, ancestry: &Ancestry<'ast>) -> VisitResult {
            self.events
                .push(format!("{}@{}", node.kind(), ancestry.path()));
            if Some(node.kind()) == self.stop_at {
                VisitResult::Stop
            } else if Some(node.kind()) == self.skip_at {
                VisitResult::SkipChildren
            } else {
                VisitResult::Continue
            }
        }

        fn on_exit(&mut self, node: NodeRef<'ast>, _ancestry: &Ancestry<'ast>) {
            self.events.push(format!("/{}", node.kind()));
        }
    }

    fn small_file() -> File {
        let mut file = File::new("p");
        file.decls.push(Decl::GenDecl(GenDecl::type_decl(
            "T",
            Expr::StructType(StructType::new(vec![Field::named(
                "A",
                Expr::star(Expr::ident("int")),
            )])),
        )));
        file
    }

    #[test]
    fn test_pre_order_visitation() {
        let file = small_file();
        let mut recorder = Recorder::new();
        let result = AstTraverser::traverse(NodeRef::from(&file), &mut recorder);

        assert_eq!(result, VisitResult::Continue);
        assert_eq!(
            recorder.events,
            vec![
                "File@<root>",
                "Ident@name",
                "/Ident",
                "GenDecl@decls[0]",
                "TypeSpec@decls[0].specs[0]",
                "Ident@decls[0].specs[0].name",
                "/Ident",
                "StructType@decls[0].specs[0].type",
                "FieldList@decls[0].specs[0].type.fields",
                "Field@decls[0].specs[0].type.fields.list[0]",
                "Ident@decls[0].specs[0].type.fields.list[0].names[0]",
                "/Ident",
                "StarExpr@decls[0].specs[0].type.fields.list[0].type",
                "Ident@decls[0].specs[0].type.fields.list[0].type.x",
                "/Ident",
                "/StarExpr",
                "/Field",
                "/FieldList",
                "/StructType",
                "/TypeSpec",
                "/GenDecl",
                "/File",
            ]
        );
    }

    #[test]
    fn test_stop_abandons_remaining_nodes() {
        let file = small_file();
        let mut recorder = Recorder::new();
        recorder.stop_at = Some(NodeKind::Field);
        let result = AstTraverser::traverse(NodeRef::from(&file), &mut recorder);

        assert_eq!(result, VisitResult::Stop);
        assert!(!recorder.events.iter().any(|e| e.starts_with("StarExpr")));
        assert_eq!(recorder.events.last().map(|s| s.as_str()), Some("/File"));
    }

    #[test]
    fn test_skip_children_continues_with_siblings() {
        let mut file = small_file();
        file.unresolved.push(Ident::new("int"));
        let mut recorder = Recorder::new();
        recorder.skip_at = Some(NodeKind::GenDecl);
        AstTraverser::traverse(NodeRef::from(&file), &mut recorder);

        assert!(!recorder.events.iter().any(|e| e.starts_with("TypeSpec")));
        assert!(recorder.events.contains(&String::from("Ident@unresolved[0]")));
    }

    #[test]
    fn test_ancestry_is_nearest_first() {
        let file = small_file();
        let mut chains: Vec<Vec<NodeKind>> = Vec::new();
        walk(NodeRef::from(&file), &mut |node, ancestry| {
            if node.kind() == NodeKind::StarExpr {
                chains.push(ancestry.iter().map(|n| n.kind()).collect());
                assert_eq!(ancestry.nearest(NodeKind::TypeSpec).map(|(d, _)| d), Some(3));
                assert_eq!(ancestry.depth(), 6);
            }
        });
        assert_eq!(
            chains,
            vec![vec![
                NodeKind::Field,
                NodeKind::FieldList,
                NodeKind::StructType,
                NodeKind::TypeSpec,
                NodeKind::GenDecl,
                NodeKind::File,
            ]]
        );
    }
}
