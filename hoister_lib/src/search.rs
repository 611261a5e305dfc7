//! The `search` module implements predicate queries over a syntax tree.
//!
//! A query runs a predicate on every node in traversal order and collects the nodes the predicate
//! accepts, each with its ancestors and its path.  The predicate also steers the traversal, so a
//! query can stop after the first hit or ignore whole subtrees.

use crate::node::{NodeKind, NodeRef};
use crate::path::NodePath;
use crate::traverser::{walk, Ancestry, AstTraverser};
use crate::visitor::{VisitResult, Visitor};
use std::collections::BTreeMap;

/// The answer of a query predicate for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// True if the node belongs in the result.
    pub matched: bool,

    /// How the traversal proceeds after this node.  A matched node is recorded before the
    /// flow takes effect, so a stopping match is still part of the result.
    pub flow: VisitResult,
}

impl Verdict {
    pub fn new(matched: bool, flow: VisitResult) -> Verdict {
        Verdict { matched, flow }
    }

    /// Record the node and keep going.
    pub fn accept() -> Verdict {
        Verdict::new(true, VisitResult::Continue)
    }

    /// Ignore the node and keep going.
    pub fn reject() -> Verdict {
        Verdict::new(false, VisitResult::Continue)
    }

    /// Record the node if `matched` is true and stop the traversal.
    pub fn stop(matched: bool) -> Verdict {
        Verdict::new(matched, VisitResult::Stop)
    }

    /// Record the node if `matched` is true and do not look below it.
    pub fn skip_children(matched: bool) -> Verdict {
        Verdict::new(matched, VisitResult::SkipChildren)
    }
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        Verdict::new(matched, VisitResult::Continue)
    }
}

/// A node found by a query.  The record borrows the tree, so the tree cannot change while any
/// result is alive.
#[derive(Clone, Debug)]
pub struct FoundNode<'a> {
    pub node: NodeRef<'a>,

    /// The enclosing nodes, nearest first.  Empty when the match is the root.
    pub ancestors: Vec<NodeRef<'a>>,

    pub path: NodePath,
}

impl<'a> FoundNode<'a> {
    /// Return the direct parent of the found node.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.ancestors.first().copied()
    }
}

struct QueryVisitor<'a, P> {
    predicate: P,
    found: Vec<FoundNode<'a>>,
}

impl<'a, P> Visitor<'a> for QueryVisitor<'a, P>
where
    P: FnMut(NodeRef<'a>, &Ancestry<'a>) -> Verdict,
{
    fn visit(&mut self, node: NodeRef<'a>, ancestry: &Ancestry<'a>) -> VisitResult {
        let verdict = (self.predicate)(node, ancestry);
        if verdict.matched {
            self.found.push(FoundNode {
                node,
                ancestors: ancestry.nearest_first(),
                path: ancestry.path().clone(),
            });
        }
        verdict.flow
    }
}

/// Return every node below `root` (inclusive) that `predicate` accepts, in traversal order.
///
/// The predicate receives each node together with its [`Ancestry`] and returns anything that
/// converts into a [`Verdict`]; a plain `bool` accepts or rejects the node and continues.
///
/// # Arguments
///
/// * `root` - The node to search from.
/// * `predicate` - The function that decides which nodes to keep.
pub fn query<'a, P, R>(root: NodeRef<'a>, mut predicate: P) -> Vec<FoundNode<'a>>
where
    P: FnMut(NodeRef<'a>, &Ancestry<'a>) -> R,
    R: Into<Verdict>,
{
    let verdict_of =
        |node: NodeRef<'a>, ancestry: &Ancestry<'a>| -> Verdict { predicate(node, ancestry).into() };
    let mut visitor = QueryVisitor {
        predicate: verdict_of,
        found: Vec::new(),
    };
    AstTraverser::traverse(root, &mut visitor);
    visitor.found
}

/// Return the first node below `root` that `predicate` accepts, stopping the traversal there.
pub fn find_first<'a, P>(root: NodeRef<'a>, mut predicate: P) -> Option<FoundNode<'a>>
where
    P: FnMut(NodeRef<'a>, &Ancestry<'a>) -> bool,
{
    query(root, |node, ancestry| {
        if predicate(node, ancestry) {
            Verdict::stop(true)
        } else {
            Verdict::reject()
        }
    })
    .into_iter()
    .next()
}

/// Return every node of `kind` below `root`.
pub fn query_kind(root: NodeRef<'_>, kind: NodeKind) -> Vec<FoundNode<'_>> {
    query(root, |node, _| node.kind() == kind)
}

/// Count the nodes of each kind below `root`.
pub fn count_kinds(root: NodeRef<'_>) -> BTreeMap<NodeKind, usize> {
    let mut counts: BTreeMap<NodeKind, usize> = BTreeMap::new();
    walk(root, &mut |node, _| {
        *counts.entry(node.kind()).or_insert(0) += 1;
    });
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn nested_file() -> File {
        let mut file = File::new("model");
        file.decls.push(Decl::GenDecl(GenDecl::type_decl(
            "Person",
            Expr::StructType(StructType::new(vec![
                Field::named("Name", Expr::ident("string")),
                Field::named(
                    "Address",
                    Expr::StructType(StructType::new(vec![Field::named(
                        "Geo",
                        Expr::StructType(StructType::new(vec![Field::named(
                            "Lat",
                            Expr::ident("float64"),
                        )])),
                    )])),
                ),
            ])),
        )));
        file.decls.push(Decl::GenDecl(GenDecl::type_decl(
            "Company",
            Expr::StructType(StructType::default()),
        )));
        file
    }

    #[test]
    fn test_query_returns_matches_in_pre_order() {
        let file = nested_file();
        let found = query_kind(NodeRef::from(&file), NodeKind::StructType);
        let paths: Vec<String> = found.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "decls[0].specs[0].type",
                "decls[0].specs[0].type.fields.list[1].type",
                "decls[0].specs[0].type.fields.list[1].type.fields.list[0].type",
                "decls[1].specs[0].type",
            ]
        );
        assert_eq!(found[1].parent().map(|p| p.kind()), Some(NodeKind::Field));
        assert_eq!(found[0].ancestors.len(), 3);
        assert_eq!(found[0].ancestors[2].kind(), NodeKind::File);
    }

    #[test]
    fn test_found_path_resolves_to_found_node() {
        let file = nested_file();
        let root = NodeRef::from(&file);
        for found in query_kind(root, NodeKind::Field) {
            let resolved = found.path.resolve(root).unwrap();
            assert!(resolved.same_node(&found.node));
        }
    }

    #[test]
    fn test_stop_keeps_earlier_matches() {
        let file = nested_file();
        let mut seen = 0;
        let found = query(NodeRef::from(&file), |node, _| {
            if node.kind() != NodeKind::StructType {
                return Verdict::reject();
            }
            seen += 1;
            if seen == 2 {
                Verdict::stop(true)
            } else {
                Verdict::accept()
            }
        });
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[1].path.to_string(),
            "decls[0].specs[0].type.fields.list[1].type"
        );
    }

    #[test]
    fn test_skip_children_hides_nested_matches() {
        let file = nested_file();
        let found = query(NodeRef::from(&file), |node, ancestry| {
            if node.kind() == NodeKind::StructType && ancestry.parent().map(|p| p.kind())
                == Some(NodeKind::Field)
            {
                Verdict::skip_children(true)
            } else {
                Verdict::reject()
            }
        });
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_query_on_empty_file() {
        let file = File::new("empty");
        let found = query(NodeRef::from(&file), |_, _| true);
        assert_eq!(found.len(), 2);
        assert!(found[0].ancestors.is_empty());
        assert!(query_kind(NodeRef::from(&file), NodeKind::StructType).is_empty());
    }

    #[test]
    fn test_find_first_and_count_kinds() {
        let file = nested_file();
        let first = find_first(NodeRef::from(&file), |node, _| {
            node.as_ident().map(|i| i.name == "Lat").unwrap_or(false)
        })
        .unwrap();
        assert_eq!(first.ancestors[0].kind(), NodeKind::Field);

        let counts = count_kinds(NodeRef::from(&file));
        assert_eq!(counts.get(&NodeKind::StructType), Some(&4));
        assert_eq!(counts.get(&NodeKind::TypeSpec), Some(&2));
        assert_eq!(counts.get(&NodeKind::File), Some(&1));
    }
}
