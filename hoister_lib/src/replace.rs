//! The `replace` module overwrites the designated value slot of a node.
//!
//! Only eight node kinds have a value slot (see [`NodeKind::value_slot`]).  For every other
//! kind the replacement is a no-op and the caller gets the unused expression back.

use crate::ast::Expr;
use crate::node::{NodeKind, NodeMut};
use std::mem;

/// The outcome of [`replace_value_slot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// The slot was overwritten; holds the expression that used to occupy it.
    Replaced(Expr),

    /// The target kind has no value slot; holds the expression that was not used.
    Unchanged(Expr),
}

impl Replacement {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Replacement::Replaced(_))
    }

    /// Return the expression carried by the outcome, whichever variant it is.
    pub fn into_inner(self) -> Expr {
        match self {
            Replacement::Replaced(e) | Replacement::Unchanged(e) => e,
        }
    }
}

/// Overwrite the value slot of `target` with `new`.
///
/// # Arguments
///
/// * `target` - The node whose value slot receives `new`.
/// * `new` - The replacement expression.
pub fn replace_value_slot(target: NodeMut<'_>, new: Expr) -> Replacement {
    let slot: &mut Expr = match target {
        NodeMut::StarExpr(n) => &mut n.x,
        NodeMut::UnaryExpr(n) => &mut n.x,
        NodeMut::BinaryExpr(n) => &mut n.y,
        NodeMut::KeyValueExpr(n) => &mut n.value,
        NodeMut::ArrayType(n) => &mut n.elt,
        NodeMut::MapType(n) => &mut n.value,
        NodeMut::ChanType(n) => &mut n.value,
        NodeMut::Field(n) => &mut n.type_,
        _ => return Replacement::Unchanged(new),
    };
    Replacement::Replaced(mem::replace(slot, new))
}

/// Return true if [`replace_value_slot`] changes nodes of `kind`.
pub fn has_value_slot(kind: NodeKind) -> bool {
    kind.value_slot().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn test_replace_star_operand() {
        let mut star = StarExpr {
            x: Box::new(Expr::ident("A")),
        };
        let result = replace_value_slot(NodeMut::from(&mut star), Expr::ident("B"));
        assert_eq!(result, Replacement::Replaced(Expr::ident("A")));
        assert_eq!(*star.x, Expr::ident("B"));
    }

    #[test]
    fn test_replace_field_type_returns_old_type() {
        let inner = Expr::StructType(StructType::new(vec![Field::named(
            "City",
            Expr::ident("string"),
        )]));
        let mut field = Field::named("Address", inner.clone());
        let result = replace_value_slot(
            NodeMut::from(&mut field),
            Expr::star(Expr::ident("Address")),
        );
        assert!(result.is_replaced());
        assert_eq!(result.into_inner(), inner);
        assert_eq!(field.type_, Expr::star(Expr::ident("Address")));
    }

    #[test]
    fn test_binary_expr_replaces_right_operand() {
        let mut binary = BinaryExpr {
            x: Box::new(Expr::ident("a")),
            op: String::from("+"),
            y: Box::new(Expr::ident("b")),
        };
        replace_value_slot(NodeMut::from(&mut binary), Expr::ident("c"));
        assert_eq!(*binary.x, Expr::ident("a"));
        assert_eq!(*binary.y, Expr::ident("c"));
    }

    #[test]
    fn test_other_kinds_are_unchanged() {
        let mut lit = CompositeLit {
            type_: None,
            elts: vec![Expr::ident("x")],
        };
        let before = lit.clone();
        let result = replace_value_slot(NodeMut::from(&mut lit), Expr::ident("y"));
        assert_eq!(result, Replacement::Unchanged(Expr::ident("y")));
        assert_eq!(lit, before);

        let mut paren = ParenExpr {
            x: Box::new(Expr::ident("x")),
        };
        assert!(!replace_value_slot(NodeMut::from(&mut paren), Expr::ident("y")).is_replaced());
        assert!(!has_value_slot(NodeKind::ParenExpr));
    }

    #[test]
    fn test_every_value_slot_kind_is_replaceable() {
        let mut map = MapType {
            key: Box::new(Expr::ident("string")),
            value: Box::new(Expr::ident("int")),
        };
        let mut chan = ChanType {
            dir: ChanDir::Both,
            value: Box::new(Expr::ident("int")),
        };
        let mut array = ArrayType {
            len: None,
            elt: Box::new(Expr::ident("int")),
        };
        let mut unary = UnaryExpr {
            op: String::from("!"),
            x: Box::new(Expr::ident("ok")),
        };
        let mut kv = KeyValueExpr {
            key: Box::new(Expr::ident("k")),
            value: Box::new(Expr::ident("v")),
        };
        let targets = vec![
            NodeMut::from(&mut map),
            NodeMut::from(&mut chan),
            NodeMut::from(&mut array),
            NodeMut::from(&mut unary),
            NodeMut::from(&mut kv),
        ];
        for target in targets {
            assert!(has_value_slot(target.kind()));
            assert!(replace_value_slot(target, Expr::ident("z")).is_replaced());
        }
        assert_eq!(*map.value, Expr::ident("z"));
        assert_eq!(*map.key, Expr::ident("string"));
        assert_eq!(*kv.key, Expr::ident("k"));
    }
}
