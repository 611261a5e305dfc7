//! The `node` module provides the uniform views over the concrete node types of [`crate::ast`]:
//!
//! * [`NodeKind`] - the closed list of node kinds together with the slot schema of each kind.
//! * [`NodeRef`] - a borrowed, copyable reference to a node of any kind.
//! * [`NodeMut`] - a mutable reference to a node of any kind.
//!
//! A slot is a named child position of a node kind.  The schema of a kind lists its slots in the
//! order the traversal engine visits them, and each slot is either optional, required or a
//! sequence.  The child lists produced by [`NodeRef::children`] and [`NodeMut::children_mut`]
//! follow the schema exactly; the tests at the bottom of this module check that they do.

use crate::ast;
use crate::error::HoisterError;
use crate::path::SlotStep;
use std::fmt;
use std::str::FromStr;

/// How many children a slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Zero or one child.
    Optional,
    /// Exactly one child.
    Required,
    /// Zero or more children.
    Sequence,
}

/// The declaration of one slot of a node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSchema {
    pub name: &'static str,
    pub arity: Arity,
}

macro_rules! slots {
    ($($name:literal : $arity:ident),* $(,)?) => {
        &[$(SlotSchema { name: $name, arity: Arity::$arity }),*]
    };
}

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Every kind of node in the syntax tree.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($kind),*
        }

        impl NodeKind {
            /// All node kinds in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),*];

            /// The name of the kind, identical to the `nodeType` tag used in JSON.
            pub fn name(&self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),*
                }
            }
        }

        /// A borrowed reference to a node of any kind.
        #[derive(Clone, Copy, Debug)]
        pub enum NodeRef<'a> {
            $($kind(&'a ast::$kind)),*
        }

        /// A mutable reference to a node of any kind.
        #[derive(Debug)]
        pub enum NodeMut<'a> {
            $($kind(&'a mut ast::$kind)),*
        }

        impl<'a> NodeRef<'a> {
            /// Return the kind of the referenced node.
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeRef::$kind(_) => NodeKind::$kind),*
                }
            }

            fn address(&self) -> *const () {
                match *self {
                    $(NodeRef::$kind(n) => n as *const ast::$kind as *const ()),*
                }
            }
        }

        impl<'a> NodeMut<'a> {
            /// Return the kind of the referenced node.
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeMut::$kind(_) => NodeKind::$kind),*
                }
            }

            /// Reborrow the node immutably.
            pub fn as_node_ref(&self) -> NodeRef<'_> {
                match self {
                    $(NodeMut::$kind(n) => NodeRef::$kind(&**n)),*
                }
            }
        }

        $(
            impl<'a> From<&'a ast::$kind> for NodeRef<'a> {
                fn from(node: &'a ast::$kind) -> Self {
                    NodeRef::$kind(node)
                }
            }

            impl<'a> From<&'a mut ast::$kind> for NodeMut<'a> {
                fn from(node: &'a mut ast::$kind) -> Self {
                    NodeMut::$kind(node)
                }
            }
        )*
    };
}

node_kinds!(
    Comment,
    CommentGroup,
    Field,
    FieldList,
    BadExpr,
    Ident,
    Ellipsis,
    BasicLit,
    FuncLit,
    CompositeLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    IndexListExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    KeyValueExpr,
    ArrayType,
    StructType,
    FuncType,
    InterfaceType,
    MapType,
    ChanType,
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    SendStmt,
    IncDecStmt,
    AssignStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    BlockStmt,
    IfStmt,
    CaseClause,
    SwitchStmt,
    TypeSwitchStmt,
    CommClause,
    SelectStmt,
    ForStmt,
    RangeStmt,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    BadDecl,
    GenDecl,
    FuncDecl,
    File,
);

/// The grouping enumerations of [`crate::ast`] name their variants after the wrapped kind, so
/// converting a grouped node to a uniform reference is a one-to-one mapping.
macro_rules! group_conversions {
    ($group:ident { $($kind:ident),* $(,)? }) => {
        impl<'a> From<&'a ast::$group> for NodeRef<'a> {
            fn from(node: &'a ast::$group) -> Self {
                match node {
                    $(ast::$group::$kind(n) => NodeRef::$kind(n)),*
                }
            }
        }

        impl<'a> From<&'a mut ast::$group> for NodeMut<'a> {
            fn from(node: &'a mut ast::$group) -> Self {
                match node {
                    $(ast::$group::$kind(n) => NodeMut::$kind(n)),*
                }
            }
        }
    };
}

group_conversions!(Expr {
    BadExpr,
    Ident,
    Ellipsis,
    BasicLit,
    FuncLit,
    CompositeLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    IndexListExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    KeyValueExpr,
    ArrayType,
    StructType,
    FuncType,
    InterfaceType,
    MapType,
    ChanType,
});

group_conversions!(Stmt {
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    SendStmt,
    IncDecStmt,
    AssignStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    BlockStmt,
    IfStmt,
    CaseClause,
    SwitchStmt,
    TypeSwitchStmt,
    CommClause,
    SelectStmt,
    ForStmt,
    RangeStmt,
});

group_conversions!(Spec {
    ImportSpec,
    ValueSpec,
    TypeSpec,
});

group_conversions!(Decl {
    BadDecl,
    GenDecl,
    FuncDecl,
});

impl<'a> From<&'a Box<ast::Expr>> for NodeRef<'a> {
    fn from(node: &'a Box<ast::Expr>) -> Self {
        NodeRef::from(&**node)
    }
}

impl<'a> From<&'a Box<ast::Stmt>> for NodeRef<'a> {
    fn from(node: &'a Box<ast::Stmt>) -> Self {
        NodeRef::from(&**node)
    }
}

impl<'a> From<&'a mut Box<ast::Expr>> for NodeMut<'a> {
    fn from(node: &'a mut Box<ast::Expr>) -> Self {
        NodeMut::from(&mut **node)
    }
}

impl<'a> From<&'a mut Box<ast::Stmt>> for NodeMut<'a> {
    fn from(node: &'a mut Box<ast::Stmt>) -> Self {
        NodeMut::from(&mut **node)
    }
}

impl NodeKind {
    /// Return the slots of the kind in traversal order.
    pub fn schema(&self) -> &'static [SlotSchema] {
        match self {
            NodeKind::Comment => slots![],
            NodeKind::CommentGroup => slots!["list": Sequence],
            NodeKind::Field => slots![
                "doc": Optional,
                "names": Sequence,
                "type": Required,
                "tag": Optional,
                "comment": Optional,
            ],
            NodeKind::FieldList => slots!["list": Sequence],
            NodeKind::BadExpr => slots![],
            NodeKind::Ident => slots![],
            NodeKind::Ellipsis => slots!["elt": Optional],
            NodeKind::BasicLit => slots![],
            NodeKind::FuncLit => slots!["type": Required, "body": Required],
            NodeKind::CompositeLit => slots!["type": Optional, "elts": Sequence],
            NodeKind::ParenExpr => slots!["x": Required],
            NodeKind::SelectorExpr => slots!["x": Required, "sel": Required],
            NodeKind::IndexExpr => slots!["x": Required, "index": Required],
            NodeKind::IndexListExpr => slots!["x": Required, "indices": Sequence],
            NodeKind::SliceExpr => slots![
                "x": Required,
                "low": Optional,
                "high": Optional,
                "max": Optional,
            ],
            NodeKind::TypeAssertExpr => slots!["x": Required, "type": Optional],
            NodeKind::CallExpr => slots!["fun": Required, "args": Sequence],
            NodeKind::StarExpr => slots!["x": Required],
            NodeKind::UnaryExpr => slots!["x": Required],
            NodeKind::BinaryExpr => slots!["x": Required, "y": Required],
            NodeKind::KeyValueExpr => slots!["key": Required, "value": Required],
            NodeKind::ArrayType => slots!["len": Optional, "elt": Required],
            NodeKind::StructType => slots!["fields": Required],
            NodeKind::FuncType => slots![
                "type_params": Optional,
                "params": Required,
                "results": Optional,
            ],
            NodeKind::InterfaceType => slots!["methods": Required],
            NodeKind::MapType => slots!["key": Required, "value": Required],
            NodeKind::ChanType => slots!["value": Required],
            NodeKind::BadStmt => slots![],
            NodeKind::DeclStmt => slots!["decl": Required],
            NodeKind::EmptyStmt => slots![],
            NodeKind::LabeledStmt => slots!["label": Required, "stmt": Required],
            NodeKind::ExprStmt => slots!["x": Required],
            NodeKind::SendStmt => slots!["chan": Required, "value": Required],
            NodeKind::IncDecStmt => slots!["x": Required],
            NodeKind::AssignStmt => slots!["lhs": Sequence, "rhs": Sequence],
            NodeKind::GoStmt => slots!["call": Required],
            NodeKind::DeferStmt => slots!["call": Required],
            NodeKind::ReturnStmt => slots!["results": Sequence],
            NodeKind::BranchStmt => slots!["label": Optional],
            NodeKind::BlockStmt => slots!["list": Sequence],
            NodeKind::IfStmt => slots![
                "init": Optional,
                "cond": Required,
                "body": Required,
                "else": Optional,
            ],
            NodeKind::CaseClause => slots!["list": Sequence, "body": Sequence],
            NodeKind::SwitchStmt => slots!["init": Optional, "tag": Optional, "body": Required],
            NodeKind::TypeSwitchStmt => {
                slots!["init": Optional, "assign": Required, "body": Required]
            }
            NodeKind::CommClause => slots!["comm": Optional, "body": Sequence],
            NodeKind::SelectStmt => slots!["body": Required],
            NodeKind::ForStmt => slots![
                "init": Optional,
                "cond": Optional,
                "post": Optional,
                "body": Required,
            ],
            NodeKind::RangeStmt => slots![
                "key": Optional,
                "value": Optional,
                "x": Required,
                "body": Required,
            ],
            NodeKind::ImportSpec => slots![
                "doc": Optional,
                "name": Optional,
                "path": Required,
                "comment": Optional,
            ],
            NodeKind::ValueSpec => slots![
                "doc": Optional,
                "names": Sequence,
                "type": Optional,
                "values": Sequence,
                "comment": Optional,
            ],
            NodeKind::TypeSpec => slots![
                "doc": Optional,
                "name": Required,
                "type_params": Optional,
                "type": Required,
                "comment": Optional,
            ],
            NodeKind::BadDecl => slots![],
            NodeKind::GenDecl => slots!["doc": Optional, "specs": Sequence],
            NodeKind::FuncDecl => slots![
                "doc": Optional,
                "recv": Optional,
                "name": Required,
                "type": Required,
                "body": Optional,
            ],
            NodeKind::File => slots![
                "doc": Optional,
                "name": Required,
                "decls": Sequence,
                "imports": Sequence,
                "unresolved": Sequence,
                "comments": Sequence,
            ],
        }
    }

    /// Return the schema entry for `slot`, if the kind declares it.
    pub fn slot(&self, slot: &str) -> Option<&'static SlotSchema> {
        self.schema().iter().find(|s| s.name == slot)
    }

    /// Return the name of the single slot that a generic rewrite may overwrite, or `None` for
    /// kinds without such a slot.
    pub fn value_slot(&self) -> Option<&'static str> {
        match self {
            NodeKind::StarExpr | NodeKind::UnaryExpr => Some("x"),
            NodeKind::BinaryExpr => Some("y"),
            NodeKind::KeyValueExpr | NodeKind::MapType | NodeKind::ChanType => Some("value"),
            NodeKind::ArrayType => Some("elt"),
            NodeKind::Field => Some("type"),
            _ => None,
        }
    }

    /// Return true for kinds that never have children.
    pub fn is_leaf(&self) -> bool {
        self.schema().is_empty()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NodeKind {
    type Err = HoisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| HoisterError::UnknownNodeKind(String::from(s)))
    }
}

/// One child of a node together with the step that addresses it from the parent.
#[derive(Clone, Copy, Debug)]
pub struct Child<'a> {
    pub step: SlotStep,
    pub node: NodeRef<'a>,
}

/// One mutable child of a node together with the step that addresses it from the parent.
#[derive(Debug)]
pub struct ChildMut<'a> {
    pub step: SlotStep,
    pub node: NodeMut<'a>,
}

/// Accumulates the children of a node slot by slot.
struct ChildList<'a> {
    children: Vec<Child<'a>>,
}

impl<'a> ChildList<'a> {
    fn new() -> ChildList<'a> {
        ChildList {
            children: Vec::new(),
        }
    }

    fn one<N: Into<NodeRef<'a>>>(mut self, slot: &'static str, node: N) -> Self {
        self.children.push(Child {
            step: SlotStep::field(slot),
            node: node.into(),
        });
        self
    }

    fn opt<N: Into<NodeRef<'a>>>(self, slot: &'static str, node: Option<N>) -> Self {
        match node {
            Some(n) => self.one(slot, n),
            None => self,
        }
    }

    fn seq<T>(mut self, slot: &'static str, nodes: &'a [T]) -> Self
    where
        &'a T: Into<NodeRef<'a>>,
    {
        for (index, node) in nodes.iter().enumerate() {
            self.children.push(Child {
                step: SlotStep::at(slot, index),
                node: node.into(),
            });
        }
        self
    }

    fn done(self) -> Vec<Child<'a>> {
        self.children
    }
}

/// Accumulates the mutable children of a node slot by slot.
struct ChildListMut<'a> {
    children: Vec<ChildMut<'a>>,
}

impl<'a> ChildListMut<'a> {
    fn new() -> ChildListMut<'a> {
        ChildListMut {
            children: Vec::new(),
        }
    }

    fn one<N: Into<NodeMut<'a>>>(mut self, slot: &'static str, node: N) -> Self {
        self.children.push(ChildMut {
            step: SlotStep::field(slot),
            node: node.into(),
        });
        self
    }

    fn opt<N: Into<NodeMut<'a>>>(self, slot: &'static str, node: Option<N>) -> Self {
        match node {
            Some(n) => self.one(slot, n),
            None => self,
        }
    }

    fn seq<T>(mut self, slot: &'static str, nodes: &'a mut [T]) -> Self
    where
        &'a mut T: Into<NodeMut<'a>>,
    {
        for (index, node) in nodes.iter_mut().enumerate() {
            self.children.push(ChildMut {
                step: SlotStep::at(slot, index),
                node: node.into(),
            });
        }
        self
    }

    fn done(self) -> Vec<ChildMut<'a>> {
        self.children
    }
}

/// Build the error for a step that does not address a child of a node of `kind`.
pub(crate) fn missing_child_error(kind: NodeKind, step: &SlotStep) -> HoisterError {
    if kind.slot(step.slot).is_some() {
        HoisterError::MissingChild {
            kind,
            slot: String::from(step.slot),
            index: step.index,
        }
    } else {
        HoisterError::UnknownSlot {
            kind,
            slot: String::from(step.slot),
        }
    }
}

impl<'a> NodeRef<'a> {
    /// Return the present children of the node in schema order.  Absent optional slots produce
    /// no entry.
    pub fn children(&self) -> Vec<Child<'a>> {
        let list = ChildList::new();
        match *self {
            NodeRef::Comment(_) => list,
            NodeRef::CommentGroup(n) => list.seq("list", &n.list),
            NodeRef::Field(n) => list
                .opt("doc", n.doc.as_ref())
                .seq("names", &n.names)
                .one("type", &n.type_)
                .opt("tag", n.tag.as_ref())
                .opt("comment", n.comment.as_ref()),
            NodeRef::FieldList(n) => list.seq("list", &n.list),
            NodeRef::BadExpr(_) => list,
            NodeRef::Ident(_) => list,
            NodeRef::Ellipsis(n) => list.opt("elt", n.elt.as_deref()),
            NodeRef::BasicLit(_) => list,
            NodeRef::FuncLit(n) => list.one("type", &n.type_).one("body", &n.body),
            NodeRef::CompositeLit(n) => list
                .opt("type", n.type_.as_deref())
                .seq("elts", &n.elts),
            NodeRef::ParenExpr(n) => list.one("x", &n.x),
            NodeRef::SelectorExpr(n) => list.one("x", &n.x).one("sel", &n.sel),
            NodeRef::IndexExpr(n) => list.one("x", &n.x).one("index", &n.index),
            NodeRef::IndexListExpr(n) => list.one("x", &n.x).seq("indices", &n.indices),
            NodeRef::SliceExpr(n) => list
                .one("x", &n.x)
                .opt("low", n.low.as_deref())
                .opt("high", n.high.as_deref())
                .opt("max", n.max.as_deref()),
            NodeRef::TypeAssertExpr(n) => list.one("x", &n.x).opt("type", n.type_.as_deref()),
            NodeRef::CallExpr(n) => list.one("fun", &n.fun).seq("args", &n.args),
            NodeRef::StarExpr(n) => list.one("x", &n.x),
            NodeRef::UnaryExpr(n) => list.one("x", &n.x),
            NodeRef::BinaryExpr(n) => list.one("x", &n.x).one("y", &n.y),
            NodeRef::KeyValueExpr(n) => list.one("key", &n.key).one("value", &n.value),
            NodeRef::ArrayType(n) => list.opt("len", n.len.as_deref()).one("elt", &n.elt),
            NodeRef::StructType(n) => list.one("fields", &n.fields),
            NodeRef::FuncType(n) => list
                .opt("type_params", n.type_params.as_ref())
                .one("params", &n.params)
                .opt("results", n.results.as_ref()),
            NodeRef::InterfaceType(n) => list.one("methods", &n.methods),
            NodeRef::MapType(n) => list.one("key", &n.key).one("value", &n.value),
            NodeRef::ChanType(n) => list.one("value", &n.value),
            NodeRef::BadStmt(_) => list,
            NodeRef::DeclStmt(n) => list.one("decl", &n.decl),
            NodeRef::EmptyStmt(_) => list,
            NodeRef::LabeledStmt(n) => list.one("label", &n.label).one("stmt", &n.stmt),
            NodeRef::ExprStmt(n) => list.one("x", &n.x),
            NodeRef::SendStmt(n) => list.one("chan", &n.chan).one("value", &n.value),
            NodeRef::IncDecStmt(n) => list.one("x", &n.x),
            NodeRef::AssignStmt(n) => list.seq("lhs", &n.lhs).seq("rhs", &n.rhs),
            NodeRef::GoStmt(n) => list.one("call", &n.call),
            NodeRef::DeferStmt(n) => list.one("call", &n.call),
            NodeRef::ReturnStmt(n) => list.seq("results", &n.results),
            NodeRef::BranchStmt(n) => list.opt("label", n.label.as_ref()),
            NodeRef::BlockStmt(n) => list.seq("list", &n.list),
            NodeRef::IfStmt(n) => list
                .opt("init", n.init.as_deref())
                .one("cond", &n.cond)
                .one("body", &n.body)
                .opt("else", n.else_.as_deref()),
            NodeRef::CaseClause(n) => list.seq("list", &n.list).seq("body", &n.body),
            NodeRef::SwitchStmt(n) => list
                .opt("init", n.init.as_deref())
                .opt("tag", n.tag.as_ref())
                .one("body", &n.body),
            NodeRef::TypeSwitchStmt(n) => list
                .opt("init", n.init.as_deref())
                .one("assign", &n.assign)
                .one("body", &n.body),
            NodeRef::CommClause(n) => list.opt("comm", n.comm.as_deref()).seq("body", &n.body),
            NodeRef::SelectStmt(n) => list.one("body", &n.body),
            NodeRef::ForStmt(n) => list
                .opt("init", n.init.as_deref())
                .opt("cond", n.cond.as_ref())
                .opt("post", n.post.as_deref())
                .one("body", &n.body),
            NodeRef::RangeStmt(n) => list
                .opt("key", n.key.as_ref())
                .opt("value", n.value.as_ref())
                .one("x", &n.x)
                .one("body", &n.body),
            NodeRef::ImportSpec(n) => list
                .opt("doc", n.doc.as_ref())
                .opt("name", n.name.as_ref())
                .one("path", &n.path)
                .opt("comment", n.comment.as_ref()),
            NodeRef::ValueSpec(n) => list
                .opt("doc", n.doc.as_ref())
                .seq("names", &n.names)
                .opt("type", n.type_.as_ref())
                .seq("values", &n.values)
                .opt("comment", n.comment.as_ref()),
            NodeRef::TypeSpec(n) => list
                .opt("doc", n.doc.as_ref())
                .one("name", &n.name)
                .opt("type_params", n.type_params.as_ref())
                .one("type", &n.type_)
                .opt("comment", n.comment.as_ref()),
            NodeRef::BadDecl(_) => list,
            NodeRef::GenDecl(n) => list.opt("doc", n.doc.as_ref()).seq("specs", &n.specs),
            NodeRef::FuncDecl(n) => list
                .opt("doc", n.doc.as_ref())
                .opt("recv", n.recv.as_ref())
                .one("name", &n.name)
                .one("type", &n.type_)
                .opt("body", n.body.as_ref()),
            NodeRef::File(n) => list
                .opt("doc", n.doc.as_ref())
                .one("name", &n.name)
                .seq("decls", &n.decls)
                .seq("imports", &n.imports)
                .seq("unresolved", &n.unresolved)
                .seq("comments", &n.comments),
        }
        .done()
    }

    /// Return the child addressed by `step`.
    ///
    /// # Arguments
    ///
    /// * `step` - The slot (and index for sequence slots) of the child.
    pub fn child(&self, step: &SlotStep) -> Result<NodeRef<'a>, HoisterError> {
        self.children()
            .into_iter()
            .find(|c| c.step == *step)
            .map(|c| c.node)
            .ok_or_else(|| missing_child_error(self.kind(), step))
    }

    pub fn as_field(&self) -> Option<&'a ast::Field> {
        match *self {
            NodeRef::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_type_spec(&self) -> Option<&'a ast::TypeSpec> {
        match *self {
            NodeRef::TypeSpec(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_struct_type(&self) -> Option<&'a ast::StructType> {
        match *self {
            NodeRef::StructType(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&'a ast::Comment> {
        match *self {
            NodeRef::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&'a ast::Ident> {
        match *self {
            NodeRef::Ident(i) => Some(i),
            _ => None,
        }
    }

    /// Return true if both references point at the same node in memory.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        self.kind() == other.kind() && self.address() == other.address()
    }
}

impl<'a> NodeMut<'a> {
    /// Consume the reference and return mutable references to the present children in schema
    /// order.
    pub fn children_mut(self) -> Vec<ChildMut<'a>> {
        let list = ChildListMut::new();
        match self {
            NodeMut::Comment(_) => list,
            NodeMut::CommentGroup(n) => list.seq("list", &mut n.list),
            NodeMut::Field(n) => {
                let ast::Field {
                    doc,
                    names,
                    type_,
                    tag,
                    comment,
                } = n;
                list.opt("doc", doc.as_mut())
                    .seq("names", names)
                    .one("type", type_)
                    .opt("tag", tag.as_mut())
                    .opt("comment", comment.as_mut())
            }
            NodeMut::FieldList(n) => list.seq("list", &mut n.list),
            NodeMut::BadExpr(_) => list,
            NodeMut::Ident(_) => list,
            NodeMut::Ellipsis(n) => list.opt("elt", n.elt.as_deref_mut()),
            NodeMut::BasicLit(_) => list,
            NodeMut::FuncLit(n) => {
                let ast::FuncLit { type_, body } = n;
                list.one("type", type_).one("body", body)
            }
            NodeMut::CompositeLit(n) => {
                let ast::CompositeLit { type_, elts } = n;
                list.opt("type", type_.as_deref_mut()).seq("elts", elts)
            }
            NodeMut::ParenExpr(n) => list.one("x", &mut n.x),
            NodeMut::SelectorExpr(n) => {
                let ast::SelectorExpr { x, sel } = n;
                list.one("x", x).one("sel", sel)
            }
            NodeMut::IndexExpr(n) => {
                let ast::IndexExpr { x, index } = n;
                list.one("x", x).one("index", index)
            }
            NodeMut::IndexListExpr(n) => {
                let ast::IndexListExpr { x, indices } = n;
                list.one("x", x).seq("indices", indices)
            }
            NodeMut::SliceExpr(n) => {
                let ast::SliceExpr {
                    x, low, high, max, ..
                } = n;
                list.one("x", x)
                    .opt("low", low.as_deref_mut())
                    .opt("high", high.as_deref_mut())
                    .opt("max", max.as_deref_mut())
            }
            NodeMut::TypeAssertExpr(n) => {
                let ast::TypeAssertExpr { x, type_ } = n;
                list.one("x", x).opt("type", type_.as_deref_mut())
            }
            NodeMut::CallExpr(n) => {
                let ast::CallExpr { fun, args, .. } = n;
                list.one("fun", fun).seq("args", args)
            }
            NodeMut::StarExpr(n) => list.one("x", &mut n.x),
            NodeMut::UnaryExpr(n) => list.one("x", &mut n.x),
            NodeMut::BinaryExpr(n) => {
                let ast::BinaryExpr { x, y, .. } = n;
                list.one("x", x).one("y", y)
            }
            NodeMut::KeyValueExpr(n) => {
                let ast::KeyValueExpr { key, value } = n;
                list.one("key", key).one("value", value)
            }
            NodeMut::ArrayType(n) => {
                let ast::ArrayType { len, elt } = n;
                list.opt("len", len.as_deref_mut()).one("elt", elt)
            }
            NodeMut::StructType(n) => list.one("fields", &mut n.fields),
            NodeMut::FuncType(n) => {
                let ast::FuncType {
                    type_params,
                    params,
                    results,
                } = n;
                list.opt("type_params", type_params.as_mut())
                    .one("params", params)
                    .opt("results", results.as_mut())
            }
            NodeMut::InterfaceType(n) => list.one("methods", &mut n.methods),
            NodeMut::MapType(n) => {
                let ast::MapType { key, value } = n;
                list.one("key", key).one("value", value)
            }
            NodeMut::ChanType(n) => list.one("value", &mut n.value),
            NodeMut::BadStmt(_) => list,
            NodeMut::DeclStmt(n) => list.one("decl", &mut n.decl),
            NodeMut::EmptyStmt(_) => list,
            NodeMut::LabeledStmt(n) => {
                let ast::LabeledStmt { label, stmt } = n;
                list.one("label", label).one("stmt", stmt)
            }
            NodeMut::ExprStmt(n) => list.one("x", &mut n.x),
            NodeMut::SendStmt(n) => {
                let ast::SendStmt { chan, value } = n;
                list.one("chan", chan).one("value", value)
            }
            NodeMut::IncDecStmt(n) => list.one("x", &mut n.x),
            NodeMut::AssignStmt(n) => {
                let ast::AssignStmt { lhs, rhs, .. } = n;
                list.seq("lhs", lhs).seq("rhs", rhs)
            }
            NodeMut::GoStmt(n) => list.one("call", &mut n.call),
            NodeMut::DeferStmt(n) => list.one("call", &mut n.call),
            NodeMut::ReturnStmt(n) => list.seq("results", &mut n.results),
            NodeMut::BranchStmt(n) => list.opt("label", n.label.as_mut()),
            NodeMut::BlockStmt(n) => list.seq("list", &mut n.list),
            NodeMut::IfStmt(n) => {
                let ast::IfStmt {
                    init,
                    cond,
                    body,
                    else_,
                } = n;
                list.opt("init", init.as_deref_mut())
                    .one("cond", cond)
                    .one("body", body)
                    .opt("else", else_.as_deref_mut())
            }
            NodeMut::CaseClause(n) => {
                let ast::CaseClause { list: exprs, body } = n;
                list.seq("list", exprs).seq("body", body)
            }
            NodeMut::SwitchStmt(n) => {
                let ast::SwitchStmt { init, tag, body } = n;
                list.opt("init", init.as_deref_mut())
                    .opt("tag", tag.as_mut())
                    .one("body", body)
            }
            NodeMut::TypeSwitchStmt(n) => {
                let ast::TypeSwitchStmt { init, assign, body } = n;
                list.opt("init", init.as_deref_mut())
                    .one("assign", assign)
                    .one("body", body)
            }
            NodeMut::CommClause(n) => {
                let ast::CommClause { comm, body } = n;
                list.opt("comm", comm.as_deref_mut()).seq("body", body)
            }
            NodeMut::SelectStmt(n) => list.one("body", &mut n.body),
            NodeMut::ForStmt(n) => {
                let ast::ForStmt {
                    init,
                    cond,
                    post,
                    body,
                } = n;
                list.opt("init", init.as_deref_mut())
                    .opt("cond", cond.as_mut())
                    .opt("post", post.as_deref_mut())
                    .one("body", body)
            }
            NodeMut::RangeStmt(n) => {
                let ast::RangeStmt {
                    key,
                    value,
                    x,
                    body,
                    ..
                } = n;
                list.opt("key", key.as_mut())
                    .opt("value", value.as_mut())
                    .one("x", x)
                    .one("body", body)
            }
            NodeMut::ImportSpec(n) => {
                let ast::ImportSpec {
                    doc,
                    name,
                    path,
                    comment,
                } = n;
                list.opt("doc", doc.as_mut())
                    .opt("name", name.as_mut())
                    .one("path", path)
                    .opt("comment", comment.as_mut())
            }
            NodeMut::ValueSpec(n) => {
                let ast::ValueSpec {
                    doc,
                    names,
                    type_,
                    values,
                    comment,
                } = n;
                list.opt("doc", doc.as_mut())
                    .seq("names", names)
                    .opt("type", type_.as_mut())
                    .seq("values", values)
                    .opt("comment", comment.as_mut())
            }
            NodeMut::TypeSpec(n) => {
                let ast::TypeSpec {
                    doc,
                    name,
                    type_params,
                    type_,
                    comment,
                    ..
                } = n;
                list.opt("doc", doc.as_mut())
                    .one("name", name)
                    .opt("type_params", type_params.as_mut())
                    .one("type", type_)
                    .opt("comment", comment.as_mut())
            }
            NodeMut::BadDecl(_) => list,
            NodeMut::GenDecl(n) => {
                let ast::GenDecl { doc, specs, .. } = n;
                list.opt("doc", doc.as_mut()).seq("specs", specs)
            }
            NodeMut::FuncDecl(n) => {
                let ast::FuncDecl {
                    doc,
                    recv,
                    name,
                    type_,
                    body,
                } = n;
                list.opt("doc", doc.as_mut())
                    .opt("recv", recv.as_mut())
                    .one("name", name)
                    .one("type", type_)
                    .opt("body", body.as_mut())
            }
            NodeMut::File(n) => {
                let ast::File {
                    doc,
                    name,
                    decls,
                    imports,
                    unresolved,
                    comments,
                } = n;
                list.opt("doc", doc.as_mut())
                    .one("name", name)
                    .seq("decls", decls)
                    .seq("imports", imports)
                    .seq("unresolved", unresolved)
                    .seq("comments", comments)
            }
        }
        .done()
    }

    /// Consume the reference and return the child addressed by `step`.
    ///
    /// # Arguments
    ///
    /// * `step` - The slot (and index for sequence slots) of the child.
    pub fn child_mut(self, step: &SlotStep) -> Result<NodeMut<'a>, HoisterError> {
        let kind = self.kind();
        self.children_mut()
            .into_iter()
            .find(|c| c.step == *step)
            .map(|c| c.node)
            .ok_or_else(|| missing_child_error(kind, step))
    }
}
