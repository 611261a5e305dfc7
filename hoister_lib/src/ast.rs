//! The `ast` module contains the concrete node types of the syntax tree for the struct-based
//! source language the library rewrites.
//!
//! Every node kind is a plain struct that owns its children.  Interface-like groups of kinds
//! (expressions, statements, specs and declarations) are closed enumerations so that code that
//! dispatches over node kinds must handle every kind.  Nodes never point back to their parent,
//! ancestry only exists while a traversal is running (see [`crate::traverser`]).
//!
//! All enumerations serialize with a `nodeType` tag naming the concrete kind, which lets an
//! external front-end hand over a parsed tree as JSON:
//!
//! ```json
//! { "nodeType": "StarExpr", "x": { "nodeType": "Ident", "name": "Address" } }
//! ```

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------------------------

/// A single `//` or `/* */` comment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Comment {
    /// The comment text including the comment markers.
    pub text: String,
}

/// A sequence of comments with no other tokens and no empty lines between them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CommentGroup {
    #[serde(default)]
    pub list: Vec<Comment>,
}

// ---------------------------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------------------------

/// A field declaration in a struct type, a method in an interface type, or a parameter/result
/// declaration in a function signature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Field {
    /// Associated documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,

    /// Field, method or parameter names.  Empty for embedded fields and unnamed parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<Ident>,

    /// The field type.
    #[serde(rename = "type")]
    pub type_: Expr,

    /// The field tag, a raw string literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<BasicLit>,

    /// Trailing line comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentGroup>,
}

/// A list of fields enclosed by braces or parentheses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    #[serde(default)]
    pub list: Vec<Field>,
}

// ---------------------------------------------------------------------------------------------
// Expressions and types
// ---------------------------------------------------------------------------------------------

/// The kind of a basic literal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    #[default]
    String,
}

/// The direction of a channel type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChanDir {
    Send,
    Recv,
    #[default]
    Both,
}

/// Placeholder for an expression containing syntax errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BadExpr {}

/// An identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ident {
    pub name: String,
}

/// The `...` type of a variadic parameter or array length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ellipsis {
    /// Element type, absent for `[...]T` array lengths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elt: Option<Box<Expr>>,
}

/// A literal of basic type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicLit {
    pub kind: LitKind,

    /// The literal source text, e.g. `42`, `"foo"` or `` `json:"name"` ``.
    pub value: String,
}

/// A function literal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FuncLit {
    #[serde(rename = "type")]
    pub type_: FuncType,
    pub body: BlockStmt,
}

/// A composite literal such as `Point{X: 1}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompositeLit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elts: Vec<Expr>,
}

/// A parenthesized expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub x: Box<Expr>,
}

/// An expression followed by a selector, `x.sel`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
}

/// An expression followed by an index, `x[index]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Box<Expr>,
    pub index: Box<Expr>,
}

/// An expression followed by multiple indices, `x[a, b]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexListExpr {
    pub x: Box<Expr>,
    #[serde(default)]
    pub indices: Vec<Expr>,
}

/// An expression followed by slice indices, `x[low:high:max]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub x: Box<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Box<Expr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Box<Expr>>,
    #[serde(default)]
    pub slice3: bool,
}

/// A type assertion, `x.(type_)`.  The type is absent in a type switch guard `x.(type)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub x: Box<Expr>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<Box<Expr>>,
}

/// A call expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Expr>,
    /// True if the final argument is followed by `...`.
    #[serde(default)]
    pub ellipsis: bool,
}

/// A pointer type or a dereference, `*x`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StarExpr {
    pub x: Box<Expr>,
}

/// A unary expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: String,
    pub x: Box<Expr>,
}

/// A binary expression.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Box<Expr>,
    pub op: String,
    pub y: Box<Expr>,
}

/// A `key: value` pair in a composite literal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

/// An array or slice type.  Slices have no length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArrayType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<Box<Expr>>,
    pub elt: Box<Expr>,
}

/// A struct type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StructType {
    pub fields: FieldList,
}

/// A function type (signature).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FuncType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<FieldList>,
}

/// An interface type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InterfaceType {
    pub methods: FieldList,
}

/// A map type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

/// A channel type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChanType {
    #[serde(default)]
    pub dir: ChanDir,
    pub value: Box<Expr>,
}

/// Expressions and type expressions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "nodeType")]
pub enum Expr {
    BadExpr(BadExpr),
    Ident(Ident),
    Ellipsis(Ellipsis),
    BasicLit(BasicLit),
    FuncLit(FuncLit),
    CompositeLit(CompositeLit),
    ParenExpr(ParenExpr),
    SelectorExpr(SelectorExpr),
    IndexExpr(IndexExpr),
    IndexListExpr(IndexListExpr),
    SliceExpr(SliceExpr),
    TypeAssertExpr(TypeAssertExpr),
    CallExpr(CallExpr),
    StarExpr(StarExpr),
    UnaryExpr(UnaryExpr),
    BinaryExpr(BinaryExpr),
    KeyValueExpr(KeyValueExpr),
    ArrayType(ArrayType),
    StructType(StructType),
    FuncType(FuncType),
    InterfaceType(InterfaceType),
    MapType(MapType),
    ChanType(ChanType),
}

// ---------------------------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------------------------

/// Placeholder for a statement containing syntax errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BadStmt {}

/// A declaration in a statement list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub decl: Decl,
}

/// An explicit or implicit empty statement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EmptyStmt {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Box<Stmt>,
}

/// A stand-alone expression in a statement list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub x: Expr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub chan: Expr,
    pub value: Expr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    /// `++` or `--`.
    pub tok: String,
}

/// An assignment or a short variable declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    /// The assignment token, e.g. `=`, `:=` or `+=`.
    pub tok: String,
    pub rhs: Vec<Expr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub call: CallExpr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub call: CallExpr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ReturnStmt {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Expr>,
}

/// A `break`, `continue`, `goto` or `fallthrough` statement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Ident>,
}

/// A braced statement list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    #[serde(default)]
    pub list: Vec<Stmt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IfStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either a nested `IfStmt` or a `BlockStmt`.
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_: Option<Box<Stmt>>,
}

/// A case of an expression or type switch.  An empty `list` means `default`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CaseClause {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Stmt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Expr>,
    pub body: BlockStmt,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Stmt>>,
    /// `x := y.(type)` or `y.(type)`.
    pub assign: Box<Stmt>,
    pub body: BlockStmt,
}

/// A case of a select statement.  An absent `comm` means `default`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CommClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comm: Option<Box<Stmt>>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SelectStmt {
    pub body: BlockStmt,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ForStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Stmt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Box<Stmt>>,
    pub body: BlockStmt,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RangeStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
    /// `=` or `:=`, empty when neither key nor value are present.
    #[serde(default)]
    pub tok: String,
    pub x: Expr,
    pub body: BlockStmt,
}

/// Statements.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "nodeType")]
pub enum Stmt {
    BadStmt(BadStmt),
    DeclStmt(DeclStmt),
    EmptyStmt(EmptyStmt),
    LabeledStmt(LabeledStmt),
    ExprStmt(ExprStmt),
    SendStmt(SendStmt),
    IncDecStmt(IncDecStmt),
    AssignStmt(AssignStmt),
    GoStmt(GoStmt),
    DeferStmt(DeferStmt),
    ReturnStmt(ReturnStmt),
    BranchStmt(BranchStmt),
    BlockStmt(BlockStmt),
    IfStmt(IfStmt),
    CaseClause(CaseClause),
    SwitchStmt(SwitchStmt),
    TypeSwitchStmt(TypeSwitchStmt),
    CommClause(CommClause),
    SelectStmt(SelectStmt),
    ForStmt(ForStmt),
    RangeStmt(RangeStmt),
}

// ---------------------------------------------------------------------------------------------
// Specs and declarations
// ---------------------------------------------------------------------------------------------

/// A single package import.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,
    /// Local package name, including `.` and `_`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Ident>,
    pub path: BasicLit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentGroup>,
}

/// A constant or variable declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValueSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentGroup>,
}

/// A named type declaration, `type Name T` or the alias form `type Name = T`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,
    pub name: Ident,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_params: Option<FieldList>,
    /// True for alias declarations.
    #[serde(default)]
    pub assign: bool,
    #[serde(rename = "type")]
    pub type_: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "nodeType")]
pub enum Spec {
    ImportSpec(ImportSpec),
    ValueSpec(ValueSpec),
    TypeSpec(TypeSpec),
}

/// The keyword introducing a generic declaration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclToken {
    Import,
    Const,
    Type,
    Var,
}

/// Placeholder for a declaration containing syntax errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BadDecl {}

/// A generic declaration: an import, constant, type or variable declaration block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,
    pub tok: DeclToken,
    #[serde(default)]
    pub specs: Vec<Spec>,
}

/// A function or method declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FuncDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,
    /// Receiver, absent for functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv: Option<FieldList>,
    pub name: Ident,
    #[serde(rename = "type")]
    pub type_: FuncType,
    /// Function body, absent for external (non-Go) functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BlockStmt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "nodeType")]
pub enum Decl {
    BadDecl(BadDecl),
    GenDecl(GenDecl),
    FuncDecl(FuncDecl),
}

/// The root of a syntax tree: one source file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,

    /// The package name.
    pub name: Ident,

    /// Top-level declarations in source order.  This order is the only top-level ordering of the
    /// file, rewrites append to it and never reorder it.
    #[serde(default)]
    pub decls: Vec<Decl>,

    /// Imports in this file, as cached by the front-end.
    #[serde(default)]
    pub imports: Vec<ImportSpec>,

    /// Unresolved identifiers in this file, as cached by the front-end.
    #[serde(default)]
    pub unresolved: Vec<Ident>,

    /// All comments in the file.
    #[serde(default)]
    pub comments: Vec<CommentGroup>,
}

// ---------------------------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------------------------

impl Comment {
    pub fn new(text: &str) -> Comment {
        Comment {
            text: String::from(text),
        }
    }
}

impl Ident {
    /// Create a new identifier.
    ///
    /// # Arguments
    ///
    /// * `name` - The identifier text.
    pub fn new(name: &str) -> Ident {
        Ident {
            name: String::from(name),
        }
    }
}

impl BasicLit {
    /// Create a string literal.  The value is stored verbatim, so the caller supplies the
    /// surrounding quotes or backticks.
    pub fn string(value: &str) -> BasicLit {
        BasicLit {
            kind: LitKind::String,
            value: String::from(value),
        }
    }
}

impl Field {
    /// Create a field with one name and a type.
    ///
    /// # Arguments
    ///
    /// * `name` - The field name.
    /// * `type_` - The field type.
    pub fn named(name: &str, type_: Expr) -> Field {
        Field {
            doc: None,
            names: vec![Ident::new(name)],
            type_,
            tag: None,
            comment: None,
        }
    }

    /// Return the same field with `tag` attached as its tag literal.
    pub fn with_tag(mut self, tag: &str) -> Field {
        self.tag = Some(BasicLit::string(tag));
        self
    }
}

impl StructType {
    /// Create a struct type from a list of fields.
    pub fn new(fields: Vec<Field>) -> StructType {
        StructType {
            fields: FieldList { list: fields },
        }
    }
}

impl GenDecl {
    /// Create a `type name <type_>` declaration holding a single [`TypeSpec`].
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the declared type.
    /// * `type_` - The underlying type.
    pub fn type_decl(name: &str, type_: Expr) -> GenDecl {
        GenDecl {
            doc: None,
            tok: DeclToken::Type,
            specs: vec![Spec::TypeSpec(TypeSpec {
                doc: None,
                name: Ident::new(name),
                type_params: None,
                assign: false,
                type_,
                comment: None,
            })],
        }
    }
}

impl Expr {
    /// Shorthand for an identifier expression.
    pub fn ident(name: &str) -> Expr {
        Expr::Ident(Ident::new(name))
    }

    /// Shorthand for a pointer type `*inner`.
    pub fn star(inner: Expr) -> Expr {
        Expr::StarExpr(StarExpr {
            x: Box::new(inner),
        })
    }
}

impl File {
    /// Create an empty file for `package`.
    ///
    /// # Arguments
    ///
    /// * `package` - The package name of the new file.
    pub fn new(package: &str) -> File {
        File {
            doc: None,
            name: Ident::new(package),
            decls: Vec::new(),
            imports: Vec::new(),
            unresolved: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Return the `TypeSpec` of every top-level type declaration, in declaration order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls
            .iter()
            .filter_map(|d| match d {
                Decl::GenDecl(g) => Some(g),
                _ => None,
            })
            .flat_map(|g| g.specs.iter())
            .filter_map(|s| match s {
                Spec::TypeSpec(t) => Some(t),
                _ => None,
            })
    }

    /// Return the top-level type declaration named `name`, if any.
    pub fn find_type_spec(&self, name: &str) -> Option<&TypeSpec> {
        self.type_specs().find(|t| t.name.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_str;

    #[test]
    fn test_expr_serializes_with_node_type_tag() {
        let expr = Expr::star(Expr::ident("Address"));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["nodeType"], "StarExpr");
        assert_eq!(json["x"]["nodeType"], "Ident");
        assert_eq!(json["x"]["name"], "Address");
    }

    #[test]
    fn test_file_deserializes_from_json() {
        let file: File = from_str(
            r#"{
                "name": { "name": "model" },
                "decls": [
                    {
                        "nodeType": "GenDecl",
                        "tok": "Type",
                        "specs": [
                            {
                                "nodeType": "TypeSpec",
                                "name": { "name": "Person" },
                                "type": {
                                    "nodeType": "StructType",
                                    "fields": { "list": [
                                        {
                                            "names": [ { "name": "Name" } ],
                                            "type": { "nodeType": "Ident", "name": "string" },
                                            "tag": { "kind": "String", "value": "`json:\"name\"`" }
                                        }
                                    ] }
                                }
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.name.name, "model");
        let person = file.find_type_spec("Person").unwrap();
        match &person.type_ {
            Expr::StructType(s) => {
                assert_eq!(s.fields.list.len(), 1);
                assert_eq!(
                    s.fields.list[0].tag.as_ref().unwrap().value,
                    "`json:\"name\"`"
                );
            }
            other => panic!("unexpected type {other:?}"),
        }
    }

    #[test]
    fn test_type_specs_skips_other_declarations() {
        let mut file = File::new("model");
        file.decls.push(Decl::BadDecl(BadDecl {}));
        file.decls.push(Decl::GenDecl(GenDecl::type_decl(
            "Id",
            Expr::ident("int"),
        )));
        let names: Vec<&str> = file.type_specs().map(|t| t.name.name.as_str()).collect();
        assert_eq!(names, vec!["Id"]);
        assert!(file.find_type_spec("Missing").is_none());
    }
}
