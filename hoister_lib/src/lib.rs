//! # Hoister Lib
//!
//! `hoister_lib` provides an API to query and rewrite the syntax trees of a struct-based
//! language.  The trees come from an external front-end, usually as JSON, and go back to an
//! external emitter once the library has transformed them.
//!
//! ## Hoister Lib Design
//!
//! `hoister_lib` is built in layers:
//! - A node model ([`ast`]) with uniform borrowed and mutable views ([`NodeRef`], [`NodeMut`])
//!   and a slot schema per node kind.
//! - A traversal engine ([`AstTraverser`], [`Visitor`]) and a predicate query ([`query`]) that
//!   reports each match with its ancestors and its [`NodePath`].
//! - Child-slot replacement ([`replace_value_slot`]).
//! - The struct hoisting transformation ([`hoist_nested_structs`]), which promotes nested
//!   anonymous structs to named top-level types.
//! - Supporting utilities: the field [`Tag`] model, file helpers, JSON loading and saving, and
//!   configuration files.

pub use self::ast::File;
pub use self::error::HoisterError;
pub use self::hoist::{hoist_nested_structs, HoistReport};
pub use self::node::{NodeKind, NodeMut, NodeRef};
pub use self::path::{NodePath, SlotStep};
pub use self::replace::{replace_value_slot, Replacement};
pub use self::search::{query, query_kind, FoundNode, Verdict};
pub use self::tag::Tag;
pub use self::traverser::{Ancestry, AstTraverser};
pub use self::visitor::{VisitResult, Visitor};

pub mod ast;
pub mod config_file;
pub mod error;
pub mod file_helpers;
pub mod hoist;
pub mod json;
pub mod node;
pub mod path;
pub mod replace;
pub mod search;
pub mod tag;
pub mod traverser;
pub mod visitor;
