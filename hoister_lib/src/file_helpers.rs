//! The `file_helpers` module contains small helpers that transformations share: marking a file
//! as modified and classifying fields.

use crate::ast::{Comment, CommentGroup, Expr, Field, File};
use crate::node::NodeRef;
use crate::search::find_first;

/// The names of the builtin scalar types.
pub static BASIC_TYPE_NAMES: &[&str] = &[
    "string",
    "bool",
    "int8",
    "uint8",
    "byte",
    "int16",
    "uint16",
    "int32",
    "rune",
    "uint32",
    "int64",
    "uint64",
    "int",
    "uint",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Append the line comment `// text` to the first comment group of `file`.  A new group is
/// created if the file has none.
///
/// # Arguments
///
/// * `file` - The file to mark.
/// * `text` - The comment text without the `//` marker.
pub fn add_modified_comment(file: &mut File, text: &str) {
    let comment = Comment::new(&format!("// {text}"));
    match file.comments.first_mut() {
        Some(group) => group.list.push(comment),
        None => file.comments.push(CommentGroup {
            list: vec![comment],
        }),
    }
}

/// Return true if any comment in `file` contains `needle`.
pub fn previously_modified(file: &File, needle: &str) -> bool {
    find_first(NodeRef::from(file), |node, _| {
        node.as_comment()
            .map(|c| c.text.contains(needle))
            .unwrap_or(false)
    })
    .is_some()
}

/// Return true if the type of `field` is a builtin scalar type or a pointer to one.
pub fn is_basic_field(field: &Field) -> bool {
    let ident = match &field.type_ {
        Expr::Ident(i) => i,
        Expr::StarExpr(s) => match s.x.as_ref() {
            Expr::Ident(i) => i,
            _ => return false,
        },
        _ => return false,
    };
    BASIC_TYPE_NAMES.contains(&ident.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn test_modified_comment_round_trip() {
        let mut file = File::new("model");
        assert!(!previously_modified(&file, "hoisted"));

        add_modified_comment(&mut file, "hoisted by hoister");
        assert_eq!(file.comments.len(), 1);
        assert_eq!(file.comments[0].list[0].text, "// hoisted by hoister");
        assert!(previously_modified(&file, "hoisted"));

        add_modified_comment(&mut file, "second pass");
        assert_eq!(file.comments.len(), 1);
        assert_eq!(file.comments[0].list.len(), 2);
    }

    #[test]
    fn test_previously_modified_sees_doc_comments() {
        let mut file = File::new("model");
        file.doc = Some(CommentGroup {
            list: vec![Comment::new("// Code generated by hoister. DO NOT EDIT.")],
        });
        assert!(previously_modified(&file, "generated by hoister"));
    }

    #[test]
    fn test_is_basic_field() {
        assert!(is_basic_field(&Field::named("A", Expr::ident("string"))));
        assert!(is_basic_field(&Field::named(
            "B",
            Expr::star(Expr::ident("float64"))
        )));
        assert!(!is_basic_field(&Field::named("C", Expr::ident("Address"))));
        assert!(!is_basic_field(&Field::named(
            "D",
            Expr::star(Expr::star(Expr::ident("int")))
        )));
        assert!(!is_basic_field(&Field::named(
            "E",
            Expr::StructType(StructType::default())
        )));
    }
}
