//! The `querying` module lists the nodes of one kind in syntax tree files, together with the
//! path to each node and the kinds of its enclosing nodes.

use crate::QueryCLArgs;
use hoister_lib::error::HoisterError;
use hoister_lib::json::load_ast_from_file_with_name;
use hoister_lib::{query_kind, FoundNode, NodeKind, NodeRef};
use std::str::FromStr;

/// Render one query result as `path (parent < grandparent < ...)`.
fn describe_found(found: &FoundNode<'_>) -> String {
    let ancestor_kinds: Vec<&str> = found.ancestors.iter().map(|a| a.kind().name()).collect();
    if ancestor_kinds.is_empty() {
        format!("{}", found.path)
    } else {
        format!("{} ({})", found.path, ancestor_kinds.join(" < "))
    }
}

/// Print the nodes of the kind in `args` for every file in `args`.
///
/// # Arguments
///
/// * `args` - The command line arguments naming the kind and the files.
pub fn query_files(args: QueryCLArgs) -> Result<(), HoisterError> {
    let kind = NodeKind::from_str(&args.kind)?;

    for file_name in &args.file_names {
        let ast = match load_ast_from_file_with_name(file_name) {
            Ok(ast) => ast,
            Err(e) => {
                println!("Unable to load {}: {}", file_name, e);
                continue;
            }
        };

        let found = query_kind(NodeRef::from(&ast), kind);
        log::info!("Found {} {} node(s) in {}", found.len(), kind, file_name);

        println!("{}:", file_name);
        for node in &found {
            println!("    {}", describe_found(node));
        }
    }

    Ok(())
}
