//! The `kinds_info` module prints the node kinds the tool understands.

use crate::KindsCLArgs;
use hoister_lib::node::{Arity, SlotSchema};
use hoister_lib::NodeKind;

/// Render a slot as `name`, `name?` or `name[]` depending on its arity.
fn describe_slot(slot: &SlotSchema) -> String {
    match slot.arity {
        Arity::Required => String::from(slot.name),
        Arity::Optional => format!("{}?", slot.name),
        Arity::Sequence => format!("{}[]", slot.name),
    }
}

/// Render the schema of `kind` on one line.
fn describe_kind(kind: NodeKind) -> String {
    let slots: Vec<String> = kind.schema().iter().map(describe_slot).collect();
    let mut line = if slots.is_empty() {
        format!("{}: leaf", kind)
    } else {
        format!("{}: {}", kind, slots.join(", "))
    };
    if let Some(value_slot) = kind.value_slot() {
        line.push_str(&format!(" (replaceable: {})", value_slot));
    }
    line
}

/// Display information about the node kinds.
///
/// # Arguments
///
/// * `args` - The command line arguments selecting the list or the description.
pub fn display_kinds_info(args: KindsCLArgs) {
    if args.list {
        println!("Node kinds:");
        for kind in NodeKind::ALL {
            println!("    {}", kind);
        }
    } else if args.describe {
        println!("Node kinds and their child slots:");
        for kind in NodeKind::ALL {
            println!("    {}", describe_kind(*kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_kind() {
        assert_eq!(describe_kind(NodeKind::Ident), "Ident: leaf");
        assert_eq!(
            describe_kind(NodeKind::StarExpr),
            "StarExpr: x (replaceable: x)"
        );
        assert!(describe_kind(NodeKind::Field).contains("names[]"));
        assert!(describe_kind(NodeKind::Field).contains("tag?"));
    }
}
