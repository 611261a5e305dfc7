//! The `error` module contains `HoisterError`, the error enumeration used to communicate
//! library errors.

use crate::node::NodeKind;
use std::convert::From;
use thiserror::Error;

/// The list of errors that the library can generate.
#[derive(Error, Debug)]
pub enum HoisterError {
    #[error("IO error: {0}")]
    IO(std::io::Error),

    /// An error indicating that JSON parsing failed.
    #[error("JSON error occurred: {0}")]
    JSON(serde_json::Error),

    /// An error indicating that the tool could not reformat JSON output.
    #[error("Unable to format JSON: {0}")]
    JSONFormat(String),

    /// A path step named a slot that the node kind does not declare in its schema.
    #[error("Node kind {kind} has no slot named '{slot}'")]
    UnknownSlot { kind: NodeKind, slot: String },

    /// A path step named a declared slot, but the slot is empty or the index is out of range.
    #[error("Node kind {kind} has no child at {slot}{}", index_suffix(.index))]
    MissingChild {
        kind: NodeKind,
        slot: String,
        index: Option<usize>,
    },

    /// The struct at the path has no enclosing field to borrow a name from.
    #[error("No enclosing field for struct at {0}")]
    NoFieldAncestor(String),

    /// The nearest enclosing field does not hold the struct directly as its type.  The struct
    /// sits inside an array, map, channel or other composite type.
    #[error("Struct at {path} is not the direct type of field '{field}'")]
    FieldNotDirectParent { path: String, field: String },

    /// The enclosing field is embedded and has no name.
    #[error("Enclosing field of struct at {0} has no name")]
    UnnamedField(String),

    /// The rewrite tried to overwrite a slot that is not the value slot of the node kind.
    #[error("Node kind {kind} cannot replace its '{slot}' slot")]
    SlotNotReplaceable { kind: NodeKind, slot: String },

    /// A tag combiner failed to merge the values for a key.
    #[error("Unable to combine tag values for key '{key}': {reason}")]
    TagCombine { key: String, reason: String },

    /// An error indicating that the tool received a config file that it does not support or
    /// cannot read.
    #[error("Configuration file {0} not supported")]
    ConfigFileNotSupported(String),

    /// An error indicating that the tool received a configuration file that does not have the
    /// correct file extension.
    #[error("Configuration file {0} does not have the correct extension")]
    ConfigFileBadExtension(String),

    /// An error indicating that configuration file keys are missing.
    #[error("Configuration file {0} does not have keys: {1:?}")]
    ConfigFileMissingRequiredKey(String, Vec<String>),

    /// An error indicating a string did not name a node kind.
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("[{i}]"),
        None => String::new(),
    }
}

impl HoisterError {
    /// Return true if the error means the hoisting transformation could not derive a name for
    /// a promoted struct.
    pub fn is_name_recovery(&self) -> bool {
        matches!(
            self,
            HoisterError::NoFieldAncestor(_)
                | HoisterError::FieldNotDirectParent { .. }
                | HoisterError::UnnamedField(_)
        )
    }

    /// Return true if the error means a path or slot did not match the node schema.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            HoisterError::UnknownSlot { .. } | HoisterError::MissingChild { .. }
        )
    }
}

impl From<std::io::Error> for HoisterError {
    fn from(e: std::io::Error) -> Self {
        HoisterError::IO(e)
    }
}

impl From<serde_json::Error> for HoisterError {
    fn from(e: serde_json::Error) -> Self {
        HoisterError::JSON(e)
    }
}
