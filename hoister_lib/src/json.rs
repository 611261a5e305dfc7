//! The `json` module provides helpers for reading and writing JSON: the JSON form of syntax
//! trees handed over by an external front-end, and the configuration files of the tool.

use crate::ast::File;
use crate::error::HoisterError;
use serde_json::{Map, Value};
use std::io::{BufReader, Write};
use std::path::Path;

/// Load a JSON value from the file at `file_name`.
///
/// # Arguments
///
/// * `file_name` - The path to the file in the file system.
pub fn load_json_from_file_with_name(file_name: &str) -> Result<Value, HoisterError> {
    let file = std::fs::File::open(file_name)?;
    let reader = BufReader::new(file);
    let value: Value = serde_json::from_reader(reader)?;
    Ok(value)
}

/// Load a syntax tree from the JSON file at `file_name`.
///
/// # Arguments
///
/// * `file_name` - The path to the JSON syntax tree in the file system.
pub fn load_ast_from_file_with_name(file_name: &str) -> Result<File, HoisterError> {
    let file = std::fs::File::open(file_name)?;
    let reader = BufReader::new(file);
    let ast: File = serde_json::from_reader(reader)?;
    Ok(ast)
}

/// Convert a syntax tree to pretty-printed JSON text.
pub fn ast_to_pretty_json(ast: &File) -> Result<String, HoisterError> {
    let standard_json = serde_json::to_string(ast)?;
    jsonxf::pretty_print(&standard_json).map_err(HoisterError::JSONFormat)
}

/// Write a syntax tree as pretty-printed JSON to `stream`.
pub fn write_ast_to_stream(ast: &File, stream: &mut dyn Write) -> Result<(), HoisterError> {
    let pretty_json = ast_to_pretty_json(ast)?;
    writeln!(stream, "{pretty_json}")?;
    Ok(())
}

/// Write a syntax tree as pretty-printed JSON to the file at `file_name`, creating the parent
/// directory if it does not exist.
///
/// # Arguments
///
/// * `ast` - The syntax tree.
/// * `file_name` - The path to write in the file system.
pub fn write_ast_to_file_with_name(ast: &File, file_name: &str) -> Result<(), HoisterError> {
    if let Some(parent) = Path::new(file_name).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut f = std::fs::File::create(file_name)?;
    write_ast_to_stream(ast, &mut f)
}

/// Trait that adds typed accessors to JSON object values.
pub trait JSONAccess {
    /// Return true if the value is an object with `key`.
    fn contains_key(&self, key: &str) -> bool;

    /// Return the string stored at `key`.
    fn get_str_for_key(&self, key: &str) -> Option<&str>;

    /// Return the boolean stored at `key`.
    fn get_bool_for_key(&self, key: &str) -> Option<bool>;

    /// Return the array stored at `key`.
    fn get_array_for_key(&self, key: &str) -> Option<&Vec<Value>>;

    /// Store `node` at `key`.  A value that is not an object is replaced by an empty object
    /// first.
    fn set_node_for_key(&mut self, key: &str, node: Value);

    /// Store the string `value` at `key`.
    fn set_str_for_key(&mut self, key: &str, value: &str) {
        self.set_node_for_key(key, Value::from(value));
    }
}

impl JSONAccess for Value {
    fn contains_key(&self, key: &str) -> bool {
        self.as_object().map(|o| o.contains_key(key)).unwrap_or(false)
    }

    fn get_str_for_key(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    fn get_bool_for_key(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    fn get_array_for_key(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(|v| v.as_array())
    }

    fn set_node_for_key(&mut self, key: &str, node: Value) {
        if !self.is_object() {
            *self = Value::Object(Map::new());
        }
        if let Some(object) = self.as_object_mut() {
            object.insert(String::from(key), node);
        }
    }
}
