/// The `config_file` module contains code for reading a hoister configuration file.  Hoister
/// uses the configuration files to allow the user to control the tool behavior for a set of
/// syntax tree files with settings that apply to just those files.
use crate::json::*;
use crate::HoisterError;
use serde_json::{json, Value};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The extension used for hoister configuration files.
pub static CONFIG_FILE_EXTENSION: &str = "hoist";

/// The key in the configuration file for the syntax tree files.
pub static FILENAMES_KEY: &str = "filenames";

/// The key for the name of the type that limits hoisting.
pub static SCOPE_KEY: &str = "scope";

/// The key for the string value containing the path to where the tool should place
/// output.
pub static OUTPUT_DIR_KEY: &str = "output-directory";

/// The key for the boolean value indicating whether the tool should write results to stdout.
pub static STDOUT_KEY: &str = "stdout";

/// Configuration details loaded from a .hoist configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationFileDetails {
    /// Paths to the JSON syntax tree files to transform.
    pub filenames: Vec<PathBuf>,

    /// The type whose nested structs are hoisted, or None for every type.
    pub scope: Option<String>,

    /// The location where the tool should put generated output files.
    pub output_directory: Option<PathBuf>,

    /// True if the tool should write the transformed trees to stdout.
    pub stdout: bool,
}

/// Return true if `file_name` has the configuration file extension.
pub fn is_config_file(file_name: &str) -> bool {
    Path::new(file_name).extension() == Some(OsStr::new(CONFIG_FILE_EXTENSION))
}

impl ConfigurationFileDetails {
    /// Create a new configuration details object by loading the configuration from a JSON
    /// file.  The file must have the extension ".hoist".
    ///
    /// # Arguments
    ///
    /// * `config_file` - The path to the configuration file in the file system.
    pub fn new_from_file(config_file: &str) -> Result<ConfigurationFileDetails, HoisterError> {
        if !is_config_file(config_file) {
            return Err(HoisterError::ConfigFileBadExtension(String::from(
                config_file,
            )));
        }

        let json_value = match load_json_from_file_with_name(config_file) {
            Ok(v) if v.is_object() => v,
            _ => {
                return Err(HoisterError::ConfigFileNotSupported(String::from(
                    config_file,
                )))
            }
        };

        ConfigurationFileDetails::from_json(config_file, &json_value)
    }

    /// Build the configuration from the JSON object `json_value`.  `config_file` names the
    /// source of the value in errors.
    fn from_json(
        config_file: &str,
        json_value: &Value,
    ) -> Result<ConfigurationFileDetails, HoisterError> {
        if !json_value.contains_key(FILENAMES_KEY) {
            return Err(HoisterError::ConfigFileMissingRequiredKey(
                String::from(config_file),
                vec![String::from(FILENAMES_KEY)],
            ));
        }

        let mut details = ConfigurationFileDetails::default();

        if let Some(filenames_array) = json_value.get_array_for_key(FILENAMES_KEY) {
            details.filenames = filenames_array
                .iter()
                .filter_map(|v| v.as_str())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(scope) = json_value.get_str_for_key(SCOPE_KEY) {
            if !scope.is_empty() {
                details.scope = Some(String::from(scope));
            }
        }

        if let Some(output_directory) = json_value.get_str_for_key(OUTPUT_DIR_KEY) {
            details.output_directory = Some(PathBuf::from(output_directory));
        }

        if let Some(stdout) = json_value.get_bool_for_key(STDOUT_KEY) {
            details.stdout = stdout;
        }

        Ok(details)
    }

    /// Helper function to get the configuration as a JSON object.
    fn convert_to_json(&self) -> Value {
        let mut json_value = json!({});

        let json_filenames_array: Vec<Value> = self
            .filenames
            .iter()
            .map(|p| Value::from(p.to_string_lossy().to_string()))
            .collect();

        json_value.set_node_for_key(FILENAMES_KEY, json![json_filenames_array]);

        if let Some(scope) = &self.scope {
            json_value.set_str_for_key(SCOPE_KEY, scope);
        }

        if let Some(output_directory) = &self.output_directory {
            json_value.set_str_for_key(OUTPUT_DIR_KEY, &output_directory.to_string_lossy());
        }

        json_value.set_node_for_key(STDOUT_KEY, json![self.stdout]);

        json_value
    }

    /// Render the configuration as pretty-printed JSON.
    fn to_pretty_json(&self) -> Result<String, HoisterError> {
        let standard_json = format!("{}", self.convert_to_json());
        jsonxf::pretty_print(&standard_json).map_err(HoisterError::JSONFormat)
    }

    /// Create a configuration file in JSON form and write it to the path at `config_file`.
    ///
    /// # Arguments
    ///
    /// * `config_file` - The path in the file system to write the configuration file.
    pub fn write_to_file_as_json(&self, config_file: &str) -> Result<(), HoisterError> {
        let config_file_path = PathBuf::from(config_file);

        // Try to create the parent directory if it does not exist.
        if let Some(parent) = config_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut f = std::fs::File::create(&config_file_path)?;
        let pretty_json = self.to_pretty_json()?;
        writeln!(f, "{pretty_json}")?;

        Ok(())
    }

    /// Convert a configuration to JSON and write the JSON to `stream`.
    ///
    /// # Arguments
    ///
    /// * `stream` - The stream that will receive the JSON.
    pub fn write_to_stream_as_json(&self, stream: &mut dyn Write) -> Result<(), HoisterError> {
        let pretty_json = self.to_pretty_json()?;
        writeln!(stream, "{pretty_json}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hoister-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_bad_extension() {
        let result = ConfigurationFileDetails::new_from_file("settings.json");
        assert!(matches!(
            result,
            Err(HoisterError::ConfigFileBadExtension(_))
        ));
    }

    #[test]
    fn test_missing_filenames_key() {
        let value = json!({ "scope": "Person" });
        let result = ConfigurationFileDetails::from_json("x.hoist", &value);
        match result {
            Err(HoisterError::ConfigFileMissingRequiredKey(file, keys)) => {
                assert_eq!(file, "x.hoist");
                assert_eq!(keys, vec![String::from(FILENAMES_KEY)]);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_from_json_reads_optional_keys() {
        let value = json!({
            "filenames": ["a.json", 7, "b.json"],
            "scope": "Person",
            "output-directory": "out",
            "stdout": true
        });
        let details = ConfigurationFileDetails::from_json("x.hoist", &value).unwrap();
        assert_eq!(
            details.filenames,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert_eq!(details.scope.as_deref(), Some("Person"));
        assert_eq!(details.output_directory, Some(PathBuf::from("out")));
        assert!(details.stdout);
    }

    #[test]
    fn test_write_then_read_back() {
        let details = ConfigurationFileDetails {
            filenames: vec![PathBuf::from("model.json")],
            scope: Some(String::from("Person")),
            output_directory: None,
            stdout: false,
        };
        let path = temp_config_path("model.hoist");
        let path_str = path.to_string_lossy().to_string();

        details.write_to_file_as_json(&path_str).unwrap();
        let loaded = ConfigurationFileDetails::new_from_file(&path_str).unwrap();
        assert_eq!(loaded, details);

        let mut buffer: Vec<u8> = Vec::new();
        details.write_to_stream_as_json(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"scope\""));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unreadable_file_is_not_supported() {
        let path = temp_config_path("broken.hoist");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let result = ConfigurationFileDetails::new_from_file(&path.to_string_lossy());
        assert!(matches!(
            result,
            Err(HoisterError::ConfigFileNotSupported(_))
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
