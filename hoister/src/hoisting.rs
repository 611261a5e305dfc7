//! The `hoisting` module runs the struct hoisting transformation over the files named on the
//! command line and writes the transformed syntax trees to the output directory or stdout.

use crate::HoistCLArgs;
use hoister_lib::config_file::*;
use hoister_lib::error::HoisterError;
use hoister_lib::file_helpers::{add_modified_comment, previously_modified};
use hoister_lib::json::{
    load_ast_from_file_with_name, write_ast_to_file_with_name, write_ast_to_stream,
};
use hoister_lib::{hoist_nested_structs, HoistReport};
use std::path::{Path, PathBuf};

/// The comment added to each file the tool changes.
static MODIFIED_COMMENT: &str = "nested structs hoisted";

/// The settings used to transform one syntax tree file.
#[derive(Debug, Clone)]
struct HoistParameters {
    file_name: String,
    scope: Option<String>,
    output_directory: PathBuf,
    use_stdout: bool,
    save_configuration_file: bool,
}

/// Return the final component of `file_name`, or `file_name` itself if it has none.
fn base_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from(file_name))
}

/// Expand the command line arguments into one set of parameters per syntax tree file.
/// Configuration files contribute their own file list, and their settings take precedence
/// over the command line.
///
/// # Arguments
///
/// * `args` - The command line arguments that control the transformation.
fn collect_parameters(args: HoistCLArgs) -> Result<Vec<HoistParameters>, HoisterError> {
    let mut parameters: Vec<HoistParameters> = Vec::new();

    for file_name in args.file_names {
        if is_config_file(&file_name) {
            let details = ConfigurationFileDetails::new_from_file(&file_name)?;
            log::debug!(
                "Configuration file {} names {} file(s)",
                file_name,
                details.filenames.len()
            );

            let scope = details.scope.or_else(|| args.scope.clone());
            let output_directory = details
                .output_directory
                .unwrap_or_else(|| PathBuf::from(&args.output_directory));

            for path_buf in details.filenames {
                parameters.push(HoistParameters {
                    file_name: path_buf.to_string_lossy().to_string(),
                    scope: scope.clone(),
                    output_directory: output_directory.clone(),
                    use_stdout: details.stdout || args.stdout,
                    save_configuration_file: args.save_config_files,
                });
            }
        } else {
            parameters.push(HoistParameters {
                file_name,
                scope: args.scope.clone(),
                output_directory: PathBuf::from(&args.output_directory),
                use_stdout: args.stdout,
                save_configuration_file: args.save_config_files,
            });
        }
    }

    Ok(parameters)
}

/// Run the hoisting transformation for every file in `args`.  A failure in one file is
/// reported and does not stop the others.
///
/// # Arguments
///
/// * `args` - The command line arguments that control the transformation.
pub fn hoist_files(args: HoistCLArgs) -> Result<(), HoisterError> {
    for params in collect_parameters(args)? {
        match hoist_file(&params) {
            Ok(report) => log::info!("Hoisted structs in {}: {}", params.file_name, report),
            Err(e) => println!("Unable to hoist structs in {}: {}", params.file_name, e),
        }
    }

    Ok(())
}

/// Load, transform and write a single syntax tree file.
///
/// # Arguments
///
/// * `params` - The settings for the file.
fn hoist_file(params: &HoistParameters) -> Result<HoistReport, HoisterError> {
    let mut ast = load_ast_from_file_with_name(&params.file_name)?;

    let report = hoist_nested_structs(&mut ast, params.scope.as_deref());
    for failure in report.failures() {
        println!(
            "Unable to hoist struct at {} in {}: {}",
            failure.path, params.file_name, failure.error
        );
    }

    if !report.promoted().is_empty() && !previously_modified(&ast, MODIFIED_COMMENT) {
        add_modified_comment(&mut ast, MODIFIED_COMMENT);
    }

    let base_name = base_file_name(&params.file_name);

    if params.use_stdout {
        let mut stdout = std::io::stdout();
        write_ast_to_stream(&ast, &mut stdout)?;
    } else {
        let out_file_path = params.output_directory.join(&base_name);
        write_ast_to_file_with_name(&ast, &out_file_path.to_string_lossy())?;
        log::info!(
            "Writing transformed file {:?} to {}",
            base_name,
            params.output_directory.to_string_lossy()
        );
    }

    if params.save_configuration_file {
        save_configuration_file(params, &base_name)?;
    }

    Ok(report)
}

/// Write the settings used for `params` to a configuration file named after the input file.
///
/// # Arguments
///
/// * `params` - The settings for the file.
/// * `base_name` - The final path component of the input file.
fn save_configuration_file(params: &HoistParameters, base_name: &str) -> Result<(), HoisterError> {
    let details = ConfigurationFileDetails {
        filenames: vec![PathBuf::from(&params.file_name)],
        scope: params.scope.clone(),
        output_directory: Some(params.output_directory.clone()),
        stdout: params.use_stdout,
    };

    let stem = match base_name.rfind('.') {
        Some(index) if index > 0 => &base_name[..index],
        _ => base_name,
    };
    let out_file_name = format!("{stem}.{CONFIG_FILE_EXTENSION}");
    let out_file_path = params.output_directory.join(out_file_name);

    if params.use_stdout {
        let mut stdout = std::io::stdout();
        details.write_to_stream_as_json(&mut stdout)?;
    } else {
        println!(
            "Writing configuration file {}",
            out_file_path.to_string_lossy()
        );
        details.write_to_file_as_json(&out_file_path.to_string_lossy())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file_names: Vec<&str>) -> HoistCLArgs {
        HoistCLArgs {
            output_directory: String::from("out"),
            file_names: file_names.into_iter().map(String::from).collect(),
            scope: Some(String::from("Person")),
            save_config_files: false,
            stdout: false,
        }
    }

    #[test]
    fn test_base_file_name() {
        assert_eq!(base_file_name("dir/model.json"), "model.json");
        assert_eq!(base_file_name("model.json"), "model.json");
    }

    #[test]
    fn test_plain_files_use_command_line_settings() {
        let params = collect_parameters(args(vec!["a.json", "b.json"])).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].file_name, "b.json");
        assert_eq!(params[0].scope.as_deref(), Some("Person"));
        assert_eq!(params[0].output_directory, PathBuf::from("out"));
        assert!(!params[0].use_stdout);
    }

    #[test]
    fn test_config_file_settings_take_precedence() {
        let dir = std::env::temp_dir().join(format!("hoister-cli-test-{}", std::process::id()));
        let config_path = dir.join("batch.hoist");
        let details = ConfigurationFileDetails {
            filenames: vec![PathBuf::from("x.json"), PathBuf::from("y.json")],
            scope: Some(String::from("Company")),
            output_directory: Some(PathBuf::from("elsewhere")),
            stdout: true,
        };
        details
            .write_to_file_as_json(&config_path.to_string_lossy())
            .unwrap();

        let config_name = config_path.to_string_lossy().to_string();
        let params = collect_parameters(args(vec![config_name.as_str()])).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].file_name, "x.json");
        assert_eq!(params[0].scope.as_deref(), Some("Company"));
        assert_eq!(params[1].output_directory, PathBuf::from("elsewhere"));
        assert!(params[1].use_stdout);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = collect_parameters(args(vec!["/nonexistent/hoister/batch.hoist"]));
        assert!(matches!(result, Err(HoisterError::ConfigFileNotSupported(_))));
    }
}
