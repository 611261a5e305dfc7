use hoister_lib::ast::{Decl, Expr, Spec};
use hoister_lib::config_file::ConfigurationFileDetails;
use hoister_lib::file_helpers::{add_modified_comment, previously_modified};
use hoister_lib::json::{load_ast_from_file_with_name, write_ast_to_file_with_name};
use hoister_lib::{hoist_nested_structs, query_kind, File, NodeKind, NodeRef, Tag};
use std::path::PathBuf;

static MODEL_JSON: &str = r#"{
    "name": { "name": "model" },
    "decls": [
        {
            "nodeType": "GenDecl",
            "tok": "Import",
            "specs": [
                { "nodeType": "ImportSpec", "path": { "kind": "String", "value": "\"time\"" } }
            ]
        },
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
                            },
                            {
                                "names": [ { "name": "Address" } ],
                                "type": {
                                    "nodeType": "StructType",
                                    "fields": { "list": [
                                        {
                                            "names": [ { "name": "Street" } ],
                                            "type": { "nodeType": "Ident", "name": "string" },
                                            "tag": { "kind": "String", "value": "`json:\"street,omitempty\"`" }
                                        }
                                    ] }
                                },
                                "tag": { "kind": "String", "value": "`json:\"address\"`" }
                            }
                        ] }
                    }
                }
            ]
        },
        {
            "nodeType": "GenDecl",
            "tok": "Type",
            "specs": [
                {
                    "nodeType": "TypeSpec",
                    "name": { "name": "Company" },
                    "type": {
                        "nodeType": "StructType",
                        "fields": { "list": [
                            {
                                "names": [ { "name": "Office" } ],
                                "type": {
                                    "nodeType": "StructType",
                                    "fields": { "list": [
                                        {
                                            "names": [ { "name": "Opened" } ],
                                            "type": {
                                                "nodeType": "SelectorExpr",
                                                "x": { "nodeType": "Ident", "name": "time" },
                                                "sel": { "name": "Time" }
                                            }
                                        }
                                    ] }
                                }
                            }
                        ] }
                    }
                }
            ]
        }
    ]
}"#;

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hoister-it-{}-{}", test, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn type_names(file: &File) -> Vec<String> {
    file.type_specs().map(|t| t.name.name.clone()).collect()
}

#[test]
fn test_load_hoist_save_round_trip() {
    let dir = scratch_dir("round-trip");
    let input = dir.join("model.json");
    let output = dir.join("out").join("model.json");
    std::fs::write(&input, MODEL_JSON).unwrap();

    let mut file = load_ast_from_file_with_name(&input.to_string_lossy()).unwrap();
    let report = hoist_nested_structs(&mut file, None);
    assert_eq!(report.promoted().len(), 2);
    assert!(report.failures().is_empty());
    add_modified_comment(&mut file, "structs hoisted");

    write_ast_to_file_with_name(&file, &output.to_string_lossy()).unwrap();
    let reloaded = load_ast_from_file_with_name(&output.to_string_lossy()).unwrap();
    assert_eq!(reloaded, file);
    assert!(previously_modified(&reloaded, "structs hoisted"));
    assert_eq!(
        type_names(&reloaded),
        vec!["Person", "Company", "Address", "Office"]
    );

    // The promoted struct keeps its field tags; the field keeps its own tag.
    let address = reloaded.find_type_spec("Address").unwrap();
    let street_tag = match &address.type_ {
        Expr::StructType(s) => s.fields.list[0].tag.clone().unwrap(),
        other => panic!("unexpected type {other:?}"),
    };
    assert_eq!(Tag::from_literal(&street_tag).json_name().as_deref(), Some("street"));

    let person_fields = match &reloaded.find_type_spec("Person").unwrap().type_ {
        Expr::StructType(s) => s.fields.list.clone(),
        other => panic!("unexpected type {other:?}"),
    };
    assert_eq!(person_fields[1].type_, Expr::star(Expr::ident("Address")));
    assert_eq!(
        Tag::from_literal(person_fields[1].tag.as_ref().unwrap()).value("json"),
        Some("address")
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_scoped_hoist_from_config_file() {
    let dir = scratch_dir("config");
    let input = dir.join("model.json");
    std::fs::write(&input, MODEL_JSON).unwrap();

    let details = ConfigurationFileDetails {
        filenames: vec![input.clone()],
        scope: Some(String::from("Company")),
        output_directory: None,
        stdout: true,
    };
    let config_path = dir.join("model.hoist");
    details
        .write_to_file_as_json(&config_path.to_string_lossy())
        .unwrap();

    let loaded = ConfigurationFileDetails::new_from_file(&config_path.to_string_lossy()).unwrap();
    assert_eq!(loaded, details);

    let mut file = load_ast_from_file_with_name(&loaded.filenames[0].to_string_lossy()).unwrap();
    let report = hoist_nested_structs(&mut file, loaded.scope.as_deref());
    let promoted: Vec<&str> = report.promoted().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(promoted, vec!["Office"]);

    // Person still holds its inline Address struct.
    let inline: Vec<String> = query_kind(NodeRef::from(&file), NodeKind::StructType)
        .into_iter()
        .filter(|f| f.parent().map(|p| p.kind()) == Some(NodeKind::Field))
        .map(|f| f.path.to_string())
        .collect();
    assert_eq!(inline, vec!["decls[1].specs[0].type.fields.list[1].type"]);

    // The import declaration is untouched and still first.
    match &file.decls[0] {
        Decl::GenDecl(g) => assert!(matches!(g.specs[0], Spec::ImportSpec(_))),
        other => panic!("unexpected declaration {other:?}"),
    }

    std::fs::remove_dir_all(&dir).unwrap();
}
