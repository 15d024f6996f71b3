//! Integration tests for run configuration
//!
//! Test coverage areas:
//! - File and environment layering
//! - Runs built from configuration

mod common;

use classforge_core::config::{ENV_FLATTEN_HIERARCHY, ENV_MAPPINGS, ENV_REMAP};
use classforge_core::{TransformConfig, TransformError, TransformRun};
use classforge_types::MappingTable;
use classforge_types::SymbolTable;

use common::{animal_hierarchy, animal_table, assert_err, assert_error_contains, assert_ok};

fn write_table(dir: &std::path::Path) -> std::path::PathBuf {
    let shared = animal_table();
    let table: MappingTable = ["zoo/Animal", "zoo/Mammal", "zoo/Dog"]
        .into_iter()
        .filter_map(|name| shared.class_info(name).map(|m| (name.to_string(), m.clone())))
        .collect();
    let path = dir.join("animals.json");
    std::fs::write(&path, table.to_json_string().unwrap()).unwrap();
    path
}

#[test]
fn test_file_then_env_layering() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = write_table(dir.path());
    let config_path = dir.path().join("classforge.json");
    std::fs::write(&config_path, r#"{"remap": false, "parallel": true}"#).unwrap();

    std::env::set_var(ENV_MAPPINGS, &table_path);
    std::env::set_var(ENV_REMAP, "1");
    std::env::set_var(ENV_FLATTEN_HIERARCHY, "true");

    let config =
        assert_ok(TransformConfig::from_file(&config_path), "load config").with_env_overrides();

    std::env::remove_var(ENV_MAPPINGS);
    std::env::remove_var(ENV_REMAP);
    std::env::remove_var(ENV_FLATTEN_HIERARCHY);

    assert!(config.remap);
    assert!(config.parallel);
    assert!(config.flatten_hierarchy);
    assert!(config.apply_access);
    assert_eq!(config.mappings.as_deref(), Some(table_path.as_path()));

    let mut run = assert_ok(TransformRun::from_config(config), "build run");
    let results = run.transform_all(&animal_hierarchy());
    let names: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["farm/Animal", "farm/Mammal", "farm/Dog"]);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = TransformConfig::new()
        .with_mappings("maps/app.json")
        .with_flatten_hierarchy(true);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(assert_ok(TransformConfig::from_json_str(&json), "parse"), config);
}

#[test]
fn test_bad_mappings_path() {
    let config = TransformConfig::new().with_mappings("/nonexistent/classforge/maps.json");
    let err = assert_err(TransformRun::from_config(config), "missing table");
    assert!(matches!(err, TransformError::Config(_)));
    assert_error_contains(&err, "invalid configuration", "missing table");
}
