// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic `avail.toml` files on disk and
//! the project model built from them.

use std::path::Path;

use avail_pack::config::loader::ConfigLoader;
use avail_pack::config::{CONFIG_FILE_NAME, Config};
use avail_pack::error::ConfigError;
use avail_pack::model::{DigestAlgorithm, RootLocation};
use avail_pack::project::AvailProject;

const AVAIL_TOML: &str = r#"
[project]
name = "avail-json"
version = "1.2.0"
runtime = "org.availlang:avail:2.0.0"

[artifact]
digest_algorithm = "SHA-384"
description = "JSON for Avail"
module_header = "Copyright 2026"

[[artifact.files]]
source = "LICENSE"
target = "META-INF/"

[[artifact.directories]]
source = "docs"
target = "docs"

[roots.avail-json]
location = "src/avail/avail-json"
entry_points = ["JSON"]
description = "JSON parsing and printing"

[roots.vendor]
location = "jar:vendor/vendor.jar"

[create_roots.json-tests]
modules = ["JSON Tests"]
packages = ["Fixtures"]
module_header = "Test fixtures"

[dependencies]
avail-stdlib = "org.availlang:avail-stdlib:2.0.0"

[aliases]
release = ["init-roots", "package"]
"#;

fn write_project(dir: &Path) {
    std::fs::write(dir.join(CONFIG_FILE_NAME), AVAIL_TOML).unwrap();
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_from_file_resolves_relative_to_file() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let config = Config::from_file(dir.path().join(CONFIG_FILE_NAME)).unwrap();

    assert_eq!(config.project_dir(), dir.path());
    assert_eq!(config.project.roots_directory, dir.path().join("roots"));
    assert_eq!(
        config.artifact.output_directory,
        dir.path().join("build/libs")
    );
    assert_eq!(config.artifact.files[0].source, dir.path().join("LICENSE"));
    assert_eq!(config.digest_algorithm().unwrap(), DigestAlgorithm::Sha384);
    assert_eq!(config.aliases["release"], ["init-roots", "package"]);
}

#[test]
fn config_ini_overrides_project_file() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());
    let ci = dir.path().join("ci.toml");
    std::fs::write(&ci, "[project]\nversion = \"1.2.1\"\n").unwrap();

    let config = ConfigLoader::new()
        .with_project_dir(dir.path())
        .add_toml_file_optional(dir.path().join(CONFIG_FILE_NAME))
        .add_toml_file(&ci)
        .build()
        .unwrap();

    assert_eq!(config.project.version, "1.2.1");
    assert_eq!(config.project.name, "avail-json");
}

#[test]
fn config_set_overrides_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let config = ConfigLoader::new()
        .with_project_dir(dir.path())
        .add_toml_file(dir.path().join(CONFIG_FILE_NAME))
        .apply_overrides(&[
            "project.version=9.9.9".to_string(),
            "artifact/digest_algorithm=SHA-512".to_string(),
        ])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.project.version, "9.9.9");
    assert_eq!(config.digest_algorithm().unwrap(), DigestAlgorithm::Sha512);
}

#[test]
fn config_optional_file_missing_is_fine() {
    let dir = tempfile::tempdir().unwrap();

    let loader = ConfigLoader::new()
        .with_project_dir(dir.path())
        .add_toml_file_optional(dir.path().join(CONFIG_FILE_NAME));
    assert!(loader.loaded_files().is_empty());

    let config = loader.build().unwrap();
    let expected = dir.path().file_name().unwrap().to_string_lossy();
    assert_eq!(config.project.name, expected);
}

#[test]
fn config_required_file_missing_fails() {
    let dir = tempfile::tempdir().unwrap();

    let err = ConfigLoader::new()
        .add_toml_file(dir.path().join("missing.toml"))
        .build()
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ParseError { .. })
    ));
}

#[test]
fn config_format_loaded_files() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let loader = ConfigLoader::new()
        .add_toml_file_optional(dir.path().join(CONFIG_FILE_NAME))
        .add_toml_str("[global]\ndry = true");

    let lines = loader.format_loaded_files();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. [optional] "));
    assert!(lines[0].ends_with(CONFIG_FILE_NAME));
    assert_eq!(lines[1], "2. [string] <string>");
}

// =============================================================================
// Project model
// =============================================================================

#[test]
fn project_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());
    let config = Config::from_file(dir.path().join(CONFIG_FILE_NAME)).unwrap();

    let project = AvailProject::from_config(&config).unwrap();

    assert_eq!(project.name(), "avail-json");
    assert_eq!(project.version(), "1.2.0");
    assert_eq!(
        project.runtime().map(|r| r.coordinate()),
        Some("org.availlang:avail:2.0.0".to_string())
    );
    assert_eq!(
        project.options().output_path(),
        dir.path().join("build/libs/avail-json-1.2.0.jar")
    );

    let names: Vec<_> = project
        .roots()
        .iter()
        .map(|root| root.name().to_string())
        .collect();
    assert_eq!(names, ["avail-json", "avail-stdlib", "vendor", "json-tests"]);

    let vendor = project.root("vendor").unwrap();
    assert_eq!(
        vendor.location(),
        &RootLocation::Jar {
            archive: dir.path().join("vendor/vendor.jar"),
            prefix: String::new(),
        }
    );

    let tests = project.root("json-tests").unwrap();
    let creation = tests.pending_creation().unwrap();
    assert_eq!(creation.modules()[0].file_name(), "JSON Tests.avail");
    assert_eq!(creation.modules()[0].header(), Some("Test fixtures"));
    assert_eq!(
        project.options().module_header.as_deref(),
        Some("Copyright 2026")
    );
    assert_eq!(creation.module_packages()[0].name(), "Fixtures");
}

#[test]
fn project_rejects_bad_root_location() {
    let config = Config::parse(
        r#"
[roots.broken]
location = "jar:"
"#,
    )
    .unwrap();

    let err = AvailProject::from_config(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidLocation { .. })
    ));
}
