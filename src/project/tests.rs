// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AvailProject, DirectoryInclusion, FileInclusion, PackagingOption};
use crate::config::ConfigLoader;
use crate::error::ConfigError;
use crate::model::{DigestAlgorithm, PendingCreation, Root, RootLocation};
use std::path::{Path, PathBuf};

fn dir_root(name: &str, path: &str) -> Root {
    Root::new(name, RootLocation::Directory(PathBuf::from(path)))
}

fn project() -> AvailProject {
    AvailProject::new("sample", "/work/sample").with_version("1.0.0")
}

#[test]
fn test_add_root_last_write_wins() {
    let mut project = project();
    project.add_root(dir_root("lib", "/a").with_description("first"));
    project.add_root(dir_root("lib", "/b").with_description("second"));

    let roots = project.roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].description(), "second");
    assert_eq!(
        roots[0].location(),
        &RootLocation::Directory(PathBuf::from("/b"))
    );
}

#[test]
fn test_created_root_replaces_plain_root() {
    let mut project = project();
    project.add_root(dir_root("lib", "/a"));
    project.add_created_root(dir_root("lib", "/new"));

    let roots = project.roots();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].is_pending_creation());
    assert_eq!(project.created_roots().count(), 1);
}

#[test]
fn test_created_root_gets_empty_payload() {
    let mut project = project();
    project.add_created_root(dir_root("fresh", "/fresh"));

    let root = project.root("fresh").unwrap();
    assert_eq!(root.pending_creation(), Some(&PendingCreation::new()));
}

#[test]
fn test_roots_order_plain_then_created() {
    let mut project = project();
    project.add_created_root(dir_root("alpha", "/alpha"));
    project.add_root(dir_root("zeta", "/zeta"));
    project
        .add_library_dependency("beta", "org.availlang:beta:1.0.0")
        .unwrap();

    let names: Vec<String> = project
        .roots()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(names, ["beta", "zeta", "alpha"]);
}

#[test]
fn test_dependency_root_location() {
    let mut project = project().with_roots_directory("/work/sample/roots");
    project
        .add_library_dependency("avail-stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();

    let roots = project.roots();
    insta::assert_snapshot!(
        roots[0].location().to_string(),
        @"jar:/work/sample/roots/avail-stdlib-2.0.0.jar"
    );
}

#[test]
fn test_declared_root_shadows_dependency_root() {
    let mut project = project();
    project.add_root(dir_root("avail-stdlib", "/checkout/stdlib"));
    project
        .add_library_dependency("avail-stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();

    let roots = project.roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].location().as_directory(), Some(Path::new("/checkout/stdlib")));
}

#[test]
fn test_add_library_dependency_replaces_by_name() {
    let mut project = project();
    project
        .add_library_dependency("stdlib", "org.availlang:avail-stdlib:1.0.0")
        .unwrap();
    project
        .add_library_dependency("json", "org.availlang:avail-json:1.0.0")
        .unwrap();
    let updated = project
        .add_library_dependency("stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap()
        .clone();

    assert_eq!(updated.version(), "2.0.0");
    let names: Vec<&str> = project.dependencies().iter().map(|d| d.name()).collect();
    assert_eq!(names, ["stdlib", "json"]);
}

#[test]
fn test_add_library_dependency_rejects_malformed() {
    let mut project = project();
    let err = project
        .add_library_dependency("broken", "org.availlang:avail-stdlib")
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidCoordinate { .. }));
    assert!(project.dependencies().is_empty());
}

#[test]
fn test_set_option() {
    let mut project = project();
    project.set_option(PackagingOption::ArtifactName("bundle".to_string()));
    project.set_option(PackagingOption::DigestAlgorithm(DigestAlgorithm::Sha384));
    project.set_option(PackagingOption::IncludeFile(FileInclusion::new(
        "/work/sample/LICENSE",
        "META-INF/",
    )));
    project.set_option(PackagingOption::IncludeDirectory(DirectoryInclusion::new(
        "/work/sample/docs",
        "/docs/",
    )));

    let options = project.options();
    assert_eq!(options.digest_algorithm, DigestAlgorithm::Sha384);
    assert_eq!(options.inclusions.files[0].entry_name(), "META-INF/LICENSE");
    assert_eq!(options.inclusions.directories[0].target, "docs");
    assert_eq!(
        options.output_path(),
        PathBuf::from("/work/sample/build/libs/bundle-1.0.0.jar")
    );
}

#[test]
fn test_output_path_without_version() {
    let project = AvailProject::new("sample", "/work/sample");
    assert_eq!(
        project.options().output_path(),
        PathBuf::from("/work/sample/build/libs/sample.jar")
    );
}

#[test]
fn test_file_inclusion_entry_name() {
    assert_eq!(FileInclusion::new("/x/README.md", "").entry_name(), "README.md");
    assert_eq!(
        FileInclusion::new("/x/README.md", "docs/guide.md").entry_name(),
        "docs/guide.md"
    );
    assert_eq!(
        FileInclusion::new("/x/README.md", "/docs/").entry_name(),
        "docs/README.md"
    );
}

#[test]
fn test_from_config() {
    let config = ConfigLoader::new()
        .with_project_dir("/work/sample")
        .add_toml_str(
            r#"
[project]
name = "sample"
version = "0.3.0"
runtime = "org.availlang:avail:2.0.0"

[roots.sample]
location = "src/avail/sample"
entry_points = ["Main"]

[roots.vendor]
location = "jar:vendor/lib.jar!/lib"

[create_roots.scratch]
modules = ["Scratch", "Scratch"]
packages = ["Experiments"]
module_header = "Copyright"

[dependencies]
avail-stdlib = "org.availlang:avail-stdlib:2.0.0"
"#,
        )
        .build()
        .unwrap();

    let project = AvailProject::from_config(&config).unwrap();

    assert_eq!(project.version(), "0.3.0");
    assert_eq!(project.runtime().map(|r| r.version()), Some("2.0.0"));
    assert_eq!(
        project.root("sample").unwrap().location(),
        &RootLocation::Directory(PathBuf::from("/work/sample/src/avail/sample"))
    );
    assert_eq!(
        project.root("vendor").unwrap().location().to_string(),
        "jar:/work/sample/vendor/lib.jar!/lib"
    );

    let scratch = project.root("scratch").unwrap();
    assert_eq!(
        scratch.location().as_directory(),
        Some(Path::new("/work/sample/roots/scratch"))
    );
    let creation = scratch.pending_creation().unwrap();
    assert_eq!(creation.modules().len(), 1);
    assert_eq!(creation.modules()[0].header(), Some("Copyright"));
    assert_eq!(creation.module_packages()[0].file_name(), "Experiments.avail");

    assert_eq!(
        project.options().output_path(),
        PathBuf::from("/work/sample/build/libs/sample-0.3.0.jar")
    );
}

#[test]
fn test_from_config_rejects_bad_location() {
    let config = ConfigLoader::new()
        .add_toml_str("[roots.empty]\nlocation = \"\"")
        .build()
        .unwrap();

    let err = AvailProject::from_config(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidLocation { root, .. }) if root == "empty"
    ));
}

#[test]
fn test_render() {
    let mut project = project().with_roots_directory("/work/sample/roots");
    project.add_root(
        dir_root("sample", "/work/sample/src")
            .with_entry_points(["Main".to_string()]),
    );
    let mut creation = PendingCreation::new();
    creation.add_module("Scratch", "avail");
    project.add_created_root(dir_root("scratch", "/work/sample/roots/scratch").with_creation(creation));
    project
        .add_library_dependency("avail-stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();

    insta::assert_snapshot!(project.render(), @r"
    Avail project sample 1.0.0
      directory:       /work/sample
      roots directory: /work/sample/roots

    Roots (3):
      avail-stdlib  jar:/work/sample/roots/avail-stdlib-2.0.0.jar  [avail]
      sample        file:/work/sample/src  [avail]  entry points: Main
      scratch       file:/work/sample/roots/scratch  [avail]  (to be created: 1 modules, 0 packages)

    Dependencies (1):
      avail-stdlib = org.availlang:avail-stdlib:2.0.0

    Packaging:
      artifact_type        = library
      digest_algorithm     = SHA-256
      implementation_title = sample
      output               = /work/sample/build/libs/sample-1.0.0.jar
    ");
}
