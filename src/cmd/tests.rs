// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::package::{InitArgs, PackageArgs};
use crate::cli::run::{ListArgs, RunArgs};
use crate::cmd::list::list_lines;
use crate::cmd::outdated::format_advisories;
use crate::cmd::package::{run_init_command, run_package_command};
use crate::cmd::run::{resolve_tasks, run_tasks_command};
use crate::config::types::Aliases;
use crate::model::version::VersionFamily;
use crate::model::{PendingCreation, Root, RootLocation};
use crate::project::AvailProject;
use crate::resolve::UpdateAdvisory;
use crate::task::Taskable;

fn aliases() -> Aliases {
    let mut aliases = BTreeMap::new();
    aliases.insert(
        "release".to_string(),
        vec!["init-roots".to_string(), "package".to_string()],
    );
    aliases
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// A project with one existing root and one root still to be created.
fn project(base: &Path) -> AvailProject {
    std::fs::create_dir_all(base.join("src/lib")).unwrap();
    std::fs::write(base.join("src/lib/Main.avail"), "Module \"Main\"").unwrap();

    let mut project = AvailProject::new("sample", base);
    project.add_root(Root::new("lib", RootLocation::Directory(base.join("src/lib"))));
    let mut creation = PendingCreation::new();
    creation.add_module("Scratch", "avail");
    project.add_created_root(
        Root::new("scratch", RootLocation::Directory(base.join("roots/scratch")))
            .with_creation(creation),
    );
    project
}

#[test]
fn test_resolve_tasks_alias_and_glob() {
    let tasks = resolve_tasks(&aliases(), &strings(&["release", "print-*"])).unwrap();

    let names: Vec<_> = tasks.iter().map(Taskable::name).collect();
    assert_eq!(names, ["init-roots", "package", "print-config"]);
}

#[test]
fn test_resolve_tasks_nothing_matched() {
    let err = resolve_tasks(&aliases(), &strings(&["deploy"])).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"No tasks matched: deploy");
}

#[test]
fn test_list_all_tasks() {
    let lines = list_lines(&ListArgs::default(), &aliases()).unwrap();
    insta::assert_snapshot!(lines.join("\n"), @r"
    check-updates
    init-roots
    package
    print-config
    ");
}

#[test]
fn test_list_resolved_patterns() {
    let args = ListArgs {
        all: true,
        aliases: false,
        tasks: strings(&["release"]),
    };
    let lines = list_lines(&args, &aliases()).unwrap();
    assert_eq!(lines, ["init-roots", "package"]);
}

#[test]
fn test_list_aliases() {
    let args = ListArgs {
        aliases: true,
        ..ListArgs::default()
    };
    let lines = list_lines(&args, &aliases()).unwrap();
    insta::assert_snapshot!(lines.join("\n"), @"release = init-roots, package");

    let lines = list_lines(&args, &BTreeMap::new()).unwrap();
    assert_eq!(lines, ["No aliases defined"]);
}

#[test]
fn test_format_advisories() {
    assert_eq!(format_advisories(&[]), ["All dependencies are up to date"]);

    let advisory = UpdateAdvisory {
        name: "stdlib".to_string(),
        group: "org.availlang".to_string(),
        artifact: "avail-stdlib".to_string(),
        current: "2.0.0".to_string(),
        latest: "2.1.0".to_string(),
        family: VersionFamily::Library,
    };
    insta::assert_snapshot!(
        format_advisories(&[advisory]).join("\n"),
        @"stdlib (org.availlang:avail-stdlib) 2.0.0 -> 2.1.0"
    );
}

#[tokio::test]
async fn test_init_command_creates_named_root() {
    let dir = tempfile::tempdir().unwrap();
    let args = InitArgs {
        roots: strings(&["scratch"]),
    };

    run_init_command(&args, project(dir.path()), false)
        .await
        .unwrap();

    assert!(dir.path().join("roots/scratch/Scratch.avail").is_file());
}

#[tokio::test]
async fn test_package_command_with_init() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out/sample.jar");
    let args = PackageArgs {
        output: Some(output.clone()),
        init: true,
    };

    run_package_command(&args, project(dir.path()), false)
        .await
        .unwrap();

    let file = std::fs::File::open(&output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("lib/Main.avail").is_ok());
    assert!(archive.by_name("scratch/Scratch.avail").is_ok());
}

#[tokio::test]
async fn test_run_command_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        tasks: strings(&["release"]),
    };

    run_tasks_command(&args, project(dir.path()), &aliases(), true)
        .await
        .unwrap();

    assert!(!dir.path().join("roots").exists());
    assert!(!dir.path().join("build").exists());
}
