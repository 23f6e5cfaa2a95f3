// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["avail-pack", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "avail-pack",
        "-l",
        "5",
        "-C",
        "/work/sample",
        "--dry",
        "--ini",
        "ci.toml",
        "--set",
        "project.version=2.0.0",
        "package",
    ])
    .unwrap();

    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.project_dir(), Path::new("/work/sample"));
    assert_eq!(
        cli.global.default_config_file(),
        PathBuf::from("/work/sample/avail.toml")
    );
    assert_eq!(cli.global.inis, [PathBuf::from("ci.toml")]);
    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    project.version=2.0.0
    global.output_log_level=5
    global.file_log_level=5
    global.dry=true
    ");
}

#[test]
fn test_project_dir_defaults_to_current() {
    let cli = Cli::try_parse_from(["avail-pack", "config"]).unwrap();

    assert_eq!(cli.global.project_dir(), Path::new("."));
    assert!(cli.global.to_config_overrides().is_empty());
}

#[test]
fn test_file_log_level_overrides_log_level() {
    let cli = Cli::try_parse_from([
        "avail-pack",
        "--log-level",
        "2",
        "--file-log-level",
        "6",
        "--log-file",
        "pack.log",
        "inis",
    ])
    .unwrap();

    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    global.output_log_level=2
    global.file_log_level=6
    global.log_file=pack.log
    ");
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["avail-pack", "-l", "7", "config"]).is_err());
}

#[test]
fn test_parse_init_roots() {
    let cli = Cli::try_parse_from(["avail-pack", "init", "scratch", "tests"]).unwrap();
    let Some(Command::Init(args)) = cli.command else {
        panic!("expected init");
    };
    assert_eq!(args.roots, ["scratch", "tests"]);
}

#[test]
fn test_parse_package_output() {
    let cli =
        Cli::try_parse_from(["avail-pack", "package", "--output", "dist/lib.jar", "--init"])
            .unwrap();
    let Some(Command::Package(args)) = cli.command else {
        panic!("expected package");
    };
    assert_eq!(args.output, Some(PathBuf::from("dist/lib.jar")));
    assert!(args.init);
}

#[test]
fn test_parse_run_requires_tasks() {
    assert!(Cli::try_parse_from(["avail-pack", "run"]).is_err());

    let cli = Cli::try_parse_from(["avail-pack", "run", "init-*", "package"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.tasks, ["init-*", "package"]);
}

#[test]
fn test_parse_list() {
    let cli = Cli::try_parse_from(["avail-pack", "list", "--aliases"]).unwrap();
    let Some(Command::List(args)) = cli.command else {
        panic!("expected list");
    };
    assert!(args.aliases);
    assert!(!args.all);
}

#[test]
fn test_parse_outdated() {
    let cli = Cli::try_parse_from(["avail-pack", "outdated"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Outdated)));
}
