// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use super::TaskManager;
use crate::model::{PendingCreation, Root, RootLocation};
use crate::project::AvailProject;
use crate::task::Task;
use crate::task::tasks::init_roots::InitRootsTask;

fn test_project() -> Arc<AvailProject> {
    Arc::new(AvailProject::new("sample", "/work/sample"))
}

#[test]
fn test_task_manager_new() {
    let manager = TaskManager::new(test_project());

    assert_eq!(manager.task_count(), 0);
    assert!(!manager.is_cancelled());
    assert!(!manager.is_dry_run());
}

#[test]
fn test_task_manager_add_keeps_order() {
    let mut manager = TaskManager::new(test_project());
    for name in ["print-config", "init-roots", "package"] {
        manager.add(Task::from_name(name).unwrap());
    }

    insta::assert_snapshot!(manager.task_names().join(" "), @"print-config init-roots package");
}

#[test]
fn test_task_manager_interrupt() {
    let manager = TaskManager::new(test_project());

    assert!(!manager.is_cancelled());
    manager.interrupt_all();
    assert!(manager.is_cancelled());
}

#[tokio::test]
async fn test_task_manager_run_empty() {
    TaskManager::new(test_project()).run_all().await.unwrap();
}

#[tokio::test]
async fn test_task_manager_run_cancelled() {
    let mut manager = TaskManager::new(test_project());
    manager.add(Task::from_name("print-config").unwrap());
    manager.interrupt_all();

    let result = manager.run_all().await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("interrupted"));
}

#[tokio::test]
async fn test_task_manager_runs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut project = AvailProject::new("sample", dir.path());
    let mut creation = PendingCreation::new();
    creation.add_module("Scratch", "avail");
    project.add_created_root(
        Root::new("scratch", RootLocation::Directory(dir.path().join("roots/scratch")))
            .with_creation(creation),
    );

    let mut manager = TaskManager::new(Arc::new(project));
    manager.add(Task::InitRoots(InitRootsTask::new()));
    manager.add(Task::from_name("package").unwrap());
    manager.run_all().await.unwrap();

    // The package task sees the root the first task created.
    let output = dir.path().join("build/libs/sample.jar");
    let file = std::fs::File::open(output).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("scratch/Scratch.avail").is_ok());
}

#[tokio::test]
async fn test_task_manager_failure_names_task() {
    let mut manager = TaskManager::new(test_project());
    manager.add(Task::InitRoots(
        InitRootsTask::new().with_roots(["ghost".to_string()]),
    ));

    let err = manager.run_all().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Task 'init-roots' failed");
}
