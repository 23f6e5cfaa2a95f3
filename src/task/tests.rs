// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::{Phase, Task, TaskContext, Taskable};
use crate::error::Result;
use crate::model::LibraryDependency;
use crate::project::AvailProject;
use crate::resolve::LatestVersionSource;

fn test_project() -> Arc<AvailProject> {
    Arc::new(AvailProject::new("sample", "/work/sample"))
}

#[test]
fn test_phase_all() {
    let names: Vec<_> = Phase::all().iter().map(Phase::name).collect();
    assert_eq!(names, ["fetch", "run"]);
}

#[test]
fn test_task_context_creation() {
    let ctx = TaskContext::new(test_project(), CancellationToken::new());

    assert!(!ctx.is_dry_run());
    assert!(!ctx.is_cancelled());
    assert_eq!(ctx.project().name(), "sample");
}

#[test]
fn test_task_context_cancellation() {
    let token = CancellationToken::new();
    let ctx = TaskContext::new(test_project(), token.clone());

    assert!(!ctx.is_cancelled());
    token.cancel();
    assert!(ctx.is_cancelled());
}

#[test]
fn test_task_from_name() {
    for name in Task::NAMES {
        let task = Task::from_name(name).unwrap();
        assert_eq!(task.name(), *name);
    }
    assert!(Task::from_name("deploy").is_none());
}

#[tokio::test]
async fn test_print_config_runs() {
    let ctx = TaskContext::new(test_project(), CancellationToken::new());
    Task::from_name("print-config")
        .unwrap()
        .run(&ctx)
        .await
        .unwrap();
}

/// Counts lookups and always answers with a fixed version.
struct CountingSource {
    latest: &'static str,
    calls: AtomicUsize,
}

impl LatestVersionSource for CountingSource {
    fn latest_version<'a>(
        &'a self,
        _group: &'a str,
        _artifact: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(std::future::ready(Ok(Some(self.latest.to_string()))))
    }
}

#[tokio::test]
async fn test_check_updates_task_uses_version_source() {
    let mut project = AvailProject::new("sample", "/work/sample");
    project.set_runtime(Some(
        LibraryDependency::parse("avail-runtime", "org.availlang:avail:2.0.0").unwrap(),
    ));
    project
        .add_library_dependency("stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();

    let source = Arc::new(CountingSource {
        latest: "not.a.version",
        calls: AtomicUsize::new(0),
    });
    let ctx = TaskContext::new(Arc::new(project), CancellationToken::new())
        .with_version_source(source.clone());

    // Unparsable answers are only logged.
    Task::from_name("check-updates")
        .unwrap()
        .run(&ctx)
        .await
        .unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_check_updates_task_skips_without_dependencies() {
    let source = Arc::new(CountingSource {
        latest: "9.9.9",
        calls: AtomicUsize::new(0),
    });
    let ctx = TaskContext::new(test_project(), CancellationToken::new())
        .with_version_source(source.clone());

    Task::from_name("check-updates")
        .unwrap()
        .run(&ctx)
        .await
        .unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cancelled_task_does_not_run() {
    let token = CancellationToken::new();
    token.cancel();
    let ctx = TaskContext::new(test_project(), token);

    let err = Task::from_name("print-config")
        .unwrap()
        .run(&ctx)
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"task error: task 'print-config' was interrupted");
}
