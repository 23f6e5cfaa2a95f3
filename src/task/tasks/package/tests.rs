// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

use super::PackageArtifactTask;
use crate::error::Result;
use crate::model::{LibraryDependency, Root, RootLocation};
use crate::project::{AvailProject, PackagingOption};
use crate::resolve::DependencyResolver;
use crate::task::{Task, TaskContext};

/// Writes a one-entry jar per request and records what was asked for.
#[derive(Default)]
struct RecordingResolver {
    requests: Mutex<Vec<String>>,
}

impl DependencyResolver for RecordingResolver {
    fn resolve<'a>(
        &'a self,
        dependency: &'a LibraryDependency,
        destination: &'a Path,
    ) -> BoxFuture<'a, Result<PathBuf>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(dependency.coordinate());
            let path = dependency.resolved_file_path(destination);
            if !path.exists() {
                std::fs::create_dir_all(destination)?;
                let mut zip = zip::ZipWriter::new(File::create(&path)?);
                zip.start_file(
                    format!("{}/Module.avail", dependency.artifact()),
                    SimpleFileOptions::default(),
                )?;
                zip.write_all(b"Module \"Module\"")?;
                zip.finish()?;
            }
            Ok(path)
        })
    }
}

fn project(base: &Path) -> AvailProject {
    std::fs::create_dir_all(base.join("src/lib")).unwrap();
    std::fs::write(base.join("src/lib/Main.avail"), "Module \"Main\"").unwrap();

    let mut project = AvailProject::new("sample", base).with_version("0.1.0");
    project.add_root(Root::new("lib", RootLocation::Directory(base.join("src/lib"))));
    project
        .add_library_dependency("stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();
    project.set_option(PackagingOption::Embed(
        LibraryDependency::parse("avail-json", "org.availlang:avail-json:1.2.0").unwrap(),
    ));
    project
}

fn names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn test_package_task_resolves_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Arc::new(RecordingResolver::default());
    let ctx = TaskContext::new(Arc::new(project(dir.path())), CancellationToken::new())
        .with_resolver(resolver.clone());

    Task::Package(PackageArtifactTask::new())
        .run(&ctx)
        .await
        .unwrap();

    insta::assert_snapshot!(resolver.requests.lock().unwrap().join("\n"), @r"
    org.availlang:avail-stdlib:2.0.0
    org.availlang:avail-json:1.2.0
    org.availlang:avail-json:1.2.0
    ");

    let output = dir.path().join("build/libs/sample-0.1.0.jar");
    let entries = names(&output);
    assert!(entries.contains(&"lib/Main.avail".to_string()));
    assert!(entries.contains(&"avail-json/Module.avail".to_string()));
    assert!(!entries.contains(&"avail-stdlib/Module.avail".to_string()));
}

#[tokio::test]
async fn test_package_task_output_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("dist/custom.jar");
    let ctx = TaskContext::new(Arc::new(project(dir.path())), CancellationToken::new())
        .with_resolver(Arc::new(RecordingResolver::default()));

    let task = PackageArtifactTask::new().with_output(Some(output.clone()));
    assert_eq!(task.packager(&ctx).output_path(), output);
    Task::Package(task).run(&ctx).await.unwrap();

    assert!(output.is_file());
    assert!(!dir.path().join("build").exists());
}

#[tokio::test]
async fn test_package_task_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = TaskContext::new(Arc::new(project(dir.path())), CancellationToken::new())
        .with_dry_run(true);

    Task::Package(PackageArtifactTask::new())
        .run(&ctx)
        .await
        .unwrap();

    assert!(!dir.path().join("build").exists());
    assert!(!dir.path().join("roots").exists());
}

#[tokio::test]
async fn test_package_task_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancellationToken::new();
    let ctx = TaskContext::new(Arc::new(project(dir.path())), token.clone())
        .with_resolver(Arc::new(RecordingResolver::default()));
    token.cancel();

    let err = Task::Package(PackageArtifactTask::new())
        .run(&ctx)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("interrupted"));
    assert!(!dir.path().join("build").exists());
}
