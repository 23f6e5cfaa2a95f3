// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for dependency resolution against mocked Maven
//! repositories.

use std::io::{Cursor, Write};
use std::sync::Arc;

use avail_pack::error::{NetworkError, PackError};
use avail_pack::model::{LibraryDependency, Root, RootLocation};
use avail_pack::project::{AvailProject, PackagingOption};
use avail_pack::resolve::{
    DependencyResolver, LatestVersionSource, MavenMetadataSource, MavenResolver, Repository,
    check_updates,
};
use avail_pack::task::tasks::package::PackageArtifactTask;
use avail_pack::task::{Task, TaskContext};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;

const STDLIB_JAR: &str = "/org/availlang/avail-stdlib/2.0.0/avail-stdlib-2.0.0.jar";

fn stdlib() -> LibraryDependency {
    LibraryDependency::parse("avail-stdlib", "org.availlang:avail-stdlib:2.0.0").unwrap()
}

/// A jar holding a single module under `avail-stdlib/`.
fn jar_bytes() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("avail-stdlib/Avail.avail", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"Module \"Avail\"").unwrap();
    zip.finish().unwrap().into_inner()
}

async fn mount_jar(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(STDLIB_JAR))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(jar_bytes()))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolver_downloads_into_roots_directory() {
    let server = MockServer::start().await;
    mount_jar(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let roots = dir.path().join("roots");
    let resolver = MavenResolver::new(vec![Repository::Remote(server.uri())]);

    let path = resolver.resolve(&stdlib(), &roots).await.unwrap();
    assert_eq!(path, roots.join("avail-stdlib-2.0.0.jar"));
    assert_eq!(std::fs::read(&path).unwrap(), jar_bytes());

    // Second resolution reuses the file; the mock expects exactly one GET.
    let again = resolver.resolve(&stdlib(), &roots).await.unwrap();
    assert_eq!(again, path);
}

#[tokio::test]
async fn test_resolver_falls_through_missing_repository() {
    let empty = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&empty)
        .await;
    let server = MockServer::start().await;
    mount_jar(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let resolver = MavenResolver::new(vec![
        Repository::Remote(empty.uri()),
        Repository::Remote(server.uri()),
    ]);

    let path = resolver.resolve(&stdlib(), dir.path()).await.unwrap();
    assert!(path.is_file());
}

#[tokio::test]
async fn test_resolver_not_found_anywhere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resolver = MavenResolver::new(vec![Repository::Remote(server.uri())]);

    let err = resolver.resolve(&stdlib(), dir.path()).await.unwrap_err();
    match err.downcast_ref::<PackError>() {
        Some(PackError::Network(boxed)) => assert!(matches!(
            **boxed,
            NetworkError::NotFound { ref coordinate } if coordinate == "org.availlang:avail-stdlib:2.0.0"
        )),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert!(!dir.path().join("avail-stdlib-2.0.0.jar").exists());
}

#[tokio::test]
async fn test_resolver_server_error_is_fatal() {
    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(jar_bytes()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resolver = MavenResolver::new(vec![
        Repository::Remote(failing.uri()),
        Repository::Remote(server.uri()),
    ]);

    let err = resolver.resolve(&stdlib(), dir.path()).await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"failed to resolve org.availlang:avail-stdlib:2.0.0");
}

#[tokio::test]
async fn test_metadata_source_reads_release() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/org/availlang/avail/maven-metadata.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<metadata><versioning><latest>2.1.0-SNAPSHOT</latest>\
             <release>2.0.1</release></versioning></metadata>",
        ))
        .mount(&server)
        .await;

    let source = MavenMetadataSource::new(vec![Repository::Remote(server.uri())]);

    let latest = source.latest_version("org.availlang", "avail").await.unwrap();
    assert_eq!(latest.as_deref(), Some("2.0.1"));

    let unknown = source.latest_version("org.availlang", "nope").await.unwrap();
    assert_eq!(unknown, None);
}

#[tokio::test]
async fn test_check_updates_against_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/org/availlang/avail/maven-metadata.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<release>1.6.1</release>"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/org/availlang/avail-stdlib/maven-metadata.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<release>2.0.0</release>"),
        )
        .mount(&server)
        .await;

    let mut project = AvailProject::new("sample", "/work/sample");
    project.set_runtime(Some(
        LibraryDependency::parse("avail-runtime", "org.availlang:avail:1.6.0").unwrap(),
    ));
    project
        .add_library_dependency("stdlib", "org.availlang:avail-stdlib:2.0.0")
        .unwrap();

    let source = MavenMetadataSource::new(vec![Repository::Remote(server.uri())]);
    let advisories = check_updates(&project, &source).await;

    let lines: Vec<String> = advisories.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @"avail-runtime (org.availlang:avail) 1.6.0 -> 1.6.1");
}

#[tokio::test]
async fn test_package_task_embeds_downloaded_dependency() {
    let server = MockServer::start().await;
    mount_jar(&server).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("src/app")).unwrap();
    std::fs::write(dir.path().join("src/app/App.avail"), "Module \"App\"").unwrap();

    let mut project = AvailProject::new("app", dir.path()).with_version("1.0.0");
    project.add_root(Root::new(
        "app",
        RootLocation::Directory(dir.path().join("src/app")),
    ));
    project.set_repositories(vec![Repository::Remote(server.uri())]);
    project.set_option(PackagingOption::Embed(stdlib()));

    let ctx = TaskContext::new(Arc::new(project), CancellationToken::new());
    Task::Package(PackageArtifactTask::new())
        .run(&ctx)
        .await
        .unwrap();

    assert!(dir.path().join("roots/avail-stdlib-2.0.0.jar").is_file());

    let output = dir.path().join("build/libs/app-1.0.0.jar");
    let mut archive = zip::ZipArchive::new(std::fs::File::open(output).unwrap()).unwrap();
    assert!(archive.by_name("app/App.avail").is_ok());
    assert!(archive.by_name("avail-stdlib/Avail.avail").is_ok());
}
