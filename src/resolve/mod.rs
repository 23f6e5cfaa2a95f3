// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency resolution.
//!
//! ```text
//! LibraryDependency ("org.availlang:avail-stdlib:2.0.0")
//!        |
//!        v
//! DependencyResolver::resolve(dep, roots_dir)
//!        |          MavenResolver: reuse existing file, else try
//!        |          each Repository in order
//!        |            Remote  GET <url>/org/availlang/avail-stdlib/2.0.0/avail-stdlib-2.0.0.jar
//!        |            Local   copy <dir>/org/availlang/...
//!        v
//! <roots_dir>/avail-stdlib-2.0.0.jar
//!
//! LatestVersionSource::latest_version(group, artifact)
//!        MavenMetadataSource: maven-metadata.xml <release>, then <latest>
//! check_updates(project, source) -> advisories (logged, never fatal)
//! ```
//!
//! Only direct coordinates are resolved; there is no transitive resolution
//! and no conflict handling.

pub mod maven;
pub mod metadata;
pub mod updates;

use std::fmt;
use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::model::LibraryDependency;

pub use maven::MavenResolver;
pub use metadata::{LatestVersionSource, MavenMetadataSource, parse_latest_version};
pub use updates::{UpdateAdvisory, check_updates};

/// Turns a coordinate into a file on disk.
///
/// Packaging only depends on this trait, so tests and other front ends can
/// hand over files from anywhere.
pub trait DependencyResolver: Send + Sync {
    /// Makes `dependency` available below `destination` and returns its path.
    fn resolve<'a>(
        &'a self,
        dependency: &'a LibraryDependency,
        destination: &'a Path,
    ) -> BoxFuture<'a, Result<PathBuf>>;
}

/// Resolves each dependency in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first resolution error.
pub async fn resolve_all(
    resolver: &dyn DependencyResolver,
    dependencies: &[LibraryDependency],
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
        resolved.push(resolver.resolve(dependency, destination).await?);
    }
    Ok(resolved)
}

/// A Maven-layout repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    /// `http://` or `https://` base URL, without trailing slash.
    Remote(String),
    /// Directory on disk.
    Local(PathBuf),
}

impl Repository {
    /// Interprets a repository string; relative local paths resolve against
    /// `base_dir`.
    #[must_use]
    pub fn parse(spec: &str, base_dir: &Path) -> Self {
        let spec = spec.trim();
        if spec.starts_with("http://") || spec.starts_with("https://") {
            return Self::Remote(spec.trim_end_matches('/').to_string());
        }
        let path = spec
            .strip_prefix("file://")
            .or_else(|| spec.strip_prefix("file:"))
            .unwrap_or(spec);
        Self::Local(base_dir.join(path))
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "file:{}", path.display()),
        }
    }
}

/// `org/availlang/avail-stdlib`
#[must_use]
pub fn module_path(group: &str, artifact: &str) -> String {
    format!("{}/{artifact}", group.replace('.', "/"))
}

/// `org/availlang/avail-stdlib/2.0.0/avail-stdlib-2.0.0.jar`
#[must_use]
pub fn artifact_path(dependency: &LibraryDependency) -> String {
    format!(
        "{}/{}/{}",
        module_path(dependency.group(), dependency.artifact()),
        dependency.version(),
        dependency.jar_file_name()
    )
}
