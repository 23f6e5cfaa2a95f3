// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Maven repository resolver.

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{DependencyResolver, Repository, artifact_path};
use crate::error::{NetworkError, PackError, Result};
use crate::model::LibraryDependency;
use crate::net::{Downloader, ProgressDisplay};

/// `true` if the repository answered that it does not have the file.
pub(super) fn is_missing(error: &PackError) -> bool {
    matches!(
        error,
        PackError::Network(network) if matches!(**network, NetworkError::HttpError { status: 404, .. })
    )
}

/// Fetches jars from Maven-layout repositories, tried in declaration order.
#[derive(Debug, Clone)]
pub struct MavenResolver {
    repositories: Vec<Repository>,
    cancel_token: CancellationToken,
    dry_run: bool,
    progress: ProgressDisplay,
}

impl MavenResolver {
    #[must_use]
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            cancel_token: CancellationToken::new(),
            dry_run: false,
            progress: ProgressDisplay::Bar,
        }
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, progress: ProgressDisplay) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    async fn fetch(&self, dependency: &LibraryDependency, destination: &Path) -> Result<PathBuf> {
        let target = dependency.resolved_file_path(destination);

        if target.is_file() {
            debug!(
                dependency = %dependency,
                path = %target.display(),
                "already resolved, reusing"
            );
            return Ok(target);
        }

        if self.dry_run {
            info!(
                dependency = %dependency,
                path = %target.display(),
                "[DRY-RUN] would resolve"
            );
            return Ok(target);
        }

        let relative = artifact_path(dependency);
        for repository in &self.repositories {
            if self.cancel_token.is_cancelled() {
                return Err(PackError::from(NetworkError::Interrupted).into());
            }

            match repository {
                Repository::Remote(base) => {
                    let url = format!("{base}/{relative}");
                    let result = Downloader::new()
                        .url(&url)
                        .file(&target)
                        .progress(self.progress)
                        .cancel_token(self.cancel_token.clone())
                        .download()
                        .await;
                    match result {
                        Ok(()) => {
                            info!(dependency = %dependency, url = %url, "downloaded");
                            return Ok(target);
                        }
                        Err(e) if is_missing(&e) => {
                            debug!(url = %url, "not in repository, trying next");
                        }
                        Err(e) => {
                            return Err(e).with_context(|| {
                                format!("failed to resolve {}", dependency.coordinate())
                            });
                        }
                    }
                }
                Repository::Local(dir) => {
                    let source = dir.join(&relative);
                    if !source.is_file() {
                        debug!(path = %source.display(), "not in repository, trying next");
                        continue;
                    }
                    tokio::fs::create_dir_all(destination)
                        .await
                        .with_context(|| format!("failed to create {}", destination.display()))?;
                    tokio::fs::copy(&source, &target).await.with_context(|| {
                        format!(
                            "failed to copy {} to {}",
                            source.display(),
                            target.display()
                        )
                    })?;
                    info!(dependency = %dependency, path = %source.display(), "copied");
                    return Ok(target);
                }
            }
        }

        Err(PackError::from(NetworkError::NotFound {
            coordinate: dependency.coordinate(),
        })
        .into())
    }
}

impl DependencyResolver for MavenResolver {
    fn resolve<'a>(
        &'a self,
        dependency: &'a LibraryDependency,
        destination: &'a Path,
    ) -> BoxFuture<'a, Result<PathBuf>> {
        Box::pin(self.fetch(dependency, destination))
    }
}
