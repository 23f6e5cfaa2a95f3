// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact packaging task.
//!
//! ```text
//! PackageArtifactTask
//!   Fetch: resolve [dependencies] and artifact.embed into the roots directory
//!   Run:   resolve embeds (reused) --> ArtifactPackager::package (blocking thread)
//! ```

use std::path::PathBuf;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use crate::artifact::ArtifactPackager;
use crate::error::Result;
use crate::resolve::resolve_all;
use crate::task::{TaskContext, Taskable};

/// Writes the project's artifact.
#[derive(Debug, Clone)]
pub struct PackageArtifactTask {
    name: String,
    /// Replaces the configured output path.
    output: Option<PathBuf>,
}

impl Default for PackageArtifactTask {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageArtifactTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "package".to_string(),
            output: None,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The packager this task drives.
    #[must_use]
    pub fn packager(&self, ctx: &TaskContext) -> ArtifactPackager {
        let packager = ArtifactPackager::for_project(ctx.project());
        match &self.output {
            Some(output) => packager.with_output_path(output),
            None => packager,
        }
    }

    /// Execute the fetch phase.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency cannot be resolved.
    pub async fn do_fetch(&self, ctx: &TaskContext) -> Result<()> {
        let project = ctx.project();
        let roots_dir = project.roots_directory();

        resolve_all(ctx.resolver(), project.dependencies(), roots_dir).await?;
        resolve_all(ctx.resolver(), &project.options().embed, roots_dir).await?;
        Ok(())
    }

    /// Execute the run phase.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded dependency cannot be resolved or the
    /// artifact cannot be written.
    pub async fn do_run(&self, ctx: &TaskContext) -> Result<()> {
        let project = ctx.project();
        let embedded = resolve_all(
            ctx.resolver(),
            &project.options().embed,
            project.roots_directory(),
        )
        .await?;

        let packager = self.packager(ctx);
        if ctx.is_dry_run() {
            info!(
                path = %packager.output_path().display(),
                roots = packager.roots().len(),
                embedded = embedded.len(),
                "[DRY-RUN] would write artifact"
            );
            return Ok(());
        }

        let output = tokio::task::spawn_blocking(move || packager.package(&embedded))
            .await
            .context("packaging thread panicked")??;
        info!(path = %output.display(), "artifact ready");
        Ok(())
    }
}

impl Taskable for PackageArtifactTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_fetch(ctx))
    }

    fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_run(ctx))
    }
}

#[cfg(test)]
mod tests;
